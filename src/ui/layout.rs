//! Main layout rendering for the TUI.

use crate::app::{App, AppView, Focus};
use crate::domain::ProjectStatus;
use crate::ui::components::project_input::{FormField, FORM_ELEMENT_ID};
use crate::ui::components::project_list::panel_element_id;
use crate::ui::document::Document;
use crate::ui::widgets::help::HelpWidget;
use crate::ui::widgets::project_form::{form_height, ProjectFormWidget};
use crate::ui::widgets::project_panel::ProjectPanelWidget;
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};

/// Draw the main application UI
pub fn draw(frame: &mut Frame, app: &mut App) {
    let area = frame.area();

    match app.view {
        AppView::Board => draw_board(frame, app, area),
        AppView::Help => draw_help(frame, app, area),
    }

    // Alerts block everything, including help
    let document = app.document.clone();
    let doc = document.borrow();
    if let Some(message) = doc.pending_alert() {
        draw_alert_overlay(frame, message, area);
    }
}

/// Draw the form above the two project panels
fn draw_board(frame: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),                                // Header
            Constraint::Length(form_height(FormField::ALL.len())), // Form
            Constraint::Min(0),                                   // Panels
            Constraint::Length(3),                                // Footer
        ])
        .split(area);

    let header = Paragraph::new(format!(
        "project-board - {} active, {} finished",
        app.store.projects_with_status(ProjectStatus::Active).len(),
        app.store.projects_with_status(ProjectStatus::Finished).len(),
    ))
    .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
    .block(Block::default().borders(Borders::BOTTOM));
    frame.render_widget(header, chunks[0]);

    let doc = app.document.borrow();
    draw_form(frame, app, &doc, chunks[1]);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(chunks[2]);
    for (status, column) in ProjectStatus::ALL.into_iter().zip(columns.iter()) {
        draw_panel(frame, app, &doc, status, *column);
    }

    let footer = Paragraph::new(footer_text(app))
        .style(Style::default().fg(Color::DarkGray))
        .block(Block::default().borders(Borders::TOP));
    frame.render_widget(footer, chunks[3]);
}

fn draw_form(frame: &mut Frame, app: &App, doc: &Document, area: Rect) {
    let Some(form) = doc.get_element(FORM_ELEMENT_ID) else {
        return;
    };
    let focused = match app.focus {
        Focus::Form(field) => Some(field.element_id()),
        Focus::Panel(_) => None,
    };
    frame.render_widget(ProjectFormWidget::new(form).focused(focused), area);
}

fn draw_panel(frame: &mut Frame, app: &App, doc: &Document, status: ProjectStatus, area: Rect) {
    let Some(panel) = doc.get_element(&panel_element_id(status)) else {
        return;
    };
    let widget = ProjectPanelWidget::new(panel)
        .focused(app.focus == Focus::Panel(status))
        .selected(app.selected_index(status))
        .dragging(app.drag.as_ref().map(|d| d.source_id()));
    frame.render_widget(widget, area);
}

/// Key hints for whatever currently has focus
fn footer_text(app: &App) -> &'static str {
    match (app.focus, app.drag.is_some()) {
        (Focus::Form(_), _) => {
            " ↑/↓: Field | Enter: Add project | Tab: Panels | Esc: Leave form | Ctrl+C: Quit "
        }
        (Focus::Panel(_), true) => " h/l: Carry to panel | Enter/Space: Drop | Esc: Cancel drag ",
        (Focus::Panel(_), false) => {
            " j/k: Select | Space: Drag | h/l: Panel | n: New | Tab: Focus | ?: Help | q: Quit "
        }
    }
}

fn draw_help(frame: &mut Frame, app: &mut App, area: Rect) {
    let help_widget = HelpWidget::new(&mut app.help_view_state);
    frame.render_widget(help_widget, area);
}

/// Draw a blocking alert with its dismiss hint
fn draw_alert_overlay(frame: &mut Frame, message: &str, area: Rect) {
    let popup_area = centered_rect(50, 20, area);
    frame.render_widget(Clear, popup_area);

    let text = vec![
        Line::from(message.to_string()),
        Line::from(""),
        Line::from(Span::styled(
            "Press Enter or Esc",
            Style::default().fg(Color::DarkGray),
        )),
    ];
    let alert = Paragraph::new(text)
        .style(Style::default().fg(Color::Red))
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Red))
                .title(" Alert "),
        )
        .wrap(Wrap { trim: true });

    frame.render_widget(alert, popup_area);
}

/// Create a centered rectangle
pub fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
