//! Renders the mounted project form element.

use super::text_input::TextInputWidget;
use crate::ui::document::{Element, Tag};
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Paragraph},
};

/// Height of one labelled input box
const FIELD_HEIGHT: u16 = 3;

/// Rows needed to draw a form with `fields` inputs plus its button
pub fn form_height(fields: usize) -> u16 {
    FIELD_HEIGHT * fields as u16 + 3
}

/// A label and the input element it describes
struct Field<'a> {
    label: &'a str,
    input: &'a Element,
}

/// Widget for the project form
pub struct ProjectFormWidget<'a> {
    form: &'a Element,
    /// Id of the focused input, if the form has focus
    focused: Option<&'a str>,
}

impl<'a> ProjectFormWidget<'a> {
    /// Create a widget for the mounted form element
    pub fn new(form: &'a Element) -> Self {
        Self {
            form,
            focused: None,
        }
    }

    /// Field whose input gets the cursor
    pub fn focused(mut self, field_id: Option<&'a str>) -> Self {
        self.focused = field_id;
        self
    }

    /// Pair every input with the label that precedes it in its container
    fn fields(&self) -> Vec<Field<'a>> {
        let mut fields = Vec::new();
        collect_fields(self.form, &mut fields);
        fields
    }

    fn button_text(&self) -> &'a str {
        self.form
            .query_tag(Tag::Button)
            .map(|b| b.text.as_str())
            .unwrap_or("Submit")
    }
}

fn collect_fields<'a>(element: &'a Element, out: &mut Vec<Field<'a>>) {
    let mut label = "";
    for child in &element.children {
        match child.tag {
            Tag::Label => label = child.text.as_str(),
            Tag::Input => out.push(Field {
                label,
                input: child,
            }),
            _ => collect_fields(child, out),
        }
    }
}

impl Widget for ProjectFormWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let focused_form = self.focused.is_some();
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(if focused_form {
                Style::default().fg(Color::Cyan)
            } else {
                Style::default().fg(Color::DarkGray)
            })
            .title(" New Project ");

        let inner = block.inner(area);
        block.render(area, buf);

        let fields = self.fields();
        let mut constraints: Vec<Constraint> = fields
            .iter()
            .map(|_| Constraint::Length(FIELD_HEIGHT))
            .collect();
        constraints.push(Constraint::Length(1));
        constraints.push(Constraint::Min(0));
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints(constraints)
            .split(inner);

        for (field, row) in fields.iter().zip(rows.iter()) {
            let state = field.input.input.as_ref();
            let value = state.map(|s| s.value()).unwrap_or("");
            let cursor = state.map(|s| s.cursor).unwrap_or(0);
            let is_focused = field.input.id.is_some() && field.input.id.as_deref() == self.focused;

            TextInputWidget::new(value, cursor)
                .title(field.label)
                .focused(is_focused)
                .render(*row, buf);
        }

        let button_style = if focused_form {
            Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        Paragraph::new(format!("[ {} ]", self.button_text()))
            .style(button_style)
            .alignment(Alignment::Center)
            .render(rows[fields.len()], buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::templates::project_input_template;
    use ratatui::{backend::TestBackend, Terminal};

    fn buffer_text(buf: &Buffer) -> String {
        buf.content().iter().map(|c| c.symbol()).collect()
    }

    #[test]
    fn test_fields_follow_labels() {
        let form = project_input_template();
        let widget = ProjectFormWidget::new(&form);
        let labels: Vec<_> = widget.fields().iter().map(|f| f.label).collect();
        assert_eq!(labels, vec!["Title", "Description", "People"]);
    }

    #[test]
    fn test_render_shows_values_and_button() {
        let mut form = project_input_template();
        form.find_mut("title")
            .and_then(|el| el.input.as_mut())
            .unwrap()
            .set_value("Build API");

        let backend = TestBackend::new(40, form_height(3));
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|f| {
                f.render_widget(
                    ProjectFormWidget::new(&form).focused(Some("description")),
                    f.area(),
                )
            })
            .unwrap();

        let text = buffer_text(terminal.backend().buffer());
        assert!(text.contains("Build API"));
        assert!(text.contains("Description"));
        assert!(text.contains("[ ADD PROJECT ]"));
    }
}
