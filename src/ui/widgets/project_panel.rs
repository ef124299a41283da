//! Project panel widget for one status column of the board.

use crate::ui::components::project_list::DROPPABLE_CLASS;
use crate::ui::document::{Element, Tag};
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap},
};

/// A rendered project card
#[derive(Debug, Clone, PartialEq, Eq)]
struct Card<'a> {
    id: &'a str,
    title: &'a str,
    assigned: &'a str,
    description: &'a str,
}

impl<'a> Card<'a> {
    fn from_element(li: &'a Element) -> Self {
        let text = move |tag: Tag| li.query_tag(tag).map(|e| e.text.as_str()).unwrap_or("");
        Self {
            id: li.id.as_deref().unwrap_or(""),
            title: text(Tag::H2),
            assigned: text(Tag::H3),
            description: text(Tag::P),
        }
    }
}

/// Widget for a mounted project list panel
pub struct ProjectPanelWidget<'a> {
    panel: &'a Element,
    selected: Option<usize>,
    focused: bool,
    /// Id of the card being dragged, wherever it is
    dragging: Option<&'a str>,
}

impl<'a> ProjectPanelWidget<'a> {
    /// Create a widget for a mounted panel element
    pub fn new(panel: &'a Element) -> Self {
        Self {
            panel,
            selected: None,
            focused: false,
            dragging: None,
        }
    }

    /// Highlight the card at this index
    pub fn selected(mut self, selected: Option<usize>) -> Self {
        self.selected = selected;
        self
    }

    /// Draw the border as focused
    pub fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }

    /// Card currently being dragged, drawn with a move marker
    pub fn dragging(mut self, source_id: Option<&'a str>) -> Self {
        self.dragging = source_id;
        self
    }

    fn heading(&self) -> &'a str {
        self.panel
            .query_tag(Tag::Header)
            .and_then(|h| h.query_tag(Tag::H2))
            .map(|h| h.text.as_str())
            .unwrap_or("")
    }

    fn list(&self) -> Option<&'a Element> {
        self.panel.query_tag(Tag::Ul)
    }

    /// Whether an acceptable drag is hovering over this panel
    fn is_droppable(&self) -> bool {
        self.list().is_some_and(|ul| ul.has_class(DROPPABLE_CLASS))
    }

    fn cards(&self) -> Vec<Card<'a>> {
        self.list()
            .map(|ul| {
                ul.children
                    .iter()
                    .filter(|c| c.tag == Tag::Li)
                    .map(Card::from_element)
                    .collect()
            })
            .unwrap_or_default()
    }

    fn build_items(&self) -> Vec<ListItem<'a>> {
        self.cards()
            .into_iter()
            .map(|card| {
                let grabbed = self.dragging == Some(card.id);
                let title_style = if grabbed {
                    Style::default()
                        .fg(Color::Yellow)
                        .add_modifier(Modifier::BOLD | Modifier::ITALIC)
                } else {
                    Style::default().add_modifier(Modifier::BOLD)
                };
                let marker = if grabbed { "⇄ " } else { "" };

                ListItem::new(vec![
                    Line::from(vec![
                        Span::styled(marker, Style::default().fg(Color::Yellow)),
                        Span::styled(card.title, title_style),
                    ]),
                    Line::from(Span::styled(card.assigned, Style::default().fg(Color::Blue))),
                    Line::from(Span::styled(
                        card.description,
                        Style::default().fg(Color::DarkGray),
                    )),
                    Line::from(""),
                ])
            })
            .collect()
    }
}

impl Widget for ProjectPanelWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let border_style = if self.is_droppable() {
            Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)
        } else if self.focused {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(border_style)
            .title(format!(" {} ", self.heading()));

        let items = self.build_items();
        if items.is_empty() {
            let empty = Paragraph::new("No projects")
                .style(Style::default().fg(Color::DarkGray))
                .alignment(Alignment::Center)
                .wrap(Wrap { trim: true })
                .block(block);
            empty.render(area, buf);
            return;
        }

        let mut state = ListState::default();
        if self.focused {
            state.select(self.selected.map(|i| i.min(items.len() - 1)));
        }

        let list = List::new(items)
            .block(block)
            .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
            .highlight_symbol("> ");

        StatefulWidget::render(list, area, buf, &mut state);
    }
}
