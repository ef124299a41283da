//! Help view widget showing all keybindings.

use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Clear, Paragraph, Scrollbar, ScrollbarOrientation, ScrollbarState},
};

/// Help categories
const HELP_SECTIONS: &[(&str, &[(&str, &str)])] = &[
    (
        "Focus",
        &[
            ("Tab", "Next area (form, active, finished)"),
            ("Shift+Tab", "Previous area"),
            ("n", "Jump to the new project form"),
        ],
    ),
    (
        "New Project Form",
        &[
            ("↑/↓", "Previous / next field"),
            ("Enter", "Add project"),
            ("Esc", "Leave the form"),
        ],
    ),
    (
        "Project Panels",
        &[
            ("↑/k", "Select previous project"),
            ("↓/j", "Select next project"),
            ("g/G", "First / last project"),
            ("←/h →/l", "Switch panel"),
        ],
    ),
    (
        "Drag & Drop",
        &[
            ("Space", "Pick up the selected project"),
            ("←/h →/l", "Carry it to the other panel"),
            ("Enter/Space", "Drop it"),
            ("Esc", "Put it back"),
        ],
    ),
    (
        "Misc",
        &[
            ("Enter/Esc", "Dismiss an alert"),
            ("?", "Toggle help"),
            ("q", "Quit"),
            ("Ctrl+C", "Quit"),
        ],
    ),
];

/// State for the help view
#[derive(Debug, Default, Clone)]
pub struct HelpViewState {
    /// Current scroll offset (in lines)
    pub scroll_offset: usize,
    /// Total number of lines
    pub total_lines: usize,
    /// Visible height
    pub visible_height: usize,
}

impl HelpViewState {
    /// Create state scrolled to the top
    pub fn new() -> Self {
        Self::default()
    }

    /// Scroll up, stopping at the first line
    pub fn scroll_up(&mut self, n: usize) {
        self.scroll_offset = self.scroll_offset.saturating_sub(n);
    }

    /// Scroll down, stopping once the last line is visible
    pub fn scroll_down(&mut self, n: usize) {
        let max_offset = self.total_lines.saturating_sub(self.visible_height);
        self.scroll_offset = (self.scroll_offset + n).min(max_offset);
    }

    /// Scroll up by one page
    pub fn page_up(&mut self) {
        self.scroll_up(self.visible_height.saturating_sub(2));
    }

    /// Scroll down by one page
    pub fn page_down(&mut self) {
        self.scroll_down(self.visible_height.saturating_sub(2));
    }

    /// Jump back to the first line
    pub fn to_top(&mut self) {
        self.scroll_offset = 0;
    }
}

/// Help view widget
pub struct HelpWidget<'a> {
    scroll_offset: usize,
    state: &'a mut HelpViewState,
}

impl<'a> HelpWidget<'a> {
    /// Create a widget over the shared scroll state
    pub fn new(state: &'a mut HelpViewState) -> Self {
        Self {
            scroll_offset: state.scroll_offset,
            state,
        }
    }

    fn build_lines() -> Vec<Line<'static>> {
        let key_width = HELP_SECTIONS
            .iter()
            .flat_map(|(_, bindings)| bindings.iter().map(|(key, _)| key.chars().count()))
            .max()
            .unwrap_or(0)
            + 2;

        let mut lines = vec![
            Line::from(vec![Span::styled(
                "  project-board Help  ",
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            )]),
            Line::from(""),
            Line::from(Span::styled(
                "Track active and finished projects; drag them between panels.",
                Style::default().fg(Color::DarkGray),
            )),
            Line::from(""),
        ];

        for (section_name, bindings) in HELP_SECTIONS {
            lines.push(Line::from(Span::styled(
                format!("─── {} ───", section_name),
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            )));
            lines.push(Line::from(""));

            for (key, description) in *bindings {
                lines.push(Line::from(vec![
                    Span::styled(
                        format!("  {:width$}", key, width = key_width),
                        Style::default().fg(Color::Green),
                    ),
                    Span::raw(*description),
                ]));
            }
            lines.push(Line::from(""));
        }

        lines.push(Line::from(vec![
            Span::styled("  Press ", Style::default().fg(Color::DarkGray)),
            Span::styled("Esc", Style::default().fg(Color::Green)),
            Span::styled(", ", Style::default().fg(Color::DarkGray)),
            Span::styled("q", Style::default().fg(Color::Green)),
            Span::styled(" or ", Style::default().fg(Color::DarkGray)),
            Span::styled("?", Style::default().fg(Color::Green)),
            Span::styled(" to close help", Style::default().fg(Color::DarkGray)),
        ]));

        lines
    }
}

impl Widget for HelpWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Clear.render(area, buf);

        let lines = Self::build_lines();
        self.state.total_lines = lines.len();
        self.state.visible_height = area.height.saturating_sub(2) as usize;

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan))
            .title(" Help (?) ");

        let inner = block.inner(area);
        block.render(area, buf);

        let visible_lines: Vec<Line> = lines
            .into_iter()
            .skip(self.scroll_offset)
            .take(inner.height as usize)
            .collect();
        Paragraph::new(visible_lines).render(inner, buf);

        if self.state.total_lines > self.state.visible_height {
            let mut scrollbar_state =
                ScrollbarState::new(self.state.total_lines).position(self.scroll_offset);

            let scrollbar = Scrollbar::new(ScrollbarOrientation::VerticalRight)
                .begin_symbol(Some("▲"))
                .end_symbol(Some("▼"));

            let scrollbar_area = Rect {
                x: area.x + area.width.saturating_sub(1),
                y: area.y + 1,
                width: 1,
                height: area.height.saturating_sub(2),
            };

            scrollbar.render(scrollbar_area, buf, &mut scrollbar_state);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_help_state_scroll() {
        let mut state = HelpViewState::new();
        state.total_lines = 50;
        state.visible_height = 20;

        state.scroll_down(5);
        assert_eq!(state.scroll_offset, 5);

        state.scroll_up(3);
        assert_eq!(state.scroll_offset, 2);

        state.scroll_up(10);
        assert_eq!(state.scroll_offset, 0);
    }

    #[test]
    fn test_help_lines_built() {
        let lines = HelpWidget::build_lines();
        assert!(!lines.is_empty());
        assert!(lines.len() > 10);
        let text: String = lines
            .iter()
            .flat_map(|l| l.spans.iter().map(|s| s.content.to_string()))
            .collect();
        assert!(text.contains("Drag & Drop"));
    }
}
