//! Text input widget for single-line text entry.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    prelude::*,
    widgets::{Block, Borders},
};

/// Single-line text input widget
pub struct TextInputWidget<'a> {
    /// Current input value
    value: &'a str,
    /// Cursor position (character index)
    cursor: usize,
    /// Placeholder text when empty
    placeholder: &'a str,
    /// Title for the input box
    title: &'a str,
    /// Whether the input is focused
    focused: bool,
}

impl<'a> TextInputWidget<'a> {
    /// Create a new text input widget
    pub fn new(value: &'a str, cursor: usize) -> Self {
        Self {
            value,
            cursor,
            placeholder: "",
            title: "Input",
            focused: true,
        }
    }

    /// Set placeholder text
    pub fn placeholder(mut self, placeholder: &'a str) -> Self {
        self.placeholder = placeholder;
        self
    }

    /// Set title
    pub fn title(mut self, title: &'a str) -> Self {
        self.title = title;
        self
    }

    /// Set focused state
    pub fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }
}

impl Widget for TextInputWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let border_style = if self.focused {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default().fg(Color::DarkGray)
        };

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(border_style)
            .title(format!(" {} ", self.title));

        let inner = block.inner(area);
        block.render(area, buf);

        if inner.width == 0 || inner.height == 0 {
            return;
        }

        let text_style = if self.value.is_empty() {
            Style::default().fg(Color::DarkGray)
        } else {
            Style::default()
        };
        let cursor_style = Style::default().fg(Color::Black).bg(Color::White);

        if self.focused {
            // Keep the cursor visible when the value is wider than the box
            let width = inner.width as usize;
            let skip = (self.cursor + 1).saturating_sub(width);

            let before_cursor: String = self.value.chars().skip(skip).take(self.cursor - skip).collect();
            let cursor_char: String = self.value.chars().skip(self.cursor).take(1).collect();
            let after_cursor: String = self.value.chars().skip(self.cursor + 1).collect();

            let mut x = inner.x;
            buf.set_string(x, inner.y, &before_cursor, text_style);
            x += before_cursor.chars().count() as u16;

            let cursor_text = if cursor_char.is_empty() { " " } else { &cursor_char };
            buf.set_string(x, inner.y, cursor_text, cursor_style);
            x += 1;

            if self.value.is_empty() && !self.placeholder.is_empty() {
                buf.set_string(x, inner.y, self.placeholder, Style::default().fg(Color::DarkGray));
            } else if x < inner.x + inner.width {
                let remaining = (inner.x + inner.width - x) as usize;
                buf.set_stringn(x, inner.y, &after_cursor, remaining, text_style);
            }
        } else {
            let display_text = if self.value.is_empty() {
                self.placeholder
            } else {
                self.value
            };
            buf.set_stringn(inner.x, inner.y, display_text, inner.width as usize, text_style);
        }
    }
}

/// State for text input
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct TextInputState {
    /// Current value
    pub value: String,
    /// Cursor position (character index)
    pub cursor: usize,
}

impl TextInputState {
    /// Create a new text input state
    pub fn new() -> Self {
        Self::default()
    }

    /// Create with initial value
    pub fn with_value(value: String) -> Self {
        let cursor = value.chars().count();
        Self { value, cursor }
    }

    /// Byte offset of a character index
    fn byte_offset(&self, char_index: usize) -> usize {
        self.value
            .char_indices()
            .nth(char_index)
            .map(|(i, _)| i)
            .unwrap_or(self.value.len())
    }

    fn char_len(&self) -> usize {
        self.value.chars().count()
    }

    /// Handle a key event and report what happened
    pub fn handle_key(&mut self, key: KeyEvent) -> TextInputAction {
        match key.code {
            KeyCode::Char(c) => {
                if key.modifiers.contains(KeyModifiers::CONTROL) {
                    return TextInputAction::None;
                }
                let at = self.byte_offset(self.cursor);
                self.value.insert(at, c);
                self.cursor += 1;
                TextInputAction::Changed
            }
            KeyCode::Backspace => {
                if self.cursor > 0 {
                    self.cursor -= 1;
                    let at = self.byte_offset(self.cursor);
                    self.value.remove(at);
                    TextInputAction::Changed
                } else {
                    TextInputAction::None
                }
            }
            KeyCode::Delete => {
                if self.cursor < self.char_len() {
                    let at = self.byte_offset(self.cursor);
                    self.value.remove(at);
                    TextInputAction::Changed
                } else {
                    TextInputAction::None
                }
            }
            KeyCode::Left => {
                if self.cursor > 0 {
                    self.cursor -= 1;
                }
                TextInputAction::None
            }
            KeyCode::Right => {
                if self.cursor < self.char_len() {
                    self.cursor += 1;
                }
                TextInputAction::None
            }
            KeyCode::Home => {
                self.cursor = 0;
                TextInputAction::None
            }
            KeyCode::End => {
                self.cursor = self.char_len();
                TextInputAction::None
            }
            KeyCode::Enter => TextInputAction::Submit,
            KeyCode::Esc => TextInputAction::Cancel,
            _ => TextInputAction::None,
        }
    }

    /// Replace the value and move the cursor to the end
    pub fn set_value(&mut self, value: impl Into<String>) {
        self.value = value.into();
        self.cursor = self.char_len();
    }

    /// Clear the input
    pub fn clear(&mut self) {
        self.value.clear();
        self.cursor = 0;
    }

    /// Get the current value
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }
}

/// Actions that can result from text input handling
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextInputAction {
    /// No action
    None,
    /// Value changed
    Changed,
    /// User submitted (Enter)
    Submit,
    /// User cancelled (Esc)
    Cancel,
}
