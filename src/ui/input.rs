//! Keyboard input handling with vim-style navigation support.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Input mode for the application
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputMode {
    /// Panel navigation and dragging
    #[default]
    Normal,
    /// Typing into a form field
    Insert,
}

/// Actions that can be triggered by keyboard input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    // Navigation
    MoveUp,
    MoveDown,
    MoveLeft,
    MoveRight,
    Home,
    End,

    // Selection
    Select,
    Back,

    // Focus
    NextFocus,
    PrevFocus,

    // Board
    NewProject,

    // Misc
    Help,
    Quit,
}

/// Keyboard bindings configuration
pub struct KeyBindings {
    pub vim_navigation: bool,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            vim_navigation: true,
        }
    }
}

/// Input handler for processing keyboard events
pub struct InputHandler {
    bindings: KeyBindings,
}

impl InputHandler {
    /// Create a handler; `vim_navigation` adds hjkl movement
    pub fn new(vim_navigation: bool) -> Self {
        Self {
            bindings: KeyBindings { vim_navigation },
        }
    }

    /// Map a key to an action; `None` means the key is not bound in `mode`
    pub fn handle_key(&self, key: KeyEvent, mode: InputMode) -> Option<Action> {
        // Raw mode delivers Ctrl+C as a key
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return Some(Action::Quit);
        }

        match mode {
            InputMode::Normal => self.handle_normal_key(key),
            InputMode::Insert => self.handle_insert_key(key),
        }
    }

    fn handle_normal_key(&self, key: KeyEvent) -> Option<Action> {
        let vim = self.bindings.vim_navigation;
        match key.code {
            KeyCode::Up => Some(Action::MoveUp),
            KeyCode::Down => Some(Action::MoveDown),
            KeyCode::Left => Some(Action::MoveLeft),
            KeyCode::Right => Some(Action::MoveRight),
            KeyCode::Home => Some(Action::Home),
            KeyCode::End => Some(Action::End),

            // Vim-style navigation (j/k/h/l)
            KeyCode::Char('j') if vim => Some(Action::MoveDown),
            KeyCode::Char('k') if vim => Some(Action::MoveUp),
            KeyCode::Char('h') if vim => Some(Action::MoveLeft),
            KeyCode::Char('l') if vim => Some(Action::MoveRight),
            KeyCode::Char('g') if vim => Some(Action::Home),
            KeyCode::Char('G') if vim => Some(Action::End),

            KeyCode::Enter | KeyCode::Char(' ') => Some(Action::Select),
            KeyCode::Esc => Some(Action::Back),

            KeyCode::Tab => Some(Action::NextFocus),
            KeyCode::BackTab => Some(Action::PrevFocus),

            KeyCode::Char('n') => Some(Action::NewProject),
            KeyCode::Char('?') => Some(Action::Help),
            KeyCode::Char('q') => Some(Action::Quit),

            _ => None,
        }
    }

    /// Only structural keys; everything else goes to the focused field
    fn handle_insert_key(&self, key: KeyEvent) -> Option<Action> {
        match key.code {
            KeyCode::Esc => Some(Action::Back),
            KeyCode::Tab => Some(Action::NextFocus),
            KeyCode::BackTab => Some(Action::PrevFocus),
            KeyCode::Up => Some(Action::MoveUp),
            KeyCode::Down => Some(Action::MoveDown),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_vim_navigation() {
        let handler = InputHandler::new(true);
        assert_eq!(
            handler.handle_key(key(KeyCode::Char('j')), InputMode::Normal),
            Some(Action::MoveDown)
        );
        assert_eq!(
            handler.handle_key(key(KeyCode::Char('h')), InputMode::Normal),
            Some(Action::MoveLeft)
        );
    }

    #[test]
    fn test_vim_disabled() {
        let handler = InputHandler::new(false);
        assert_eq!(handler.handle_key(key(KeyCode::Char('j')), InputMode::Normal), None);
        assert_eq!(
            handler.handle_key(key(KeyCode::Up), InputMode::Normal),
            Some(Action::MoveUp)
        );
    }

    #[test]
    fn test_insert_mode_passes_text_through() {
        let handler = InputHandler::new(true);
        assert_eq!(handler.handle_key(key(KeyCode::Char('q')), InputMode::Insert), None);
        assert_eq!(handler.handle_key(key(KeyCode::Char('j')), InputMode::Insert), None);
        assert_eq!(handler.handle_key(key(KeyCode::Enter), InputMode::Insert), None);
        assert_eq!(
            handler.handle_key(key(KeyCode::Tab), InputMode::Insert),
            Some(Action::NextFocus)
        );
        assert_eq!(
            handler.handle_key(key(KeyCode::Esc), InputMode::Insert),
            Some(Action::Back)
        );
    }

    #[test]
    fn test_ctrl_c_quits_in_every_mode() {
        let handler = InputHandler::new(true);
        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(handler.handle_key(ctrl_c, InputMode::Normal), Some(Action::Quit));
        assert_eq!(handler.handle_key(ctrl_c, InputMode::Insert), Some(Action::Quit));
    }

    #[test]
    fn test_board_keys() {
        let handler = InputHandler::new(true);
        assert_eq!(
            handler.handle_key(key(KeyCode::Char(' ')), InputMode::Normal),
            Some(Action::Select)
        );
        assert_eq!(
            handler.handle_key(key(KeyCode::Char('n')), InputMode::Normal),
            Some(Action::NewProject)
        );
        assert_eq!(
            handler.handle_key(key(KeyCode::Char('q')), InputMode::Normal),
            Some(Action::Quit)
        );
    }
}
