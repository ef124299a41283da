//! Application state and main event loop.

use crate::config::BoardConfig;
use crate::domain::{ProjectId, ProjectStatus};
use crate::error::{AppError, ComponentResult, Result};
use crate::services::ProjectState;
use crate::ui::components::project_list::panel_element_id;
use crate::ui::components::{DragSession, FormField, ProjectInput, ProjectList};
use crate::ui::document::DocumentHandle;
use crate::ui::input::{Action, InputHandler, InputMode};
use crate::ui::templates::board_document;
use crate::ui::widgets::help::HelpViewState;
use crate::ui::widgets::text_input::TextInputAction;
use crossterm::event::{self, Event, KeyCode, KeyEvent};
use ratatui::prelude::*;
use std::time::{Duration, Instant};

/// Application view state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AppView {
    /// Form and project panels
    #[default]
    Board,
    /// Help view showing keybindings
    Help,
}

/// Part of the board receiving keys
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Form(FormField),
    Panel(ProjectStatus),
}

impl Focus {
    /// Form, then active, then finished
    fn next(self) -> Self {
        match self {
            Focus::Form(_) => Focus::Panel(ProjectStatus::Active),
            Focus::Panel(ProjectStatus::Active) => Focus::Panel(ProjectStatus::Finished),
            Focus::Panel(ProjectStatus::Finished) => Focus::Form(FormField::Title),
        }
    }

    fn previous(self) -> Self {
        match self {
            Focus::Form(_) => Focus::Panel(ProjectStatus::Finished),
            Focus::Panel(ProjectStatus::Active) => Focus::Form(FormField::Title),
            Focus::Panel(ProjectStatus::Finished) => Focus::Panel(ProjectStatus::Active),
        }
    }
}

/// Main application state
pub struct App {
    pub config: BoardConfig,
    /// Element tree every component is mounted into
    pub document: DocumentHandle,
    pub store: ProjectState,

    // UI State
    pub view: AppView,
    pub focus: Focus,
    /// Drag in progress, started from a panel
    pub drag: Option<DragSession>,
    pub help_view_state: HelpViewState,
    pub should_quit: bool,
    /// Selected row per panel, indexed like `ProjectStatus::ALL`
    selection: [usize; 2],

    // Components
    input: ProjectInput,
    lists: Vec<ProjectList>,

    input_handler: InputHandler,
}

impl App {
    /// Build the board: mount the form and one panel per status
    pub fn new(config: BoardConfig) -> Result<Self> {
        let document = board_document().into_handle();
        let store = ProjectState::new();

        let input = ProjectInput::new(&document, store.clone(), config.validation.clone())?;
        let lists = ProjectStatus::ALL
            .into_iter()
            .map(|status| ProjectList::new(&document, store.clone(), status))
            .collect::<ComponentResult<Vec<_>>>()?;

        let input_handler = InputHandler::new(config.ui.vim_navigation);

        Ok(Self {
            config,
            document,
            store,
            view: AppView::Board,
            focus: Focus::Form(FormField::Title),
            drag: None,
            help_view_state: HelpViewState::new(),
            should_quit: false,
            selection: [0; 2],
            input,
            lists,
            input_handler,
        })
    }

    /// The form component
    pub fn project_input(&self) -> &ProjectInput {
        &self.input
    }

    /// The panel for `status`
    pub fn list(&self, status: ProjectStatus) -> Option<&ProjectList> {
        self.lists.iter().find(|l| l.status() == status)
    }

    /// Selected row of a panel, clamped to its current length
    pub fn selected_index(&self, status: ProjectStatus) -> Option<usize> {
        let len = self.list(status).map(|l| l.len()).unwrap_or(0);
        if len == 0 {
            return None;
        }
        Some(self.selection[slot(status)].min(len - 1))
    }

    /// Project under the selection in a panel
    pub fn selected_project(&self, status: ProjectStatus) -> Option<ProjectId> {
        let index = self.selected_index(status)?;
        self.list(status)?.project_id_at(index)
    }

    fn select(&mut self, status: ProjectStatus, index: usize) {
        self.selection[slot(status)] = index;
    }

    fn move_selection(&mut self, status: ProjectStatus, action: Action) {
        let len = self.list(status).map(|l| l.len()).unwrap_or(0);
        if len == 0 {
            return;
        }
        let current = self.selected_index(status).unwrap_or(0);
        let index = match action {
            Action::MoveUp => current.saturating_sub(1),
            Action::MoveDown => (current + 1).min(len - 1),
            Action::Home => 0,
            Action::End => len - 1,
            _ => current,
        };
        self.select(status, index);
    }

    /// Switch to the help view
    pub fn open_help(&mut self) {
        self.help_view_state.to_top();
        self.view = AppView::Help;
    }

    /// Return to the board
    pub fn close_help(&mut self) {
        self.view = AppView::Board;
    }

    /// Handle keyboard input and return true if should quit
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        let quit = self.dispatch_key(key);
        if quit {
            self.should_quit = true;
        }
        quit
    }

    fn dispatch_key(&mut self, key: KeyEvent) -> bool {
        let mode = match (self.view, self.focus) {
            (AppView::Board, Focus::Form(_)) => InputMode::Insert,
            _ => InputMode::Normal,
        };
        let action = self.input_handler.handle_key(key, mode);

        // A pending alert swallows every key until acknowledged
        if self.document.borrow().pending_alert().is_some() {
            match (action, key.code) {
                (Some(Action::Quit), KeyCode::Char('c')) => return true,
                (_, KeyCode::Enter | KeyCode::Esc) => {
                    self.document.borrow_mut().dismiss_alert();
                }
                _ => {}
            }
            return false;
        }

        if self.view == AppView::Help {
            return self.handle_help_key(key, action);
        }

        match self.focus {
            Focus::Form(field) => self.handle_form_key(field, key, action),
            Focus::Panel(status) if self.drag.is_some() => self.handle_drag_key(status, action),
            Focus::Panel(status) => self.handle_panel_key(status, action),
        }
    }

    fn handle_help_key(&mut self, key: KeyEvent, action: Option<Action>) -> bool {
        match (action, key.code) {
            (Some(Action::Quit), KeyCode::Char('c')) => return true,
            (Some(Action::Back | Action::Quit | Action::Help), _) => self.close_help(),
            (Some(Action::MoveUp), _) => self.help_view_state.scroll_up(1),
            (Some(Action::MoveDown), _) => self.help_view_state.scroll_down(1),
            (_, KeyCode::PageUp) => self.help_view_state.page_up(),
            (_, KeyCode::PageDown) => self.help_view_state.page_down(),
            _ => {}
        }
        false
    }

    fn handle_form_key(&mut self, field: FormField, key: KeyEvent, action: Option<Action>) -> bool {
        match action {
            Some(Action::Quit) => return true,
            Some(Action::Back) | Some(Action::NextFocus) => self.focus = self.focus.next(),
            Some(Action::PrevFocus) => self.focus = self.focus.previous(),
            Some(Action::MoveUp) => self.focus = Focus::Form(field.previous()),
            Some(Action::MoveDown) => self.focus = Focus::Form(field.next()),
            Some(_) => {}
            None => {
                if self.input.edit_field(field, key) == TextInputAction::Submit {
                    self.submit_form();
                }
            }
        }
        false
    }

    /// Submit the form; on success the cursor returns to the title
    fn submit_form(&mut self) {
        let before = self.store.len();
        self.input.submit();
        if self.store.len() > before {
            self.focus = Focus::Form(FormField::Title);
            let active = self.list(ProjectStatus::Active).map(|l| l.len()).unwrap_or(0);
            self.select(ProjectStatus::Active, active.saturating_sub(1));
        }
    }

    fn handle_panel_key(&mut self, status: ProjectStatus, action: Option<Action>) -> bool {
        let Some(action) = action else {
            return false;
        };
        match action {
            Action::Quit => return true,
            Action::MoveUp | Action::MoveDown | Action::Home | Action::End => {
                self.move_selection(status, action)
            }
            Action::MoveLeft | Action::MoveRight => self.focus = Focus::Panel(status.toggled()),
            Action::Select => self.begin_drag(status),
            Action::NextFocus => self.focus = self.focus.next(),
            Action::PrevFocus => self.focus = self.focus.previous(),
            Action::NewProject => self.focus = Focus::Form(FormField::Title),
            Action::Help => self.open_help(),
            Action::Back => {}
        }
        false
    }

    fn handle_drag_key(&mut self, status: ProjectStatus, action: Option<Action>) -> bool {
        match action {
            Some(Action::MoveLeft | Action::MoveRight) => {
                let target = status.toggled();
                self.focus = Focus::Panel(target);
                if let Some(drag) = self.drag.as_mut() {
                    drag.hover(&self.document, &panel_element_id(target));
                }
            }
            Some(Action::Select) => self.finish_drag(status),
            Some(Action::Back) => self.cancel_drag(),
            Some(Action::Quit) => {
                self.cancel_drag();
                return true;
            }
            _ => {}
        }
        false
    }

    /// Pick up the selected card, hovering over its own panel
    fn begin_drag(&mut self, status: ProjectStatus) {
        let Some(id) = self.selected_project(status) else {
            return;
        };
        let mut drag = DragSession::begin(&self.document, id.as_str());
        drag.hover(&self.document, &panel_element_id(status));
        self.drag = Some(drag);
    }

    /// Drop on the focused panel and keep the moved card selected
    fn finish_drag(&mut self, status: ProjectStatus) {
        let Some(drag) = self.drag.take() else {
            return;
        };
        let id = ProjectId::from(drag.source_id());
        if drag.release(&self.document) {
            if let Some(index) = self.list(status).and_then(|l| l.index_of(&id)) {
                self.select(status, index);
            }
        }
    }

    fn cancel_drag(&mut self) {
        if let Some(drag) = self.drag.take() {
            tracing::debug!(source_id = drag.source_id(), "Drag cancelled");
            drag.cancel(&self.document);
        }
    }

    /// Main event loop
    pub async fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<()> {
        let tick_rate = Duration::from_millis(self.config.ui.refresh_rate_ms);
        let mut last_tick = Instant::now();

        loop {
            terminal.draw(|f| crate::ui::layout::draw(f, self))?;

            let timeout = tick_rate.saturating_sub(last_tick.elapsed());
            if event::poll(timeout).map_err(|e| AppError::Terminal(e.to_string()))? {
                match event::read().map_err(|e| AppError::Terminal(e.to_string()))? {
                    Event::Key(key) => {
                        if self.handle_key(key) {
                            break;
                        }
                    }
                    Event::Resize(width, height) => {
                        tracing::debug!("Terminal resized to {}x{}", width, height);
                    }
                    Event::FocusGained | Event::FocusLost | Event::Mouse(_) | Event::Paste(_) => {}
                }
            }

            if last_tick.elapsed() >= tick_rate {
                last_tick = Instant::now();
            }

            // Yield so the Ctrl+C signal branch in main can run
            tokio::task::yield_now().await;
        }

        self.cancel_drag();
        tracing::info!(projects = self.store.len(), "Board closed");
        Ok(())
    }
}

/// Position of a status in `ProjectStatus::ALL`
fn slot(status: ProjectStatus) -> usize {
    match status {
        ProjectStatus::Active => 0,
        ProjectStatus::Finished => 1,
    }
}
