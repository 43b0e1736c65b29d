//! Application state and event handling.
//!
//! [`App`] wraps the [`Controller`] with view-only state (focus, selected
//! row) and turns key presses into controller intents. Any intent that
//! needs the remote service comes back from [`App::handle_key_event`] as a
//! [`Ticket`] for the caller to dispatch.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tasklist_proto::Task;

use crate::controller::{Controller, Settlement, Ticket};

/// Which panel is currently focused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelFocus {
    /// New-todo input (default).
    NewTodo,
    /// Search input.
    Search,
    /// Task list.
    List,
}

/// Main application state.
pub struct App {
    /// Local task list and transient edit/search state.
    pub controller: Controller,
    /// Which panel is focused.
    pub focus: PanelFocus,
    /// Selected row in the task list.
    pub selected: usize,
    /// Whether the app should quit.
    pub should_quit: bool,
}

impl App {
    /// Create an application around the given controller.
    #[must_use]
    pub const fn new(controller: Controller) -> Self {
        Self {
            controller,
            focus: PanelFocus::NewTodo,
            selected: 0,
            should_quit: false,
        }
    }

    /// The task under the selection cursor, if the list is non-empty.
    #[must_use]
    pub fn selected_task(&self) -> Option<&Task> {
        self.controller.items().get(self.selected)
    }

    /// Whether an inline edit is in progress.
    #[must_use]
    pub const fn is_editing(&self) -> bool {
        self.controller.editing().is_some()
    }

    /// Apply a settlement and keep the selection inside the list.
    pub fn apply_settlement(&mut self, settlement: Settlement) {
        self.controller.settle(settlement);
        self.clamp_selection();
    }

    /// Handle a key event, returning a request to dispatch if one was issued.
    pub fn handle_key_event(&mut self, key: KeyEvent) -> Option<Ticket> {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.should_quit = true;
            return None;
        }

        if self.is_editing() {
            return self.handle_edit_key(key);
        }

        match (key.code, key.modifiers) {
            (KeyCode::Esc, _) => {
                self.should_quit = true;
                return None;
            }
            (KeyCode::Tab, KeyModifiers::SHIFT) | (KeyCode::BackTab, _) => {
                self.cycle_focus_backward();
                return None;
            }
            (KeyCode::Tab, _) => {
                self.cycle_focus_forward();
                return None;
            }
            _ => {}
        }

        match self.focus {
            PanelFocus::NewTodo => self.handle_new_todo_key(key),
            PanelFocus::Search => self.handle_search_key(key),
            PanelFocus::List => self.handle_list_key(key),
        }
    }

    /// Handle key event when the new-todo input is focused.
    fn handle_new_todo_key(&mut self, key: KeyEvent) -> Option<Ticket> {
        match key.code {
            KeyCode::Enter => self.controller.submit_draft(),
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                let mut draft = self.controller.draft_text().to_string();
                draft.push(c);
                self.controller.set_draft(draft);
                None
            }
            KeyCode::Backspace => {
                let mut draft = self.controller.draft_text().to_string();
                draft.pop();
                self.controller.set_draft(draft);
                None
            }
            _ => None,
        }
    }

    /// Handle key event when the search input is focused.
    ///
    /// Every change to the query issues a request.
    fn handle_search_key(&mut self, key: KeyEvent) -> Option<Ticket> {
        let mut query = self.controller.search_query().to_string();
        match key.code {
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => query.push(c),
            KeyCode::Backspace => {
                query.pop()?;
            }
            _ => return None,
        }
        self.selected = 0;
        Some(self.controller.set_search_query(query))
    }

    /// Handle key event when the task list is focused.
    fn handle_list_key(&mut self, key: KeyEvent) -> Option<Ticket> {
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => {
                self.select_prev();
                None
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.select_next();
                None
            }
            KeyCode::Char('r') => Some(self.controller.refresh()),
            KeyCode::Char(' ') => {
                let id = self.selected_task()?.id.clone();
                Some(self.controller.toggle(&id))
            }
            KeyCode::Char('d') | KeyCode::Delete => {
                let id = self.selected_task()?.id.clone();
                Some(self.controller.delete(&id))
            }
            KeyCode::Char('e') | KeyCode::Enter => {
                let id = self.selected_task()?.id.clone();
                self.controller.start_edit(&id);
                None
            }
            _ => None,
        }
    }

    /// Handle key event while a task is being edited inline.
    fn handle_edit_key(&mut self, key: KeyEvent) -> Option<Ticket> {
        match key.code {
            KeyCode::Enter => self.controller.save_edit(),
            KeyCode::Esc => {
                self.controller.cancel_edit();
                None
            }
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                let mut draft = self.controller.edit_draft_text().to_string();
                draft.push(c);
                self.controller.set_edit_draft(draft);
                None
            }
            KeyCode::Backspace => {
                let mut draft = self.controller.edit_draft_text().to_string();
                draft.pop();
                self.controller.set_edit_draft(draft);
                None
            }
            _ => None,
        }
    }

    /// Cycle focus forward: `NewTodo` -> Search -> List -> `NewTodo`.
    const fn cycle_focus_forward(&mut self) {
        self.focus = match self.focus {
            PanelFocus::NewTodo => PanelFocus::Search,
            PanelFocus::Search => PanelFocus::List,
            PanelFocus::List => PanelFocus::NewTodo,
        };
    }

    /// Cycle focus backward: `NewTodo` -> List -> Search -> `NewTodo`.
    const fn cycle_focus_backward(&mut self) {
        self.focus = match self.focus {
            PanelFocus::NewTodo => PanelFocus::List,
            PanelFocus::List => PanelFocus::Search,
            PanelFocus::Search => PanelFocus::NewTodo,
        };
    }

    /// Select the previous task.
    const fn select_prev(&mut self) {
        if self.selected > 0 {
            self.selected -= 1;
        }
    }

    /// Select the next task.
    fn select_next(&mut self) {
        if self.selected < self.controller.items().len().saturating_sub(1) {
            self.selected += 1;
        }
    }

    fn clamp_selection(&mut self) {
        self.selected = self
            .selected
            .min(self.controller.items().len().saturating_sub(1));
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new(Controller::new())
    }
}
