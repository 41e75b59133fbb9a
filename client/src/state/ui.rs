//! Local UI chrome state (theme, dialogs).
//!
//! DESIGN
//! ======
//! Keeps transient presentation concerns out of the expense data so dialogs
//! and theming can change without touching list state.

#[cfg(test)]
#[path = "ui_test.rs"]
mod ui_test;

use session::Theme;

#[derive(Clone, Debug, Default)]
pub struct UiState {
    pub theme: Theme,
    pub show_summary: bool,
    pub show_budget_editor: bool,
    /// Expense currently open in the edit form; `None` means "add new".
    pub editing: Option<i64>,
}

impl UiState {
    pub fn is_dark(&self) -> bool {
        self.theme == Theme::Dark
    }

    /// Escape behaviour: close the summary first, else cancel the edit.
    /// Returns whether anything changed.
    pub fn dismiss(&mut self) -> bool {
        if self.show_summary {
            self.show_summary = false;
            true
        } else {
            self.editing.take().is_some()
        }
    }

    pub fn close_dialogs(&mut self) {
        self.show_summary = false;
        self.show_budget_editor = false;
    }
}
