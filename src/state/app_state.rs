//! Application state definitions

use super::{ChooseFocus, DirectoryState, DocumentType, PartyRecord, Step, Wizard};
use std::collections::VecDeque;
use std::path::PathBuf;

/// Main application state
#[derive(Debug, Default)]
pub struct AppState {
    pub wizard: Wizard,
    pub directory: DirectoryState,

    // Choose step cursor
    pub choose_focus: ChooseFocus,
    pub type_cursor: usize,
    pub party_cursor: usize,

    // Notices
    errors: VecDeque<String>,
    pub status_message: Option<String>,
    pub last_download: Option<PathBuf>,
}

impl AppState {
    pub fn step(&self) -> Step {
        self.wizard.step()
    }

    pub fn parties(&self) -> &[PartyRecord] {
        self.directory.records()
    }

    /// Queue an error for the modal dialog
    pub fn push_error(&mut self, message: String) {
        self.errors.push_back(message);
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Oldest undismissed error
    pub fn current_error(&self) -> Option<&str> {
        self.errors.front().map(String::as_str)
    }

    pub fn pending_errors(&self) -> usize {
        self.errors.len()
    }

    pub fn dismiss_error(&mut self) {
        self.errors.pop_front();
    }

    /// Move the cursor of the focused list down
    pub fn move_selection_down(&mut self) {
        let (cursor, len) = match self.choose_focus {
            ChooseFocus::DocumentTypes => (&mut self.type_cursor, DocumentType::ALL.len()),
            ChooseFocus::Parties => (&mut self.party_cursor, self.directory.records().len()),
        };
        if len > 0 && *cursor < len - 1 {
            *cursor += 1;
        }
    }

    /// Move the cursor of the focused list up
    pub fn move_selection_up(&mut self) {
        let cursor = match self.choose_focus {
            ChooseFocus::DocumentTypes => &mut self.type_cursor,
            ChooseFocus::Parties => &mut self.party_cursor,
        };
        *cursor = cursor.saturating_sub(1);
    }

    /// Select the item under the cursor of the focused list
    pub fn select_highlighted(&mut self) {
        match self.choose_focus {
            ChooseFocus::DocumentTypes => {
                if let Some(doc_type) = DocumentType::ALL.get(self.type_cursor) {
                    self.wizard.select_document_type(*doc_type);
                }
            }
            ChooseFocus::Parties => {
                if self.party_cursor < self.directory.records().len() {
                    self.wizard.select_party(self.party_cursor);
                }
            }
        }
    }
}
