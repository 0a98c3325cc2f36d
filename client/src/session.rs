//! Selection and search-scope state of one chat session.

use crate::models::DocumentId;
use std::fmt;
use std::str::FromStr;

/// Which documents a chat query may draw context from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SearchMode {
    #[default]
    All,
    Selected,
}

impl SearchMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            SearchMode::All => "all",
            SearchMode::Selected => "selected",
        }
    }
}

impl fmt::Display for SearchMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SearchMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "all" => Ok(SearchMode::All),
            "selected" => Ok(SearchMode::Selected),
            other => Err(format!("unknown search mode: {other}")),
        }
    }
}

/// Result of clicking a document row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionChange {
    Selected(DocumentId),
    Deselected(DocumentId),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionState {
    selected: Option<DocumentId>,
    mode: SearchMode,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selected(&self) -> Option<DocumentId> {
        self.selected
    }

    pub fn mode(&self) -> SearchMode {
        self.mode
    }

    /// Clicking the selected document clears the selection; clicking any other
    /// one selects it and forces the mode to `Selected`.
    pub fn toggle_selection(&mut self, id: DocumentId) -> SelectionChange {
        if self.selected == Some(id) {
            self.selected = None;
            SelectionChange::Deselected(id)
        } else {
            self.selected = Some(id);
            self.mode = SearchMode::Selected;
            SelectionChange::Selected(id)
        }
    }

    pub fn set_mode(&mut self, mode: SearchMode) {
        self.mode = mode;
    }

    /// Drops the selection if it points at `id`. Returns whether it did.
    pub fn forget_document(&mut self, id: DocumentId) -> bool {
        if self.selected == Some(id) {
            self.selected = None;
            true
        } else {
            false
        }
    }

    /// Document a chat or search query is restricted to.
    ///
    /// `Selected` mode without a selection means no restriction.
    pub fn chat_scope(&self) -> Option<DocumentId> {
        match self.mode {
            SearchMode::Selected => self.selected,
            SearchMode::All => None,
        }
    }

    /// Document the status line should name, if the line is visible at all.
    pub fn status_target(&self) -> Option<DocumentId> {
        self.chat_scope()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn selecting_forces_selected_mode() {
        let mut state = SessionState::new();
        assert_eq!(state.mode(), SearchMode::All);

        assert_eq!(state.toggle_selection(4), SelectionChange::Selected(4));
        assert_eq!(state.selected(), Some(4));
        assert_eq!(state.mode(), SearchMode::Selected);
    }

    #[test]
    fn selecting_again_clears_but_keeps_mode() {
        let mut state = SessionState::new();
        state.toggle_selection(4);

        assert_eq!(state.toggle_selection(4), SelectionChange::Deselected(4));
        assert_eq!(state.selected(), None);
        assert_eq!(state.mode(), SearchMode::Selected);
        assert_eq!(state.chat_scope(), None);
    }

    #[test]
    fn selecting_other_document_replaces_reference() {
        let mut state = SessionState::new();
        state.toggle_selection(1);
        state.set_mode(SearchMode::All);

        assert_eq!(state.toggle_selection(2), SelectionChange::Selected(2));
        assert_eq!(state.selected(), Some(2));
        assert_eq!(state.mode(), SearchMode::Selected);
    }

    #[test]
    fn all_mode_ignores_selection() {
        let mut state = SessionState::new();
        state.toggle_selection(9);
        state.set_mode(SearchMode::All);

        assert_eq!(state.chat_scope(), None);
        assert_eq!(state.status_target(), None);
        assert_eq!(state.selected(), Some(9));
    }

    #[test]
    fn forget_only_touches_matching_document() {
        let mut state = SessionState::new();
        state.toggle_selection(3);

        assert!(!state.forget_document(5));
        assert_eq!(state.selected(), Some(3));
        assert!(state.forget_document(3));
        assert_eq!(state.selected(), None);
    }

    #[test]
    fn mode_parses_case_insensitively() {
        assert_eq!("Selected".parse::<SearchMode>(), Ok(SearchMode::Selected));
        assert_eq!(" all ".parse::<SearchMode>(), Ok(SearchMode::All));
        assert!("some".parse::<SearchMode>().is_err());
    }
}
