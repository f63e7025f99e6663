//! Event handling for the TUI.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Key action that can be performed while browsing groups.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    // Navigation
    MoveUp,
    MoveDown,
    PrevGroup,
    NextGroup,

    // Selection
    /// Toggle selection on the current file (Space).
    ToggleSelect,
    /// Select every file in the current group.
    SelectAll,
    /// Clear every selection in the current group.
    ClearSelections,

    // Group flow
    SkipGroup,
    /// Stage selected files for deletion (with confirmation).
    Delete,

    // UI toggles
    ToggleHelp,

    // Application
    Cancel,
    Quit,
    ForceQuit,

    // No action
    None,
}

impl KeyAction {
    /// Convert a key event to an action.
    pub fn from_key_event(event: KeyEvent) -> Self {
        match (event.code, event.modifiers) {
            (KeyCode::Char('q'), KeyModifiers::NONE) => KeyAction::Quit,
            (KeyCode::Char('c'), KeyModifiers::CONTROL) => KeyAction::ForceQuit,
            (KeyCode::Esc, _) => KeyAction::Cancel,

            // Navigation - vim style
            (KeyCode::Char('j'), KeyModifiers::NONE) => KeyAction::MoveDown,
            (KeyCode::Char('k'), KeyModifiers::NONE) => KeyAction::MoveUp,

            // Navigation - arrow keys
            (KeyCode::Down, _) => KeyAction::MoveDown,
            (KeyCode::Up, _) => KeyAction::MoveUp,
            (KeyCode::Left, _) => KeyAction::PrevGroup,
            (KeyCode::Right, _) => KeyAction::NextGroup,

            // Group navigation
            (KeyCode::Char('p'), KeyModifiers::NONE) => KeyAction::PrevGroup,
            (KeyCode::Char('n'), KeyModifiers::NONE) => KeyAction::NextGroup,

            // Selection
            (KeyCode::Char(' '), _) => KeyAction::ToggleSelect,
            (KeyCode::Char('a'), KeyModifiers::NONE) => KeyAction::SelectAll,
            (KeyCode::Char('c'), KeyModifiers::NONE) => KeyAction::ClearSelections,

            // Group flow
            (KeyCode::Char('s'), KeyModifiers::NONE) => KeyAction::SkipGroup,
            (KeyCode::Enter, _) => KeyAction::Delete,

            // Help
            (KeyCode::Char('?'), _) => KeyAction::ToggleHelp,

            _ => KeyAction::None,
        }
    }
}
