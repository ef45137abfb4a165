//! Event handling for the TUI.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Key action that can be performed in the TUI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    // Scrolling
    ScrollUp,
    ScrollDown,
    JumpToTop,
    JumpToBottom,

    // Drag
    /// Abandon the drag in progress.
    Cancel,

    // List
    /// Switch between swap and move commits.
    ToggleCommitMode,
    /// Restore the original item order.
    ResetOrder,

    // UI toggles
    ToggleHelp,
    ToggleTheme,

    // Application
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

            // Scrolling - vim style
            (KeyCode::Char('j'), KeyModifiers::NONE) => KeyAction::ScrollDown,
            (KeyCode::Char('k'), KeyModifiers::NONE) => KeyAction::ScrollUp,
            (KeyCode::Down, _) => KeyAction::ScrollDown,
            (KeyCode::Up, _) => KeyAction::ScrollUp,
            (KeyCode::Char('g'), KeyModifiers::NONE) => KeyAction::JumpToTop,
            (KeyCode::Char('G'), KeyModifiers::SHIFT) => KeyAction::JumpToBottom,
            (KeyCode::Home, _) => KeyAction::JumpToTop,
            (KeyCode::End, _) => KeyAction::JumpToBottom,

            (KeyCode::Char('m'), KeyModifiers::NONE) => KeyAction::ToggleCommitMode,
            (KeyCode::Char('r'), KeyModifiers::NONE) => KeyAction::ResetOrder,

            (KeyCode::Char('?'), KeyModifiers::NONE) => KeyAction::ToggleHelp,
            (KeyCode::Char('t'), KeyModifiers::NONE) => KeyAction::ToggleTheme,

            _ => KeyAction::None,
        }
    }
}

/// A section of key bindings for the help display.
pub struct HelpSection {
    pub title: &'static str,
    pub bindings: Vec<KeyBinding>,
}

/// Key binding for display in help.
pub struct KeyBinding {
    pub keys: &'static str,
    pub description: &'static str,
}

/// Get all key bindings organized by section for help display.
pub fn get_help_sections() -> Vec<HelpSection> {
    vec![
        HelpSection {
            title: "Dragging",
            bindings: vec![
                KeyBinding { keys: "Hold click", description: "Pick up an item" },
                KeyBinding { keys: "Move", description: "Drag it over its neighbors" },
                KeyBinding { keys: "Release", description: "Drop it" },
                KeyBinding { keys: "Esc", description: "Cancel the drag" },
            ],
        },
        HelpSection {
            title: "List",
            bindings: vec![
                KeyBinding { keys: "j/k ↑/↓", description: "Scroll" },
                KeyBinding { keys: "g/G", description: "Jump to top/bottom" },
                KeyBinding { keys: "m", description: "Toggle swap/move commit" },
                KeyBinding { keys: "r", description: "Reset item order" },
            ],
        },
        HelpSection {
            title: "Display",
            bindings: vec![
                KeyBinding { keys: "t", description: "Toggle dark/light theme" },
                KeyBinding { keys: "?", description: "Show this help" },
                KeyBinding { keys: "q", description: "Quit" },
            ],
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent::new(code, modifiers)
    }

    #[test]
    fn test_key_mapping() {
        assert_eq!(
            KeyAction::from_key_event(key(KeyCode::Char('q'), KeyModifiers::NONE)),
            KeyAction::Quit
        );
        assert_eq!(
            KeyAction::from_key_event(key(KeyCode::Esc, KeyModifiers::NONE)),
            KeyAction::Cancel
        );
        assert_eq!(
            KeyAction::from_key_event(key(KeyCode::Char('m'), KeyModifiers::NONE)),
            KeyAction::ToggleCommitMode
        );
        assert_eq!(
            KeyAction::from_key_event(key(KeyCode::Char('G'), KeyModifiers::SHIFT)),
            KeyAction::JumpToBottom
        );
        assert_eq!(
            KeyAction::from_key_event(key(KeyCode::Char('x'), KeyModifiers::NONE)),
            KeyAction::None
        );
    }
}
