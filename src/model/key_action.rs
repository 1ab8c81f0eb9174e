//! Domain-level input events independent of the terminal backend.

/// Keys the results panel reacts to while it is open.
///
/// The mapping from `crossterm::event::KeyEvent` happens in the view;
/// everything that is not navigation is `Other`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SearchKey {
    /// Move selection down. Default: ↓
    ArrowDown,
    /// Move selection up. Default: ↑
    ArrowUp,
    /// Open the selected match. Default: Enter
    Enter,
    /// Dismiss the panel. Default: Esc
    Escape,
    /// Anything else; text editing is handled outside the state machine.
    Other,
}

/// Where a pointer press landed, as resolved by the host's hit testing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerTarget {
    /// The search input.
    Input,
    /// The results panel.
    Panel,
    /// Anywhere else.
    Outside,
}

/// A document-level key press with its modifier state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyChord {
    /// Key character, or `None` for non-character keys.
    pub key: Option<char>,
    /// Escape key.
    pub escape: bool,
    /// Control held.
    pub ctrl: bool,
    /// Meta / Command / Super held.
    pub meta: bool,
}

impl KeyChord {
    /// Character key with no modifiers.
    pub fn plain(key: char) -> Self {
        Self {
            key: Some(key),
            escape: false,
            ctrl: false,
            meta: false,
        }
    }

    /// Character key with Control held.
    pub fn ctrl(key: char) -> Self {
        Self {
            ctrl: true,
            ..Self::plain(key)
        }
    }

    /// Character key with Meta held.
    pub fn meta(key: char) -> Self {
        Self {
            meta: true,
            ..Self::plain(key)
        }
    }

    /// The Escape key.
    pub fn escape() -> Self {
        Self {
            key: None,
            escape: true,
            ctrl: false,
            meta: false,
        }
    }

    /// Platform modifier + K.
    pub fn is_focus_shortcut(&self) -> bool {
        (self.ctrl || self.meta) && matches!(self.key, Some('k') | Some('K'))
    }
}

/// Result of routing a document-level key press through the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ShortcutOutcome {
    /// Host should move focus to the search input.
    pub focus_input: bool,
    /// Host must suppress its default handling of the key.
    pub prevent_default: bool,
}

/// Application-level actions mapped from configurable key bindings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyAction {
    /// Focus the search input. Default: Ctrl+k
    FocusSearch,
    /// Clear input, panel and cache. Default: Ctrl+l
    ClearSearch,
    /// Export the current results as CSV. Default: Ctrl+e
    ExportCsv,
    /// Export the current results as JSON. Default: Ctrl+j
    ExportJson,
    /// Dismiss all notifications. Default: Ctrl+n
    DismissNotifications,
    /// Exit the application. Default: Ctrl+c / Ctrl+q
    Quit,
}
