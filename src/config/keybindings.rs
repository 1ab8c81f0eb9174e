//! Keyboard bindings for application-level actions.
//!
//! Keys typed into the search box (characters, arrows, Enter, Escape) are
//! routed to the search controller directly; only chords listed here are
//! intercepted first.

use crate::model::key_action::KeyAction;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::collections::HashMap;

/// Maps keyboard events to application actions.
#[derive(Debug, Clone)]
pub struct KeyBindings {
    bindings: HashMap<(KeyCode, KeyModifiers), KeyAction>,
}

impl KeyBindings {
    /// Look up the action for a key event.
    ///
    /// Only the key code and modifiers take part in the lookup; event kind
    /// and lock-key state are ignored.
    pub fn get(&self, key: KeyEvent) -> Option<KeyAction> {
        let code = match key.code {
            KeyCode::Char(c) if key.modifiers.contains(KeyModifiers::CONTROL) => {
                KeyCode::Char(c.to_ascii_lowercase())
            }
            other => other,
        };
        let modifiers = key.modifiers - KeyModifiers::SHIFT;
        self.bindings.get(&(code, modifiers)).copied()
    }

    /// Bind (or rebind) a chord.
    pub fn bind(&mut self, code: KeyCode, modifiers: KeyModifiers, action: KeyAction) {
        self.bindings.insert((code, modifiers), action);
    }
}

impl Default for KeyBindings {
    fn default() -> Self {
        let mut bindings = Self {
            bindings: HashMap::new(),
        };

        // Cmd+K arrives as SUPER on terminals that report it
        bindings.bind(KeyCode::Char('k'), KeyModifiers::CONTROL, KeyAction::FocusSearch);
        bindings.bind(KeyCode::Char('k'), KeyModifiers::SUPER, KeyAction::FocusSearch);
        bindings.bind(KeyCode::Char('k'), KeyModifiers::META, KeyAction::FocusSearch);

        bindings.bind(KeyCode::Char('l'), KeyModifiers::CONTROL, KeyAction::ClearSearch);
        bindings.bind(KeyCode::Char('e'), KeyModifiers::CONTROL, KeyAction::ExportCsv);
        bindings.bind(KeyCode::Char('j'), KeyModifiers::CONTROL, KeyAction::ExportJson);
        bindings.bind(
            KeyCode::Char('n'),
            KeyModifiers::CONTROL,
            KeyAction::DismissNotifications,
        );

        bindings.bind(KeyCode::Char('c'), KeyModifiers::CONTROL, KeyAction::Quit);
        bindings.bind(KeyCode::Char('q'), KeyModifiers::CONTROL, KeyAction::Quit);

        bindings
    }
}
