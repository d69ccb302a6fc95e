//! Keyboard input mapping.

use serde::{Deserialize, Serialize};

/// Modifier keys state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    pub meta: bool,
}

impl Modifiers {
    /// Ctrl on most platforms, Cmd on macOS.
    pub fn command(&self) -> bool {
        self.ctrl || self.meta
    }
}

/// What a key press asks the canvas to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    /// Cancel the construction in progress, or drop the tool.
    Cancel,
    /// Delete the indicated shape.
    Delete,
    Undo,
    Redo,
}

impl KeyAction {
    /// Map a key name (as reported by the input adapter) to an action.
    pub fn from_key(key: &str, modifiers: Modifiers) -> Option<Self> {
        match key {
            "Escape" => Some(KeyAction::Cancel),
            "Backspace" | "Delete" => Some(KeyAction::Delete),
            "z" | "Z" if modifiers.command() && modifiers.shift => Some(KeyAction::Redo),
            "z" | "Z" if modifiers.command() => Some(KeyAction::Undo),
            "y" | "Y" if modifiers.command() => Some(KeyAction::Redo),
            _ => None,
        }
    }
}
