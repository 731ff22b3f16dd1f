//! Event handling for the TextInput widget.

use crate::events::EventResult;
use crate::keybinds::{Key, KeyCombo};

use super::TextInput;

impl TextInput {
    /// Handle a key while the input has focus.
    ///
    /// Editing and cursor keys are consumed even when they change nothing;
    /// disabled inputs ignore every key.
    pub fn on_key(&self, key: &KeyCombo) -> EventResult {
        // Shortcuts belong to the host
        if key.modifiers.ctrl || key.modifiers.alt || self.is_disabled() {
            return EventResult::Ignored;
        }

        match key.key {
            Key::Backspace => {
                self.delete_char_before();
            }
            Key::Delete => {
                self.delete_char_at();
            }
            Key::Left => {
                self.cursor_left();
            }
            Key::Right => {
                self.cursor_right();
            }
            Key::Home => {
                self.cursor_home();
            }
            Key::End => {
                self.cursor_end();
            }
            Key::Space => {
                self.insert_char(' ');
            }
            Key::Char(c) => {
                self.insert_char(c);
            }
            Key::Escape if self.shows_clear_button() => {
                self.clear();
            }
            _ => return EventResult::Ignored,
        }
        EventResult::Consumed
    }
}
