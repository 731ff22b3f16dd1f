use std::fmt;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use log::trace;
use serde::{Deserialize, Serialize};

/// Observer invoked with the new value after every edit.
pub type ChangeHandler = Arc<dyn Fn(&str) + Send + Sync>;

/// Unique identifier for a TextInput instance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct InputId(usize);

impl InputId {
    fn new() -> Self {
        static COUNTER: AtomicUsize = AtomicUsize::new(0);
        Self(COUNTER.fetch_add(1, Ordering::SeqCst))
    }
}

impl fmt::Display for InputId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "__input_{}", self.0)
    }
}

/// Visual treatment of the field.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InputVariant {
    Filled,
    #[default]
    Outlined,
    Ghost,
}

/// Field size.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InputSize {
    Sm,
    #[default]
    Md,
    Lg,
}

/// Kind of value the field holds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InputKind {
    #[default]
    Text,
    Password,
    Email,
    Number,
}

/// Message line shown under the field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputMessage {
    Helper(String),
    Error(String),
}

impl InputMessage {
    /// The message text.
    pub fn text(&self) -> &str {
        match self {
            InputMessage::Helper(text) | InputMessage::Error(text) => text,
        }
    }
}

/// Internal state for a TextInput
#[derive(Default)]
struct InputInner {
    /// Current text value
    value: String,
    /// Cursor position (byte offset)
    cursor: usize,
    label: Option<String>,
    placeholder: String,
    helper_text: Option<String>,
    error_message: Option<String>,
    disabled: bool,
    invalid: bool,
    loading: bool,
    variant: InputVariant,
    size: InputSize,
    kind: InputKind,
    clearable: bool,
    /// Password currently shown in clear text
    password_visible: bool,
    on_change: Option<ChangeHandler>,
}

impl InputInner {
    /// Byte offset of the char boundary before the cursor.
    fn prev_boundary(&self) -> usize {
        self.value[..self.cursor]
            .char_indices()
            .last()
            .map(|(i, _)| i)
            .unwrap_or(0)
    }

    /// Byte offset of the char boundary after the cursor.
    fn next_boundary(&self) -> usize {
        self.value[self.cursor..]
            .char_indices()
            .nth(1)
            .map(|(i, _)| self.cursor + i)
            .unwrap_or(self.value.len())
    }
}

/// A labelled text field with reactive state.
///
/// Holds the value, cursor and display props of the field, and derives what
/// the field shows: the clear button, the password toggle, the spinner, and
/// which message line wins. Edits notify the `on_change` observer with the
/// new value once the state is committed.
///
/// # Example
///
/// ```ignore
/// let username = TextInput::new()
///     .label("Username")
///     .placeholder("Enter username")
///     .helper_text("This is helper text")
///     .clearable(true)
///     .on_change(|value| log::info!("username: {value}"));
///
/// username.insert_char('a');
/// username.clear();
/// ```
pub struct TextInput {
    /// Unique identifier for this input instance
    id: InputId,
    /// Internal state
    inner: Arc<RwLock<InputInner>>,
    /// Dirty flag for re-render
    dirty: Arc<AtomicBool>,
}

impl TextInput {
    /// Create a new empty input
    pub fn new() -> Self {
        Self {
            id: InputId::new(),
            inner: Arc::new(RwLock::new(InputInner::default())),
            dirty: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Create an input with an initial value
    pub fn with_value(value: impl Into<String>) -> Self {
        let input = Self::new();
        input.set_value(value);
        input.clear_dirty();
        input
    }

    /// Get the unique ID for this input
    pub fn id(&self) -> InputId {
        self.id
    }

    /// Get the ID as a string
    pub fn id_string(&self) -> String {
        self.id.to_string()
    }

    fn read(&self) -> RwLockReadGuard<'_, InputInner> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, InputInner> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }

    fn mark_dirty(&self) {
        self.dirty.store(true, Ordering::SeqCst);
    }

    // -------------------------------------------------------------------------
    // Props
    // -------------------------------------------------------------------------

    pub fn label(self, label: impl Into<String>) -> Self {
        self.write().label = Some(label.into());
        self
    }

    pub fn placeholder(self, placeholder: impl Into<String>) -> Self {
        self.write().placeholder = placeholder.into();
        self
    }

    pub fn helper_text(self, helper: impl Into<String>) -> Self {
        self.write().helper_text = Some(helper.into());
        self
    }

    pub fn error_message(self, message: impl Into<String>) -> Self {
        self.set_error_message(Some(message.into()));
        self
    }

    pub fn disabled(self, disabled: bool) -> Self {
        self.set_disabled(disabled);
        self
    }

    pub fn invalid(self, invalid: bool) -> Self {
        self.write().invalid = invalid;
        self
    }

    pub fn loading(self, loading: bool) -> Self {
        self.set_loading(loading);
        self
    }

    pub fn variant(self, variant: InputVariant) -> Self {
        self.write().variant = variant;
        self
    }

    pub fn size(self, size: InputSize) -> Self {
        self.write().size = size;
        self
    }

    pub fn kind(self, kind: InputKind) -> Self {
        let mut guard = self.write();
        guard.kind = kind;
        guard.password_visible = false;
        drop(guard);
        self
    }

    pub fn clearable(self, clearable: bool) -> Self {
        self.write().clearable = clearable;
        self
    }

    /// Register the change observer.
    pub fn on_change(self, handler: impl Fn(&str) + Send + Sync + 'static) -> Self {
        self.write().on_change = Some(Arc::new(handler));
        self
    }

    /// Replace the error message, or remove it with `None`.
    pub fn set_error_message(&self, message: Option<String>) {
        self.write().error_message = message;
        self.mark_dirty();
    }

    pub fn set_disabled(&self, disabled: bool) {
        self.write().disabled = disabled;
        self.mark_dirty();
    }

    pub fn set_loading(&self, loading: bool) {
        self.write().loading = loading;
        self.mark_dirty();
    }

    // -------------------------------------------------------------------------
    // Read methods
    // -------------------------------------------------------------------------

    /// Get the current text value
    pub fn value(&self) -> String {
        self.read().value.clone()
    }

    /// Get the cursor position (byte offset)
    pub fn cursor(&self) -> usize {
        self.read().cursor
    }

    /// Check if the value is empty
    pub fn is_empty(&self) -> bool {
        self.read().value.is_empty()
    }

    /// Get the length of the value in bytes
    pub fn len(&self) -> usize {
        self.read().value.len()
    }

    pub fn get_label(&self) -> Option<String> {
        self.read().label.clone()
    }

    pub fn get_placeholder(&self) -> String {
        self.read().placeholder.clone()
    }

    pub fn get_variant(&self) -> InputVariant {
        self.read().variant
    }

    pub fn get_size(&self) -> InputSize {
        self.read().size
    }

    pub fn get_kind(&self) -> InputKind {
        self.read().kind
    }

    pub fn is_disabled(&self) -> bool {
        self.read().disabled
    }

    pub fn is_loading(&self) -> bool {
        self.read().loading
    }

    /// Invalid when flagged so, or when an error message is present.
    pub fn is_invalid(&self) -> bool {
        let guard = self.read();
        guard.invalid || guard.error_message.is_some()
    }

    /// The message line; an error message wins over helper text.
    pub fn message(&self) -> Option<InputMessage> {
        let guard = self.read();
        guard
            .error_message
            .clone()
            .map(InputMessage::Error)
            .or_else(|| guard.helper_text.clone().map(InputMessage::Helper))
    }

    /// The kind the field presents as; a revealed password shows as text.
    pub fn effective_kind(&self) -> InputKind {
        let guard = self.read();
        match guard.kind {
            InputKind::Password if guard.password_visible => InputKind::Text,
            kind => kind,
        }
    }

    /// Check if the password is shown in clear text.
    pub fn is_password_visible(&self) -> bool {
        self.read().password_visible
    }

    pub fn shows_password_toggle(&self) -> bool {
        let guard = self.read();
        guard.kind == InputKind::Password && !guard.disabled && !guard.loading
    }

    pub fn shows_clear_button(&self) -> bool {
        let guard = self.read();
        guard.clearable && !guard.disabled && !guard.value.is_empty()
    }

    pub fn shows_spinner(&self) -> bool {
        self.read().loading
    }

    /// Text to display: the value (masked for hidden passwords) or the
    /// placeholder when empty.
    pub fn display_text(&self) -> String {
        let guard = self.read();
        if guard.value.is_empty() {
            guard.placeholder.clone()
        } else if guard.kind == InputKind::Password && !guard.password_visible {
            "•".repeat(guard.value.chars().count())
        } else {
            guard.value.clone()
        }
    }

    // -------------------------------------------------------------------------
    // Transitions
    // -------------------------------------------------------------------------

    /// Show or hide the password.
    ///
    /// Returns `false` when the toggle isn't offered.
    pub fn toggle_password_visibility(&self) -> bool {
        if !self.shows_password_toggle() {
            trace!("Input {}: password toggle not available", self.id);
            return false;
        }
        let mut guard = self.write();
        guard.password_visible = !guard.password_visible;
        self.mark_dirty();
        true
    }

    /// Set the value from the host without notifying.
    pub fn set_value(&self, value: impl Into<String>) {
        let mut guard = self.write();
        guard.value = value.into();
        guard.cursor = guard.value.len();
        self.mark_dirty();
    }

    /// Empty the value. Ignored while disabled.
    pub fn clear(&self) -> bool {
        self.edit(|inner| {
            inner.value.clear();
            inner.cursor = 0;
            true
        })
    }

    /// Insert a character at the cursor position
    pub fn insert_char(&self, c: char) -> bool {
        self.edit(|inner| {
            let cursor = inner.cursor;
            inner.value.insert(cursor, c);
            inner.cursor += c.len_utf8();
            true
        })
    }

    /// Delete the character before the cursor (backspace)
    pub fn delete_char_before(&self) -> bool {
        self.edit(|inner| {
            if inner.cursor == 0 {
                return false;
            }
            let prev = inner.prev_boundary();
            inner.value.remove(prev);
            inner.cursor = prev;
            true
        })
    }

    /// Delete the character at the cursor (delete key)
    pub fn delete_char_at(&self) -> bool {
        self.edit(|inner| {
            if inner.cursor >= inner.value.len() {
                return false;
            }
            let cursor = inner.cursor;
            inner.value.remove(cursor);
            true
        })
    }

    /// Move cursor left
    pub fn cursor_left(&self) -> bool {
        self.move_cursor(InputInner::prev_boundary)
    }

    /// Move cursor right
    pub fn cursor_right(&self) -> bool {
        self.move_cursor(InputInner::next_boundary)
    }

    /// Move cursor to start
    pub fn cursor_home(&self) -> bool {
        self.move_cursor(|_| 0)
    }

    /// Move cursor to end
    pub fn cursor_end(&self) -> bool {
        self.move_cursor(|inner| inner.value.len())
    }

    fn move_cursor(&self, target: impl FnOnce(&InputInner) -> usize) -> bool {
        let mut guard = self.write();
        if guard.disabled {
            return false;
        }
        let next = target(&*guard);
        if next == guard.cursor {
            return false;
        }
        guard.cursor = next;
        self.mark_dirty();
        true
    }

    /// Apply a value edit, then notify with the new value.
    ///
    /// Disabled inputs ignore edits. The lock is released before the
    /// observer runs.
    fn edit(&self, f: impl FnOnce(&mut InputInner) -> bool) -> bool {
        let (value, handler) = {
            let mut guard = self.write();
            if guard.disabled {
                trace!("Input {}: edit ignored, disabled", self.id);
                return false;
            }
            if !f(&mut *guard) {
                return false;
            }
            (guard.value.clone(), guard.on_change.clone())
        };
        self.mark_dirty();
        if let Some(handler) = handler {
            handler(&value);
        }
        true
    }

    // -------------------------------------------------------------------------
    // Dirty tracking
    // -------------------------------------------------------------------------

    /// Check if the input state has changed
    pub fn is_dirty(&self) -> bool {
        self.dirty.load(Ordering::SeqCst)
    }

    /// Clear the dirty flag
    pub fn clear_dirty(&self) {
        self.dirty.store(false, Ordering::SeqCst);
    }
}

impl Clone for TextInput {
    fn clone(&self) -> Self {
        Self {
            id: self.id,
            inner: Arc::clone(&self.inner),
            dirty: Arc::clone(&self.dirty),
        }
    }
}

impl Default for TextInput {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for TextInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TextInput")
            .field("id", &self.id)
            .field("value", &self.value())
            .finish_non_exhaustive()
    }
}
