//! Grid configuration.

use serde::{Deserialize, Serialize};

use crate::error::{JoistError, JoistResult};
use crate::selection::SelectionMode;

/// Default row-key field name.
pub const DEFAULT_ROW_KEY_FIELD: &str = "id";

/// Per-grid configuration.
///
/// Deserializes from partial settings: absent fields take their defaults.
///
/// ```ignore
/// let config = GridConfig::new()
///     .selectable(true)
///     .selection_mode(SelectionMode::Multiple);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    /// While loading, the grid is render-only.
    pub loading: bool,

    /// Whether rows carry a selection control.
    pub selectable: bool,

    /// Single or multiple selection.
    pub selection_mode: SelectionMode,

    /// Field holding each record's identity.
    pub row_key_field: String,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            loading: false,
            selectable: false,
            selection_mode: SelectionMode::default(),
            row_key_field: DEFAULT_ROW_KEY_FIELD.to_string(),
        }
    }
}

impl GridConfig {
    /// Create a config with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the loading flag.
    pub fn loading(mut self, loading: bool) -> Self {
        self.loading = loading;
        self
    }

    /// Enable or disable row selection.
    pub fn selectable(mut self, selectable: bool) -> Self {
        self.selectable = selectable;
        self
    }

    /// Set the selection mode.
    pub fn selection_mode(mut self, mode: SelectionMode) -> Self {
        self.selection_mode = mode;
        self
    }

    /// Set the row-key field.
    pub fn row_key_field(mut self, field: impl Into<String>) -> Self {
        self.row_key_field = field.into();
        self
    }

    /// Check the config is usable.
    pub fn validate(&self) -> JoistResult<()> {
        if self.row_key_field.trim().is_empty() {
            return Err(JoistError::InvalidConfig(
                "row_key_field must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}
