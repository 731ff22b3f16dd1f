//! Selection state management.
//!
//! Selection is keyed by row identity rather than position, so it survives
//! re-sorting and record replacement. The selected set keeps insertion order;
//! removing an entry leaves the relative order of the rest intact.

use indexmap::IndexMap;
use log::trace;
use serde::{Deserialize, Serialize};

use crate::config::DEFAULT_ROW_KEY_FIELD;
use crate::record::{GridRecord, key_of};
use crate::value::RowKey;

/// Selection mode for a grid.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SelectionMode {
    /// At most one record selected (radio-button style).
    #[default]
    Single,
    /// Any number of records selected (checkbox style).
    Multiple,
}

/// Identities added and removed by a transition.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionChange {
    pub added: Vec<RowKey>,
    pub removed: Vec<RowKey>,
}

impl SelectionChange {
    /// True when the transition changed nothing.
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty()
    }
}

/// Identity-keyed selection state.
///
/// The mode and row-key field are fixed for the lifetime of the value;
/// switching modes means building a fresh `Selection`.
#[derive(Debug, Clone)]
pub struct Selection<T> {
    mode: SelectionMode,
    row_key_field: String,
    selected: IndexMap<RowKey, T>,
}

impl<T: GridRecord> Default for Selection<T> {
    fn default() -> Self {
        Self::new(SelectionMode::default(), DEFAULT_ROW_KEY_FIELD)
    }
}

impl<T: GridRecord> Selection<T> {
    /// Create an empty selection.
    pub fn new(mode: SelectionMode, row_key_field: impl Into<String>) -> Self {
        Self {
            mode,
            row_key_field: row_key_field.into(),
            selected: IndexMap::new(),
        }
    }

    /// Create an empty single-selection.
    pub fn single() -> Self {
        Self::new(SelectionMode::Single, DEFAULT_ROW_KEY_FIELD)
    }

    /// Create an empty multi-selection.
    pub fn multiple() -> Self {
        Self::new(SelectionMode::Multiple, DEFAULT_ROW_KEY_FIELD)
    }

    /// Get the selection mode.
    pub fn mode(&self) -> SelectionMode {
        self.mode
    }

    /// Get the row-key field used to resolve identities.
    pub fn row_key_field(&self) -> &str {
        &self.row_key_field
    }

    /// Resolve a record's identity.
    pub fn key_of(&self, record: &T) -> Option<RowKey> {
        key_of(record, &self.row_key_field)
    }

    /// Number of selected records.
    pub fn len(&self) -> usize {
        self.selected.len()
    }

    /// Check if nothing is selected.
    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    /// The complete selection, in selection order.
    pub fn selected(&self) -> Vec<T> {
        self.selected.values().cloned().collect()
    }

    /// Selected identities, in selection order.
    pub fn selected_keys(&self) -> impl Iterator<Item = &RowKey> {
        self.selected.keys()
    }

    /// Check whether an identity is selected.
    pub fn contains(&self, key: &RowKey) -> bool {
        self.selected.contains_key(key)
    }

    /// Check whether a record is selected.
    ///
    /// Always false for records without an identity.
    pub fn is_selected(&self, record: &T) -> bool {
        self.key_of(record)
            .is_some_and(|key| self.selected.contains_key(&key))
    }

    /// Check whether every record of a non-empty view is selected.
    pub fn all_selected<'a, I>(&self, view: I) -> bool
    where
        I: IntoIterator<Item = &'a T>,
    {
        let mut any = false;
        for record in view {
            any = true;
            if !self.is_selected(record) {
                return false;
            }
        }
        any
    }

    /// Toggle a record.
    ///
    /// Single mode: deselects the record if it is the current selection,
    /// otherwise makes it the only selection. Multiple mode: flips membership.
    /// Records without an identity are ignored.
    pub fn toggle(&mut self, record: &T) -> SelectionChange {
        let Some(key) = self.key_of(record) else {
            trace!("Toggle ignored: record has no '{}'", self.row_key_field);
            return SelectionChange::default();
        };

        let mut change = SelectionChange::default();
        match self.mode {
            SelectionMode::Single => {
                let was_selected = self.selected.contains_key(&key);
                change.removed = self.selected.drain(..).map(|(k, _)| k).collect();
                if !was_selected {
                    self.selected.insert(key.clone(), record.clone());
                    change.added.push(key);
                }
            }
            SelectionMode::Multiple => {
                if self.selected.shift_remove(&key).is_some() {
                    change.removed.push(key);
                } else {
                    self.selected.insert(key.clone(), record.clone());
                    change.added.push(key);
                }
            }
        }
        change
    }

    /// Replace the selection with every identifiable record of a view.
    ///
    /// Only meaningful in multiple mode; a no-op in single mode. Records
    /// without an identity are skipped, since nothing could later deselect
    /// them individually.
    pub fn select_all<'a, I>(&mut self, view: I) -> SelectionChange
    where
        I: IntoIterator<Item = &'a T>,
    {
        if self.mode != SelectionMode::Multiple {
            trace!("Select-all ignored in single mode");
            return SelectionChange::default();
        }

        let mut next = IndexMap::new();
        for record in view {
            if let Some(key) = self.key_of(record) {
                next.entry(key).or_insert_with(|| record.clone());
            }
        }
        let change = diff(&self.selected, &next);
        self.selected = next;
        change
    }

    /// Clear the selection.
    pub fn deselect_all(&mut self) -> SelectionChange {
        SelectionChange {
            added: Vec::new(),
            removed: self.selected.drain(..).map(|(k, _)| k).collect(),
        }
    }

    /// Reconcile with a replaced record collection.
    ///
    /// Entries whose identity no longer appears are dropped; the rest pick up
    /// the fresh record value.
    pub fn retain_present(&mut self, records: &[T]) -> SelectionChange {
        let mut fresh: IndexMap<RowKey, &T> = IndexMap::new();
        for record in records {
            if let Some(key) = self.key_of(record) {
                fresh.entry(key).or_insert(record);
            }
        }

        let mut change = SelectionChange::default();
        self.selected.retain(|key, record| match fresh.get(key) {
            Some(current) => {
                *record = (*current).clone();
                true
            }
            None => {
                change.removed.push(key.clone());
                false
            }
        });
        change
    }
}

fn diff<T>(before: &IndexMap<RowKey, T>, after: &IndexMap<RowKey, T>) -> SelectionChange {
    SelectionChange {
        added: after
            .keys()
            .filter(|k| !before.contains_key(*k))
            .cloned()
            .collect(),
        removed: before
            .keys()
            .filter(|k| !after.contains_key(*k))
            .cloned()
            .collect(),
    }
}
