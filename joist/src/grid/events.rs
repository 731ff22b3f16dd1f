//! Event handling for the DataGrid widget.

use log::trace;

use crate::events::EventResult;
use crate::keybinds::KeyCombo;
use crate::record::GridRecord;

use super::DataGrid;

/// The part of the grid an interaction lands on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GridTarget {
    /// Column header, by column index.
    Header(usize),
    /// Row selection control, by position in the sorted view.
    Row(usize),
    /// The select-all control in the header.
    SelectAll,
}

impl<T: GridRecord> DataGrid<T> {
    /// Pointer activation of a target.
    pub fn activate(&self, target: GridTarget) -> EventResult {
        if !self.is_interactive() {
            trace!("Grid {}: {:?} ignored, not interactive", self.id(), target);
            return EventResult::Ignored;
        }

        let handled = match target {
            GridTarget::Header(column) => self.request_sort(column),
            GridTarget::Row(position) => self.toggle_at(position),
            GridTarget::SelectAll => self.toggle_select_all(),
        };
        handled.into()
    }

    /// Keyboard activation of a focused target.
    ///
    /// Enter and Space behave exactly like a click; other keys are ignored.
    pub fn on_key(&self, target: GridTarget, key: &KeyCombo) -> EventResult {
        if !key.is_activation() {
            return EventResult::Ignored;
        }
        self.activate(target)
    }
}
