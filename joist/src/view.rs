//! View composition.
//!
//! Merges sort order and selection state into the rows a renderer walks.
//! Nothing here holds state; the view is rebuilt whenever it is needed.

use crate::column::Column;
use crate::record::GridRecord;
use crate::selection::Selection;
use crate::sort::{self, SortDirective};
use crate::value::RowKey;

/// Stable handle for a rendered row.
///
/// The record's identity when it has one, its position in the sorted view
/// otherwise.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RowId {
    Key(RowKey),
    Position(usize),
}

/// One row of the composed view.
#[derive(Debug, Clone)]
pub struct RenderRow<'a, T> {
    /// The record, borrowed from the caller's collection.
    pub record: &'a T,
    /// Whether the record is selected.
    pub is_selected: bool,
    /// Position in the sorted view.
    pub position: usize,
    /// Render key.
    pub row_id: RowId,
}

/// Compose the renderable view.
///
/// A directive only takes effect when one of `columns` is a sortable field
/// column for its key; otherwise records keep input order.
pub fn compose_view<'a, T: GridRecord>(
    records: &'a [T],
    columns: &[Column<T>],
    directive: Option<&SortDirective>,
    selection: &Selection<T>,
) -> Vec<RenderRow<'a, T>> {
    let directive =
        directive.filter(|d| columns.iter().any(|c| c.sort_key() == Some(d.key.as_str())));

    sort::apply(records, directive)
        .into_iter()
        .enumerate()
        .map(|(position, record)| {
            let key = selection.key_of(record);
            let is_selected = key.as_ref().is_some_and(|k| selection.contains(k));
            RenderRow {
                record,
                is_selected,
                position,
                row_id: key.map(RowId::Key).unwrap_or(RowId::Position(position)),
            }
        })
        .collect()
}
