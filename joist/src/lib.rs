//! Headless state engine for interactive data grids.
//!
//! The crate models what a grid needs between the data and the paint: a
//! single-column sort directive, identity-keyed selection in single or
//! multiple mode, the composed view that merges the two, and the controller
//! that routes pointer and keyboard activation into those transitions. It
//! never draws anything.

pub mod column;
pub mod config;
pub mod error;
pub mod events;
pub mod grid;
pub mod input;
pub mod keybinds;
pub mod record;
pub mod selection;
pub mod sort;
pub mod value;
pub mod view;

pub use error::{JoistError, JoistResult};
pub use grid::DataGrid;

pub mod prelude {
    pub use crate::column::{Accessor, Column};
    pub use crate::config::GridConfig;
    pub use crate::error::{JoistError, JoistResult};
    pub use crate::events::EventResult;
    pub use crate::grid::{DataGrid, GridStatus, GridTarget};
    pub use crate::input::{InputKind, InputMessage, InputSize, InputVariant, TextInput};
    pub use crate::keybinds::{Key, KeyCombo, Modifiers, convert_key_event};
    pub use crate::record::{GridRecord, records_from_json};
    pub use crate::selection::{Selection, SelectionChange, SelectionMode};
    pub use crate::sort::{SortDirection, SortDirective, SortIndicator, SortState};
    pub use crate::value::{CellValue, RowKey};
    pub use crate::view::{RenderRow, RowId, compose_view};
}
