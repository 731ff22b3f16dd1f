//! DataGrid widget - sortable, selectable rows with shared state.

pub mod events;
mod state;

pub use events::GridTarget;
pub use state::{DataGrid, GridId, GridStatus, SelectionHandler};
