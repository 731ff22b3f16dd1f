//! TextInput widget - a labelled text field with reactive state.

pub mod events;
mod state;

pub use state::{ChangeHandler, InputId, InputKind, InputMessage, InputSize, InputVariant, TextInput};
