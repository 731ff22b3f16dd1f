//! Error types.
//!
//! The interaction core never fails: degenerate input is a silent no-op.
//! Errors only arise at the edges, when validating configuration or
//! loading records from JSON.

use thiserror::Error;

/// Errors produced by joist.
#[derive(Debug, Error)]
pub enum JoistError {
    /// The grid configuration is unusable.
    #[error("invalid grid config: {0}")]
    InvalidConfig(String),

    /// Record JSON could not be parsed.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// A record JSON array contained something other than an object.
    #[error("record {index} is not a JSON object")]
    NotAnObject { index: usize },
}

/// Convenience alias for results in this crate.
pub type JoistResult<T> = Result<T, JoistError>;
