//! Error types for container inspection.

use std::path::PathBuf;

use arrow::{datatypes::DataType, error::ArrowError};
use thiserror::Error;

/// Errors raised while opening, reading or rendering an Arrow IPC file.
#[derive(Debug, Error)]
pub enum InspectError {
    /// The path does not exist or cannot be opened for reading.
    #[error("{}: file not found or not readable: {error}", path.display())]
    NotFound { path: PathBuf, error: std::io::Error },

    /// The file exists but is not a valid Arrow IPC file.
    #[error("{}: not a valid Arrow IPC file: {reason}", path.display())]
    Format { path: PathBuf, reason: String },

    /// A batch index outside `[0, count)` was requested.
    #[error("batch index {index} out of range (file has {count} batches)")]
    Index { index: usize, count: usize },

    /// A column holds values that cannot be turned into text.
    #[error("cannot render column '{column}' of type {data_type}: {reason}")]
    Render {
        column: String,
        data_type: DataType,
        reason: String,
    },

    /// A record batch message or body failed to decode.
    #[error("failed to decode batch {index}: {error}")]
    Decode { index: usize, error: ArrowError },

    /// The handle was closed before the batch was requested.
    #[error("container handle is closed")]
    Closed,

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl InspectError {
    /// Whether the run can carry on with the next batch after this error.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, InspectError::Render { .. } | InspectError::Decode { .. })
    }
}

pub type Result<T> = std::result::Result<T, InspectError>;
