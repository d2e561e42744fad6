//! Error types for the board engine

use thiserror::Error;

/// Result type for board operations
pub type Result<T> = std::result::Result<T, BoardError>;

/// Errors that can occur in board operations
#[derive(Debug, Error)]
pub enum BoardError {
    /// Imported text has no usable Canvas Code object
    #[error("malformed payload: {message}")]
    MalformedPayload { message: String },

    /// Project not found
    #[error("project not found: {id}")]
    ProjectNotFound { id: String },

    /// Column not found
    #[error("column not found: {id}")]
    ColumnNotFound { id: String },

    /// Card not found
    #[error("card not found: {id}")]
    CardNotFound { id: String },

    /// Task index does not exist on the card
    #[error("task {index} not found on card {card}")]
    TaskNotFound { card: String, index: usize },

    /// Positional index outside the sequence
    #[error("index {index} out of range for sequence of length {len}")]
    IndexOutOfRange { index: usize, len: usize },

    /// The key-value store could not be read or written
    #[error("storage unavailable: {message}")]
    StorageUnavailable { message: String },

    /// Configuration could not be loaded or failed validation
    #[error("invalid configuration: {message}")]
    InvalidConfig { message: String },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl BoardError {
    /// Create a malformed payload error
    pub fn malformed(message: impl Into<String>) -> Self {
        Self::MalformedPayload {
            message: message.into(),
        }
    }

    /// Create a storage error
    pub fn storage(message: impl Into<String>) -> Self {
        Self::StorageUnavailable {
            message: message.into(),
        }
    }

    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }

    /// Check if this error reports a reference to something that does not exist
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::ProjectNotFound { .. }
                | Self::ColumnNotFound { .. }
                | Self::CardNotFound { .. }
                | Self::TaskNotFound { .. }
        )
    }
}

impl From<figment::Error> for BoardError {
    fn from(error: figment::Error) -> Self {
        Self::config(error.to_string())
    }
}
