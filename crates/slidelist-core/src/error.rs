//! Error types for reorder operations.

use thiserror::Error;

/// Errors that can occur while reordering a list.
///
/// Out-of-range neighbor lookups during a drag are absorbed by the session
/// and never show up here; these variants cover precondition violations and
/// host-side commits.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReorderError {
    /// The dragged item is not present in the list it was attached to.
    #[error("Dragged item is not present in the list")]
    ItemNotFound,

    /// An index passed to a commit is outside the list.
    #[error("Index {index} is out of range for a list of {len} items")]
    IndexOutOfRange { index: usize, len: usize },

    /// Invalid configuration.
    #[error("Invalid configuration: {message}")]
    InvalidConfig { message: String },

    /// The gesture controller task is no longer running.
    #[error("Gesture controller has shut down")]
    ControllerClosed,
}

impl ReorderError {
    /// Create an invalid configuration error.
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }

    /// Check an index against a list length.
    pub fn check_index(index: usize, len: usize) -> Result<(), Self> {
        if index < len {
            Ok(())
        } else {
            Err(Self::IndexOutOfRange { index, len })
        }
    }
}
