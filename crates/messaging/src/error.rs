//! Messaging error types
//!
//! The error taxonomy here is deliberately small: the batching layer has no
//! failure modes of its own beyond misconfiguration. Encoding and I/O errors
//! belong to the collaborators and never pass through this crate.

use thiserror::Error;

/// Result type for messaging operations
pub type Result<T> = std::result::Result<T, MessagingError>;

/// Errors that can occur when configuring the messaging layer
#[derive(Debug, Error)]
pub enum MessagingError {
    /// Batch capacity must be positive
    ///
    /// A zero capacity would make every fullness check trivially true and
    /// mask the misconfiguration, so construction rejects it up front.
    #[error("invalid batch capacity: must be positive, got {capacity}")]
    InvalidBatchCapacity {
        /// The rejected capacity value
        capacity: usize,
    },

    /// Failed to parse TOML configuration
    #[error("failed to parse messaging config: {0}")]
    ParseError(#[from] toml::de::Error),
}

impl MessagingError {
    /// Create an InvalidBatchCapacity error
    #[inline]
    pub fn invalid_batch_capacity(capacity: usize) -> Self {
        Self::InvalidBatchCapacity { capacity }
    }
}
