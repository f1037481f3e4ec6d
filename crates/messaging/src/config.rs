//! Messaging configuration
//!
//! TOML-based configuration with sensible defaults. The batching layer has
//! a single tunable: the encoded-byte threshold at which a batch is full.
//!
//! # Parsing
//!
//! ```
//! use std::str::FromStr;
//! use rivulet_messaging::MessagingConfig;
//!
//! let config = MessagingConfig::from_str("batch_capacity = 4096").unwrap();
//! assert_eq!(config.batch_capacity, 4096);
//! ```

use std::str::FromStr;

use serde::Deserialize;

use crate::DEFAULT_BATCH_CAPACITY;
use crate::error::{MessagingError, Result};

/// Configuration for the outbound batching layer
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct MessagingConfig {
    /// Encoded-byte threshold at which a batch is handed off
    /// Default: 262144 (256KB)
    pub batch_capacity: usize,
}

impl Default for MessagingConfig {
    fn default() -> Self {
        Self {
            batch_capacity: DEFAULT_BATCH_CAPACITY,
        }
    }
}

impl MessagingConfig {
    /// Validate the configuration
    ///
    /// Rejects a zero `batch_capacity` at load time rather than letting the
    /// buffer constructor surface it later.
    pub fn validate(&self) -> Result<()> {
        if self.batch_capacity == 0 {
            return Err(MessagingError::invalid_batch_capacity(self.batch_capacity));
        }
        Ok(())
    }
}

impl FromStr for MessagingConfig {
    type Err = MessagingError;

    fn from_str(s: &str) -> Result<Self> {
        let config: Self = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }
}
