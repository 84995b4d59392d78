//! Error types for ORC writer options
//!
//! Every failure is raised while turning user-supplied strings into option
//! values. Nothing here is recoverable by retrying: the input stays invalid
//! until the user corrects it.

use thiserror::Error;

/// Result type alias using OptionsError
pub type Result<T> = std::result::Result<T, OptionsError>;

/// Unified error type for option construction and resolution
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum OptionsError {
    // -------------------------------------------------------------------------
    // Parse Errors
    // -------------------------------------------------------------------------
    /// A property string could not be parsed into the expected type.
    /// `value` is the raw string exactly as the user supplied it.
    #[error("Invalid value for {key} property: {value}")]
    InvalidConfigValue { key: String, value: String },

    #[error("Invalid data size: {0}")]
    InvalidDataSize(String),

    // -------------------------------------------------------------------------
    // Range Errors
    // -------------------------------------------------------------------------
    /// The bloom filter false positive probability fell outside (0.0, 1.0).
    #[error("bloomFilterFpp should be > 0.0 & < 1.0")]
    OutOfRangeValue,
}

impl OptionsError {
    pub(crate) fn invalid_config_value(key: &str, value: &str) -> Self {
        OptionsError::InvalidConfigValue {
            key: key.to_string(),
            value: value.to_string(),
        }
    }
}
