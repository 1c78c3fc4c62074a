//! Error types for shimmer-core operations

use std::time::Duration;
use thiserror::Error;

/// Errors while resolving a color reference
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ColorError {
    #[error("unknown color '{name}'")]
    UnknownName { name: String },

    #[error("malformed hex color '{value}': expected #RRGGBB or #AARRGGBB")]
    MalformedHex { value: String },
}

/// Errors when driving the shimmer animation
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AnimationError {
    #[error("shimmer period must be positive, got {period:?}")]
    InvalidPeriod { period: Duration },
}

/// Errors during configuration operations
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to load configuration")]
    Load(#[from] confy::ConfyError),

    #[error("failed to save configuration")]
    Save(#[source] confy::ConfyError),

    #[error("failed to locate configuration file")]
    Locate(#[source] confy::ConfyError),
}
