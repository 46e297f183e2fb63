//! Error types for Ripplecut.

use thiserror::Error;

/// Main error type for Ripplecut operations.
///
/// Interactive timeline mutations never produce these: stale indices are
/// no-ops and degenerate ranges are clamped. Errors surface only from
/// genuinely fallible boundaries such as serialization.
#[derive(Error, Debug)]
pub enum RipplecutError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Result type alias for Ripplecut operations.
pub type Result<T> = std::result::Result<T, RipplecutError>;
