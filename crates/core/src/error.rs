//! Error types for kartos
//!
//! All kernel failures are reported synchronously to the immediate caller;
//! there is no retry policy inside the kernel. Numerically degenerate cases
//! (zero variance, zero denominator) return defined neutral values instead of
//! errors; those contracts are documented per function.

use thiserror::Error;

/// Main error type for kartos operations
#[derive(Error, Debug)]
pub enum Error {
    #[error("Empty input: at least one feature or point is required")]
    EmptyInput,

    #[error("Insufficient points: need at least {needed}, got {got}")]
    InsufficientPoints { needed: usize, got: usize },

    #[error("Dimension mismatch: expected {expected}, got {got}")]
    DimensionMismatch { expected: usize, got: usize },

    #[error("Unsupported geometry type: {0}")]
    UnsupportedGeometry(String),

    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    #[error("Non-invertible matrix: pivot below tolerance during Gauss-Jordan elimination")]
    NonInvertibleMatrix,

    #[error("Invalid parameter: {name} = {value} ({reason})")]
    InvalidParameter {
        name: &'static str,
        value: String,
        reason: String,
    },

    #[error("Invalid grid dimensions: {cols}x{rows}")]
    InvalidDimensions { rows: usize, cols: usize },

    #[error("Index out of bounds: ({row}, {col}) in grid of size ({rows}, {cols})")]
    IndexOutOfBounds {
        row: usize,
        col: usize,
        rows: usize,
        cols: usize,
    },

    #[error("Grid size mismatch: expected ({er}, {ec}), got ({ar}, {ac})")]
    SizeMismatch { er: usize, ec: usize, ar: usize, ac: usize },

    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Shorthand for `InvalidParameter` with a displayable value.
    pub fn invalid_parameter(
        name: &'static str,
        value: impl std::fmt::Display,
        reason: impl Into<String>,
    ) -> Self {
        Error::InvalidParameter {
            name,
            value: value.to_string(),
            reason: reason.into(),
        }
    }
}

/// Result type alias for kartos operations
pub type Result<T> = std::result::Result<T, Error>;
