//! Configuration errors.

use thiserror::Error;

/// Errors produced while loading or validating a [`TuningConfig`](crate::config::TuningConfig).
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The JSON document could not be parsed.
    #[error("Failed to parse tuning config: {0}")]
    Parse(#[from] serde_json::Error),

    /// A value is NaN or infinite.
    #[error("{field} must be finite, got {value}")]
    NonFinite {
        /// Dotted field path, e.g. `tether.spring_k`.
        field: &'static str,
        value: f64,
    },

    /// A value that must be strictly positive is not.
    #[error("{field} must be > 0, got {value}")]
    NonPositive { field: &'static str, value: f64 },

    /// A value that must be non-negative is negative.
    #[error("{field} must be >= 0, got {value}")]
    Negative { field: &'static str, value: f64 },

    /// A value lies outside its allowed closed range.
    #[error("{field} must be within [{min}, {max}], got {value}")]
    OutOfRange {
        field: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },

    /// The rope needs at least two samples to draw anything.
    #[error("tether.rope_segments must be >= 2, got {0}")]
    TooFewSegments(usize),
}
