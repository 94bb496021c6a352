//! Error types for the dalal workspace.
//!
//! Only malformed input is an error. Conditions such as short histories,
//! zero divisors or unknown sectors are absorbed by the scoring code and
//! reported as [`Fallback`](crate::Fallback) notes instead.

use crate::Date;
use thiserror::Error;

/// The main error type for dalal operations.
#[derive(Debug, Error)]
pub enum DalalError {
    /// Error due to invalid or malformed data.
    #[error("Invalid data: {0}")]
    InvalidData(String),

    /// A price history was empty.
    #[error("Price history is empty")]
    EmptySeries,

    /// Price bars were not strictly ascending by date.
    #[error("Dates must be strictly ascending: bar {index} ({current}) follows {previous}")]
    UnsortedDates {
        /// Position of the offending bar.
        index: usize,
        /// Date of the preceding bar.
        previous: Date,
        /// Date of the offending bar.
        current: Date,
    },

    /// A bar carried a negative volume.
    #[error("Negative volume {volume} at bar {index}")]
    NegativeVolume {
        /// Position of the offending bar.
        index: usize,
        /// The rejected volume.
        volume: f64,
    },

    /// A price, volume or metric was NaN or infinite where a number is required.
    #[error("Non-finite value in '{field}' at position {index}")]
    NonFiniteValue {
        /// Name of the field or metric.
        field: String,
        /// Position of the offending value.
        index: usize,
    },

    /// A category weight was negative or not finite.
    #[error("Invalid weight {weight} for category '{category}'")]
    InvalidWeight {
        /// Category name.
        category: String,
        /// The rejected weight.
        weight: f64,
    },

    /// Indicator series lengths did not line up.
    #[error("Series '{name}' has length {actual}, expected {expected}")]
    LengthMismatch {
        /// Series name.
        name: String,
        /// Required length.
        expected: usize,
        /// Supplied length.
        actual: usize,
    },

    /// Error when a required column is missing from a DataFrame.
    #[error("Missing required column: {0}")]
    MissingColumn(String),

    /// Error from Polars operations.
    #[error("Polars error: {0}")]
    Polars(#[from] polars::error::PolarsError),

    /// Error parsing or writing JSON.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Error reading configuration or input files.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic error for other cases.
    #[error("Error: {0}")]
    Other(String),
}

impl From<String> for DalalError {
    fn from(s: String) -> Self {
        Self::Other(s)
    }
}

impl From<&str> for DalalError {
    fn from(s: &str) -> Self {
        Self::Other(s.to_string())
    }
}

/// A specialized Result type for dalal operations.
pub type Result<T> = std::result::Result<T, DalalError>;
