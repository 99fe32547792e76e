//! Error types for the overlay engine.

use chrono::NaiveDate;
use thiserror::Error;

/// Result type alias for overlay engine operations.
pub type Result<T> = std::result::Result<T, OverlayError>;

/// Error types for the overlay engine.
///
/// Missing history is never an error: calculators answer it with NaN output
/// and the engine omits the overlay. These variants cover contract violations
/// by the caller.
#[derive(Error, Debug)]
pub enum OverlayError {
    /// Data length mismatch between arrays.
    #[error("Data length mismatch: expected {expected}, got {actual}")]
    LengthMismatch { expected: usize, actual: usize },

    /// Invalid parameter value.
    #[error("Invalid parameter: {message}")]
    InvalidParameter { message: String },

    /// Bars are not in ascending date order.
    #[error("Bar at index {index} ({date}) is earlier than its predecessor")]
    UnsortedDates { index: usize, date: NaiveDate },

    /// The same date appears twice in a price series.
    #[error("Duplicate bar date {date}")]
    DuplicateDate { date: NaiveDate },

    /// Settings value outside its domain.
    #[error("Invalid settings: {message}")]
    InvalidSettings { message: String },

    /// Settings document could not be (de)serialized.
    #[error("Settings serialization error: {0}")]
    Settings(#[from] serde_json::Error),
}

impl OverlayError {
    /// Create a length mismatch error.
    pub fn length_mismatch(expected: usize, actual: usize) -> Self {
        Self::LengthMismatch { expected, actual }
    }

    /// Create an invalid parameter error.
    pub fn invalid_parameter(message: impl Into<String>) -> Self {
        Self::InvalidParameter {
            message: message.into(),
        }
    }

    /// Create an invalid settings error.
    pub fn invalid_settings(message: impl Into<String>) -> Self {
        Self::InvalidSettings {
            message: message.into(),
        }
    }
}
