//! Error types for laborstat.

use thiserror::Error;

use crate::PeriodParseError;

/// Result type alias for laborstat operations.
pub type Result<T> = std::result::Result<T, LaborstatError>;

/// Errors raised while building laborstat values from raw input.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LaborstatError {
    /// Invalid year range or chunk span.
    #[error(transparent)]
    InvalidRange(#[from] YearRangeError),

    /// Unrecognised period code or label.
    #[error(transparent)]
    Period(#[from] PeriodParseError),

    /// Year field that is not a number.
    #[error("Invalid year: {0:?}")]
    InvalidYear(String),
}

/// Error for invalid year ranges passed to the range splitter.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum YearRangeError {
    /// Start year is after end year.
    #[error("Invalid year range: {start} > {end}")]
    InvalidRange {
        /// The start year.
        start: i32,
        /// The end year.
        end: i32,
    },

    /// Maximum span per chunk is zero.
    #[error("Invalid year range: maximum span must be at least 1 year, got {0}")]
    InvalidSpan(u32),
}
