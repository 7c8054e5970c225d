//! Analysis errors.

use thiserror::Error;

/// Errors raised while reshaping or modelling series.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AnalysisError {
    /// The series has no usable observations.
    #[error("Series {0} has no observations")]
    EmptySeries(String),

    /// The series mixes monthly, quarterly or other periods.
    #[error("Series {0} mixes period frequencies")]
    MixedFrequency(String),

    /// Moving-average window of zero.
    #[error("Window must be at least 1")]
    InvalidWindow,

    /// Forecast horizon of zero.
    #[error("Forecast horizon must be at least 1")]
    InvalidHorizon,

    /// A model service returned output of the wrong shape.
    #[error("Model returned {actual} values, expected {expected}")]
    ShapeMismatch {
        /// Expected number of values.
        expected: usize,
        /// Number of values returned.
        actual: usize,
    },

    /// A model service failed.
    #[error("Model service error: {0}")]
    Service(String),
}
