//! The series retrieval contract.

use async_trait::async_trait;
use laborstat_types::{SeriesObservation, YearRange};
use thiserror::Error;

/// Errors a [`SeriesClient`] can report for one retrieval.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RetrieveError {
    /// Credentials were missing, invalid or expired.
    #[error("Authentication failed: {0}")]
    Auth(String),

    /// The provider's request rate or daily quota was exceeded.
    #[error("Rate limit exceeded: {0}")]
    RateLimit(String),

    /// Transport failure or server error after retries.
    #[error("Network error: {0}")]
    Network(String),

    /// The requested range is wider than the provider allows per request.
    #[error("Year range {range} spans {} years, provider allows at most {max_span}", .range.span())]
    RangeTooLarge {
        /// The rejected range.
        range: YearRange,
        /// The provider's per-request limit.
        max_span: u32,
    },

    /// The provider rejected the request for another reason.
    #[error("Request rejected: {0}")]
    Api(String),

    /// The provider's response could not be understood.
    #[error("Malformed response: {0}")]
    Parse(String),
}

/// A provider that returns observations for a set of series over a year range.
///
/// Implementations own authentication, retries and rate-limit handling; a
/// failed call is reported as-is to the fetcher.
#[async_trait]
pub trait SeriesClient: Send + Sync {
    /// Returns the maximum number of years the provider accepts per call.
    fn max_span(&self) -> u32;

    /// Retrieves all observations of `series_ids` within `range`.
    ///
    /// # Errors
    ///
    /// Returns an error if the provider rejects or fails the request.
    async fn retrieve(
        &self,
        series_ids: &[String],
        range: YearRange,
    ) -> Result<Vec<SeriesObservation>, RetrieveError>;
}
