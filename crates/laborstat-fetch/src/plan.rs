//! Request planning against provider limits.

use laborstat_types::{YearRange, YearRangeError};

use crate::ApiTier;

/// The requests a fetch will issue, and how they compare to the tier's limits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestPlan {
    /// Sub-ranges, one client call each.
    pub sub_ranges: Vec<YearRange>,
    /// Number of series batches per sub-range.
    pub series_batches: usize,
    /// Total HTTP requests.
    pub requests: usize,
    /// Tier the plan was made for.
    pub tier: ApiTier,
}

impl RequestPlan {
    /// Plans a fetch of `series_count` series over `range` in chunks of
    /// `max_span` years.
    ///
    /// # Errors
    ///
    /// Returns an error if `max_span` is zero.
    pub fn new(
        series_count: usize,
        range: YearRange,
        max_span: u32,
        tier: ApiTier,
    ) -> Result<Self, YearRangeError> {
        let sub_ranges = range.split(max_span)?;
        let series_batches = series_count.div_ceil(tier.series_per_request());
        Ok(Self {
            requests: sub_ranges.len() * series_batches,
            sub_ranges,
            series_batches,
            tier,
        })
    }

    /// Returns true if the plan needs more requests than the daily quota.
    #[must_use]
    pub fn exceeds_daily_quota(&self) -> bool {
        self.requests > self.tier.daily_requests()
    }

    /// Returns true if some sub-range is wider than the tier accepts.
    #[must_use]
    pub fn exceeds_span_limit(&self) -> bool {
        self.sub_ranges
            .iter()
            .any(|range| range.span() > self.tier.max_years())
    }
}
