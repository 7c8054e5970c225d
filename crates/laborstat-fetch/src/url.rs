//! BLS endpoint construction.

use crate::ApiTier;

/// Base URL of the BLS Public Data API.
pub const BASE_URL: &str = "https://api.bls.gov/publicAPI";

/// Builds the time series endpoint for the given API root and tier.
///
/// URL format: `{base}/{VERSION}/timeseries/data/`
///
/// # Example
///
/// ```
/// use laborstat_fetch::{ApiTier, url::{BASE_URL, timeseries_url}};
///
/// let url = timeseries_url(BASE_URL, ApiTier::Registered);
/// assert_eq!(url, "https://api.bls.gov/publicAPI/v2/timeseries/data/");
/// ```
#[must_use]
pub fn timeseries_url(base: &str, tier: ApiTier) -> String {
    format!(
        "{}/{}/timeseries/data/",
        base.trim_end_matches('/'),
        tier.api_version()
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timeseries_url_public() {
        assert_eq!(
            timeseries_url(BASE_URL, ApiTier::Public),
            "https://api.bls.gov/publicAPI/v1/timeseries/data/"
        );
    }

    #[test]
    fn test_timeseries_url_trailing_slash() {
        assert_eq!(
            timeseries_url("http://127.0.0.1:8080/", ApiTier::Registered),
            "http://127.0.0.1:8080/v2/timeseries/data/"
        );
    }
}
