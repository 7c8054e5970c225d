//! BLS API access tiers and their limits.

/// Access tier of the BLS Public Data API.
///
/// Requests with a registration key use API version 2 and its larger limits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ApiTier {
    /// Version 1, no registration key.
    Public,
    /// Version 2, registration key sent with each request.
    #[default]
    Registered,
}

impl ApiTier {
    /// Returns the tier implied by an optional registration key.
    #[must_use]
    pub fn for_key(api_key: Option<&str>) -> Self {
        match api_key {
            Some(key) if !key.trim().is_empty() => Self::Registered,
            _ => Self::Public,
        }
    }

    /// Returns the API version path segment.
    #[must_use]
    pub const fn api_version(&self) -> &'static str {
        match self {
            Self::Public => "v1",
            Self::Registered => "v2",
        }
    }

    /// Returns the maximum number of years per request.
    #[must_use]
    pub const fn max_years(&self) -> u32 {
        match self {
            Self::Public => 10,
            Self::Registered => 20,
        }
    }

    /// Returns the maximum number of series per request.
    #[must_use]
    pub const fn series_per_request(&self) -> usize {
        match self {
            Self::Public => 25,
            Self::Registered => 50,
        }
    }

    /// Returns the daily request quota.
    #[must_use]
    pub const fn daily_requests(&self) -> usize {
        match self {
            Self::Public => 25,
            Self::Registered => 500,
        }
    }
}

impl std::fmt::Display for ApiTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Public => write!(f, "public (v1)"),
            Self::Registered => write!(f, "registered (v2)"),
        }
    }
}
