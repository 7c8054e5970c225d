//! Catalogued series definitions.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Survey program that publishes a series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Survey {
    /// Current Population Survey (household survey).
    Cps,
    /// Current Employment Statistics (establishment survey).
    Ces,
    /// Job Openings and Labor Turnover Survey.
    Jolts,
    /// Consumer Price Index.
    Cpi,
    /// Producer Price Index.
    Ppi,
    /// Employment Cost Index.
    Eci,
    /// Labor Productivity and Costs.
    Productivity,
}

impl Survey {
    /// Returns the survey as a string slice.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Cps => "cps",
            Self::Ces => "ces",
            Self::Jolts => "jolts",
            Self::Cpi => "cpi",
            Self::Ppi => "ppi",
            Self::Eci => "eci",
            Self::Productivity => "productivity",
        }
    }

    /// Returns all surveys.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[
            Self::Cps,
            Self::Ces,
            Self::Jolts,
            Self::Cpi,
            Self::Ppi,
            Self::Eci,
            Self::Productivity,
        ]
    }
}

impl std::fmt::Display for Survey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Survey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::all()
            .iter()
            .copied()
            .find(|survey| survey.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| {
                format!(
                    "unknown survey '{s}', expected one of: cps, ces, jolts, cpi, ppi, eci, productivity"
                )
            })
    }
}

/// Publication frequency of a series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Frequency {
    /// Monthly (`M01`..`M12`).
    Monthly,
    /// Quarterly (`Q01`..`Q04`).
    Quarterly,
    /// Semiannual (`S01`, `S02`).
    Semiannual,
    /// Annual (`A01`).
    Annual,
}

impl Frequency {
    /// Returns the number of observations per year.
    #[must_use]
    pub const fn periods_per_year(&self) -> u32 {
        match self {
            Self::Monthly => 12,
            Self::Quarterly => 4,
            Self::Semiannual => 2,
            Self::Annual => 1,
        }
    }
}

impl std::fmt::Display for Frequency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Monthly => "monthly",
            Self::Quarterly => "quarterly",
            Self::Semiannual => "semiannual",
            Self::Annual => "annual",
        };
        write!(f, "{s}")
    }
}

/// Metadata for a catalogued series.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeriesInfo {
    /// Provider series identifier (e.g. "LNS14000000").
    id: String,
    /// Human-readable title.
    name: String,
    /// Publishing survey.
    survey: Survey,
    /// Publication frequency.
    frequency: Frequency,
    /// Whether the series is seasonally adjusted.
    seasonally_adjusted: bool,
    /// First year with published data.
    start_year: i32,
}

impl SeriesInfo {
    /// Creates a new series definition.
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        survey: Survey,
        frequency: Frequency,
        seasonally_adjusted: bool,
        start_year: i32,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            survey,
            frequency,
            seasonally_adjusted,
            start_year,
        }
    }

    /// Returns the series identifier.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Returns the human-readable title.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the publishing survey.
    #[must_use]
    pub const fn survey(&self) -> Survey {
        self.survey
    }

    /// Returns the publication frequency.
    #[must_use]
    pub const fn frequency(&self) -> Frequency {
        self.frequency
    }

    /// Returns true if the series is seasonally adjusted.
    #[must_use]
    pub const fn is_seasonally_adjusted(&self) -> bool {
        self.seasonally_adjusted
    }

    /// Returns the first year with published data.
    #[must_use]
    pub const fn start_year(&self) -> i32 {
        self.start_year
    }
}
