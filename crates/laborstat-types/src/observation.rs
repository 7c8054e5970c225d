//! Series observation representation.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::{LaborstatError, Period};

/// A single reported data point of a statistical series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesObservation {
    series_id: String,
    year: i32,
    period: Period,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    period_name: Option<String>,
    value: Option<f64>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    footnotes: Vec<String>,
}

impl SeriesObservation {
    /// Creates a new observation. `value` is `None` when the provider did not
    /// report a number for the period.
    #[must_use]
    pub fn new(series_id: impl Into<String>, year: i32, period: Period, value: Option<f64>) -> Self {
        Self {
            series_id: series_id.into(),
            year,
            period,
            period_name: None,
            value,
            footnotes: Vec::new(),
        }
    }

    /// Builds an observation from the raw string fields a provider returns.
    ///
    /// Values that are empty, a dash, or otherwise not a number are treated as
    /// unreported.
    ///
    /// # Errors
    ///
    /// Returns an error if the year or the period cannot be parsed.
    pub fn parse(
        series_id: impl Into<String>,
        year: &str,
        period: &str,
        value: &str,
    ) -> Result<Self, LaborstatError> {
        let year = year
            .trim()
            .parse::<i32>()
            .map_err(|_| LaborstatError::InvalidYear(year.to_string()))?;
        let period = period.parse::<Period>()?;
        Ok(Self::new(series_id, year, period, parse_value(value)))
    }

    /// Sets the provider's display name for the period (e.g. `January`).
    #[must_use]
    pub fn with_period_name(mut self, name: impl Into<String>) -> Self {
        self.period_name = Some(name.into());
        self
    }

    /// Sets the provider footnotes attached to this data point.
    #[must_use]
    pub fn with_footnotes(mut self, footnotes: Vec<String>) -> Self {
        self.footnotes = footnotes;
        self
    }

    /// Returns the series identifier.
    #[must_use]
    pub fn series_id(&self) -> &str {
        &self.series_id
    }

    /// Returns the observation year.
    #[must_use]
    pub const fn year(&self) -> i32 {
        self.year
    }

    /// Returns the period within the year.
    #[must_use]
    pub const fn period(&self) -> Period {
        self.period
    }

    /// Returns the provider's period name, falling back to the period label.
    #[must_use]
    pub fn period_name(&self) -> String {
        self.period_name
            .clone()
            .unwrap_or_else(|| self.period.label())
    }

    /// Returns the reported value, if any.
    #[must_use]
    pub const fn value(&self) -> Option<f64> {
        self.value
    }

    /// Returns the footnotes attached to this data point.
    #[must_use]
    pub fn footnotes(&self) -> &[String] {
        &self.footnotes
    }

    /// Returns the first day of the period as a calendar date.
    #[must_use]
    pub fn date(&self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.period.start_month(), 1)
    }

    /// Returns the identity of this observation. Keys order by year, then
    /// calendar period, then series id.
    #[must_use]
    pub fn key(&self) -> ObservationKey<'_> {
        ObservationKey {
            year: self.year,
            period: self.period,
            series_id: &self.series_id,
        }
    }
}

/// Identity of an observation: `(series id, year, period)`.
///
/// Field order gives the table ordering: year, calendar period, series id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObservationKey<'a> {
    /// Observation year.
    pub year: i32,
    /// Period within the year.
    pub period: Period,
    /// Series identifier.
    pub series_id: &'a str,
}

fn parse_value(raw: &str) -> Option<f64> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
}
