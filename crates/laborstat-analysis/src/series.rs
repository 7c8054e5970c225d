//! Single-series view of an observation table.

use chrono::{Months, NaiveDate};
use laborstat_types::{Frequency, ObservationTable};
use serde::Serialize;

use crate::AnalysisError;

/// A dated value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TimePoint {
    /// First day of the observation's period.
    pub date: NaiveDate,
    /// Observed value.
    pub value: f64,
}

/// One series as an ordered sequence of dated values.
///
/// Annual averages of sub-annual series and absent values are left out, so
/// the sequence holds only real observations at a single frequency.
#[derive(Debug, Clone, PartialEq)]
pub struct TimeSeries {
    series_id: String,
    frequency: Frequency,
    points: Vec<TimePoint>,
}

impl TimeSeries {
    /// Builds the time series for `series_id` out of `table`.
    ///
    /// # Errors
    ///
    /// Returns [`AnalysisError::EmptySeries`] if the table holds no values for
    /// the series and [`AnalysisError::MixedFrequency`] if its periods are not
    /// all monthly, all quarterly, and so on.
    pub fn from_table(table: &ObservationTable, series_id: &str) -> Result<Self, AnalysisError> {
        let mut frequency = None;
        let mut points = Vec::new();

        for obs in table.series(series_id) {
            let Some(obs_frequency) = obs.period().frequency() else {
                continue;
            };
            match frequency {
                None => frequency = Some(obs_frequency),
                Some(f) if f != obs_frequency => {
                    return Err(AnalysisError::MixedFrequency(series_id.to_string()));
                }
                Some(_) => {}
            }
            if let (Some(date), Some(value)) = (obs.date(), obs.value()) {
                points.push(TimePoint { date, value });
            }
        }

        match frequency {
            Some(frequency) if !points.is_empty() => Ok(Self {
                series_id: series_id.to_string(),
                frequency,
                points,
            }),
            _ => Err(AnalysisError::EmptySeries(series_id.to_string())),
        }
    }

    /// Builds a series directly from points, which must already be in date
    /// order.
    ///
    /// # Errors
    ///
    /// Returns [`AnalysisError::EmptySeries`] if `points` is empty.
    pub fn from_points(
        series_id: impl Into<String>,
        frequency: Frequency,
        points: Vec<TimePoint>,
    ) -> Result<Self, AnalysisError> {
        let series_id = series_id.into();
        if points.is_empty() {
            return Err(AnalysisError::EmptySeries(series_id));
        }
        Ok(Self {
            series_id,
            frequency,
            points,
        })
    }

    /// Returns the series id.
    #[must_use]
    pub fn series_id(&self) -> &str {
        &self.series_id
    }

    /// Returns the sampling frequency.
    #[must_use]
    pub const fn frequency(&self) -> Frequency {
        self.frequency
    }

    /// Returns the points in date order.
    #[must_use]
    pub fn points(&self) -> &[TimePoint] {
        &self.points
    }

    /// Returns the values in date order.
    pub fn values(&self) -> impl Iterator<Item = f64> + '_ {
        self.points.iter().map(|p| p.value)
    }

    /// Returns the number of points.
    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Returns true if there are no points.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Returns the date of the last point.
    #[must_use]
    pub fn last_date(&self) -> Option<NaiveDate> {
        self.points.last().map(|p| p.date)
    }

    /// Returns the `horizon` period start dates following the last point.
    #[must_use]
    pub fn future_dates(&self, horizon: usize) -> Vec<NaiveDate> {
        let Some(last) = self.last_date() else {
            return Vec::new();
        };
        let step = 12 / self.frequency.periods_per_year();
        (1..=horizon)
            .map_while(|i| {
                let months = u32::try_from(i).ok()?.checked_mul(step)?;
                last.checked_add_months(Months::new(months))
            })
            .collect()
    }
}
