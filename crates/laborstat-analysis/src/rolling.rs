//! Streaming trailing-window means.

use std::collections::VecDeque;

use laborstat_types::{Frequency, ObservationTable, SeriesObservation};

use crate::AnalysisError;

/// Streaming trailing-window mean.
///
/// Emits a value once `window` observations have been seen. A window that
/// contains an absent value yields `None` rather than a mean over fewer
/// points.
#[derive(Debug, Clone)]
pub struct RollingMean {
    window: usize,
    buffer: VecDeque<Option<f64>>,
}

impl RollingMean {
    /// Creates a rolling mean over `window` observations.
    ///
    /// # Errors
    ///
    /// Returns [`AnalysisError::InvalidWindow`] if `window` is zero.
    pub fn new(window: usize) -> Result<Self, AnalysisError> {
        if window == 0 {
            return Err(AnalysisError::InvalidWindow);
        }
        Ok(Self {
            window,
            buffer: VecDeque::with_capacity(window),
        })
    }

    /// Returns the window length.
    #[must_use]
    pub const fn window(&self) -> usize {
        self.window
    }

    /// Pushes the next value, returning the mean of the window ending at it.
    pub fn process(&mut self, value: Option<f64>) -> Option<f64> {
        if self.buffer.len() == self.window {
            self.buffer.pop_front();
        }
        self.buffer.push_back(value);

        if self.buffer.len() < self.window {
            return None;
        }
        let mut sum = 0.0;
        for value in &self.buffer {
            sum += (*value)?;
        }
        Some(sum / self.window as f64)
    }

    /// Clears the window.
    pub fn reset(&mut self) {
        self.buffer.clear();
    }
}

/// Computes the trailing moving average of `values`.
///
/// The output has one entry per input; the first `window - 1` are `None`.
///
/// # Errors
///
/// Returns [`AnalysisError::InvalidWindow`] if `window` is zero.
pub fn moving_average(
    values: &[Option<f64>],
    window: usize,
) -> Result<Vec<Option<f64>>, AnalysisError> {
    let mut rolling = RollingMean::new(window)?;
    Ok(values.iter().map(|v| rolling.process(*v)).collect())
}

/// Adds a `<id>_MA<window>` series holding the trailing moving average of
/// every series in `table`.
///
/// Windows span calendar periods, not rows: a period missing from the table
/// counts as an absent value, so no mean straddles a gap. Annual averages
/// are skipped; annual series roll over years.
///
/// # Errors
///
/// Returns [`AnalysisError::InvalidWindow`] if `window` is zero.
pub fn with_moving_average(
    table: ObservationTable,
    window: usize,
) -> Result<ObservationTable, AnalysisError> {
    let mut derived = Vec::new();
    for series_id in table.series_ids() {
        let mut rolling = RollingMean::new(window)?;
        let mut previous: Option<(Frequency, i64)> = None;
        let name = format!("{series_id}_MA{window}");
        for obs in table.series(series_id) {
            let period = obs.period();
            let (Some(frequency), Some(index)) = (period.frequency(), period.index_in_year())
            else {
                continue;
            };
            let position =
                i64::from(obs.year()) * i64::from(frequency.periods_per_year()) + i64::from(index);
            match previous {
                Some((last_frequency, last)) if last_frequency == frequency => {
                    let missing = (position - last - 1).clamp(0, window as i64);
                    for _ in 0..missing {
                        rolling.process(None);
                    }
                }
                Some(_) => rolling.reset(),
                None => {}
            }
            previous = Some((frequency, position));

            let mean = rolling.process(obs.value());
            derived.push(
                SeriesObservation::new(name.clone(), obs.year(), period, mean)
                    .with_period_name(obs.period_name()),
            );
        }
    }
    Ok(table.merge(ObservationTable::from_observations(derived)))
}
