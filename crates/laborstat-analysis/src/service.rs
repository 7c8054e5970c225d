//! Seams for external decomposition and forecasting models.
//!
//! Nothing here fits a model. Implementations wrap whatever engine is
//! available; the free functions validate inputs and outputs around them.

use chrono::NaiveDate;
use serde::Serialize;

use crate::{AnalysisError, TimeSeries};

/// Trend, seasonal and irregular components of a series, one value per
/// input point.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Decomposition {
    /// Trend-cycle component.
    pub trend: Vec<f64>,
    /// Seasonal component.
    pub seasonal: Vec<f64>,
    /// Irregular component.
    pub irregular: Vec<f64>,
}

/// One forecast step.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ForecastStep {
    /// Period start date.
    pub date: NaiveDate,
    /// Point forecast.
    pub mean: f64,
    /// Lower prediction bound.
    pub lower: Option<f64>,
    /// Upper prediction bound.
    pub upper: Option<f64>,
}

/// A forecast of a series.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Forecast {
    /// Series the forecast was made for.
    pub series_id: String,
    /// Steps, in date order.
    pub steps: Vec<ForecastStep>,
}

/// Seasonal decomposition service.
pub trait Decomposer {
    /// Decomposes `series` into its components.
    ///
    /// # Errors
    ///
    /// Returns [`AnalysisError::Service`] if the model fails.
    fn decompose(&self, series: &TimeSeries) -> Result<Decomposition, AnalysisError>;
}

/// Forecasting service.
pub trait Forecaster {
    /// Forecasts `horizon` steps past the end of `series`.
    ///
    /// # Errors
    ///
    /// Returns [`AnalysisError::Service`] if the model fails.
    fn forecast(&self, series: &TimeSeries, horizon: usize) -> Result<Forecast, AnalysisError>;
}

/// Runs `decomposer` on `series` and checks every component has one value
/// per point.
///
/// # Errors
///
/// Returns [`AnalysisError::EmptySeries`] for an empty series,
/// [`AnalysisError::ShapeMismatch`] for malformed output, or whatever the
/// service returns.
pub fn decompose_series<D: Decomposer + ?Sized>(
    decomposer: &D,
    series: &TimeSeries,
) -> Result<Decomposition, AnalysisError> {
    if series.is_empty() {
        return Err(AnalysisError::EmptySeries(series.series_id().to_string()));
    }
    let decomposition = decomposer.decompose(series)?;
    let expected = series.len();
    for component in [
        &decomposition.trend,
        &decomposition.seasonal,
        &decomposition.irregular,
    ] {
        if component.len() != expected {
            return Err(AnalysisError::ShapeMismatch {
                expected,
                actual: component.len(),
            });
        }
    }
    Ok(decomposition)
}

/// Runs `forecaster` on `series` and checks it returned `horizon` steps.
///
/// # Errors
///
/// Returns [`AnalysisError::InvalidHorizon`] if `horizon` is zero,
/// [`AnalysisError::EmptySeries`] for an empty series,
/// [`AnalysisError::ShapeMismatch`] for malformed output, or whatever the
/// service returns.
pub fn forecast_series<F: Forecaster + ?Sized>(
    forecaster: &F,
    series: &TimeSeries,
    horizon: usize,
) -> Result<Forecast, AnalysisError> {
    if horizon == 0 {
        return Err(AnalysisError::InvalidHorizon);
    }
    if series.is_empty() {
        return Err(AnalysisError::EmptySeries(series.series_id().to_string()));
    }
    let forecast = forecaster.forecast(series, horizon)?;
    if forecast.steps.len() != horizon {
        return Err(AnalysisError::ShapeMismatch {
            expected: horizon,
            actual: forecast.steps.len(),
        });
    }
    Ok(forecast)
}
