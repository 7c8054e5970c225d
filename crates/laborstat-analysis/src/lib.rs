//! Reshaping, moving averages and model service seams for laborstat.
//!
//! - [`TimeSeries`] - One series as an ordered, dated sequence of values
//! - [`WideTable`] - One row per period, one column per series
//! - [`RollingMean`] - Streaming trailing-window mean
//! - [`Decomposer`] / [`Forecaster`] - Pluggable external model services

#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod error;
mod rolling;
mod series;
mod service;
mod wide;

pub use error::AnalysisError;
pub use rolling::{RollingMean, moving_average, with_moving_average};
pub use series::{TimePoint, TimeSeries};
pub use service::{
    Decomposer, Decomposition, Forecast, ForecastStep, Forecaster, decompose_series,
    forecast_series,
};
pub use wide::{WideRow, WideTable};
