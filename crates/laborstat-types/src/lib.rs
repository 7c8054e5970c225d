//! Core types for the laborstat labor-statistics fetcher.
//!
//! This crate provides the fundamental data structures used throughout laborstat:
//!
//! - [`YearRange`] - Closed year interval, and [`split_years`] to chunk it
//! - [`Period`] - Provider period code (month, quarter, half-year, annual)
//! - [`SeriesObservation`] - One reported data point of a series
//! - [`ObservationTable`] - Deduplicated observations in calendar order
//! - [`SeriesInfo`] - Catalogued series metadata

#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod error;
mod observation;
mod period;
mod series_info;
mod table;
mod year_range;

pub use error::{LaborstatError, Result, YearRangeError};
pub use observation::{ObservationKey, SeriesObservation};
pub use period::{Period, PeriodParseError};
pub use series_info::{Frequency, SeriesInfo, Survey};
pub use table::ObservationTable;
pub use year_range::{SubRanges, YearRange, split_years};
