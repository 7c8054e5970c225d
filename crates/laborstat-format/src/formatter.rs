//! Output format abstraction.

use chrono::NaiveDate;
use laborstat_analysis::WideTable;
use laborstat_types::{ObservationTable, SeriesObservation};
use serde::Serialize;
use std::io::Write;
use thiserror::Error;

/// Output format identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum OutputFormat {
    /// CSV format.
    #[default]
    Csv,
    /// Tab-separated values.
    Tsv,
    /// JSON array format.
    Json,
    /// Newline-delimited JSON format.
    Ndjson,
    /// Apache Parquet format.
    Parquet,
}

impl OutputFormat {
    /// Returns the file extension for this format.
    #[must_use]
    pub const fn extension(&self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Tsv => "tsv",
            Self::Json => "json",
            Self::Ndjson => "ndjson",
            Self::Parquet => "parquet",
        }
    }

    /// Returns all available formats.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[
            Self::Csv,
            Self::Tsv,
            Self::Json,
            Self::Ndjson,
            Self::Parquet,
        ]
    }

    /// Guesses the format from a file path's extension.
    #[must_use]
    pub fn from_path(path: &std::path::Path) -> Option<Self> {
        path.extension()?.to_str()?.parse().ok()
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.extension())
    }
}

impl std::str::FromStr for OutputFormat {
    type Err = FormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "csv" => Ok(Self::Csv),
            "tsv" => Ok(Self::Tsv),
            "json" => Ok(Self::Json),
            "ndjson" | "jsonl" => Ok(Self::Ndjson),
            "parquet" | "pq" => Ok(Self::Parquet),
            _ => Err(FormatError::UnknownFormat(s.to_string())),
        }
    }
}

/// Errors that can occur during formatting.
#[derive(Error, Debug)]
pub enum FormatError {
    /// Unknown output format.
    #[error("Unknown format: {0}")]
    UnknownFormat(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV writer error.
    #[cfg(feature = "csv")]
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Arrow/Parquet error.
    #[error("Parquet error: {0}")]
    Parquet(String),
}

/// Trait for output formatters.
pub trait Formatter: Send + Sync {
    /// Writes one row per observation.
    ///
    /// # Errors
    ///
    /// Returns an error if writing fails.
    fn write_observations<W: Write + Send>(
        &self,
        table: &ObservationTable,
        writer: W,
    ) -> Result<(), FormatError>;

    /// Writes one row per period with one column per series.
    ///
    /// # Errors
    ///
    /// Returns an error if writing fails.
    fn write_wide<W: Write + Send>(&self, table: &WideTable, writer: W) -> Result<(), FormatError>;

    /// Returns the file extension for this format.
    fn extension(&self) -> &str;
}

/// Flat view of an observation shared by the row-oriented formatters.
#[derive(Debug, Serialize)]
pub(crate) struct ObservationRecord<'a> {
    pub(crate) series_id: &'a str,
    pub(crate) year: i32,
    pub(crate) period: String,
    pub(crate) period_name: String,
    pub(crate) date: Option<NaiveDate>,
    pub(crate) value: Option<f64>,
    #[serde(skip_serializing_if = "no_footnotes")]
    pub(crate) footnotes: &'a [String],
}

fn no_footnotes(footnotes: &&[String]) -> bool {
    footnotes.is_empty()
}

impl<'a> From<&'a SeriesObservation> for ObservationRecord<'a> {
    fn from(obs: &'a SeriesObservation) -> Self {
        Self {
            series_id: obs.series_id(),
            year: obs.year(),
            period: obs.period().code(),
            period_name: obs.period_name(),
            date: obs.date(),
            value: obs.value(),
            footnotes: obs.footnotes(),
        }
    }
}
