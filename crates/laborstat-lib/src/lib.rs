//! Range-chunked retrieval of BLS statistical series.
//!
//! This is a facade crate that re-exports functionality from the laborstat
//! workspace crates for convenient access.
//!
//! # Quick Start
//!
//! ```ignore
//! use laborstat_lib::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = BlsClient::new(ClientConfig::default().with_api_key("your-key"))?;
//!     let series = vec!["LNS14000000".to_string()];
//!
//!     let table = fetch_series(&client, &series, 1982, 2022, client.max_span()).await?;
//!     for obs in &table {
//!         println!("{} {} {:?}", obs.year(), obs.period(), obs.value());
//!     }
//!
//!     Ok(())
//! }
//! ```

#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Re-export core types
pub use laborstat_types::*;

// Re-export series catalog
pub use laborstat_series::SeriesRegistry;

// Re-export fetch functionality
#[cfg(feature = "fetch")]
pub use laborstat_fetch::{
    ApiTier, BlsClient, ClientConfig, FetchError, ObservationBatch, RequestPlan, RetrieveError,
    SeriesClient, fetch_series, fetch_series_with_progress, observation_stream,
};

// Re-export analysis
#[cfg(feature = "analysis")]
pub use laborstat_analysis::{
    AnalysisError, Decomposer, Decomposition, Forecast, ForecastStep, Forecaster, RollingMean,
    TimePoint, TimeSeries, WideRow, WideTable, decompose_series, forecast_series,
    moving_average, with_moving_average,
};

// Re-export formatters
#[cfg(feature = "format")]
pub use laborstat_format::{
    CsvFormatter, FormatError, Formatter, JsonFormatter, JsonStyle, OutputFormat,
};

#[cfg(all(feature = "format", feature = "parquet"))]
pub use laborstat_format::ParquetFormatter;

/// Prelude module for convenient imports.
///
/// ```
/// use laborstat_lib::prelude::*;
/// ```
pub mod prelude {
    pub use laborstat_types::{
        Frequency, LaborstatError, ObservationTable, Period, Result, SeriesInfo,
        SeriesObservation, Survey, YearRange, YearRangeError,
    };

    pub use laborstat_series::SeriesRegistry;

    #[cfg(feature = "fetch")]
    pub use laborstat_fetch::{
        ApiTier, BlsClient, ClientConfig, FetchError, RetrieveError, SeriesClient, fetch_series,
        fetch_series_with_progress, observation_stream,
    };

    #[cfg(feature = "analysis")]
    pub use laborstat_analysis::{TimeSeries, WideTable, moving_average};

    #[cfg(feature = "format")]
    pub use laborstat_format::{CsvFormatter, Formatter, JsonFormatter, OutputFormat};

    #[cfg(all(feature = "format", feature = "parquet"))]
    pub use laborstat_format::ParquetFormatter;
}
