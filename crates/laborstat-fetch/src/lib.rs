//! HTTP client and range-chunked series fetching for laborstat.
//!
//! This crate provides the retrieval pipeline:
//!
//! - [`SeriesClient`] - Contract for a provider that returns observations for a year range
//! - [`BlsClient`] - BLS Public Data API client with retries and backoff
//! - [`fetch_series`] - Splits a range, fetches each sub-range in order and merges the results
//! - [`fetch_series_with_progress`] - [`fetch_series`] with a callback per fetched sub-range
//! - [`observation_stream`] - The same sequential loop as a stream of per-range batches
//! - [`RequestPlan`] - Request count and quota check for a planned fetch

#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod client;
mod plan;
mod source;
mod stream;
mod tier;
pub mod url;
mod wire;

pub use client::{BlsClient, ClientConfig};
pub use plan::RequestPlan;
pub use source::{RetrieveError, SeriesClient};
pub use stream::{
    FetchError, ObservationBatch, fetch_series, fetch_series_with_progress, observation_stream,
};
pub use tier::ApiTier;
pub use wire::parse_response;
