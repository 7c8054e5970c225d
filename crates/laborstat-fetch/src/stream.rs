//! Range-chunked fetching and merging.

use futures::stream::{self, Stream, TryStreamExt};
use laborstat_types::{ObservationTable, SeriesObservation, YearRange, YearRangeError};
use std::pin::pin;
use thiserror::Error;

use crate::{RetrieveError, SeriesClient};

/// Errors that abort a fetch.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    /// The requested range or span was invalid.
    #[error(transparent)]
    InvalidRange(#[from] YearRangeError),

    /// No series ids were given.
    #[error("No series requested")]
    NoSeries,

    /// Retrieval of one sub-range failed; nothing from the fetch is returned.
    #[error("Fetching years {range} failed: {source}")]
    SubRange {
        /// The sub-range being fetched when the error occurred.
        range: YearRange,
        /// The client's error.
        #[source]
        source: RetrieveError,
    },
}

impl FetchError {
    /// Returns the sub-range that failed, if the error came from the client.
    #[must_use]
    pub const fn failed_range(&self) -> Option<YearRange> {
        match self {
            Self::SubRange { range, .. } => Some(*range),
            _ => None,
        }
    }

    /// Returns the client error, if any.
    #[must_use]
    pub const fn retrieve_error(&self) -> Option<&RetrieveError> {
        match self {
            Self::SubRange { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Observations returned for one sub-range.
#[derive(Debug, Clone)]
pub struct ObservationBatch {
    /// The sub-range that was fetched.
    pub range: YearRange,
    /// The observations, in provider order.
    pub observations: Vec<SeriesObservation>,
}

impl ObservationBatch {
    /// Returns true if the batch is empty.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }

    /// Returns the number of observations in the batch.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.observations.len()
    }
}

/// Creates a stream of per-sub-range batches for the given series and range.
///
/// Sub-ranges are fetched strictly one after another, in ascending order;
/// the next request is only issued when the consumer polls for it. The
/// stream ends right after the first error.
///
/// # Errors
///
/// Returns an error up front if `series_ids` is empty or `max_span` is zero.
pub fn observation_stream<'a, C>(
    client: &'a C,
    series_ids: &'a [String],
    range: YearRange,
    max_span: u32,
) -> Result<impl Stream<Item = Result<ObservationBatch, FetchError>> + 'a, FetchError>
where
    C: SeriesClient + ?Sized,
{
    if series_ids.is_empty() {
        return Err(FetchError::NoSeries);
    }
    let sub_ranges = range.chunks(max_span)?;
    tracing::debug!(%range, max_span, chunks = sub_ranges.len(), "planned sub-ranges");

    Ok(stream::unfold(Some(sub_ranges), move |state| async move {
        let mut sub_ranges = state?;
        let range = sub_ranges.next()?;
        match fetch_sub_range(client, series_ids, range).await {
            Ok(batch) => Some((Ok(batch), Some(sub_ranges))),
            Err(e) => Some((Err(e), None)),
        }
    }))
}

async fn fetch_sub_range<C>(
    client: &C,
    series_ids: &[String],
    range: YearRange,
) -> Result<ObservationBatch, FetchError>
where
    C: SeriesClient + ?Sized,
{
    let max_span = client.max_span();
    if range.span() > max_span {
        return Err(FetchError::SubRange {
            range,
            source: RetrieveError::RangeTooLarge { range, max_span },
        });
    }

    match client.retrieve(series_ids, range).await {
        Ok(observations) => {
            tracing::debug!(%range, rows = observations.len(), "fetched sub-range");
            Ok(ObservationBatch {
                range,
                observations,
            })
        }
        Err(source) => {
            tracing::warn!(%range, error = %source, "sub-range fetch failed");
            Err(FetchError::SubRange { range, source })
        }
    }
}

/// Fetches `series_ids` over `[min_year, max_year]`, issuing one client call
/// per sub-range of at most `max_span` years, and merges the results into a
/// deduplicated table sorted by year and calendar period.
///
/// Duplicate series ids are requested once.
///
/// # Errors
///
/// Returns an error if the range is invalid, no series are given, or any
/// sub-range call fails. Observations from earlier sub-ranges are discarded
/// in that case.
pub async fn fetch_series<C>(
    client: &C,
    series_ids: &[String],
    min_year: i32,
    max_year: i32,
    max_span: u32,
) -> Result<ObservationTable, FetchError>
where
    C: SeriesClient + ?Sized,
{
    fetch_series_with_progress(client, series_ids, min_year, max_year, max_span, |_| {}).await
}

/// Same as [`fetch_series`], calling `on_batch` after each sub-range
/// arrives and before the next request is issued.
///
/// # Errors
///
/// Same as [`fetch_series`]. `on_batch` has seen every batch fetched before
/// the failure.
#[tracing::instrument(skip(client, series_ids, on_batch), fields(series = series_ids.len()))]
pub async fn fetch_series_with_progress<C, F>(
    client: &C,
    series_ids: &[String],
    min_year: i32,
    max_year: i32,
    max_span: u32,
    mut on_batch: F,
) -> Result<ObservationTable, FetchError>
where
    C: SeriesClient + ?Sized,
    F: FnMut(&ObservationBatch),
{
    let range = YearRange::new(min_year, max_year)?;
    let series_ids = unique_series_ids(series_ids);

    let mut observations = Vec::new();
    let mut batches = pin!(observation_stream(client, &series_ids, range, max_span)?);
    while let Some(batch) = batches.try_next().await? {
        on_batch(&batch);
        observations.extend(batch.observations);
    }

    let table = ObservationTable::from_observations(observations);
    tracing::info!(%range, rows = table.len(), "fetch complete");
    Ok(table)
}

/// Trims ids and drops repeats, keeping first-seen order.
fn unique_series_ids(series_ids: &[String]) -> Vec<String> {
    let mut unique: Vec<String> = Vec::with_capacity(series_ids.len());
    for id in series_ids {
        let id = id.trim();
        if !id.is_empty() && !unique.iter().any(|seen| seen == id) {
            unique.push(id.to_string());
        }
    }
    unique
}
