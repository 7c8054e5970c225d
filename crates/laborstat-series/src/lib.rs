//! Series catalog for the laborstat labor-statistics fetcher.
//!
//! This crate provides metadata for commonly used BLS series, such as the
//! survey that publishes them and the first year with data.
//!
//! # Example
//!
//! ```
//! use laborstat_series::SeriesRegistry;
//!
//! let registry = SeriesRegistry::global();
//!
//! // Lookup by ID
//! if let Some(series) = registry.get("lns14000000") {
//!     println!("{}: since {}", series.name(), series.start_year());
//! }
//! ```

#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

use std::collections::HashMap;
use std::sync::OnceLock;

use laborstat_types::{SeriesInfo, Survey};

/// The catalog JSON embedded at compile time.
const SERIES_JSON: &str = include_str!("../data/series.json");

/// Global series registry instance.
static REGISTRY: OnceLock<SeriesRegistry> = OnceLock::new();

/// Registry of catalogued series, keyed by upper-case series id.
#[derive(Debug)]
pub struct SeriesRegistry {
    series: HashMap<String, SeriesInfo>,
}

impl SeriesRegistry {
    /// Returns the global series registry.
    ///
    /// The registry is initialized lazily on first access.
    #[must_use]
    pub fn global() -> &'static Self {
        REGISTRY.get_or_init(Self::load)
    }

    /// Loads series from the embedded JSON data.
    fn load() -> Self {
        let entries: Vec<SeriesInfo> =
            serde_json::from_str(SERIES_JSON).expect("Invalid series.json");
        let series = entries
            .into_iter()
            .map(|info| (info.id().to_uppercase(), info))
            .collect();
        Self { series }
    }

    /// Looks up a series by ID (case-insensitive).
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&SeriesInfo> {
        self.series.get(&id.trim().to_uppercase())
    }

    /// Returns all series as an iterator.
    pub fn all(&self) -> impl Iterator<Item = &SeriesInfo> {
        self.series.values()
    }

    /// Returns the total number of series.
    #[must_use]
    pub fn len(&self) -> usize {
        self.series.len()
    }

    /// Returns true if the registry is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }

    /// Returns series published by the given survey.
    pub fn by_survey(&self, survey: Survey) -> impl Iterator<Item = &SeriesInfo> {
        self.series.values().filter(move |s| s.survey() == survey)
    }

    /// Searches series by id or title (case-insensitive).
    pub fn search(&self, pattern: &str) -> Vec<&SeriesInfo> {
        let pattern = pattern.to_lowercase();
        self.series
            .values()
            .filter(|s| {
                s.id().to_lowercase().contains(&pattern)
                    || s.name().to_lowercase().contains(&pattern)
            })
            .collect()
    }

    /// Returns all series IDs sorted alphabetically.
    pub fn ids(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self.series.values().map(SeriesInfo::id).collect();
        ids.sort_unstable();
        ids
    }
}
