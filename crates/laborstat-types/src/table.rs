//! Deduplicated, calendar-ordered observation table.

use serde::Serialize;
use std::collections::BTreeSet;

use crate::SeriesObservation;

/// Observations unique on `(series id, year, period)`, sorted ascending by
/// year, then calendar period, then series id.
///
/// The only ways to build a table are [`ObservationTable::from_observations`]
/// and [`ObservationTable::merge`], both of which restore the invariant.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ObservationTable {
    rows: Vec<SeriesObservation>,
}

impl ObservationTable {
    /// Creates an empty table.
    #[must_use]
    pub const fn new() -> Self {
        Self { rows: Vec::new() }
    }

    /// Builds a table from observations in any order.
    ///
    /// When several observations share a key, the first one encountered is kept.
    #[must_use]
    pub fn from_observations(observations: impl IntoIterator<Item = SeriesObservation>) -> Self {
        let mut rows: Vec<SeriesObservation> = observations.into_iter().collect();
        // Stable, so equal keys keep their arrival order and dedup keeps the first
        rows.sort_by(|a, b| a.key().cmp(&b.key()));
        rows.dedup_by(|later, earlier| later.key() == earlier.key());
        Self { rows }
    }

    /// Merges another table into this one, keeping this table's rows on
    /// duplicate keys.
    #[must_use]
    pub fn merge(self, other: Self) -> Self {
        Self::from_observations(self.rows.into_iter().chain(other.rows))
    }

    /// Returns the number of observations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Returns true if the table holds no observations.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Returns the observations in table order.
    #[must_use]
    pub fn as_slice(&self) -> &[SeriesObservation] {
        &self.rows
    }

    /// Returns an iterator over the observations in table order.
    pub fn iter(&self) -> std::slice::Iter<'_, SeriesObservation> {
        self.rows.iter()
    }

    /// Returns the observations of one series, in calendar order.
    pub fn series<'a>(&'a self, series_id: &'a str) -> impl Iterator<Item = &'a SeriesObservation> {
        self.rows
            .iter()
            .filter(move |obs| obs.series_id() == series_id)
    }

    /// Returns the distinct series ids present, sorted.
    #[must_use]
    pub fn series_ids(&self) -> Vec<&str> {
        self.rows
            .iter()
            .map(SeriesObservation::series_id)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Returns the earliest and latest year present.
    #[must_use]
    pub fn year_bounds(&self) -> Option<(i32, i32)> {
        Some((self.rows.first()?.year(), self.rows.last()?.year()))
    }

    /// Consumes the table, returning the observations.
    #[must_use]
    pub fn into_inner(self) -> Vec<SeriesObservation> {
        self.rows
    }
}

impl<'a> IntoIterator for &'a ObservationTable {
    type Item = &'a SeriesObservation;
    type IntoIter = std::slice::Iter<'a, SeriesObservation>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}

impl IntoIterator for ObservationTable {
    type Item = SeriesObservation;
    type IntoIter = std::vec::IntoIter<SeriesObservation>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.into_iter()
    }
}

impl FromIterator<SeriesObservation> for ObservationTable {
    fn from_iter<I: IntoIterator<Item = SeriesObservation>>(iter: I) -> Self {
        Self::from_observations(iter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Period;
    use proptest::prelude::*;
    use std::collections::HashSet;

    fn obs(series: &str, year: i32, month: u8, value: f64) -> SeriesObservation {
        SeriesObservation::new(series, year, Period::Month(month), Some(value))
    }

    #[test]
    fn test_sorts_by_year_then_calendar_period() {
        let table = ObservationTable::from_observations(vec![
            obs("A", 2021, 10, 1.0),
            obs("A", 2020, 12, 2.0),
            obs("A", 2021, 2, 3.0),
            obs("A", 2021, 1, 4.0),
        ]);
        let keys: Vec<_> = table.iter().map(|o| (o.year(), o.period().code())).collect();
        assert_eq!(
            keys,
            vec![
                (2020, "M12".to_string()),
                (2021, "M01".to_string()),
                (2021, "M02".to_string()),
                (2021, "M10".to_string()),
            ]
        );
    }

    #[test]
    fn test_dedup_keeps_first_occurrence() {
        let table = ObservationTable::from_observations(vec![
            obs("A", 2001, 12, 1.0),
            obs("B", 2001, 12, 5.0),
            obs("A", 2001, 12, 9.0),
        ]);
        assert_eq!(table.len(), 2);
        let a = table.series("A").next().unwrap();
        assert_eq!(a.value(), Some(1.0));
    }

    #[test]
    fn test_merge_prefers_left() {
        let left = ObservationTable::from_observations(vec![obs("A", 2001, 1, 1.0)]);
        let right = ObservationTable::from_observations(vec![
            obs("A", 2001, 1, 2.0),
            obs("A", 2002, 1, 3.0),
        ]);
        let merged = left.merge(right);
        assert_eq!(merged.len(), 2);
        assert_eq!(merged.as_slice()[0].value(), Some(1.0));
        assert_eq!(merged.year_bounds(), Some((2001, 2002)));
    }

    #[test]
    fn test_series_ids() {
        let table: ObservationTable = vec![obs("B", 2001, 1, 1.0), obs("A", 2001, 2, 1.0)]
            .into_iter()
            .collect();
        assert_eq!(table.series_ids(), vec!["A", "B"]);
        assert_eq!(ObservationTable::new().year_bounds(), None);
    }

    fn arb_observation() -> impl Strategy<Value = SeriesObservation> {
        (
            prop::sample::select(vec!["LNS14000000", "CES0000000001", "JTS000000000000000JOL"]),
            1990i32..2010,
            1u8..=13,
        )
            .prop_map(|(series, year, month)| {
                let period = if month == 13 {
                    Period::AnnualAverage(crate::Frequency::Monthly)
                } else {
                    Period::Month(month)
                };
                SeriesObservation::new(series, year, period, Some(f64::from(month)))
            })
    }

    proptest! {
        #[test]
        fn table_is_sorted_and_unique(rows in prop::collection::vec(arb_observation(), 0..200)) {
            let table = ObservationTable::from_observations(rows);
            for pair in table.as_slice().windows(2) {
                prop_assert!(
                    (pair[0].year(), pair[0].period()) <= (pair[1].year(), pair[1].period())
                );
            }
            let keys: HashSet<_> = table.iter().map(SeriesObservation::key).collect();
            prop_assert_eq!(keys.len(), table.len());
        }

        #[test]
        fn merging_overlaps_matches_single_table(
            rows in prop::collection::vec(arb_observation(), 0..200),
            split in 0usize..200,
            overlap in 0usize..50,
        ) {
            // Two overlapping windows of the same source rows
            let split = split.min(rows.len());
            let left_end = (split + overlap).min(rows.len());
            let left = ObservationTable::from_observations(rows[..left_end].to_vec());
            let right = ObservationTable::from_observations(rows[split..].to_vec());

            let merged = left.merge(right);
            let once = ObservationTable::from_observations(rows);
            prop_assert_eq!(merged, once);
        }

        #[test]
        fn from_observations_is_idempotent(rows in prop::collection::vec(arb_observation(), 0..200)) {
            let once = ObservationTable::from_observations(rows);
            let twice = ObservationTable::from_observations(once.clone());
            prop_assert_eq!(once, twice);
        }
    }
}
