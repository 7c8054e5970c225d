//! Wide (one column per series) view of an observation table.

use std::collections::BTreeMap;

use laborstat_types::{ObservationTable, Period};
use serde::Serialize;

/// One period of a [`WideTable`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WideRow {
    /// Calendar year.
    pub year: i32,
    /// Period within the year.
    pub period: Period,
    /// One value per column, `None` where the series has no data.
    pub values: Vec<Option<f64>>,
}

/// Observation table pivoted to one row per `(year, period)` and one
/// column per series.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct WideTable {
    columns: Vec<String>,
    rows: Vec<WideRow>,
}

impl WideTable {
    /// Pivots `table`. Columns are the sorted series ids; rows follow
    /// calendar order.
    #[must_use]
    pub fn from_table(table: &ObservationTable) -> Self {
        let columns: Vec<String> = table.series_ids().into_iter().map(String::from).collect();
        let index: BTreeMap<&str, usize> = columns
            .iter()
            .enumerate()
            .map(|(i, id)| (id.as_str(), i))
            .collect();

        let mut cells: BTreeMap<(i32, Period), Vec<Option<f64>>> = BTreeMap::new();
        for obs in table {
            let row = cells
                .entry((obs.year(), obs.period()))
                .or_insert_with(|| vec![None; columns.len()]);
            if let Some(&col) = index.get(obs.series_id()) {
                row[col] = obs.value();
            }
        }

        let rows = cells
            .into_iter()
            .map(|((year, period), values)| WideRow {
                year,
                period,
                values,
            })
            .collect();
        Self { columns, rows }
    }

    /// Returns the column (series id) names.
    #[must_use]
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Returns the rows in calendar order.
    #[must_use]
    pub fn rows(&self) -> &[WideRow] {
        &self.rows
    }

    /// Returns the number of rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Returns true if there are no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
