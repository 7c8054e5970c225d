//! CSV output format.

use csv::WriterBuilder;
use laborstat_analysis::WideTable;
use laborstat_types::ObservationTable;
use std::io::Write;

use crate::formatter::ObservationRecord;
use crate::{FormatError, Formatter};

const OBSERVATION_HEADER: [&str; 6] = [
    "series_id",
    "year",
    "period",
    "period_name",
    "date",
    "value",
];

/// CSV formatter.
///
/// Quoting follows RFC 4180: fields holding the delimiter, a quote or a line
/// break are quoted. Absent values are written as empty fields.
#[derive(Debug, Clone)]
pub struct CsvFormatter {
    /// Field delimiter (default: comma).
    delimiter: u8,
    /// Whether to include header row.
    include_header: bool,
}

impl Default for CsvFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl CsvFormatter {
    /// Creates a new CSV formatter with default settings.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            delimiter: b',',
            include_header: true,
        }
    }

    /// Sets the field delimiter.
    #[must_use]
    pub const fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Sets whether to include a header row.
    #[must_use]
    pub const fn with_header(mut self, include: bool) -> Self {
        self.include_header = include;
        self
    }

    /// Creates a tab-separated values (TSV) formatter.
    #[must_use]
    pub const fn tsv() -> Self {
        Self {
            delimiter: b'\t',
            include_header: true,
        }
    }

    fn writer<W: Write>(&self, writer: W) -> csv::Writer<W> {
        WriterBuilder::new()
            .delimiter(self.delimiter)
            .has_headers(false)
            .from_writer(writer)
    }
}

fn value_field(value: Option<f64>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

impl Formatter for CsvFormatter {
    fn write_observations<W: Write + Send>(
        &self,
        table: &ObservationTable,
        writer: W,
    ) -> Result<(), FormatError> {
        let mut writer = self.writer(writer);

        if self.include_header {
            writer.write_record(OBSERVATION_HEADER)?;
        }

        for obs in table {
            let record = ObservationRecord::from(obs);
            writer.write_record([
                record.series_id.to_string(),
                record.year.to_string(),
                record.period,
                record.period_name,
                record
                    .date
                    .map(|date| date.format("%Y-%m-%d").to_string())
                    .unwrap_or_default(),
                value_field(record.value),
            ])?;
        }

        writer.flush()?;
        Ok(())
    }

    fn write_wide<W: Write + Send>(&self, table: &WideTable, writer: W) -> Result<(), FormatError> {
        let mut writer = self.writer(writer);

        if self.include_header {
            let header = ["year", "period"]
                .into_iter()
                .chain(table.columns().iter().map(String::as_str));
            writer.write_record(header)?;
        }

        for row in table.rows() {
            let fields = [row.year.to_string(), row.period.code()]
                .into_iter()
                .chain(row.values.iter().map(|value| value_field(*value)));
            writer.write_record(fields)?;
        }

        writer.flush()?;
        Ok(())
    }

    fn extension(&self) -> &str {
        if self.delimiter == b'\t' { "tsv" } else { "csv" }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formatter::fixtures;
    use laborstat_types::{Period, SeriesObservation};
    use std::io::Cursor;

    #[test]
    fn test_csv_observations() {
        let formatter = CsvFormatter::new();
        let mut output = Cursor::new(Vec::new());

        formatter
            .write_observations(&fixtures::table(), &mut output)
            .unwrap();

        let result = String::from_utf8(output.into_inner()).unwrap();
        let lines: Vec<_> = result.lines().collect();
        assert_eq!(lines[0], "series_id,year,period,period_name,date,value");
        assert_eq!(lines[1], "CES0000000001,2024,M01,January,2024-01-01,");
        assert_eq!(lines[2], "LNS14000000,2024,M01,January,2024-01-01,3.7");
        assert_eq!(lines[3], "LNS14000000,2024,M02,February,2024-02-01,3.9");
    }

    #[test]
    fn test_csv_no_header() {
        let formatter = CsvFormatter::new().with_header(false);
        let mut output = Cursor::new(Vec::new());

        formatter
            .write_observations(&fixtures::table(), &mut output)
            .unwrap();

        let result = String::from_utf8(output.into_inner()).unwrap();
        assert!(!result.contains("series_id"));
        assert_eq!(result.lines().count(), 3);
    }

    #[test]
    fn test_csv_wide() {
        let formatter = CsvFormatter::new();
        let mut output = Cursor::new(Vec::new());

        formatter.write_wide(&fixtures::wide(), &mut output).unwrap();

        let result = String::from_utf8(output.into_inner()).unwrap();
        let lines: Vec<_> = result.lines().collect();
        assert_eq!(lines[0], "year,period,CES0000000001,LNS14000000");
        assert_eq!(lines[1], "2024,M01,,3.7");
        assert_eq!(lines[2], "2024,M02,,3.9");
    }

    #[test]
    fn test_tsv() {
        let formatter = CsvFormatter::tsv();
        let mut output = Cursor::new(Vec::new());

        formatter.write_wide(&fixtures::wide(), &mut output).unwrap();

        let result = String::from_utf8(output.into_inner()).unwrap();
        assert!(result.starts_with("year\tperiod\tCES"));
        assert_eq!(formatter.extension(), "tsv");
    }

    #[test]
    fn test_csv_quotes_special_fields() {
        let table = ObservationTable::from_observations(vec![
            SeriesObservation::new("LNS14000000", 2024, Period::Month(1), Some(3.7))
                .with_period_name("Jan, \"prelim\""),
        ]);
        let mut output = Cursor::new(Vec::new());

        CsvFormatter::new()
            .write_observations(&table, &mut output)
            .unwrap();

        let result = String::from_utf8(output.into_inner()).unwrap();
        let lines: Vec<_> = result.lines().collect();
        assert_eq!(
            lines[1],
            "LNS14000000,2024,M01,\"Jan, \"\"prelim\"\"\",2024-01-01,3.7"
        );
    }

    #[test]
    fn test_tsv_keeps_commas_unquoted() {
        let table = ObservationTable::from_observations(vec![
            SeriesObservation::new("LNS14000000", 2024, Period::Month(1), Some(3.7))
                .with_period_name("Jan, revised"),
        ]);
        let mut output = Cursor::new(Vec::new());

        CsvFormatter::tsv()
            .with_header(false)
            .write_observations(&table, &mut output)
            .unwrap();

        let result = String::from_utf8(output.into_inner()).unwrap();
        assert_eq!(result, "LNS14000000\t2024\tM01\tJan, revised\t2024-01-01\t3.7\n");
    }
}
