//! JSON output format.

use laborstat_analysis::WideTable;
use laborstat_types::ObservationTable;
use serde::Serialize;
use serde_json::{Map, Value};
use std::io::Write;

use crate::formatter::ObservationRecord;
use crate::{FormatError, Formatter};

/// JSON output style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JsonStyle {
    /// JSON array (standard JSON).
    #[default]
    Array,
    /// Newline-delimited JSON (NDJSON/JSONL).
    Ndjson,
}

/// JSON formatter.
#[derive(Debug, Clone, Default)]
pub struct JsonFormatter {
    /// Output style.
    style: JsonStyle,
    /// Whether to pretty-print (only for array style).
    pretty: bool,
}

impl JsonFormatter {
    /// Creates a new JSON formatter with default settings (array style).
    #[must_use]
    pub const fn new() -> Self {
        Self {
            style: JsonStyle::Array,
            pretty: false,
        }
    }

    /// Creates a new NDJSON formatter.
    #[must_use]
    pub const fn ndjson() -> Self {
        Self {
            style: JsonStyle::Ndjson,
            pretty: false,
        }
    }

    /// Sets whether to pretty-print output (array style only).
    #[must_use]
    pub const fn with_pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    /// Sets the output style.
    #[must_use]
    pub const fn with_style(mut self, style: JsonStyle) -> Self {
        self.style = style;
        self
    }

    fn write_records<T: Serialize, W: Write>(
        &self,
        records: &[T],
        mut writer: W,
    ) -> Result<(), FormatError> {
        match self.style {
            JsonStyle::Array => {
                if self.pretty {
                    serde_json::to_writer_pretty(&mut writer, records)?;
                } else {
                    serde_json::to_writer(&mut writer, records)?;
                }
                writeln!(writer)?;
            }
            JsonStyle::Ndjson => {
                for record in records {
                    serde_json::to_writer(&mut writer, record)?;
                    writeln!(writer)?;
                }
            }
        }
        Ok(())
    }
}

impl Formatter for JsonFormatter {
    fn write_observations<W: Write + Send>(
        &self,
        table: &ObservationTable,
        writer: W,
    ) -> Result<(), FormatError> {
        let records: Vec<_> = table.iter().map(ObservationRecord::from).collect();
        self.write_records(&records, writer)
    }

    fn write_wide<W: Write + Send>(&self, table: &WideTable, writer: W) -> Result<(), FormatError> {
        let records: Vec<Map<String, Value>> = table
            .rows()
            .iter()
            .map(|row| {
                let mut record = Map::new();
                record.insert("year".to_string(), Value::from(row.year));
                record.insert("period".to_string(), Value::from(row.period.code()));
                for (column, value) in table.columns().iter().zip(&row.values) {
                    record.insert(column.clone(), value.map_or(Value::Null, Value::from));
                }
                record
            })
            .collect();
        self.write_records(&records, writer)
    }

    fn extension(&self) -> &str {
        match self.style {
            JsonStyle::Array => "json",
            JsonStyle::Ndjson => "ndjson",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formatter::fixtures;
    use std::io::Cursor;

    #[test]
    fn test_json_array() {
        let formatter = JsonFormatter::new();
        let mut output = Cursor::new(Vec::new());

        formatter
            .write_observations(&fixtures::table(), &mut output)
            .unwrap();

        let result = String::from_utf8(output.into_inner()).unwrap();
        assert!(result.starts_with('['));
        let parsed: Value = serde_json::from_str(&result).unwrap();
        let rows = parsed.as_array().unwrap();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0]["value"], Value::Null);
        assert_eq!(rows[0]["footnotes"][0], "preliminary");
        assert_eq!(rows[1]["value"], 3.7);
        assert_eq!(rows[1]["date"], "2024-01-01");
        assert!(rows[1].get("footnotes").is_none());
    }

    #[test]
    fn test_ndjson() {
        let formatter = JsonFormatter::ndjson();
        let mut output = Cursor::new(Vec::new());

        formatter
            .write_observations(&fixtures::table(), &mut output)
            .unwrap();

        let result = String::from_utf8(output.into_inner()).unwrap();
        let lines: Vec<_> = result.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with('{'));
    }

    #[test]
    fn test_pretty_json() {
        let formatter = JsonFormatter::new().with_pretty(true);
        let mut output = Cursor::new(Vec::new());

        formatter
            .write_observations(&fixtures::table(), &mut output)
            .unwrap();

        let result = String::from_utf8(output.into_inner()).unwrap();
        assert!(result.contains("  \"series_id\""));
    }

    #[test]
    fn test_json_wide() {
        let formatter = JsonFormatter::new();
        let mut output = Cursor::new(Vec::new());

        formatter.write_wide(&fixtures::wide(), &mut output).unwrap();

        let parsed: Value = serde_json::from_slice(&output.into_inner()).unwrap();
        assert_eq!(parsed[0]["period"], "M01");
        assert_eq!(parsed[0]["LNS14000000"], 3.7);
        assert_eq!(parsed[0]["CES0000000001"], Value::Null);
        assert_eq!(parsed[1]["year"], 2024);
    }
}
