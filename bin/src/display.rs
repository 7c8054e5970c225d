//! Display utilities and output formatting for the laborstat CLI.

use anyhow::{Result, anyhow};
use clap::ValueEnum;
use laborstat_lib::prelude::*;
use laborstat_lib::{JsonStyle, WideTable};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Output format for fetched data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum Format {
    Csv,
    Tsv,
    Json,
    Ndjson,
    Parquet,
}

impl Format {
    /// Returns the file extension for this format.
    pub(crate) const fn extension(&self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Tsv => "tsv",
            Self::Json => "json",
            Self::Ndjson => "ndjson",
            Self::Parquet => "parquet",
        }
    }

    /// Picks the format from the output file's extension, falling back to CSV.
    pub(crate) fn infer(output: Option<&Path>) -> Self {
        match output.and_then(OutputFormat::from_path) {
            Some(OutputFormat::Tsv) => Self::Tsv,
            Some(OutputFormat::Json) => Self::Json,
            Some(OutputFormat::Ndjson) => Self::Ndjson,
            Some(OutputFormat::Parquet) => Self::Parquet,
            Some(OutputFormat::Csv) | None => Self::Csv,
        }
    }
}

impl std::fmt::Display for Format {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.extension())
    }
}

/// Layout of the written table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Layout {
    /// One row per observation.
    Tidy,
    /// One row per period, one column per series.
    Wide,
}

/// Opens `output`, or stdout when no path is given.
fn open_writer(output: Option<&Path>) -> Result<Box<dyn Write + Send>> {
    Ok(match output {
        Some(path) => Box::new(BufWriter::new(File::create(path)?)),
        None => Box::new(BufWriter::new(std::io::stdout())),
    })
}

fn write_with<F: Formatter>(
    formatter: &F,
    table: &ObservationTable,
    layout: Layout,
    mut writer: Box<dyn Write + Send>,
) -> Result<()> {
    match layout {
        Layout::Tidy => formatter.write_observations(table, &mut writer)?,
        Layout::Wide => formatter.write_wide(&WideTable::from_table(table), &mut writer)?,
    }
    writer.flush()?;
    Ok(())
}

/// Write an observation table in the specified format.
pub(crate) fn write_table(
    table: &ObservationTable,
    output: Option<&Path>,
    format: Format,
    layout: Layout,
) -> Result<()> {
    if format == Format::Parquet && output.is_none() {
        return Err(anyhow!("Parquet output needs a file path (--output)"));
    }
    let writer = open_writer(output)?;

    match format {
        Format::Csv => write_with(&CsvFormatter::new(), table, layout, writer),
        Format::Tsv => write_with(&CsvFormatter::tsv(), table, layout, writer),
        Format::Json => write_with(&JsonFormatter::new().with_pretty(true), table, layout, writer),
        Format::Ndjson => write_with(
            &JsonFormatter::new().with_style(JsonStyle::Ndjson),
            table,
            layout,
            writer,
        ),
        Format::Parquet => {
            #[cfg(feature = "parquet")]
            {
                write_with(&ParquetFormatter::new(), table, layout, writer)
            }
            #[cfg(not(feature = "parquet"))]
            {
                let _ = writer;
                Err(anyhow!("Parquet support not compiled in"))
            }
        }
    }
}

/// Parse a survey name into a Survey enum.
pub(crate) fn parse_survey(s: &str) -> Result<Survey> {
    s.parse::<Survey>().map_err(|e| anyhow!("{e}"))
}

/// Normalizes series ids: trimmed, upper-case, repeats dropped.
pub(crate) fn normalize_series_ids(ids: &[String]) -> Vec<String> {
    let mut unique: Vec<String> = Vec::with_capacity(ids.len());
    for id in ids.iter().flat_map(|id| id.split(',')) {
        let id = id.trim().to_uppercase();
        if !id.is_empty() && !unique.contains(&id) {
            unique.push(id);
        }
    }
    unique
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_infer_format() {
        assert_eq!(Format::infer(Some(Path::new("out.parquet"))), Format::Parquet);
        assert_eq!(Format::infer(Some(Path::new("out.jsonl"))), Format::Ndjson);
        assert_eq!(Format::infer(Some(Path::new("out"))), Format::Csv);
        assert_eq!(Format::infer(None), Format::Csv);
    }

    #[test]
    fn test_normalize_series_ids() {
        let ids = vec![
            " lns14000000 ".to_string(),
            "CES0000000001,LNS14000000".to_string(),
            String::new(),
        ];
        assert_eq!(
            normalize_series_ids(&ids),
            vec!["LNS14000000".to_string(), "CES0000000001".to_string()]
        );
    }

    #[test]
    fn test_parquet_needs_path() {
        let table = ObservationTable::new();
        assert!(write_table(&table, None, Format::Parquet, Layout::Tidy).is_err());
    }

    #[test]
    fn test_write_csv_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.csv");
        let table = ObservationTable::from_observations(vec![SeriesObservation::new(
            "LNS14000000",
            2024,
            Period::Month(1),
            Some(3.7),
        )]);

        write_table(&table, Some(&path), Format::Csv, Layout::Wide).unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        assert_eq!(written, "year,period,LNS14000000\n2024,M01,3.7\n");
    }
}
