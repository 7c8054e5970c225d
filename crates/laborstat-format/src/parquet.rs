//! Apache Parquet output format.

use arrow::array::{ArrayRef, Date32Array, Float64Array, Int32Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use chrono::Datelike;
use laborstat_analysis::{WideRow, WideTable};
use laborstat_types::{ObservationTable, SeriesObservation};
use parquet::arrow::ArrowWriter;
use parquet::basic::Compression;
use parquet::file::properties::WriterProperties;
use std::io::Write;
use std::sync::Arc;

use crate::{FormatError, Formatter};

/// Days from 0001-01-01 to 1970-01-01.
const UNIX_EPOCH_DAYS_FROM_CE: i32 = 719_163;

/// Parquet formatter.
#[derive(Debug, Clone)]
pub struct ParquetFormatter {
    /// Row group size (number of rows per group).
    row_group_size: usize,
    /// Compression codec.
    compression: Compression,
}

impl Default for ParquetFormatter {
    fn default() -> Self {
        Self {
            row_group_size: 100_000,
            compression: Compression::SNAPPY,
        }
    }
}

impl ParquetFormatter {
    /// Creates a new Parquet formatter with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the row group size.
    #[must_use]
    pub const fn with_row_group_size(mut self, size: usize) -> Self {
        self.row_group_size = size;
        self
    }

    /// Sets the compression codec.
    #[must_use]
    pub const fn with_compression(mut self, compression: Compression) -> Self {
        self.compression = compression;
        self
    }

    /// Creates the Arrow schema for tidy observations.
    fn observation_schema() -> Schema {
        Schema::new(vec![
            Field::new("series_id", DataType::Utf8, false),
            Field::new("year", DataType::Int32, false),
            Field::new("period", DataType::Utf8, false),
            Field::new("period_name", DataType::Utf8, false),
            Field::new("date", DataType::Date32, true),
            Field::new("value", DataType::Float64, true),
        ])
    }

    /// Creates the Arrow schema for a wide table with the given columns.
    fn wide_schema(columns: &[String]) -> Schema {
        let mut fields = vec![
            Field::new("year", DataType::Int32, false),
            Field::new("period", DataType::Utf8, false),
        ];
        fields.extend(
            columns
                .iter()
                .map(|column| Field::new(column, DataType::Float64, true)),
        );
        Schema::new(fields)
    }

    /// Converts observations to an Arrow `RecordBatch`.
    fn observations_to_batch(
        schema: &Arc<Schema>,
        observations: &[SeriesObservation],
    ) -> Result<RecordBatch, FormatError> {
        let series_ids: Vec<_> = observations.iter().map(SeriesObservation::series_id).collect();
        let years: Vec<_> = observations.iter().map(SeriesObservation::year).collect();
        let periods: Vec<_> = observations.iter().map(|o| o.period().code()).collect();
        let names: Vec<_> = observations.iter().map(SeriesObservation::period_name).collect();
        let dates: Vec<_> = observations
            .iter()
            .map(|o| o.date().map(|d| d.num_days_from_ce() - UNIX_EPOCH_DAYS_FROM_CE))
            .collect();
        let values: Vec<_> = observations.iter().map(SeriesObservation::value).collect();

        let columns: Vec<ArrayRef> = vec![
            Arc::new(StringArray::from(series_ids)),
            Arc::new(Int32Array::from(years)),
            Arc::new(StringArray::from(periods)),
            Arc::new(StringArray::from(names)),
            Arc::new(Date32Array::from(dates)),
            Arc::new(Float64Array::from(values)),
        ];
        RecordBatch::try_new(Arc::clone(schema), columns)
            .map_err(|e| FormatError::Parquet(e.to_string()))
    }

    /// Converts wide rows to an Arrow `RecordBatch`.
    fn wide_to_batch(
        schema: &Arc<Schema>,
        width: usize,
        rows: &[WideRow],
    ) -> Result<RecordBatch, FormatError> {
        let years: Vec<_> = rows.iter().map(|r| r.year).collect();
        let periods: Vec<_> = rows.iter().map(|r| r.period.code()).collect();

        let mut columns: Vec<ArrayRef> = vec![
            Arc::new(Int32Array::from(years)),
            Arc::new(StringArray::from(periods)),
        ];
        for col in 0..width {
            let values: Vec<_> = rows
                .iter()
                .map(|r| r.values.get(col).copied().flatten())
                .collect();
            columns.push(Arc::new(Float64Array::from(values)));
        }
        RecordBatch::try_new(Arc::clone(schema), columns)
            .map_err(|e| FormatError::Parquet(e.to_string()))
    }

    fn writer<W: Write + Send>(
        &self,
        writer: W,
        schema: Arc<Schema>,
    ) -> Result<ArrowWriter<W>, FormatError> {
        let props = WriterProperties::builder()
            .set_compression(self.compression)
            .set_max_row_group_size(self.row_group_size)
            .build();

        ArrowWriter::try_new(writer, schema, Some(props))
            .map_err(|e| FormatError::Parquet(e.to_string()))
    }
}

impl Formatter for ParquetFormatter {
    fn write_observations<W: Write + Send>(
        &self,
        table: &ObservationTable,
        writer: W,
    ) -> Result<(), FormatError> {
        let schema = Arc::new(Self::observation_schema());
        let mut arrow_writer = self.writer(writer, Arc::clone(&schema))?;

        for chunk in table.as_slice().chunks(self.row_group_size.max(1)) {
            let batch = Self::observations_to_batch(&schema, chunk)?;
            arrow_writer
                .write(&batch)
                .map_err(|e| FormatError::Parquet(e.to_string()))?;
        }

        arrow_writer
            .close()
            .map_err(|e| FormatError::Parquet(e.to_string()))?;

        Ok(())
    }

    fn write_wide<W: Write + Send>(&self, table: &WideTable, writer: W) -> Result<(), FormatError> {
        let schema = Arc::new(Self::wide_schema(table.columns()));
        let mut arrow_writer = self.writer(writer, Arc::clone(&schema))?;

        for chunk in table.rows().chunks(self.row_group_size.max(1)) {
            let batch = Self::wide_to_batch(&schema, table.columns().len(), chunk)?;
            arrow_writer
                .write(&batch)
                .map_err(|e| FormatError::Parquet(e.to_string()))?;
        }

        arrow_writer
            .close()
            .map_err(|e| FormatError::Parquet(e.to_string()))?;

        Ok(())
    }

    fn extension(&self) -> &str {
        "parquet"
    }
}
