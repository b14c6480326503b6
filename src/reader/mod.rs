//! Record sources
//!
//! Reads raw person rows from the genealogy export (a `;`-separated text
//! file with a header line) or from Parquet files. Every column is read as
//! text; typing is left to the [normalizer](crate::normalize).
//!
//! Text exports are split on the delimiter without quoting rules. Bytes
//! that are not valid UTF-8 are replaced rather than failing the read.

use std::borrow::Cow;
use std::fs::{self, File};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

use arrow::array::{Array, ArrayRef, AsArray, StringArray};
use arrow::compute::cast;
use arrow::record_batch::RecordBatch;
use arrow_schema::{DataType, Field, Schema, SchemaRef};
use itertools::Itertools;
use log::{debug, info, warn};
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use smallvec::SmallVec;

use crate::config::SourceConfig;
use crate::error::{Result, StatsError};
use crate::normalize::RawRow;

/// A source of raw person rows
pub trait RecordSource {
    /// Human-readable description used in log messages
    fn describe(&self) -> String;

    /// Read every row of the source
    ///
    /// An empty source is reported as [`StatsError::NoData`].
    fn read_rows(&self) -> Result<Vec<RawRow>>;
}

/// Convert a record batch into raw rows
///
/// Columns are cast to text; null cells are left out of the row.
pub fn batch_to_rows(batch: &RecordBatch) -> Result<Vec<RawRow>> {
    let schema = batch.schema();
    let columns = schema
        .fields()
        .iter()
        .zip(batch.columns())
        .map(|(field, column)| -> Result<(String, StringArray)> {
            let text = cast(column, &DataType::Utf8)?;
            Ok((field.name().clone(), text.as_string::<i32>().clone()))
        })
        .collect::<Result<SmallVec<[(String, StringArray); 16]>>>()?;

    let rows = (0..batch.num_rows())
        .map(|row| {
            columns
                .iter()
                .filter(|(_, text)| text.is_valid(row))
                .map(|(name, text)| (name.clone(), text.value(row).to_string()))
                .collect::<RawRow>()
        })
        .collect();
    Ok(rows)
}

fn finish_read(source: &dyn RecordSource, rows: Vec<RawRow>, start: Instant) -> Result<Vec<RawRow>> {
    if rows.is_empty() {
        return Err(StatsError::no_data(format!(
            "{} contains no person rows",
            source.describe()
        )));
    }
    info!(
        "Read {} rows from {} in {:?}",
        rows.len(),
        source.describe(),
        start.elapsed()
    );
    Ok(rows)
}

/// Delimited text export with a header line of column names
#[derive(Debug, Clone)]
pub struct CsvSource {
    path: PathBuf,
    config: SourceConfig,
}

impl CsvSource {
    /// Read the file at `path` with the default delimiter
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            config: SourceConfig::default(),
        }
    }

    /// Use the given source options
    #[must_use]
    pub fn with_config(mut self, config: SourceConfig) -> Self {
        self.config = config;
        self
    }

    fn delimiter(&self) -> char {
        char::from(self.config.delimiter)
    }

    fn parse_header(&self, line: Option<&str>) -> Result<SchemaRef> {
        let Some(line) = line else {
            return Err(StatsError::no_data(format!("{} is empty", self.describe())));
        };

        let header = line.trim_start_matches('\u{feff}');
        if header.trim().is_empty() {
            return Err(StatsError::no_data(format!(
                "{} has no header line",
                self.describe()
            )));
        }

        let fields: Vec<Field> = header
            .split(self.delimiter())
            .map(|name| Field::new(name, DataType::Utf8, true))
            .collect();
        debug!("{} has {} columns", self.describe(), fields.len());
        Ok(Arc::new(Schema::new(fields)))
    }

    /// Build a text batch from data lines
    ///
    /// Fields past the header width are dropped and missing trailing fields
    /// are null, as are empty fields.
    fn build_batch(&self, schema: &SchemaRef, lines: &[&str]) -> Result<RecordBatch> {
        let width = schema.fields().len();
        let split: Vec<SmallVec<[&str; 16]>> = lines
            .iter()
            .map(|line| line.split(self.delimiter()).take(width).collect())
            .collect();

        let columns: Vec<ArrayRef> = (0..width)
            .map(|column| {
                let values = split
                    .iter()
                    .map(|fields| fields.get(column).copied().filter(|value| !value.is_empty()));
                Arc::new(StringArray::from_iter(values)) as ArrayRef
            })
            .collect();
        Ok(RecordBatch::try_new(Arc::clone(schema), columns)?)
    }
}

impl RecordSource for CsvSource {
    fn describe(&self) -> String {
        format!("CSV file {}", self.path.display())
    }

    fn read_rows(&self) -> Result<Vec<RawRow>> {
        let start = Instant::now();
        let bytes = fs::read(&self.path)?;
        let text = String::from_utf8_lossy(&bytes);
        if matches!(text, Cow::Owned(_)) {
            warn!(
                "{} is not valid UTF-8; undecodable bytes were replaced",
                self.describe()
            );
        }

        let mut lines = text.lines();
        let schema = self.parse_header(lines.next())?;

        let mut rows = Vec::new();
        let data_lines = lines.filter(|line| !line.trim().is_empty());
        for chunk in &data_lines.chunks(self.config.batch_size.max(1)) {
            let chunk: Vec<&str> = chunk.collect();
            rows.extend(batch_to_rows(&self.build_batch(&schema, &chunk)?)?);
        }
        finish_read(self, rows, start)
    }
}

/// Parquet file with one person per row
#[derive(Debug, Clone)]
pub struct ParquetSource {
    path: PathBuf,
    config: SourceConfig,
}

impl ParquetSource {
    /// Read the file at `path`
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            config: SourceConfig::default(),
        }
    }

    /// Use the given source options
    #[must_use]
    pub fn with_config(mut self, config: SourceConfig) -> Self {
        self.config = config;
        self
    }
}

impl RecordSource for ParquetSource {
    fn describe(&self) -> String {
        format!("Parquet file {}", self.path.display())
    }

    fn read_rows(&self) -> Result<Vec<RawRow>> {
        let start = Instant::now();
        let file = File::open(&self.path)?;
        let reader = ParquetRecordBatchReaderBuilder::try_new(file)?
            .with_batch_size(self.config.batch_size)
            .build()?;

        let mut rows = Vec::new();
        for batch in reader {
            rows.extend(batch_to_rows(&batch?)?);
        }
        finish_read(self, rows, start)
    }
}

/// Pick a source for `path` by extension: `.parquet` files are read as
/// Parquet, everything else as delimited text
#[must_use]
pub fn open_source(path: &Path, config: SourceConfig) -> Box<dyn RecordSource> {
    let is_parquet = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("parquet"));
    if is_parquet {
        Box::new(ParquetSource::new(path).with_config(config))
    } else {
        Box::new(CsvSource::new(path).with_config(config))
    }
}
