//! Demographic statistics from genealogical person data.
//!
//! Person rows are read from a genealogy export, normalized into typed
//! records and aggregated into average ages at marriage and death, birth
//! and death counts and the average number of children per marriage,
//! optionally bucketed into calendar-year periods.

pub mod algorithm;
pub mod config;
pub mod error;
pub mod models;
pub mod normalize;
pub mod reader;
pub mod utils;

// Re-export the most common types for easier use
pub use config::{BinningConfig, ColumnConfig, SourceConfig};
pub use error::{Result, StatsError};
pub use models::{PersonId, PersonRecord, RelationType, Sex};
pub use normalize::{RawRow, normalize_row, normalize_rows};
pub use reader::{CsvSource, ParquetSource, RecordSource, open_source};

// Aggregation entry points
pub use algorithm::statistics::{
    Period, Statistics, aggregate, aggregate_by_interval, aggregate_parallel, aggregate_rows,
    aggregate_unbinned, generate_summary,
};
