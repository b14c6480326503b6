//! Error handling for the statistics engine and its record sources.

use std::io;

use arrow::error::ArrowError;
use parquet::errors::ParquetError;

/// Specialized error type for loading and aggregating person records
#[derive(Debug, thiserror::Error)]
pub enum StatsError {
    /// Error opening or reading a file
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// Error decoding CSV data or converting record batches
    #[error("Arrow error: {0}")]
    Arrow(#[from] ArrowError),

    /// Error reading Parquet data
    #[error("Parquet error: {0}")]
    Parquet(#[from] ParquetError),

    /// Error reading a JSON configuration file
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The input source held no records to aggregate
    #[error("No data: {0}")]
    NoData(String),

    /// Invalid configuration value
    #[error("Configuration error: {0}")]
    Config(String),
}

impl StatsError {
    /// Create a no-data error with the given description
    pub fn no_data(message: impl Into<String>) -> Self {
        Self::NoData(message.into())
    }

    /// Create a configuration error with the given description
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }
}

/// Result type for statistics operations
pub type Result<T> = std::result::Result<T, StatsError>;
