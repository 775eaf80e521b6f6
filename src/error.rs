use std::{io, path::PathBuf};

use thiserror::Error;

/// Result type for dataset loading.
pub type LoadResult<T> = Result<T, LoadError>;

/// Everything that can go wrong while reading the launch records file.
///
/// Any of these at startup is fatal: the dashboard does not start without data.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("File not found: {0:?}")]
    NotFound(PathBuf),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Parquet error: {0}")]
    Parquet(#[from] parquet::errors::ParquetError),

    #[error("Arrow error: {0}")]
    Arrow(#[from] arrow::error::ArrowError),

    #[error("Missing required column '{column}'")]
    MissingColumn { column: String },

    #[error("Row {row}, column '{column}': invalid value '{value}'")]
    InvalidValue {
        row: usize,
        column: String,
        value: String,
    },

    #[error("Unsupported file extension: .{0}")]
    UnsupportedFormat(String),
}

impl LoadError {
    pub(crate) fn missing(column: &str) -> Self {
        LoadError::MissingColumn {
            column: column.to_string(),
        }
    }

    pub(crate) fn invalid(row: usize, column: &str, value: impl ToString) -> Self {
        LoadError::InvalidValue {
            row,
            column: column.to_string(),
            value: value.to_string(),
        }
    }
}

/// A payload range that cannot be used as a filter.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RangeError {
    #[error("payload range bounds must be finite (got [{low}, {high}])")]
    NotFinite { low: f64, high: f64 },

    #[error("payload range is inverted: low {low} > high {high}")]
    Inverted { low: f64, high: f64 },
}
