use std::path::PathBuf;

use thiserror::Error;

/// Fatal failure while turning a file into a [`SourceTable`](super::model::SourceTable).
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("cannot read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("unsupported file extension: .{0}")]
    UnsupportedExtension(String),

    #[error("cannot open workbook {path}: {source}")]
    Workbook {
        path: PathBuf,
        #[source]
        source: calamine::Error,
    },

    #[error("worksheet not found: {0}")]
    MissingWorksheet(String),

    #[error("invalid CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid parquet file: {0}")]
    Parquet(#[from] parquet::errors::ParquetError),

    #[error("invalid arrow data: {0}")]
    Arrow(#[from] arrow::error::ArrowError),

    #[error("the file has no header row")]
    MissingHeader,

    #[error("expected entity, variable and at least one year column, found {found} column(s)")]
    TooFewColumns { found: usize },

    #[error("column {column} header '{header}' is not a year")]
    InvalidYearHeader { column: usize, header: String },
}

/// Non-fatal: a cell that could not be read as a number and became missing.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{label}, {year}: '{raw}' is not a number")]
pub struct ParseWarning {
    pub label: String,
    pub year: i32,
    pub raw: String,
}
