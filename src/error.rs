use polars::prelude::PolarsError;
use std::{io, path::PathBuf};
use thiserror::Error;
use tokio::task::JoinError;

/// Result type to simplify function signatures across the crate.
pub type GridResult<T> = Result<T, GridError>;

/// Crate-wide error type, one variant per failure family.
///
/// `ResultParse` and `LayoutResolution` are recovered locally wherever they occur and never
/// escape a public function as an `Err` — the variants exist so the recovery path has something
/// uniform to log.
#[derive(Error, Debug)]
pub enum GridError {
    /// Fatal to table initialization: the backend could not answer `queryFieldInfo`.
    #[error("schema fetch failed: {0}")]
    SchemaFetch(String),

    /// Transient: a row-window or count query failed. Logged, not retried automatically; the
    /// next scroll/sort/filter change triggers a fresh attempt.
    #[error("query execution failed: {0}")]
    QueryExecution(String),

    /// Per-cell: a value could not be parsed into its display/sort form.
    #[error("result parse failed for column '{column}': {reason}")]
    ResultParse { column: String, reason: String },

    /// Non-fatal: a column width or constraint could not be resolved.
    #[error("layout resolution failed for column '{column}': {reason}")]
    LayoutResolution { column: String, reason: String },

    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Polars error: {0}")]
    Polars(#[from] PolarsError),

    #[error("Tokio JoinError: {0}")]
    TokioJoin(#[from] JoinError),

    #[error("file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("invalid CSV delimiter: {0}")]
    InvalidDelimiter(String),

    #[error("unsupported file type: {0}")]
    UnsupportedFileType(String),

    #[error("channel closed: {0}")]
    ChannelClosed(String),

    #[error("other error: {0}")]
    Other(String),
}

impl From<String> for GridError {
    fn from(err: String) -> GridError {
        GridError::Other(err)
    }
}
