use std::path::PathBuf;

use thiserror::Error;

/// Fatal errors while loading the event table. There is no partial load:
/// any of these aborts the session start.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("{path} is missing required column '{column}'")]
    MissingColumn { path: PathBuf, column: &'static str },

    #[error("{path} contains no event rows")]
    Empty { path: PathBuf },

    #[error("{path}, row {row}: {message}")]
    Row {
        path: PathBuf,
        row: usize,
        message: String,
    },
}

/// Errors while deriving a view from the loaded table. Fatal for the
/// refresh that raised them; the previously published view stays visible.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SelectionError {
    #[error("unknown dimension '{0}' (expected language, country, category or subcategory)")]
    UnknownDimension(String),
}
