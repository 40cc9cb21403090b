use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("no rows to write")]
    NoData,

    #[error("file not found: {0}")]
    MissingFile(PathBuf),

    #[error("existing header {existing:?} does not match batch header {batch:?}")]
    SchemaMismatch {
        existing: Vec<String>,
        batch: Vec<String>,
    },
}
