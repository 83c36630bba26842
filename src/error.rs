use std::path::PathBuf;

use thiserror::Error;

/// Everything that can abort a preprocessing run or an archive load.
///
/// None of these are recovered from: the binaries surface them as a
/// non-zero exit with the full error chain.
#[derive(Debug, Error)]
pub enum CorpusError {
    #[error("no input files given")]
    EmptyInput,

    #[error("failed to read {}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write {}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{}: expected a body at line index {line}, file has only {found} line(s)", .path.display())]
    MissingBodyLine {
        path: PathBuf,
        line: usize,
        found: usize,
    },

    #[error("arrow error")]
    Arrow(#[from] arrow::error::ArrowError),

    #[error("parquet error")]
    Parquet(#[from] parquet::errors::ParquetError),

    #[error("invalid archive metadata")]
    Metadata(#[from] serde_json::Error),

    #[error("malformed archive: {0}")]
    Schema(String),
}

pub type Result<T> = std::result::Result<T, CorpusError>;
