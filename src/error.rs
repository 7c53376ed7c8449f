use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("Failed to access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid JSON on line {line}: {message}")]
    InvalidJson { line: usize, message: String },

    #[error("Line {line} is not a JSON object")]
    NotAnObject { line: usize },

    #[error("Required column '{column}' not found in dataset")]
    MissingColumn { column: String },

    #[error("Invalid timestamp in column '{column}' at row {row}: {value}")]
    InvalidTimestamp {
        column: String,
        row: usize,
        value: String,
    },

    #[error("Failed to serialize report: {0}")]
    Serialize(#[from] serde_json::Error),
}

impl ReportError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ReportError::Io {
            path: path.into(),
            source,
        }
    }
}
