// src/error.rs

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PriceError {
    /// Source file missing, unreadable, or not the expected shape.
    #[error("ingest failed for {}: {message}", path.display())]
    Ingest { path: PathBuf, message: String },

    /// A `Tanggal` cell that is not a day-first calendar date.
    #[error("unparseable date {value:?} on line {line}")]
    Parse { line: u64, value: String },

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("export failed for {}: {message}", path.display())]
    Export { path: PathBuf, message: String },
}

impl PriceError {
    pub(crate) fn ingest(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        PriceError::Ingest {
            path: path.into(),
            message: message.into(),
        }
    }

    pub(crate) fn export(path: impl Into<PathBuf>, message: impl ToString) -> Self {
        PriceError::Export {
            path: path.into(),
            message: message.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, PriceError>;
