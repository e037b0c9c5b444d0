use crate::validation::ValidationError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RecordzError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("{0} already exists")]
    Duplicate(String),

    #[error("No record found matching {0}")]
    NotFound(String),

    #[error("Several records match \"{term}\": {}", candidates.join(", "))]
    Ambiguous {
        term: String,
        candidates: Vec<String>,
    },

    #[error(transparent)]
    Persistence(#[from] PersistenceError),

    #[error("Api Error: {0}")]
    Api(String),
}

/// Failures reading or writing a data file.
#[derive(Error, Debug)]
pub enum PersistenceError {
    #[error("IO error on '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Data file '{}' is corrupted: {reason}", path.display())]
    Corrupt { path: PathBuf, reason: String },
}

impl PersistenceError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub fn corrupt(path: impl Into<PathBuf>, reason: impl ToString) -> Self {
        Self::Corrupt {
            path: path.into(),
            reason: reason.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, RecordzError>;
