//! Error types for retro-core

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for Retrosheet processing
#[derive(Error, Debug)]
pub enum RetroError {
    /// A team, roster or event file the report depends on is missing
    #[error("cannot find {kind} file {path:?}")]
    NotFound { kind: &'static str, path: PathBuf },

    /// File I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed CSV from a data file or from the engine
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON serialization of a report failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A Chadwick tool could not be started
    #[error("failed to start {tool}: {source}")]
    EngineSpawn {
        tool: String,
        source: std::io::Error,
    },

    /// A Chadwick tool ran but exited with an error
    #[error("{tool} exited with {status}: {stderr}")]
    EngineFailed {
        tool: String,
        status: String,
        stderr: String,
    },

    /// A record in a box score, team or roster file could not be understood
    #[error("invalid record at {path:?} line {line}: {message}")]
    InvalidRecord {
        path: PathBuf,
        line: usize,
        message: String,
    },
}

/// Result type alias for retro-core operations
pub type RetroResult<T> = Result<T, RetroError>;

impl RetroError {
    /// Build a `NotFound` for a data file of the given kind
    pub fn not_found(kind: &'static str, path: impl Into<PathBuf>) -> Self {
        RetroError::NotFound {
            kind,
            path: path.into(),
        }
    }

    /// Check if this error is a "file not found" condition
    pub fn is_not_found(&self) -> bool {
        match self {
            RetroError::NotFound { .. } => true,
            RetroError::Io(e) => e.kind() == std::io::ErrorKind::NotFound,
            _ => false,
        }
    }
}
