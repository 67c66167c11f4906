//! Storage errors for the Record Store and Graph Store.

use std::path::PathBuf;

use super::error_code::{self, ErrorCode};

/// Errors that can occur in the SQLite-backed stores.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("SQLite error: {message}")]
    SqliteError { message: String },

    #[error("Migration to v{version} failed: {message}")]
    MigrationFailed { version: u32, message: String },

    #[error("Record not found: {id}")]
    NotFound { id: String },

    #[error("Content of record {id} is not valid UTF-8")]
    InvalidContent { id: String },

    #[error("IO error on {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl ErrorCode for StorageError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::MigrationFailed { .. } => error_code::MIGRATION_FAILED,
            Self::NotFound { .. } => error_code::NOT_FOUND,
            Self::Io { .. } => error_code::IO_ERROR,
            _ => error_code::STORAGE_ERROR,
        }
    }
}
