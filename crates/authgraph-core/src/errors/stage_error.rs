//! Stage execution errors.

use std::path::PathBuf;

use super::error_code::{self, ErrorCode};
use super::{GraphError, ParseError, StorageError};

/// Errors that abort a single stage. Dependents of the stage stay
/// incomplete; other branches of the pipeline are unaffected.
#[derive(Debug, thiserror::Error)]
pub enum StageError {
    #[error("{command} exitcode: {}", exit_label(.code))]
    CommandFailed { command: String, code: Option<i32> },

    #[error("Failed to spawn {command}: {source}")]
    Spawn {
        command: String,
        source: std::io::Error,
    },

    #[error("{name} required. {hint}")]
    MissingExecutable { name: String, hint: String },

    #[error("IO error on {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Stage {kind} expects input #{index}")]
    MissingInput { kind: String, index: usize },

    #[error("Stage {kind} produces no artifact")]
    NoArtifact { kind: String },

    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Graph(#[from] GraphError),
}

impl StageError {
    /// Wrap an IO error with the path it occurred on.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

fn exit_label(code: &Option<i32>) -> String {
    match code {
        Some(code) => code.to_string(),
        None => "terminated by signal".to_string(),
    }
}

impl ErrorCode for StageError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::CommandFailed { .. } | Self::Spawn { .. } => error_code::COMMAND_FAILED,
            Self::MissingExecutable { .. } => error_code::MISSING_EXECUTABLE,
            Self::Io { .. } => error_code::IO_ERROR,
            Self::MissingInput { .. } | Self::NoArtifact { .. } => error_code::STAGE_ERROR,
            Self::Storage(e) => e.error_code(),
            Self::Parse(e) => e.error_code(),
            Self::Graph(e) => e.error_code(),
        }
    }
}
