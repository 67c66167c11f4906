//! Pipeline errors.

use super::error_code::{self, ErrorCode};
use super::{ConfigError, StageError};

/// Errors that can occur while assembling or executing the stage graph.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("Stage {stage} failed: {source}")]
    Stage { stage: String, source: StageError },

    #[error("Stage {stage} is incomplete: requirement {requirement} did not complete")]
    Blocked { stage: String, requirement: String },

    #[error("Missing dependencies: {}", join_failures(.failures))]
    MissingExecutables { failures: Vec<StageError> },

    #[error("Unknown stage id {0}")]
    UnknownStage(usize),

    #[error("Unknown stage kind {0}")]
    UnknownKind(String),

    #[error("Cannot fingerprint stage {kind}: {message}")]
    Fingerprint { kind: String, message: String },

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

fn join_failures(failures: &[StageError]) -> String {
    failures
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

impl ErrorCode for PipelineError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Stage { source, .. } => source.error_code(),
            Self::Blocked { .. } => error_code::STAGE_BLOCKED,
            Self::MissingExecutables { .. } => error_code::MISSING_EXECUTABLE,
            Self::Config(e) => e.error_code(),
            Self::UnknownStage(_) | Self::UnknownKind(_) | Self::Fingerprint { .. } => {
                error_code::PIPELINE_ERROR
            }
        }
    }
}
