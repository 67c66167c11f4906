//! Graph analysis and translation errors.

use super::error_code::{self, ErrorCode};

/// Errors raised while reading edge lists, id maps and rank files.
///
/// Edge endpoints missing from the id map are not errors; they are
/// counted as misses by the translator.
#[derive(Debug, thiserror::Error)]
pub enum GraphError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed line {line} in {context}: expected {expected} tab-separated fields")]
    MalformedLine {
        context: &'static str,
        line: usize,
        expected: usize,
    },

    #[error("Invalid dense id on line {line}: {value}")]
    InvalidDenseId { line: usize, value: String },

    #[error("Invalid score on line {line}: {value}")]
    InvalidScore { line: usize, value: String },

    #[error("Dense id {id} has no mapping")]
    UnknownDenseId { id: u32 },

    #[error("Id {id} appears twice in the id map")]
    DuplicateId { id: String },

    #[error("Dense id space exhausted after {count} ids")]
    IdSpaceExhausted { count: usize },
}

impl ErrorCode for GraphError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Io(_) => error_code::IO_ERROR,
            Self::UnknownDenseId { .. } => error_code::UNKNOWN_DENSE_ID,
            _ => error_code::GRAPH_ERROR,
        }
    }
}
