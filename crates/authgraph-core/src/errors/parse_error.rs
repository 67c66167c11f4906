//! Record parsing and pattern compilation errors.

use super::error_code::{self, ErrorCode};

/// Errors that can occur while splitting a dump into records or compiling
/// extraction patterns. Unmatched record blocks are not errors.
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("IO error reading line {line}: {source}")]
    Io {
        line: usize,
        source: std::io::Error,
    },

    #[error("Invalid pattern {pattern}: {message}")]
    InvalidPattern { pattern: String, message: String },

    #[error("Pattern {pattern} needs at least {required} capture group(s)")]
    MissingCaptureGroup { pattern: String, required: usize },
}

impl ErrorCode for ParseError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Io { .. } => error_code::IO_ERROR,
            _ => error_code::PARSE_ERROR,
        }
    }
}
