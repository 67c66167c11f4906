//! ErrorCode trait: stable machine-readable codes for every error enum.

/// Every error enum implements this to provide a structured code string,
/// used as a tracing field and in rendered failure reports.
pub trait ErrorCode {
    /// Returns the code string (e.g., "COMMAND_FAILED").
    fn error_code(&self) -> &'static str;

    /// Returns the formatted string: `[ERROR_CODE] message`.
    fn coded_string(&self) -> String
    where
        Self: std::fmt::Display,
    {
        format!("[{}] {}", self.error_code(), self)
    }
}

pub const CONFIG_ERROR: &str = "CONFIG_ERROR";
pub const STORAGE_ERROR: &str = "STORAGE_ERROR";
pub const MIGRATION_FAILED: &str = "MIGRATION_FAILED";
pub const NOT_FOUND: &str = "NOT_FOUND";
pub const PARSE_ERROR: &str = "PARSE_ERROR";
pub const GRAPH_ERROR: &str = "GRAPH_ERROR";
pub const UNKNOWN_DENSE_ID: &str = "UNKNOWN_DENSE_ID";
pub const IO_ERROR: &str = "IO_ERROR";
pub const COMMAND_FAILED: &str = "COMMAND_FAILED";
pub const MISSING_EXECUTABLE: &str = "MISSING_EXECUTABLE";
pub const STAGE_ERROR: &str = "STAGE_ERROR";
pub const STAGE_BLOCKED: &str = "STAGE_BLOCKED";
pub const PIPELINE_ERROR: &str = "PIPELINE_ERROR";
