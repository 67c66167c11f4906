//! Error handling for the authority-file pipeline.
//! One error enum per subsystem, `thiserror` only, zero `anyhow`.

pub mod config_error;
pub mod error_code;
pub mod graph_error;
pub mod parse_error;
pub mod pipeline_error;
pub mod stage_error;
pub mod storage_error;

pub use config_error::ConfigError;
pub use error_code::ErrorCode;
pub use graph_error::GraphError;
pub use parse_error::ParseError;
pub use pipeline_error::PipelineError;
pub use stage_error::StageError;
pub use storage_error::StorageError;
