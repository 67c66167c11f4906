//! Event payload types.

use std::path::PathBuf;

/// Payload for `on_stage_started`.
#[derive(Debug, Clone)]
pub struct StageStartedEvent {
    pub kind: String,
    pub fingerprint: String,
}

/// Payload for `on_stage_skipped`: the artifact already existed.
#[derive(Debug, Clone)]
pub struct StageSkippedEvent {
    pub kind: String,
    pub fingerprint: String,
    pub artifact: Option<PathBuf>,
}

/// Payload for `on_stage_completed`.
#[derive(Debug, Clone)]
pub struct StageCompletedEvent {
    pub kind: String,
    pub fingerprint: String,
    pub artifact: Option<PathBuf>,
    pub duration_ms: u64,
}

/// Payload for `on_stage_failed`.
#[derive(Debug, Clone)]
pub struct StageFailedEvent {
    pub kind: String,
    pub fingerprint: String,
    pub error_code: &'static str,
    pub message: String,
}
