//! PipelineEventHandler trait with no-op defaults.

use super::types::*;

/// Observer of stage lifecycle events.
///
/// Handlers only override the events they care about.
pub trait PipelineEventHandler: Send + Sync {
    fn on_stage_started(&self, _event: &StageStartedEvent) {}
    fn on_stage_skipped(&self, _event: &StageSkippedEvent) {}
    fn on_stage_completed(&self, _event: &StageCompletedEvent) {}
    fn on_stage_failed(&self, _event: &StageFailedEvent) {}
}
