//! EventDispatcher: synchronous event dispatch.

use std::sync::Arc;

use super::handler::PipelineEventHandler;
use super::types::*;

/// Synchronous event dispatcher wrapping a list of handlers.
#[derive(Default)]
pub struct EventDispatcher {
    handlers: Vec<Arc<dyn PipelineEventHandler>>,
}

impl EventDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an event handler.
    pub fn register(&mut self, handler: Arc<dyn PipelineEventHandler>) {
        self.handlers.push(handler);
    }

    /// Returns the number of registered handlers.
    pub fn handler_count(&self) -> usize {
        self.handlers.len()
    }

    /// Emit an event to all registered handlers.
    /// A panicking handler does not prevent later handlers from running.
    fn emit<F: Fn(&dyn PipelineEventHandler)>(&self, f: F) {
        for handler in &self.handlers {
            let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
                f(handler.as_ref());
            }));
            if result.is_err() {
                ::tracing::warn!("event handler panicked");
            }
        }
    }

    pub fn emit_stage_started(&self, event: &StageStartedEvent) {
        self.emit(|h| h.on_stage_started(event));
    }

    pub fn emit_stage_skipped(&self, event: &StageSkippedEvent) {
        self.emit(|h| h.on_stage_skipped(event));
    }

    pub fn emit_stage_completed(&self, event: &StageCompletedEvent) {
        self.emit(|h| h.on_stage_completed(event));
    }

    pub fn emit_stage_failed(&self, event: &StageFailedEvent) {
        self.emit(|h| h.on_stage_failed(event));
    }
}
