//! Dependency Engine.
//!
//! Walks requirements from a target, stops at stages that are already
//! complete, probes pending capability stages up front, then runs the
//! rest in topological order. A failed stage blocks its dependents only.

use std::collections::BTreeSet;
use std::path::Path;
use std::time::Instant;

use authgraph_core::errors::{ErrorCode, PipelineError, StageError};
use authgraph_core::events::{
    EventDispatcher, StageCompletedEvent, StageFailedEvent, StageSkippedEvent, StageStartedEvent,
};
use authgraph_core::types::{FxHashMap, FxHashSet};

use crate::graph::{StageGraph, StageId, StageNode};
use crate::stage::{StageContext, StageOutput};

/// A stage that ran and failed.
#[derive(Debug)]
pub struct FailedStage {
    pub id: StageId,
    pub stage: String,
    pub error: StageError,
}

/// A stage that did not run because a requirement failed.
#[derive(Debug, Clone)]
pub struct BlockedStage {
    pub id: StageId,
    pub stage: String,
    pub requirement: String,
}

/// Outcome of one `execute` call.
#[derive(Debug, Default)]
pub struct ExecutionReport {
    pub target: StageId,
    /// Stages that ran successfully, in execution order.
    pub executed: Vec<StageId>,
    /// Stages found complete; their requirements were not visited.
    pub skipped: Vec<StageId>,
    pub failed: Vec<FailedStage>,
    pub blocked: Vec<BlockedStage>,
}

impl ExecutionReport {
    pub fn is_success(&self) -> bool {
        self.failed.is_empty() && self.blocked.is_empty()
    }

    /// The report if the target is complete, otherwise the first stage
    /// failure as an error.
    pub fn into_result(mut self) -> Result<Self, PipelineError> {
        if !self.failed.is_empty() {
            let failed = self.failed.remove(0);
            return Err(PipelineError::Stage {
                stage: failed.stage,
                source: failed.error,
            });
        }
        if let Some(blocked) = self.blocked.first() {
            return Err(PipelineError::Blocked {
                stage: blocked.stage.clone(),
                requirement: blocked.requirement.clone(),
            });
        }
        Ok(self)
    }
}

/// Runs stage graphs, reporting lifecycle events to its dispatcher.
#[derive(Default)]
pub struct Engine {
    dispatcher: EventDispatcher,
}

impl Engine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_dispatcher(dispatcher: EventDispatcher) -> Self {
        Self { dispatcher }
    }

    pub fn dispatcher_mut(&mut self) -> &mut EventDispatcher {
        &mut self.dispatcher
    }

    /// Bring `target` and everything it needs up to date.
    ///
    /// Only a missing executable or an unknown stage id is an `Err`
    /// here; stage failures are recorded in the report.
    pub fn execute(
        &self,
        graph: &StageGraph,
        target: StageId,
    ) -> Result<ExecutionReport, PipelineError> {
        let mut report = ExecutionReport {
            target,
            ..ExecutionReport::default()
        };

        let pending = self.collect_pending(graph, target, &mut report)?;
        if pending.is_empty() {
            tracing::info!(target = %graph.describe(target), "nothing to do");
            return Ok(report);
        }

        let probed = self.preflight(graph, &pending)?;
        let order = topological_order(graph, &pending)?;

        let mut unfinished: FxHashSet<StageId> = FxHashSet::default();
        for id in order {
            let node = graph.node(id)?;

            if let Some(&requirement) = node.requires.iter().find(|r| unfinished.contains(*r)) {
                tracing::warn!(
                    stage = %graph.describe(id),
                    requirement = %graph.describe(requirement),
                    "stage blocked"
                );
                report.blocked.push(BlockedStage {
                    id,
                    stage: graph.describe(id),
                    requirement: graph.describe(requirement),
                });
                unfinished.insert(id);
                continue;
            }

            if probed.contains(&id) {
                report.executed.push(id);
                continue;
            }

            match self.run_stage(graph, id, node) {
                Ok(()) => report.executed.push(id),
                Err(error) => {
                    unfinished.insert(id);
                    report.failed.push(FailedStage {
                        id,
                        stage: graph.describe(id),
                        error,
                    });
                }
            }
        }

        tracing::info!(
            target = %graph.describe(target),
            executed = report.executed.len(),
            skipped = report.skipped.len(),
            failed = report.failed.len(),
            blocked = report.blocked.len(),
            "execution finished"
        );
        Ok(report)
    }

    /// Stages reachable from `target` through incomplete stages.
    fn collect_pending(
        &self,
        graph: &StageGraph,
        target: StageId,
        report: &mut ExecutionReport,
    ) -> Result<BTreeSet<StageId>, PipelineError> {
        let mut pending = BTreeSet::new();
        let mut visited: FxHashSet<StageId> = FxHashSet::default();
        let mut stack = vec![target];

        while let Some(id) = stack.pop() {
            if !visited.insert(id) {
                continue;
            }
            let node = graph.node(id)?;
            if node.stage.is_complete(node.artifact.as_deref()) {
                tracing::info!(
                    stage = node.stage.kind(),
                    fingerprint = %node.fingerprint,
                    "stage complete, skipping"
                );
                self.dispatcher.emit_stage_skipped(&StageSkippedEvent {
                    kind: node.stage.kind().to_string(),
                    fingerprint: node.fingerprint.to_string(),
                    artifact: node.artifact.clone(),
                });
                report.skipped.push(id);
                continue;
            }
            pending.insert(id);
            stack.extend(node.requires.iter().copied());
        }

        Ok(pending)
    }

    /// Run every pending capability stage before any real work. All
    /// failures are collected into one error.
    fn preflight(
        &self,
        graph: &StageGraph,
        pending: &BTreeSet<StageId>,
    ) -> Result<FxHashSet<StageId>, PipelineError> {
        let mut probed = FxHashSet::default();
        let mut failures = Vec::new();

        for &id in pending {
            let node = graph.node(id)?;
            if node.stage.output() != StageOutput::Capability {
                continue;
            }
            let ctx = StageContext::new(node.stage.kind(), Vec::new(), None, None);
            match node.stage.run(&ctx) {
                Ok(()) => {
                    probed.insert(id);
                }
                Err(error) => {
                    tracing::error!(stage = %graph.describe(id), %error, "capability check failed");
                    failures.push(error);
                }
            }
        }

        if failures.is_empty() {
            Ok(probed)
        } else {
            Err(PipelineError::MissingExecutables { failures })
        }
    }

    fn run_stage(
        &self,
        graph: &StageGraph,
        id: StageId,
        node: &StageNode,
    ) -> Result<(), StageError> {
        let kind = node.stage.kind();
        let fingerprint = node.fingerprint.to_string();
        tracing::info!(stage = kind, %fingerprint, "stage started");
        self.dispatcher.emit_stage_started(&StageStartedEvent {
            kind: kind.to_string(),
            fingerprint: fingerprint.clone(),
        });
        let started = Instant::now();
        let result = {
            let _span = authgraph_core::stage_span!(kind, fingerprint).entered();
            run_node(graph, node)
        };

        match result {
            Ok(()) => {
                let duration_ms = started.elapsed().as_millis() as u64;
                tracing::info!(stage = kind, %fingerprint, duration_ms, "stage completed");
                self.dispatcher.emit_stage_completed(&StageCompletedEvent {
                    kind: kind.to_string(),
                    fingerprint,
                    artifact: node.artifact.clone(),
                    duration_ms,
                });
                Ok(())
            }
            Err(error) => {
                tracing::error!(stage = %graph.describe(id), %error, "stage failed");
                self.dispatcher.emit_stage_failed(&StageFailedEvent {
                    kind: kind.to_string(),
                    fingerprint,
                    error_code: error.error_code(),
                    message: error.to_string(),
                });
                Err(error)
            }
        }
    }
}

/// Run one stage into a scratch file and commit it on success. An error
/// drops the scratch file, so the final path never holds partial output.
fn run_node(graph: &StageGraph, node: &StageNode) -> Result<(), StageError> {
    let mut inputs: Vec<&Path> = Vec::with_capacity(node.requires.len());
    for &requirement in &node.requires {
        if let Some(path) = graph.node(requirement).ok().and_then(|n| n.artifact.as_deref()) {
            inputs.push(path);
        }
    }

    let scratch = match node.artifact.as_deref() {
        Some(target) => Some(graph.store().scratch(target)?),
        None => None,
    };

    {
        let ctx = StageContext::new(
            node.stage.kind(),
            inputs,
            scratch.as_ref().map(|s| s.path()),
            node.artifact.as_deref(),
        );
        node.stage.run(&ctx)?;
    }

    if let Some(scratch) = scratch {
        scratch.commit()?;
    }
    Ok(())
}

/// Kahn's algorithm over the pending stages. Ties go to the stage
/// registered first.
fn topological_order(
    graph: &StageGraph,
    pending: &BTreeSet<StageId>,
) -> Result<Vec<StageId>, PipelineError> {
    let mut in_degree: FxHashMap<StageId, usize> = FxHashMap::default();
    let mut dependents: FxHashMap<StageId, Vec<StageId>> = FxHashMap::default();

    for &id in pending {
        in_degree.entry(id).or_insert(0);
        for &requirement in graph.requires(id)? {
            if pending.contains(&requirement) {
                dependents.entry(requirement).or_default().push(id);
                *in_degree.entry(id).or_insert(0) += 1;
            }
        }
    }

    let mut ready: BTreeSet<StageId> = in_degree
        .iter()
        .filter(|(_, deg)| **deg == 0)
        .map(|(&id, _)| id)
        .collect();

    let mut sorted = Vec::with_capacity(pending.len());
    while let Some(id) = ready.pop_first() {
        sorted.push(id);
        if let Some(next) = dependents.get(&id) {
            for &dependent in next {
                if let Some(deg) = in_degree.get_mut(&dependent) {
                    *deg -= 1;
                    if *deg == 0 {
                        ready.insert(dependent);
                    }
                }
            }
        }
    }

    Ok(sorted)
}
