//! Same-as and successor edge lists, and the successor Graph Store.

use std::io::BufRead;

use authgraph_analysis::links::{extract_edges, LinkExtractor};
use authgraph_core::errors::{GraphError, PipelineError, StageError};
use authgraph_core::types::Edge;
use authgraph_storage::{build_edge_store, RecordStore};
use chrono::NaiveDate;

use crate::fingerprint::StageParams;
use crate::stage::{Stage, StageContext, StageOutput};

use super::{date_params, finish_tsv, pattern_params, tsv_output};

/// `record id\tequivalent URI` for every `owl:sameAs` link.
#[derive(Debug, Clone)]
pub struct SameAs {
    pub date: NaiveDate,
    pub pattern: String,
    pub batch_size: usize,
}

impl Stage for SameAs {
    fn kind(&self) -> &'static str {
        "same-as"
    }

    fn params(&self) -> Result<StageParams, PipelineError> {
        pattern_params(self.kind(), self.date, &self.pattern)
    }

    fn output(&self) -> StageOutput {
        StageOutput::Artifact { extension: "tsv" }
    }

    fn run(&self, ctx: &StageContext<'_>) -> Result<(), StageError> {
        let extractor = LinkExtractor::same_as(&self.pattern)?;
        extract_to_tsv(ctx, &extractor, self.batch_size)
    }
}

/// `record id\treferenced id` for every local reference, self-loops
/// excluded.
#[derive(Debug, Clone)]
pub struct Successor {
    pub date: NaiveDate,
    pub pattern: String,
    pub batch_size: usize,
}

impl Stage for Successor {
    fn kind(&self) -> &'static str {
        "successor"
    }

    fn params(&self) -> Result<StageParams, PipelineError> {
        pattern_params(self.kind(), self.date, &self.pattern)
    }

    fn output(&self) -> StageOutput {
        StageOutput::Artifact { extension: "tsv" }
    }

    fn run(&self, ctx: &StageContext<'_>) -> Result<(), StageError> {
        let extractor = LinkExtractor::successor(&self.pattern)?;
        extract_to_tsv(ctx, &extractor, self.batch_size)
    }
}

fn extract_to_tsv(
    ctx: &StageContext<'_>,
    extractor: &LinkExtractor,
    batch_size: usize,
) -> Result<(), StageError> {
    let store = RecordStore::open(ctx.input(0)?)?;
    let mut writer = tsv_output(ctx)?;
    extract_edges::<_, StageError>(&store, batch_size, extractor, &mut writer)?;
    finish_tsv(ctx, writer)?;
    Ok(())
}

/// Loads the successor edge list into the indexed `edges` table.
#[derive(Debug, Clone)]
pub struct SuccessorDatabase {
    pub date: NaiveDate,
}

impl Stage for SuccessorDatabase {
    fn kind(&self) -> &'static str {
        "successor-database"
    }

    fn params(&self) -> Result<StageParams, PipelineError> {
        date_params(self.kind(), self.date)
    }

    fn output(&self) -> StageOutput {
        StageOutput::Artifact { extension: "db" }
    }

    fn run(&self, ctx: &StageContext<'_>) -> Result<(), StageError> {
        let mut malformed = 0usize;
        let edges = ctx
            .open_input(0)?
            .lines()
            .enumerate()
            .filter_map(|(index, line)| match line {
                Err(e) => Some(Err(StageError::from(GraphError::from(e)))),
                Ok(line) => match line.trim_end().split_once('\t') {
                    Some((source, target))
                        if !source.is_empty() && !target.is_empty() && !target.contains('\t') =>
                    {
                        Some(Ok(Edge::new(source, target)))
                    }
                    _ if line.trim().is_empty() => None,
                    _ => {
                        tracing::debug!(line = index + 1, "malformed edge line skipped");
                        malformed += 1;
                        None
                    }
                },
            });
        let stats = build_edge_store(ctx.scratch()?, edges)?;

        tracing::info!(
            edges = stats.loaded,
            duplicates = stats.duplicates,
            self_loops = stats.self_loops,
            malformed,
            "successor database built"
        );
        Ok(())
    }
}
