//! Closure sizes over the successor graph.

use authgraph_analysis::graph::Adjacency;
use authgraph_core::errors::{PipelineError, StageError};
use chrono::NaiveDate;

use crate::fingerprint::StageParams;
use crate::stage::{Stage, StageContext, StageOutput};

use super::{date_params, finish_tsv, tsv_output};

/// `id\tclosure size` for every id with an outbound successor edge.
/// Holds the whole graph in memory.
#[derive(Debug, Clone)]
pub struct Reach {
    pub date: NaiveDate,
}

impl Stage for Reach {
    fn kind(&self) -> &'static str {
        "reach"
    }

    fn params(&self) -> Result<StageParams, PipelineError> {
        date_params(self.kind(), self.date)
    }

    fn output(&self) -> StageOutput {
        StageOutput::Artifact { extension: "tsv" }
    }

    fn run(&self, ctx: &StageContext<'_>) -> Result<(), StageError> {
        let adjacency = Adjacency::from_tsv(ctx.open_input(0)?)?;
        let mut writer = tsv_output(ctx)?;
        adjacency.write_reach(&mut writer)?;
        finish_tsv(ctx, writer)?;
        Ok(())
    }
}
