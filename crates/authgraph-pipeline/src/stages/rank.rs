//! Dense-id translation around the external rank computation.

use authgraph_analysis::graph::IdMap;
use authgraph_analysis::rank::{compact_adjacency, translate_edges, translate_ranks};
use authgraph_core::errors::{PipelineError, StageError};
use authgraph_storage::RecordStore;
use chrono::NaiveDate;

use crate::external::ExternalCommand;
use crate::fingerprint::StageParams;
use crate::stage::{Stage, StageContext, StageOutput};

use super::{date_params, finish_tsv, tool_params, tsv_output};

fn read_id_map(ctx: &StageContext<'_>, index: usize) -> Result<IdMap, StageError> {
    Ok(IdMap::read_tsv(ctx.open_input(index)?)?)
}

/// `id\tdense id` over every record id.
#[derive(Debug, Clone)]
pub struct TranslationMap {
    pub date: NaiveDate,
}

impl Stage for TranslationMap {
    fn kind(&self) -> &'static str {
        "translation-map"
    }

    fn params(&self) -> Result<StageParams, PipelineError> {
        date_params(self.kind(), self.date)
    }

    fn output(&self) -> StageOutput {
        StageOutput::Artifact { extension: "tsv" }
    }

    fn run(&self, ctx: &StageContext<'_>) -> Result<(), StageError> {
        let store = RecordStore::open(ctx.input(0)?)?;
        let map = IdMap::from_ids(store.ids()?)?;
        let mut writer = tsv_output(ctx)?;
        let scratch = ctx.scratch()?;
        map.write_tsv(&mut writer)
            .map_err(|e| StageError::io(scratch, e))?;
        finish_tsv(ctx, writer)?;
        tracing::info!(ids = map.len(), "translation map written");
        Ok(())
    }
}

/// The successor edge list in dense-id space. Inputs: successor edges,
/// translation map.
#[derive(Debug, Clone)]
pub struct TranslatedSuccessor {
    pub date: NaiveDate,
}

impl Stage for TranslatedSuccessor {
    fn kind(&self) -> &'static str {
        "translated-successor"
    }

    fn params(&self) -> Result<StageParams, PipelineError> {
        date_params(self.kind(), self.date)
    }

    fn output(&self) -> StageOutput {
        StageOutput::Artifact { extension: "tsv" }
    }

    fn run(&self, ctx: &StageContext<'_>) -> Result<(), StageError> {
        let map = read_id_map(ctx, 1)?;
        let mut writer = tsv_output(ctx)?;
        translate_edges(&map, ctx.open_input(0)?, &mut writer)?;
        finish_tsv(ctx, writer)?;
        Ok(())
    }
}

/// One adjacency row per dense source id.
#[derive(Debug, Clone)]
pub struct TranslatedSuccessorCompact {
    pub date: NaiveDate,
}

impl Stage for TranslatedSuccessorCompact {
    fn kind(&self) -> &'static str {
        "translated-successor-compact"
    }

    fn params(&self) -> Result<StageParams, PipelineError> {
        date_params(self.kind(), self.date)
    }

    fn output(&self) -> StageOutput {
        StageOutput::Artifact { extension: "tsv" }
    }

    fn run(&self, ctx: &StageContext<'_>) -> Result<(), StageError> {
        let mut writer = tsv_output(ctx)?;
        let stats = compact_adjacency(ctx.open_input(0)?, &mut writer)?;
        finish_tsv(ctx, writer)?;
        tracing::info!(rows = stats.rows, edges = stats.edges, "adjacency compacted");
        Ok(())
    }
}

/// Runs the external rank executable: `<executable> adjacency > out`,
/// producing `dense id\tscore` rows.
#[derive(Debug, Clone)]
pub struct RankComputation {
    pub date: NaiveDate,
    pub executable: String,
}

impl Stage for RankComputation {
    fn kind(&self) -> &'static str {
        "rank-computation"
    }

    fn params(&self) -> Result<StageParams, PipelineError> {
        tool_params(self.kind(), self.date, &self.executable)
    }

    fn output(&self) -> StageOutput {
        StageOutput::Artifact { extension: "tsv" }
    }

    fn run(&self, ctx: &StageContext<'_>) -> Result<(), StageError> {
        ExternalCommand::new(&self.executable)
            .arg(ctx.input(0)?)
            .stdout_to(ctx.scratch()?)
            .run()
    }
}

/// Rank scores mapped back to original ids. Inputs: translation map,
/// rank computation output.
#[derive(Debug, Clone)]
pub struct TranslateRank {
    pub date: NaiveDate,
}

impl Stage for TranslateRank {
    fn kind(&self) -> &'static str {
        "translate-rank"
    }

    fn params(&self) -> Result<StageParams, PipelineError> {
        date_params(self.kind(), self.date)
    }

    fn output(&self) -> StageOutput {
        StageOutput::Artifact { extension: "tsv" }
    }

    fn run(&self, ctx: &StageContext<'_>) -> Result<(), StageError> {
        let map = read_id_map(ctx, 0)?;
        let mut writer = tsv_output(ctx)?;
        let written = translate_ranks(&map, ctx.open_input(1)?, &mut writer)?;
        finish_tsv(ctx, writer)?;
        tracing::info!(ranks = written, "ranks translated");
        Ok(())
    }
}
