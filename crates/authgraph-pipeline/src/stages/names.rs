//! Preferred names and the final human-readable ranking.

use authgraph_analysis::names::{
    extract_names, join_names, read_names, write_ranked, NameExtractor,
};
use authgraph_analysis::rank::read_rank_entries;
use authgraph_core::errors::{PipelineError, StageError};
use authgraph_storage::RecordStore;
use chrono::NaiveDate;

use crate::fingerprint::StageParams;
use crate::stage::{Stage, StageContext, StageOutput};

use super::{date_params, finish_tsv, pattern_params, tsv_output};

/// `id\tlabel\tkind` for every record carrying a preferred name.
#[derive(Debug, Clone)]
pub struct PreferredNames {
    pub date: NaiveDate,
    pub pattern: String,
    pub batch_size: usize,
}

impl Stage for PreferredNames {
    fn kind(&self) -> &'static str {
        "preferred-names"
    }

    fn params(&self) -> Result<StageParams, PipelineError> {
        pattern_params(self.kind(), self.date, &self.pattern)
    }

    fn output(&self) -> StageOutput {
        StageOutput::Artifact { extension: "tsv" }
    }

    fn run(&self, ctx: &StageContext<'_>) -> Result<(), StageError> {
        let extractor = NameExtractor::new(&self.pattern)?;
        let store = RecordStore::open(ctx.input(0)?)?;
        let mut writer = tsv_output(ctx)?;
        extract_names::<_, StageError>(&store, self.batch_size, &extractor, &mut writer)?;
        finish_tsv(ctx, writer)?;
        Ok(())
    }
}

/// `id\tscore\tlabel\tkind`, highest score first. Inputs: translated
/// ranks, preferred names.
#[derive(Debug, Clone)]
pub struct HumanReadableRank {
    pub date: NaiveDate,
}

impl Stage for HumanReadableRank {
    fn kind(&self) -> &'static str {
        "human-readable-rank"
    }

    fn params(&self) -> Result<StageParams, PipelineError> {
        date_params(self.kind(), self.date)
    }

    fn output(&self) -> StageOutput {
        StageOutput::Artifact { extension: "tsv" }
    }

    fn run(&self, ctx: &StageContext<'_>) -> Result<(), StageError> {
        let ranks = read_rank_entries(ctx.open_input(0)?)?;
        let names = read_names(ctx.open_input(1)?)?;
        let total = ranks.len();
        let rows = join_names(ranks, &names);

        let mut writer = tsv_output(ctx)?;
        let scratch = ctx.scratch()?;
        write_ranked(&rows, &mut writer).map_err(|e| StageError::io(scratch, e))?;
        finish_tsv(ctx, writer)?;
        tracing::info!(ranked = total, named = rows.len(), "ranking labelled");
        Ok(())
    }
}
