//! The authority-file stages.
//!
//! Every artifact stage is keyed by the dump date plus whatever else
//! changes its output: patterns, the source URL and tools. A new dump
//! or a changed setting rebuilds everything downstream of it.

pub mod dump;
pub mod executable;
pub mod links;
pub mod names;
pub mod rank;
pub mod reach;
pub mod records;

use std::fs::File;

use authgraph_analysis::tsv::TsvWriter;
use authgraph_core::errors::{PipelineError, StageError};
use chrono::NaiveDate;
use serde::Serialize;

use crate::fingerprint::{digest, StageParams};
use crate::stage::StageContext;

pub use dump::{DumpDownload, DumpExtract};
pub use executable::Executable;
pub use links::{SameAs, Successor, SuccessorDatabase};
pub use names::{HumanReadableRank, PreferredNames};
pub use rank::{
    RankComputation, TranslateRank, TranslatedSuccessor, TranslatedSuccessorCompact,
    TranslationMap,
};
pub use reach::Reach;
pub use records::RecordDatabase;

/// The one parameter every artifact stage carries.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct DateParams {
    pub date: NaiveDate,
}

/// Date plus a digest of the extraction pattern in use.
#[derive(Debug, Clone, Serialize)]
pub struct PatternParams {
    pub date: NaiveDate,
    pub pattern: String,
}

/// Date plus the external tool a stage shells out to.
#[derive(Debug, Clone, Serialize)]
pub struct ToolParams {
    pub date: NaiveDate,
    pub tool: String,
}

pub(crate) fn date_params(kind: &str, date: NaiveDate) -> Result<StageParams, PipelineError> {
    StageParams::of(kind, &DateParams { date })
}

pub(crate) fn pattern_params(
    kind: &str,
    date: NaiveDate,
    pattern: &str,
) -> Result<StageParams, PipelineError> {
    StageParams::of(
        kind,
        &PatternParams {
            date,
            pattern: digest(pattern),
        },
    )
}

pub(crate) fn tool_params(
    kind: &str,
    date: NaiveDate,
    tool: &str,
) -> Result<StageParams, PipelineError> {
    StageParams::of(
        kind,
        &ToolParams {
            date,
            tool: tool.to_string(),
        },
    )
}

pub(crate) fn tsv_output(ctx: &StageContext<'_>) -> Result<TsvWriter<File>, StageError> {
    Ok(TsvWriter::new(ctx.create_output()?))
}

/// Flush and sync a TSV scratch file. Returns the rows written.
pub(crate) fn finish_tsv(
    ctx: &StageContext<'_>,
    writer: TsvWriter<File>,
) -> Result<usize, StageError> {
    let rows = writer.rows();
    let path = ctx.scratch()?;
    let file = writer.finish().map_err(|e| StageError::io(path, e))?;
    file.sync_all().map_err(|e| StageError::io(path, e))?;
    Ok(rows)
}
