//! Record Store build from the extracted dump.

use authgraph_analysis::records::RecordParser;
use authgraph_core::errors::{PipelineError, StageError};
use authgraph_storage::build_record_store;
use chrono::NaiveDate;

use crate::fingerprint::StageParams;
use crate::stage::{Stage, StageContext, StageOutput};

use super::pattern_params;

/// Drains the Record Parser once into `records(id, content)`.
#[derive(Debug, Clone)]
pub struct RecordDatabase {
    pub date: NaiveDate,
    pub subject_pattern: String,
}

impl Stage for RecordDatabase {
    fn kind(&self) -> &'static str {
        "record-database"
    }

    fn params(&self) -> Result<StageParams, PipelineError> {
        pattern_params(self.kind(), self.date, &self.subject_pattern)
    }

    fn output(&self) -> StageOutput {
        StageOutput::Artifact { extension: "db" }
    }

    fn run(&self, ctx: &StageContext<'_>) -> Result<(), StageError> {
        let mut parser = RecordParser::with_pattern(ctx.open_input(0)?, &self.subject_pattern)?;
        let stats = build_record_store(
            ctx.scratch()?,
            parser.by_ref().map(|record| record.map_err(StageError::from)),
        )?;

        tracing::info!(
            records = stats.loaded,
            skipped = parser.skipped(),
            duplicates = stats.duplicates,
            lossy_lines = parser.lossy_lines(),
            lines = parser.lines_read(),
            "records parsed"
        );
        Ok(())
    }
}
