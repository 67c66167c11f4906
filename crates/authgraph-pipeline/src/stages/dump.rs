//! Fetching and unpacking the authority-file dump.

use authgraph_core::errors::{PipelineError, StageError};
use chrono::NaiveDate;
use serde::Serialize;

use crate::external::ExternalCommand;
use crate::fingerprint::{digest, StageParams};
use crate::stage::{Stage, StageContext, StageOutput};

use super::tool_params;

/// Downloads the compressed dump: `<tool> --retry-connrefused URL -O out`.
#[derive(Debug, Clone)]
pub struct DumpDownload {
    pub date: NaiveDate,
    pub url: String,
    pub tool: String,
}

impl Stage for DumpDownload {
    fn kind(&self) -> &'static str {
        "dump-download"
    }

    fn params(&self) -> Result<StageParams, PipelineError> {
        StageParams::of(
            self.kind(),
            &DownloadParams {
                date: self.date,
                url: digest(&self.url),
                tool: self.tool.clone(),
            },
        )
    }

    fn output(&self) -> StageOutput {
        StageOutput::Artifact { extension: "rdf.gz" }
    }

    fn run(&self, ctx: &StageContext<'_>) -> Result<(), StageError> {
        ExternalCommand::new(&self.tool)
            .arg("--retry-connrefused")
            .arg(&self.url)
            .arg("-O")
            .arg(ctx.scratch()?)
            .run()
    }
}

#[derive(Serialize)]
struct DownloadParams {
    date: NaiveDate,
    url: String,
    tool: String,
}

/// Decompresses the dump: `<tool> -c input > out`.
#[derive(Debug, Clone)]
pub struct DumpExtract {
    pub date: NaiveDate,
    pub tool: String,
}

impl Stage for DumpExtract {
    fn kind(&self) -> &'static str {
        "dump-extract"
    }

    fn params(&self) -> Result<StageParams, PipelineError> {
        tool_params(self.kind(), self.date, &self.tool)
    }

    fn output(&self) -> StageOutput {
        StageOutput::Artifact { extension: "rdf" }
    }

    fn run(&self, ctx: &StageContext<'_>) -> Result<(), StageError> {
        ExternalCommand::new(&self.tool)
            .arg("-c")
            .arg(ctx.input(0)?)
            .stdout_to(ctx.scratch()?)
            .run()
    }
}
