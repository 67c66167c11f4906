//! Capability check for an external executable.

use std::path::Path;

use authgraph_core::errors::{PipelineError, StageError};
use serde::Serialize;

use crate::external::which;
use crate::fingerprint::StageParams;
use crate::stage::{Stage, StageContext, StageOutput};

/// Complete when `name` is on `PATH`; otherwise running it reports
/// `hint`.
#[derive(Debug, Clone)]
pub struct Executable {
    pub name: String,
    pub hint: String,
}

#[derive(Serialize)]
struct Params<'a> {
    name: &'a str,
}

impl Executable {
    pub fn new(name: impl Into<String>, hint: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            hint: hint.into(),
        }
    }
}

impl Stage for Executable {
    fn kind(&self) -> &'static str {
        "executable"
    }

    fn params(&self) -> Result<StageParams, PipelineError> {
        StageParams::of(self.kind(), &Params { name: &self.name })
    }

    fn output(&self) -> StageOutput {
        StageOutput::Capability
    }

    fn is_complete(&self, _artifact: Option<&Path>) -> bool {
        which(&self.name).is_some()
    }

    fn run(&self, _ctx: &StageContext<'_>) -> Result<(), StageError> {
        match which(&self.name) {
            Some(path) => {
                tracing::debug!(name = %self.name, path = %path.display(), "executable found");
                Ok(())
            }
            None => Err(StageError::MissingExecutable {
                name: self.name.clone(),
                hint: self.hint.clone(),
            }),
        }
    }
}
