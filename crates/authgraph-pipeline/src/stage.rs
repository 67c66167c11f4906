//! The stage abstraction: one descriptor, one output.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use authgraph_core::errors::{PipelineError, StageError};

use crate::fingerprint::StageParams;

/// What a stage leaves behind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StageOutput {
    /// A file at `root/tag/kind/fingerprint.extension`.
    Artifact { extension: &'static str },
    /// Nothing on disk; completion is a live check (e.g. an executable
    /// on `PATH`). Pending capability stages run before any other work.
    Capability,
}

/// A pipeline stage: identity is `(kind, params)`, behavior is `run`.
pub trait Stage: Send + Sync {
    /// Kebab-case stage kind; the artifact directory name.
    fn kind(&self) -> &'static str;

    fn params(&self) -> Result<StageParams, PipelineError> {
        Ok(StageParams::none())
    }

    fn output(&self) -> StageOutput;

    /// Whether the stage needs to run. `artifact` is `None` for
    /// capability stages.
    fn is_complete(&self, artifact: Option<&Path>) -> bool {
        artifact.is_some_and(Path::exists)
    }

    fn run(&self, ctx: &StageContext<'_>) -> Result<(), StageError>;
}

/// Everything a running stage may touch.
///
/// `input(i)` is the artifact of the i-th artifact-producing requirement,
/// in declaration order; capability requirements are not counted.
pub struct StageContext<'a> {
    kind: &'static str,
    inputs: Vec<&'a Path>,
    scratch: Option<&'a Path>,
    target: Option<&'a Path>,
}

impl<'a> StageContext<'a> {
    pub fn new(
        kind: &'static str,
        inputs: Vec<&'a Path>,
        scratch: Option<&'a Path>,
        target: Option<&'a Path>,
    ) -> Self {
        Self {
            kind,
            inputs,
            scratch,
            target,
        }
    }

    pub fn kind(&self) -> &'static str {
        self.kind
    }

    pub fn input(&self, index: usize) -> Result<&'a Path, StageError> {
        self.inputs
            .get(index)
            .copied()
            .ok_or_else(|| StageError::MissingInput {
                kind: self.kind.to_string(),
                index,
            })
    }

    pub fn input_count(&self) -> usize {
        self.inputs.len()
    }

    /// Where the stage writes its output.
    pub fn scratch(&self) -> Result<&'a Path, StageError> {
        self.scratch.ok_or_else(|| StageError::NoArtifact {
            kind: self.kind.to_string(),
        })
    }

    /// Where the output ends up once the stage succeeds.
    pub fn target(&self) -> Option<&'a Path> {
        self.target
    }

    pub fn open_input(&self, index: usize) -> Result<BufReader<File>, StageError> {
        let path = self.input(index)?;
        File::open(path)
            .map(BufReader::new)
            .map_err(|e| StageError::io(path, e))
    }

    /// Truncate and open the scratch file for writing.
    pub fn create_output(&self) -> Result<File, StageError> {
        let path = self.scratch()?;
        File::create(path).map_err(|e| StageError::io(path, e))
    }
}
