//! Stage graph: registered stages, their fingerprints and requirements.

use std::path::{Path, PathBuf};

use authgraph_core::errors::PipelineError;
use authgraph_core::types::FxHashMap;

use crate::artifact::ArtifactStore;
use crate::fingerprint::{digest, Fingerprint};
use crate::stage::{Stage, StageOutput};

/// Parameter added to a stage that consumes artifacts: a digest of its
/// requirements' identities, so a changed input lands at a new path.
pub const UPSTREAM_PARAM: &str = "upstream";

/// Index of a registered stage. Requirements always have smaller ids.
pub type StageId = usize;

pub(crate) struct StageNode {
    pub(crate) stage: Box<dyn Stage>,
    pub(crate) fingerprint: Fingerprint,
    pub(crate) requires: Vec<StageId>,
    pub(crate) artifact: Option<PathBuf>,
}

/// Directed acyclic graph of stage descriptors.
pub struct StageGraph {
    store: ArtifactStore,
    nodes: Vec<StageNode>,
    index: FxHashMap<(&'static str, Fingerprint), StageId>,
}

impl StageGraph {
    pub fn new(store: ArtifactStore) -> Self {
        Self {
            store,
            nodes: Vec::new(),
            index: FxHashMap::default(),
        }
    }

    /// Register `stage` after `requires`. The fingerprint covers the
    /// stage's own parameters and those of its artifact inputs.
    /// Registering a stage with the same kind and fingerprint again
    /// returns the existing id.
    pub fn add<S: Stage + 'static>(
        &mut self,
        stage: S,
        requires: &[StageId],
    ) -> Result<StageId, PipelineError> {
        if let Some(&missing) = requires.iter().find(|&&id| id >= self.nodes.len()) {
            return Err(PipelineError::UnknownStage(missing));
        }

        let mut deduped: Vec<StageId> = Vec::with_capacity(requires.len());
        for id in requires {
            if !deduped.contains(id) {
                deduped.push(*id);
            }
        }

        let kind = stage.kind();
        let mut params = stage.params()?;
        let upstream = self.upstream(&deduped);
        if !upstream.is_empty() {
            params = params.with(UPSTREAM_PARAM, digest(&upstream.join("\n")));
        }
        let fingerprint = params.fingerprint();
        let key = (kind, fingerprint.clone());
        if let Some(&existing) = self.index.get(&key) {
            tracing::debug!(stage = kind, %fingerprint, "stage already registered");
            return Ok(existing);
        }

        let artifact = match stage.output() {
            StageOutput::Artifact { extension } => {
                Some(self.store.path(kind, &fingerprint, extension))
            }
            StageOutput::Capability => None,
        };

        let id = self.nodes.len();
        self.nodes.push(StageNode {
            stage: Box::new(stage),
            fingerprint,
            requires: deduped,
            artifact,
        });
        self.index.insert(key, id);
        Ok(id)
    }

    /// `kind/fingerprint` of every artifact-producing requirement, in
    /// declaration order.
    fn upstream(&self, requires: &[StageId]) -> Vec<String> {
        requires
            .iter()
            .filter_map(|&id| self.nodes.get(id))
            .filter(|node| node.artifact.is_some())
            .map(|node| format!("{}/{}", node.stage.kind(), node.fingerprint))
            .collect()
    }

    pub fn store(&self) -> &ArtifactStore {
        &self.store
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn kind(&self, id: StageId) -> Result<&'static str, PipelineError> {
        Ok(self.node(id)?.stage.kind())
    }

    pub fn fingerprint(&self, id: StageId) -> Result<&Fingerprint, PipelineError> {
        Ok(&self.node(id)?.fingerprint)
    }

    /// Final artifact path, `None` for capability stages.
    pub fn artifact(&self, id: StageId) -> Result<Option<&Path>, PipelineError> {
        Ok(self.node(id)?.artifact.as_deref())
    }

    pub fn requires(&self, id: StageId) -> Result<&[StageId], PipelineError> {
        Ok(&self.node(id)?.requires)
    }

    /// `kind(fingerprint)`, for logs and errors.
    pub fn describe(&self, id: StageId) -> String {
        match self.nodes.get(id) {
            Some(node) => format!("{}({})", node.stage.kind(), node.fingerprint),
            None => format!("#{id}"),
        }
    }

    pub(crate) fn node(&self, id: StageId) -> Result<&StageNode, PipelineError> {
        self.nodes.get(id).ok_or(PipelineError::UnknownStage(id))
    }
}
