//! Artifact Store: `(kind, fingerprint, extension)` → path, plus the
//! write-to-scratch-then-rename discipline every artifact goes through.

use std::fs;
use std::path::{Path, PathBuf};

use authgraph_core::config::StoreConfig;
use authgraph_core::errors::StageError;
use tempfile::TempPath;

use crate::fingerprint::Fingerprint;

/// Maps stage identities to paths under `root/tag`.
#[derive(Debug, Clone)]
pub struct ArtifactStore {
    root: PathBuf,
    tag: String,
    scratch_dir: Option<PathBuf>,
}

impl ArtifactStore {
    pub fn new(root: impl Into<PathBuf>, tag: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            tag: tag.into(),
            scratch_dir: None,
        }
    }

    pub fn from_config(config: &StoreConfig) -> Self {
        Self {
            root: config.effective_root(),
            tag: config.effective_tag(),
            scratch_dir: config.scratch_dir.clone(),
        }
    }

    /// Create scratch files in `dir` instead of next to the artifact.
    pub fn with_scratch_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.scratch_dir = Some(dir.into());
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// `root/tag/kind/fingerprint.extension`.
    pub fn path(&self, kind: &str, fingerprint: &Fingerprint, extension: &str) -> PathBuf {
        self.root
            .join(&self.tag)
            .join(kind)
            .join(format!("{fingerprint}.{extension}"))
    }

    /// A fresh scratch file for the artifact at `target`.
    pub fn scratch(&self, target: &Path) -> Result<Scratch, StageError> {
        let dir = match &self.scratch_dir {
            Some(dir) => dir.clone(),
            None => parent_of(target),
        };
        let path = temp_path_in(&dir)?;
        Ok(Scratch {
            path,
            target: target.to_path_buf(),
        })
    }
}

/// An uncommitted artifact. Dropping it removes the scratch file.
#[derive(Debug)]
pub struct Scratch {
    path: TempPath,
    target: PathBuf,
}

impl Scratch {
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn target(&self) -> &Path {
        &self.target
    }

    /// Move the scratch file to its final path.
    ///
    /// The last step is a rename within the target directory, so readers
    /// see either no artifact or the complete one.
    pub fn commit(self) -> Result<PathBuf, StageError> {
        let Scratch { path, target } = self;
        let dir = parent_of(&target);

        let local = if path.parent() == Some(dir.as_path()) {
            path
        } else {
            let local = temp_path_in(&dir)?;
            fs::copy(&path, &local).map_err(|e| StageError::io(&target, e))?;
            local
        };
        local
            .persist(&target)
            .map_err(|e| StageError::io(&target, e.error))?;
        tracing::debug!(artifact = %target.display(), "artifact committed");
        Ok(target)
    }
}

fn parent_of(path: &Path) -> PathBuf {
    path.parent()
        .filter(|p| !p.as_os_str().is_empty())
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("."))
}

fn temp_path_in(dir: &Path) -> Result<TempPath, StageError> {
    fs::create_dir_all(dir).map_err(|e| StageError::io(dir, e))?;
    tempfile::Builder::new()
        .prefix(".scratch-")
        .tempfile_in(dir)
        .map(|file| file.into_temp_path())
        .map_err(|e| StageError::io(dir, e))
}
