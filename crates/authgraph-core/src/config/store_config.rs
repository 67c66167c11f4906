//! Artifact store configuration.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_ROOT, DEFAULT_TAG};

/// Where artifacts live on stable storage.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct StoreConfig {
    /// Artifact root directory. Default: `artifacts`.
    pub root: Option<PathBuf>,
    /// Source tag every artifact path is grouped under. Default: `gndzero`.
    pub tag: Option<String>,
    /// Directory for scratch files. Default: next to the final artifact,
    /// which keeps the final move a same-filesystem rename.
    pub scratch_dir: Option<PathBuf>,
}

impl StoreConfig {
    /// Returns the effective artifact root.
    pub fn effective_root(&self) -> PathBuf {
        self.root.clone().unwrap_or_else(|| PathBuf::from(DEFAULT_ROOT))
    }

    /// Returns the effective tag.
    pub fn effective_tag(&self) -> String {
        self.tag.clone().unwrap_or_else(|| DEFAULT_TAG.to_string())
    }
}
