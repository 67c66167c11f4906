//! External rank computation configuration.

use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_RANK_EXECUTABLE, DEFAULT_RANK_HINT};

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct RankConfig {
    /// Rank executable. Default: `pagerank`.
    pub executable: Option<String>,
    /// Message shown when the executable is missing.
    pub hint: Option<String>,
}

impl RankConfig {
    pub fn effective_executable(&self) -> String {
        self.executable
            .clone()
            .unwrap_or_else(|| DEFAULT_RANK_EXECUTABLE.to_string())
    }

    pub fn effective_hint(&self) -> String {
        self.hint
            .clone()
            .unwrap_or_else(|| DEFAULT_RANK_HINT.to_string())
    }
}
