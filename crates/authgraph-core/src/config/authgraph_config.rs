//! Top-level configuration with layered resolution.

use std::path::{Path, PathBuf};

use regex::Regex;
use serde::{Deserialize, Serialize};

use super::{ExtractionConfig, RankConfig, SourceConfig, StoreConfig};
use crate::errors::ConfigError;

/// Project config file name, looked up in the project root.
pub const PROJECT_CONFIG_FILE: &str = "authgraph.toml";

/// Top-level configuration aggregating all sections.
///
/// Resolution order (highest priority first):
/// 1. Explicit overrides (applied via `apply_overrides`)
/// 2. Environment variables (`AUTHGRAPH_*`)
/// 3. Project config (`authgraph.toml` in the project root)
/// 4. User config (`~/.authgraph/config.toml`)
/// 5. Compiled defaults
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct AuthgraphConfig {
    pub store: StoreConfig,
    pub source: SourceConfig,
    pub extraction: ExtractionConfig,
    pub rank: RankConfig,
}

/// Programmatic overrides with the highest priority.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub root: Option<PathBuf>,
    pub tag: Option<String>,
    pub batch_size: Option<usize>,
    pub rank_executable: Option<String>,
}

impl AuthgraphConfig {
    /// Load configuration with layered resolution rooted at `project_root`.
    pub fn load(
        project_root: &Path,
        overrides: Option<&ConfigOverrides>,
    ) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        // Lowest priority: user config. Unreadable files are skipped,
        // unparseable ones are fatal.
        if let Some(user_config_path) = Self::user_config_path() {
            if user_config_path.exists() {
                match Self::merge_toml_file(&mut config, &user_config_path) {
                    Ok(()) => {}
                    Err(e @ ConfigError::ParseError { .. }) => return Err(e),
                    Err(e) => {
                        ::tracing::warn!(error = %e, "ignoring unreadable user config");
                    }
                }
            }
        }

        let project_config_path = project_root.join(PROJECT_CONFIG_FILE);
        if project_config_path.exists() {
            Self::merge_toml_file(&mut config, &project_config_path)?;
        }

        Self::apply_env_overrides(&mut config);

        if let Some(overrides) = overrides {
            Self::apply_overrides(&mut config, overrides);
        }

        Self::validate(&config)?;

        Ok(config)
    }

    /// Load configuration from a TOML string (for testing).
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        toml::from_str(toml_str).map_err(|e| ConfigError::ParseError {
            path: "<string>".to_string(),
            message: e.to_string(),
        })
    }

    /// Validate the configuration values.
    pub fn validate(config: &AuthgraphConfig) -> Result<(), ConfigError> {
        if config.extraction.batch_size == Some(0) {
            return Err(ConfigError::ValidationFailed {
                field: "extraction.batch_size".to_string(),
                message: "must be greater than 0".to_string(),
            });
        }
        if let Some(ref tag) = config.store.tag {
            if tag.is_empty() || tag.contains('/') || tag.contains('\\') || tag == ".." {
                return Err(ConfigError::ValidationFailed {
                    field: "store.tag".to_string(),
                    message: "must be a non-empty single path component".to_string(),
                });
            }
        }

        let extraction = &config.extraction;
        let patterns = [
            ("extraction.subject_pattern", extraction.effective_subject_pattern(), 1),
            ("extraction.same_as_pattern", extraction.effective_same_as_pattern(), 1),
            ("extraction.successor_pattern", extraction.effective_successor_pattern(), 1),
            (
                "extraction.preferred_name_pattern",
                extraction.effective_preferred_name_pattern(),
                2,
            ),
        ];
        for (field, pattern, groups) in patterns {
            let compiled = Regex::new(pattern).map_err(|e| ConfigError::ValidationFailed {
                field: field.to_string(),
                message: e.to_string(),
            })?;
            // captures_len counts the implicit whole-match group.
            if compiled.captures_len() <= groups {
                return Err(ConfigError::ValidationFailed {
                    field: field.to_string(),
                    message: format!("needs at least {groups} capture group(s)"),
                });
            }
        }
        Ok(())
    }

    /// Returns the user config path: `~/.authgraph/config.toml`.
    fn user_config_path() -> Option<PathBuf> {
        home_dir().map(|h| h.join(".authgraph").join("config.toml"))
    }

    /// Merge a TOML file into the existing config.
    /// Unknown keys are silently ignored.
    fn merge_toml_file(config: &mut AuthgraphConfig, path: &Path) -> Result<(), ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
            path: path.display().to_string(),
        })?;

        let file_config: AuthgraphConfig =
            toml::from_str(&content).map_err(|e| ConfigError::ParseError {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;

        Self::merge(config, &file_config);
        Ok(())
    }

    /// Merge `other` into `base`; `other` wins only where it has a value.
    fn merge(base: &mut AuthgraphConfig, other: &AuthgraphConfig) {
        // Store
        if other.store.root.is_some() {
            base.store.root = other.store.root.clone();
        }
        if other.store.tag.is_some() {
            base.store.tag = other.store.tag.clone();
        }
        if other.store.scratch_dir.is_some() {
            base.store.scratch_dir = other.store.scratch_dir.clone();
        }

        // Source
        if other.source.dump_url.is_some() {
            base.source.dump_url = other.source.dump_url.clone();
        }
        if other.source.download_tool.is_some() {
            base.source.download_tool = other.source.download_tool.clone();
        }
        if other.source.decompress_tool.is_some() {
            base.source.decompress_tool = other.source.decompress_tool.clone();
        }

        // Extraction
        if other.extraction.batch_size.is_some() {
            base.extraction.batch_size = other.extraction.batch_size;
        }
        if other.extraction.subject_pattern.is_some() {
            base.extraction.subject_pattern = other.extraction.subject_pattern.clone();
        }
        if other.extraction.same_as_pattern.is_some() {
            base.extraction.same_as_pattern = other.extraction.same_as_pattern.clone();
        }
        if other.extraction.successor_pattern.is_some() {
            base.extraction.successor_pattern = other.extraction.successor_pattern.clone();
        }
        if other.extraction.preferred_name_pattern.is_some() {
            base.extraction.preferred_name_pattern =
                other.extraction.preferred_name_pattern.clone();
        }

        // Rank
        if other.rank.executable.is_some() {
            base.rank.executable = other.rank.executable.clone();
        }
        if other.rank.hint.is_some() {
            base.rank.hint = other.rank.hint.clone();
        }
    }

    /// Apply environment variable overrides.
    /// Pattern: `AUTHGRAPH_STORE_ROOT`, `AUTHGRAPH_EXTRACTION_BATCH_SIZE`, etc.
    fn apply_env_overrides(config: &mut AuthgraphConfig) {
        if let Ok(val) = std::env::var("AUTHGRAPH_STORE_ROOT") {
            config.store.root = Some(PathBuf::from(val));
        }
        if let Ok(val) = std::env::var("AUTHGRAPH_STORE_TAG") {
            config.store.tag = Some(val);
        }
        if let Ok(val) = std::env::var("AUTHGRAPH_EXTRACTION_BATCH_SIZE") {
            if let Ok(v) = val.parse::<usize>() {
                config.extraction.batch_size = Some(v);
            }
        }
        if let Ok(val) = std::env::var("AUTHGRAPH_RANK_EXECUTABLE") {
            config.rank.executable = Some(val);
        }
        if let Ok(val) = std::env::var("AUTHGRAPH_SOURCE_DUMP_URL") {
            config.source.dump_url = Some(val);
        }
    }

    /// Apply explicit overrides (highest priority).
    fn apply_overrides(config: &mut AuthgraphConfig, overrides: &ConfigOverrides) {
        if let Some(ref v) = overrides.root {
            config.store.root = Some(v.clone());
        }
        if let Some(ref v) = overrides.tag {
            config.store.tag = Some(v.clone());
        }
        if let Some(v) = overrides.batch_size {
            config.extraction.batch_size = Some(v);
        }
        if let Some(ref v) = overrides.rank_executable {
            config.rank.executable = Some(v.clone());
        }
    }

    /// Serialize the config back to TOML.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::ParseError {
            path: "<serialization>".to_string(),
            message: e.to_string(),
        })
    }
}

/// Cross-platform home directory resolution.
fn home_dir() -> Option<PathBuf> {
    std::env::var_os("HOME")
        .or_else(|| std::env::var_os("USERPROFILE"))
        .map(PathBuf::from)
}
