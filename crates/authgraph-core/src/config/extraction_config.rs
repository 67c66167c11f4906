//! Record and link extraction configuration.

use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_BATCH_SIZE, DEFAULT_PREFERRED_NAME_PATTERN, DEFAULT_SAME_AS_PATTERN,
    DEFAULT_SUBJECT_PATTERN, DEFAULT_SUCCESSOR_PATTERN,
};

/// Patterns and batch sizes used by the parser and extractors.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Ids per batched Record Store query. Default: 1000.
    pub batch_size: Option<usize>,
    /// Subject URI pattern matched against a record's first line.
    pub subject_pattern: Option<String>,
    /// Equivalence link pattern.
    pub same_as_pattern: Option<String>,
    /// Local identifier reference pattern.
    pub successor_pattern: Option<String>,
    /// Preferred label pattern (group 1 kind, group 2 label).
    pub preferred_name_pattern: Option<String>,
}

impl ExtractionConfig {
    pub fn effective_batch_size(&self) -> usize {
        self.batch_size.unwrap_or(DEFAULT_BATCH_SIZE)
    }

    pub fn effective_subject_pattern(&self) -> &str {
        self.subject_pattern
            .as_deref()
            .unwrap_or(DEFAULT_SUBJECT_PATTERN)
    }

    pub fn effective_same_as_pattern(&self) -> &str {
        self.same_as_pattern
            .as_deref()
            .unwrap_or(DEFAULT_SAME_AS_PATTERN)
    }

    pub fn effective_successor_pattern(&self) -> &str {
        self.successor_pattern
            .as_deref()
            .unwrap_or(DEFAULT_SUCCESSOR_PATTERN)
    }

    pub fn effective_preferred_name_pattern(&self) -> &str {
        self.preferred_name_pattern
            .as_deref()
            .unwrap_or(DEFAULT_PREFERRED_NAME_PATTERN)
    }
}
