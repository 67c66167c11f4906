//! Deterministic stage fingerprints from typed parameters.

use std::collections::BTreeMap;
use std::fmt;

use authgraph_core::constants::DEFAULT_FINGERPRINT;
use authgraph_core::errors::PipelineError;
use serde::Serialize;
use serde_json::Value;
use xxhash_rust::xxh3::xxh3_64;

/// A stage's parameters flattened to sorted `name → value` strings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StageParams(BTreeMap<String, String>);

impl StageParams {
    /// No parameters; fingerprints to the default.
    pub fn none() -> Self {
        Self::default()
    }

    /// Flatten the parameter struct of a `kind` stage. It must serialize
    /// as a map; scalar fields become their plain text, nested values
    /// compact JSON, and `None` fields an empty string.
    pub fn of<T: Serialize>(kind: &str, params: &T) -> Result<Self, PipelineError> {
        let value = serde_json::to_value(params).map_err(|e| PipelineError::Fingerprint {
            kind: kind.to_string(),
            message: e.to_string(),
        })?;
        let fields = match value {
            Value::Object(fields) => fields,
            other => {
                return Err(PipelineError::Fingerprint {
                    kind: kind.to_string(),
                    message: format!("parameters must serialize as a map, got {other}"),
                })
            }
        };
        Ok(Self(
            fields
                .into_iter()
                .map(|(name, value)| (name, flatten(value)))
                .collect(),
        ))
    }

    pub fn with(mut self, name: impl Into<String>, value: impl fmt::Display) -> Self {
        self.0.insert(name.into(), value.to_string());
        self
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn fingerprint(&self) -> Fingerprint {
        if self.0.is_empty() {
            return Fingerprint(DEFAULT_FINGERPRINT.to_string());
        }
        let parts: Vec<String> = self
            .0
            .iter()
            .map(|(name, value)| format!("{}-{}", slug(name), slug(value)))
            .collect();
        Fingerprint(parts.join("-"))
    }
}

fn flatten(value: Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s,
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        other => other.to_string(),
    }
}

/// Filesystem-safe cache key for one stage instance.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Fingerprint(String);

impl Fingerprint {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Short stable digest for parameter values too long or too punctuated
/// to slug, such as patterns and URLs.
pub fn digest(value: &str) -> String {
    format!("{:016x}", xxh3_64(value.as_bytes()))
}

/// Lower-case, collapse every run of non-alphanumerics to one `-`, trim
/// `-` from both ends.
pub fn slug(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut pending_dash = false;
    for c in value.chars() {
        if c.is_ascii_alphanumeric() {
            if pending_dash && !out.is_empty() {
                out.push('-');
            }
            pending_dash = false;
            out.push(c.to_ascii_lowercase());
        } else {
            pending_dash = true;
        }
    }
    out
}
