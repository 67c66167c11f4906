//! Dump source configuration.

use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_DECOMPRESS_TOOL, DEFAULT_DOWNLOAD_TOOL, DEFAULT_DUMP_URL};

/// Where the authority-file dump comes from and which tools fetch it.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct SourceConfig {
    /// Dump URL.
    pub dump_url: Option<String>,
    /// Download executable. Default: `wget`.
    pub download_tool: Option<String>,
    /// Decompression executable. Default: `gunzip`.
    pub decompress_tool: Option<String>,
}

impl SourceConfig {
    pub fn effective_dump_url(&self) -> String {
        self.dump_url
            .clone()
            .unwrap_or_else(|| DEFAULT_DUMP_URL.to_string())
    }

    pub fn effective_download_tool(&self) -> String {
        self.download_tool
            .clone()
            .unwrap_or_else(|| DEFAULT_DOWNLOAD_TOOL.to_string())
    }

    pub fn effective_decompress_tool(&self) -> String {
        self.decompress_tool
            .clone()
            .unwrap_or_else(|| DEFAULT_DECOMPRESS_TOOL.to_string())
    }
}
