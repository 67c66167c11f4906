//! Configuration system for the pipeline.
//! TOML-based, layered resolution: overrides > env > project > user > defaults.

pub mod authgraph_config;
pub mod extraction_config;
pub mod rank_config;
pub mod source_config;
pub mod store_config;

pub use authgraph_config::{AuthgraphConfig, ConfigOverrides};
pub use extraction_config::ExtractionConfig;
pub use rank_config::RankConfig;
pub use source_config::SourceConfig;
pub use store_config::StoreConfig;
