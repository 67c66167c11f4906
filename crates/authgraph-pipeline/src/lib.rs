//! authgraph-pipeline: the dependency-ordered, idempotent artifact build.
//!
//! A [`StageGraph`] holds stage descriptors and their requirements; the
//! [`Engine`] runs whatever is not yet on disk in topological order.
//! [`AuthorityPipeline`] wires up the concrete authority-file stages.

pub mod artifact;
pub mod engine;
pub mod external;
pub mod fingerprint;
pub mod graph;
pub mod pipeline;
pub mod stage;
pub mod stages;

pub use artifact::{ArtifactStore, Scratch};
pub use engine::{Engine, ExecutionReport};
pub use fingerprint::{Fingerprint, StageParams};
pub use graph::{StageGraph, StageId};
pub use pipeline::AuthorityPipeline;
pub use stage::{Stage, StageContext, StageOutput};
