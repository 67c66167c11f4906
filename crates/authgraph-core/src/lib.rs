//! authgraph-core: shared foundation for the authority-file pipeline.
//!
//! Errors, layered configuration, tracing setup, stage lifecycle events
//! and the collection aliases every other crate builds on.

pub mod config;
pub mod constants;
pub mod errors;
pub mod events;
pub mod tracing;
pub mod types;
