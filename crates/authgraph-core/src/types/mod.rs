//! Data structures shared across the pipeline.

pub mod collections;
pub mod record;

pub use collections::{FxHashMap, FxHashSet};
pub use record::{Edge, Record};
