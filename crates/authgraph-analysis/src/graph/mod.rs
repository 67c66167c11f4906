//! In-memory graph analysis: reachability closures and the dense id map.

pub mod compactor;
pub mod reachability;

pub use compactor::{DenseId, IdMap};
pub use reachability::{Adjacency, ReachStats};
