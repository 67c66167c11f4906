//! Preferred labels and the Name Joiner.

pub mod join;
pub mod preferred;

pub use join::{join_names, write_ranked, RankedName};
pub use preferred::{extract_names, read_names, NameExtractor, NameStats, PreferredName};
