//! authgraph-analysis: everything between the raw dump and the final
//! ranked table that does not touch the stage engine.
//!
//! - records: dump → `(id, content)` blocks
//! - links: record content → same-as / successor edges
//! - graph: reachability closure sizes and the dense id map
//! - rank: edge translation, adjacency compaction, rank back-translation
//! - names: preferred labels and the final joined table

pub mod graph;
pub mod links;
pub mod names;
pub mod pattern;
pub mod rank;
pub mod records;
pub mod tsv;
