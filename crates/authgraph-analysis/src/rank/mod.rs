//! Rank Translator: dense-space edge lists in, original-id scores out.

pub mod translate;

pub use translate::{
    compact_adjacency, read_rank_entries, translate_edges, translate_ranks, CompactionStats,
    RankEntry, Score, TranslationStats,
};
