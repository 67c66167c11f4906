//! Link Extractor: pattern-matched outbound references per record.

pub mod extractor;

pub use extractor::{extract_edges, ExtractionStats, LinkExtractor, LinkKind};
