//! Same-as and successor edge extraction over Record Store content.

use std::io::Write;

use authgraph_core::errors::{GraphError, ParseError, StorageError};
use authgraph_core::types::{Edge, FxHashSet, Record};
use authgraph_storage::RecordStore;
use regex::Regex;

use crate::pattern;
use crate::tsv::TsvWriter;

/// Which relation an extractor emits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkKind {
    /// Equivalence links to opaque external URIs.
    SameAs,
    /// References to local identifiers anywhere in the record.
    Successor,
}

/// Counters for one extraction pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExtractionStats {
    pub records: usize,
    pub edges: usize,
    pub self_loops: usize,
    pub duplicates: usize,
}

/// Matches one link pattern (group 1 = target) against record content.
pub struct LinkExtractor {
    kind: LinkKind,
    pattern: Regex,
}

impl LinkExtractor {
    pub fn new(kind: LinkKind, pattern: &str) -> Result<Self, ParseError> {
        Ok(Self {
            kind,
            pattern: pattern::compile(pattern, 1)?,
        })
    }

    pub fn same_as(pattern: &str) -> Result<Self, ParseError> {
        Self::new(LinkKind::SameAs, pattern)
    }

    pub fn successor(pattern: &str) -> Result<Self, ParseError> {
        Self::new(LinkKind::Successor, pattern)
    }

    pub fn kind(&self) -> LinkKind {
        self.kind
    }

    /// Edges out of `record`, in match order, each target at most once.
    /// Successor self-references are dropped.
    pub fn edges(&self, record: &Record, stats: &mut ExtractionStats) -> Vec<Edge> {
        let mut seen: FxHashSet<&str> = FxHashSet::default();
        let mut edges = Vec::new();
        for caps in self.pattern.captures_iter(&record.content) {
            let Some(target) = caps.get(1).map(|m| m.as_str()) else {
                continue;
            };
            if target.is_empty() {
                continue;
            }
            if self.kind == LinkKind::Successor && target == record.id {
                stats.self_loops += 1;
                continue;
            }
            if !seen.insert(target) {
                stats.duplicates += 1;
                continue;
            }
            edges.push(Edge::new(record.id.as_str(), target));
        }
        edges
    }
}

/// Run `extractor` over every record in `store`, `batch_size` ids at a
/// time, writing `source\ttarget` rows.
pub fn extract_edges<W, E>(
    store: &RecordStore,
    batch_size: usize,
    extractor: &LinkExtractor,
    writer: &mut TsvWriter<W>,
) -> Result<ExtractionStats, E>
where
    W: Write,
    E: From<StorageError> + From<GraphError>,
{
    let mut stats = ExtractionStats::default();
    store.for_each_batch(batch_size, |batch| {
        for record in batch {
            for edge in extractor.edges(record, &mut stats) {
                writer
                    .write_row(&[&edge.source, &edge.target])
                    .map_err(GraphError::from)?;
                stats.edges += 1;
            }
            stats.records += 1;
        }
        Ok::<_, E>(())
    })?;

    tracing::info!(
        kind = ?extractor.kind(),
        records = stats.records,
        edges = stats.edges,
        self_loops = stats.self_loops,
        "links extracted"
    );
    Ok(stats)
}
