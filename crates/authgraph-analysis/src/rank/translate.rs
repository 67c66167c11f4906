//! Forward and backward translation through the [`IdMap`].
//!
//! Forward: `id\tid` edges become `dense\tdense`; edges with an endpoint
//! outside the map are dropped and counted. Backward: `dense score` rows
//! from the external rank computation become `id\tscore`; an unknown
//! dense id there means the map and the rank input disagree, which is
//! fatal. Scores keep the rank tool's text; it is parsed only to check
//! it and to order rows.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::io::{BufRead, Write};

use authgraph_core::errors::GraphError;
use authgraph_core::types::FxHashSet;

use crate::graph::{DenseId, IdMap};
use crate::tsv::{self, TsvWriter};

/// A finite score as the rank tool printed it.
#[derive(Debug, Clone, PartialEq)]
pub struct Score {
    value: f64,
    text: String,
}

impl Score {
    /// `None` unless `text` parses to a finite number.
    pub fn parse(text: &str) -> Option<Self> {
        match text.parse::<f64>() {
            Ok(value) if value.is_finite() => Some(Self {
                value,
                text: text.to_string(),
            }),
            _ => None,
        }
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

/// One ranked identifier.
#[derive(Debug, Clone, PartialEq)]
pub struct RankEntry {
    pub id: String,
    pub score: Score,
}

/// Counters for the forward edge translation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TranslationStats {
    pub written: usize,
    pub self_loops: usize,
    /// Edges dropped because an endpoint had no dense id.
    pub dropped: usize,
    /// Distinct ids that had no dense id.
    pub missing_ids: usize,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CompactionStats {
    pub rows: usize,
    pub edges: usize,
}

/// Rewrite a `source\ttarget` edge list into dense-id space.
pub fn translate_edges<R: BufRead, W: Write>(
    map: &IdMap,
    reader: R,
    writer: &mut TsvWriter<W>,
) -> Result<TranslationStats, GraphError> {
    let mut stats = TranslationStats::default();
    let mut missing: FxHashSet<String> = FxHashSet::default();

    tsv::for_each_row(reader, |line, fields| -> Result<(), GraphError> {
        let (source, target) = tsv::pair("successor edges", line, fields)?;
        if source == target {
            stats.self_loops += 1;
            return Ok(());
        }
        match (map.dense(source), map.dense(target)) {
            (Some(s), Some(t)) => {
                writer.write_row(&[s.to_string(), t.to_string()])?;
                stats.written += 1;
            }
            (s, t) => {
                stats.dropped += 1;
                if s.is_none() && missing.insert(source.to_string()) {
                    tracing::trace!(id = source, "no dense id");
                }
                if t.is_none() && missing.insert(target.to_string()) {
                    tracing::trace!(id = target, "no dense id");
                }
            }
        }
        Ok(())
    })?;

    stats.missing_ids = missing.len();
    if stats.dropped > 0 {
        tracing::warn!(
            misses = stats.dropped,
            missing_ids = stats.missing_ids,
            "edges dropped during translation"
        );
    }
    tracing::info!(edges = stats.written, "edges translated");
    Ok(stats)
}

/// Fold a `dense\tdense` edge list into adjacency rows:
/// `node\tsucc\tsucc...`, nodes and successors ascending.
pub fn compact_adjacency<R: BufRead, W: Write>(
    reader: R,
    writer: &mut TsvWriter<W>,
) -> Result<CompactionStats, GraphError> {
    let mut graph: BTreeMap<DenseId, BTreeSet<DenseId>> = BTreeMap::new();
    tsv::for_each_row(reader, |line, fields| -> Result<(), GraphError> {
        let (source, target) = tsv::pair("dense edges", line, fields)?;
        let source = parse_dense(line, source)?;
        let target = parse_dense(line, target)?;
        graph.entry(source).or_default().insert(target);
        Ok(())
    })?;

    let mut stats = CompactionStats::default();
    for (node, successors) in &graph {
        let mut row = Vec::with_capacity(successors.len() + 1);
        row.push(node.to_string());
        row.extend(successors.iter().map(ToString::to_string));
        writer.write_row(&row)?;
        stats.rows += 1;
        stats.edges += successors.len();
    }
    Ok(stats)
}

/// Rewrite `dense score` rows (tab or space separated) to `id\tscore`.
pub fn translate_ranks<R: BufRead, W: Write>(
    map: &IdMap,
    reader: R,
    writer: &mut TsvWriter<W>,
) -> Result<usize, GraphError> {
    let mut written = 0;
    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        let lineno = index + 1;
        let mut fields = line.split_whitespace();
        let (dense, score) = match (fields.next(), fields.next(), fields.next()) {
            (None, _, _) => continue,
            (Some(dense), Some(score), None) => (dense, score),
            _ => {
                return Err(GraphError::MalformedLine {
                    context: "rank output",
                    line: lineno,
                    expected: 2,
                })
            }
        };
        let dense = parse_dense(lineno, dense)?;
        let score = parse_score(lineno, score)?;
        let id = map
            .original(dense)
            .ok_or(GraphError::UnknownDenseId { id: dense })?;
        writer.write_row(&[id, score.as_str()])?;
        written += 1;
    }
    Ok(written)
}

/// Read `id\tscore` rows.
pub fn read_rank_entries<R: BufRead>(reader: R) -> Result<Vec<RankEntry>, GraphError> {
    let mut entries = Vec::new();
    tsv::for_each_row(reader, |line, fields| -> Result<(), GraphError> {
        let (id, score) = tsv::pair("ranks", line, fields)?;
        entries.push(RankEntry {
            id: id.to_string(),
            score: parse_score(line, score)?,
        });
        Ok(())
    })?;
    Ok(entries)
}

fn parse_dense(line: usize, value: &str) -> Result<DenseId, GraphError> {
    value.parse().map_err(|_| GraphError::InvalidDenseId {
        line,
        value: value.to_string(),
    })
}

fn parse_score(line: usize, value: &str) -> Result<Score, GraphError> {
    Score::parse(value).ok_or_else(|| GraphError::InvalidScore {
        line,
        value: value.to_string(),
    })
}
