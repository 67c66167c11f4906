//! Reachability Engine.
//!
//! Loads the whole successor edge list into an id → successors map and
//! computes, for every key, the size of its forward closure (start node
//! included). Each start node is traversed independently; nothing is
//! shared between traversals.

use std::io::{BufRead, Write};

use authgraph_core::errors::GraphError;
use authgraph_core::types::{FxHashMap, FxHashSet};

use crate::tsv::{self, TsvWriter};

/// Counters for one reachability pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReachStats {
    pub sources: usize,
    pub largest_closure: usize,
}

/// Directed adjacency keyed by string id.
#[derive(Debug, Default)]
pub struct Adjacency {
    successors: FxHashMap<String, FxHashSet<String>>,
    edges: usize,
}

impl Adjacency {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `source → target`. Self-loops and repeated edges are ignored.
    pub fn add_edge(&mut self, source: &str, target: &str) {
        if source == target {
            return;
        }
        let inserted = match self.successors.get_mut(source) {
            Some(targets) => targets.insert(target.to_string()),
            None => {
                let mut targets = FxHashSet::default();
                targets.insert(target.to_string());
                self.successors.insert(source.to_string(), targets);
                true
            }
        };
        if inserted {
            self.edges += 1;
        }
    }

    /// Load a `source\ttarget` edge list.
    pub fn from_tsv<R: BufRead>(reader: R) -> Result<Self, GraphError> {
        let mut adjacency = Self::new();
        tsv::for_each_row(reader, |line, fields| {
            let (source, target) = tsv::pair("successor edges", line, fields)?;
            adjacency.add_edge(source, target);
            Ok::<_, GraphError>(())
        })?;
        tracing::info!(
            sources = adjacency.source_count(),
            edges = adjacency.edge_count(),
            "adjacency loaded"
        );
        Ok(adjacency)
    }

    /// Number of ids with at least one outbound edge.
    pub fn source_count(&self) -> usize {
        self.successors.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges
    }

    /// Direct successors of `id`.
    pub fn successors(&self, id: &str) -> Option<&FxHashSet<String>> {
        self.successors.get(id)
    }

    /// Ids with at least one outbound edge, sorted.
    pub fn sources(&self) -> Vec<&str> {
        let mut keys: Vec<&str> = self.successors.keys().map(String::as_str).collect();
        keys.sort_unstable();
        keys
    }

    /// Every id reachable from `start`, `start` included.
    ///
    /// Worklist expansion: pop one node, mark it reached, push its
    /// unreached successors. LIFO order; any order yields the same set.
    pub fn closure<'a>(&'a self, start: &'a str) -> FxHashSet<&'a str> {
        let mut reached: FxHashSet<&'a str> = FxHashSet::default();
        let mut frontier: Vec<&'a str> = vec![start];

        while let Some(node) = frontier.pop() {
            if !reached.insert(node) {
                continue;
            }
            if let Some(next) = self.successors.get(node) {
                for successor in next {
                    if !reached.contains(successor.as_str()) {
                        frontier.push(successor);
                    }
                }
            }
        }

        reached
    }

    /// `|closure(start)|`.
    pub fn closure_size(&self, start: &str) -> usize {
        self.closure(start).len()
    }

    /// Write `id\tclosure size` for every source id, in sorted id order.
    pub fn write_reach<W: Write>(
        &self,
        writer: &mut TsvWriter<W>,
    ) -> Result<ReachStats, GraphError> {
        let sources = self.sources();
        let total = sources.len();
        let mut stats = ReachStats::default();

        for (done, id) in sources.into_iter().enumerate() {
            let size = self.closure_size(id);
            writer.write_row(&[id, size.to_string().as_str()])?;
            stats.sources += 1;
            stats.largest_closure = stats.largest_closure.max(size);
            if done % 10_000 == 0 {
                tracing::debug!(done, total, "reachability progress");
            }
        }

        tracing::info!(
            sources = stats.sources,
            largest_closure = stats.largest_closure,
            "reachability computed"
        );
        Ok(stats)
    }
}
