//! Graph Store: duplicate-free edge table indexed on both columns.

use std::path::Path;

use authgraph_core::errors::StorageError;
use authgraph_core::types::Edge;
use rusqlite::Connection;

use crate::connection::{self, writer::with_immediate_transaction};
use crate::migrations::Schema;
use crate::queries::edges;

/// Outcome of a bulk edge load.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EdgeLoadStats {
    pub loaded: usize,
    pub duplicates: usize,
    pub self_loops: usize,
}

/// Bulk-load `edges` into a fresh database at `path`, then index it.
pub fn build_edge_store<I, E>(path: &Path, input: I) -> Result<EdgeLoadStats, E>
where
    I: IntoIterator<Item = Result<Edge, E>>,
    E: From<StorageError>,
{
    let conn = connection::open_for_build(path, Schema::Edges)?;
    let stats = with_immediate_transaction(&conn, |tx| {
        let mut stats = EdgeLoadStats::default();
        for edge in input {
            let edge = edge?;
            if edge.is_self_loop() {
                stats.self_loops += 1;
                continue;
            }
            if edges::insert_edge(tx, &edge.source, &edge.target)? {
                stats.loaded += 1;
            } else {
                stats.duplicates += 1;
            }
        }
        edges::create_indexes(tx)?;
        Ok::<_, E>(stats)
    })?;
    connection::close(conn)?;

    tracing::info!(
        edges = stats.loaded,
        duplicates = stats.duplicates,
        self_loops = stats.self_loops,
        path = %path.display(),
        "edge store built"
    );
    Ok(stats)
}

/// Read-only handle on a finished Graph Store.
pub struct EdgeStore {
    conn: Connection,
}

impl EdgeStore {
    pub fn open(path: &Path) -> Result<Self, StorageError> {
        Ok(Self {
            conn: connection::open_read_only(path)?,
        })
    }

    /// Direct successors of `source`.
    pub fn successors(&self, source: &str) -> Result<Vec<String>, StorageError> {
        edges::successors(&self.conn, source)
    }

    /// Direct predecessors of `target`.
    pub fn predecessors(&self, target: &str) -> Result<Vec<String>, StorageError> {
        edges::predecessors(&self.conn, target)
    }

    pub fn count(&self) -> Result<u64, StorageError> {
        edges::count_edges(&self.conn)
    }
}
