//! edges table queries.

use authgraph_core::errors::StorageError;
use rusqlite::{params, Connection};

use super::sqlite_err;

/// Insert one edge. Returns `false` for a duplicate.
pub fn insert_edge(conn: &Connection, source: &str, target: &str) -> Result<bool, StorageError> {
    let mut stmt = conn
        .prepare_cached("INSERT OR IGNORE INTO edges (source, target) VALUES (?1, ?2)")
        .map_err(sqlite_err)?;
    let changed = stmt.execute(params![source, target]).map_err(sqlite_err)?;
    Ok(changed == 1)
}

/// Create the per-column lookup indexes. Run once after the bulk load.
pub fn create_indexes(conn: &Connection) -> Result<(), StorageError> {
    conn.execute_batch(
        "
        CREATE INDEX IF NOT EXISTS idx_edges_source ON edges (source);
        CREATE INDEX IF NOT EXISTS idx_edges_target ON edges (target);
        ",
    )
    .map_err(sqlite_err)
}

/// Direct successors of `source`, sorted.
pub fn successors(conn: &Connection, source: &str) -> Result<Vec<String>, StorageError> {
    select_column(
        conn,
        "SELECT target FROM edges WHERE source = ?1 ORDER BY target",
        source,
    )
}

/// Direct predecessors of `target`, sorted.
pub fn predecessors(conn: &Connection, target: &str) -> Result<Vec<String>, StorageError> {
    select_column(
        conn,
        "SELECT source FROM edges WHERE target = ?1 ORDER BY source",
        target,
    )
}

/// Count edges.
pub fn count_edges(conn: &Connection) -> Result<u64, StorageError> {
    conn.query_row("SELECT COUNT(*) FROM edges", [], |row| row.get::<_, i64>(0))
        .map(|n| n as u64)
        .map_err(sqlite_err)
}

fn select_column(conn: &Connection, sql: &str, key: &str) -> Result<Vec<String>, StorageError> {
    let mut stmt = conn.prepare_cached(sql).map_err(sqlite_err)?;
    let rows = stmt
        .query_map(params![key], |row| row.get(0))
        .map_err(sqlite_err)?;

    let mut result = Vec::new();
    for row in rows {
        result.push(row.map_err(sqlite_err)?);
    }
    Ok(result)
}
