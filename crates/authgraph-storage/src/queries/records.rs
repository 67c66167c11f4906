//! records table queries.

use authgraph_core::errors::StorageError;
use authgraph_core::types::Record;
use rusqlite::{params, params_from_iter, Connection, OptionalExtension};

use super::sqlite_err;

/// Insert one record. Returns `false` when the id already exists; the
/// first occurrence wins.
pub fn insert_record(conn: &Connection, record: &Record) -> Result<bool, StorageError> {
    let mut stmt = conn
        .prepare_cached("INSERT OR IGNORE INTO records (id, content) VALUES (?1, ?2)")
        .map_err(sqlite_err)?;
    let changed = stmt
        .execute(params![record.id, record.content.as_bytes()])
        .map_err(sqlite_err)?;
    Ok(changed == 1)
}

/// Get the content of one record.
pub fn get_content(conn: &Connection, id: &str) -> Result<Option<String>, StorageError> {
    let mut stmt = conn
        .prepare_cached("SELECT content FROM records WHERE id = ?1")
        .map_err(sqlite_err)?;
    let bytes: Option<Vec<u8>> = stmt
        .query_row(params![id], |row| row.get(0))
        .optional()
        .map_err(sqlite_err)?;
    bytes.map(|b| decode(id, b)).transpose()
}

/// Get `(id, content)` for every id in `ids` that exists, in one query.
/// Row order is unspecified; callers restore request order.
pub fn get_contents(conn: &Connection, ids: &[&str]) -> Result<Vec<Record>, StorageError> {
    if ids.is_empty() {
        return Ok(Vec::new());
    }
    let placeholders = vec!["?"; ids.len()].join(",");
    let sql = format!("SELECT id, content FROM records WHERE id IN ({placeholders})");
    let mut stmt = conn.prepare(&sql).map_err(sqlite_err)?;

    let rows = stmt
        .query_map(params_from_iter(ids.iter()), |row| {
            Ok((row.get::<_, String>(0)?, row.get::<_, Vec<u8>>(1)?))
        })
        .map_err(sqlite_err)?;

    let mut result = Vec::with_capacity(ids.len());
    for row in rows {
        let (id, bytes) = row.map_err(sqlite_err)?;
        let content = decode(&id, bytes)?;
        result.push(Record { id, content });
    }
    Ok(result)
}

/// All ids in insertion order.
pub fn all_ids(conn: &Connection) -> Result<Vec<String>, StorageError> {
    let mut stmt = conn
        .prepare_cached("SELECT id FROM records ORDER BY rowid")
        .map_err(sqlite_err)?;
    let rows = stmt.query_map([], |row| row.get(0)).map_err(sqlite_err)?;

    let mut result = Vec::new();
    for row in rows {
        result.push(row.map_err(sqlite_err)?);
    }
    Ok(result)
}

/// Count records.
pub fn count_records(conn: &Connection) -> Result<u64, StorageError> {
    conn.query_row("SELECT COUNT(*) FROM records", [], |row| row.get::<_, i64>(0))
        .map(|n| n as u64)
        .map_err(sqlite_err)
}

fn decode(id: &str, bytes: Vec<u8>) -> Result<String, StorageError> {
    String::from_utf8(bytes).map_err(|_| StorageError::InvalidContent { id: id.to_string() })
}
