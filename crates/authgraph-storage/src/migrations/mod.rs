//! Schema migrations using PRAGMA user_version.
//!
//! Each artifact database carries exactly one schema.

pub mod edges_v001;
pub mod records_v001;

use authgraph_core::errors::StorageError;
use rusqlite::Connection;

/// The schema a database artifact holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Schema {
    Records,
    Edges,
}

impl Schema {
    fn migrations(self) -> &'static [(&'static str, u32)] {
        match self {
            Schema::Records => &[(records_v001::MIGRATION_SQL, 1)],
            Schema::Edges => &[(edges_v001::MIGRATION_SQL, 1)],
        }
    }
}

/// Run all pending migrations for `schema`.
pub fn run_migrations(conn: &Connection, schema: Schema) -> Result<(), StorageError> {
    let current_version = current_version(conn)?;

    for (sql, version) in schema.migrations() {
        if current_version < *version {
            conn.execute_batch(sql)
                .map_err(|e| StorageError::MigrationFailed {
                    version: *version,
                    message: e.to_string(),
                })?;

            conn.pragma_update(None, "user_version", version)
                .map_err(|e| StorageError::MigrationFailed {
                    version: *version,
                    message: e.to_string(),
                })?;
            tracing::debug!(?schema, version = version, "applied migration");
        }
    }

    Ok(())
}

/// Get the current schema version.
pub fn current_version(conn: &Connection) -> Result<u32, StorageError> {
    conn.pragma_query_value(None, "user_version", |row| row.get(0))
        .map_err(|e| StorageError::SqliteError {
            message: e.to_string(),
        })
}
