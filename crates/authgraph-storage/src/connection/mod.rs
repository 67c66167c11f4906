//! Connection management: one build connection per artifact, read-only
//! connections for consumers.

pub mod pragmas;
pub mod writer;

use std::path::Path;

use authgraph_core::errors::StorageError;
use rusqlite::{Connection, OpenFlags};

use self::pragmas::{apply_build_pragmas, apply_read_pragmas};
use crate::migrations::{self, Schema};

/// Open a connection for bulk-building `schema` at `path`.
///
/// `path` is normally a scratch file; the caller moves it into place after
/// the connection is closed.
pub fn open_for_build(path: &Path, schema: Schema) -> Result<Connection, StorageError> {
    let conn = Connection::open(path).map_err(|e| StorageError::SqliteError {
        message: format!("open {}: {e}", path.display()),
    })?;
    apply_build_pragmas(&conn)?;
    migrations::run_migrations(&conn, schema)?;
    Ok(conn)
}

/// Open a finished artifact read-only.
pub fn open_read_only(path: &Path) -> Result<Connection, StorageError> {
    if !path.exists() {
        return Err(StorageError::Io {
            path: path.to_path_buf(),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "database missing"),
        });
    }
    let conn = Connection::open_with_flags(
        path,
        OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
    )
    .map_err(|e| StorageError::SqliteError {
        message: format!("open {}: {e}", path.display()),
    })?;
    apply_read_pragmas(&conn)?;
    Ok(conn)
}

/// Close a build connection, surfacing errors from the final flush.
pub fn close(conn: Connection) -> Result<(), StorageError> {
    conn.close().map_err(|(_, e)| StorageError::SqliteError {
        message: format!("close: {e}"),
    })
}
