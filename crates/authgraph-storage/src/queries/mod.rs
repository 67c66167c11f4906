//! Query modules, one per table.

pub mod edges;
pub mod records;

use authgraph_core::errors::StorageError;

pub(crate) fn sqlite_err(e: rusqlite::Error) -> StorageError {
    StorageError::SqliteError {
        message: e.to_string(),
    }
}
