//! Record Store: single-table key→blob store, bulk loaded once.

use std::path::{Path, PathBuf};

use authgraph_core::errors::StorageError;
use authgraph_core::types::{FxHashMap, Record};
use rusqlite::Connection;

use crate::connection::{self, writer::with_immediate_transaction};
use crate::migrations::Schema;
use crate::queries::records;

/// Upper bound on ids bound into one `IN (...)` query.
pub const MAX_QUERY_IDS: usize = 1000;

/// Outcome of a bulk load.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RecordLoadStats {
    pub loaded: usize,
    /// Records whose id was already present; the first occurrence is kept.
    pub duplicates: usize,
}

/// Bulk-load `input` into a fresh database at `path` in one transaction.
///
/// Errors from the record source abort the load; nothing is committed.
pub fn build_record_store<I, E>(path: &Path, input: I) -> Result<RecordLoadStats, E>
where
    I: IntoIterator<Item = Result<Record, E>>,
    E: From<StorageError>,
{
    let conn = connection::open_for_build(path, Schema::Records)?;
    let stats = with_immediate_transaction(&conn, |tx| {
        let mut stats = RecordLoadStats::default();
        for record in input {
            let record = record?;
            if records::insert_record(tx, &record)? {
                stats.loaded += 1;
            } else {
                tracing::debug!(id = %record.id, "duplicate record id, keeping first");
                stats.duplicates += 1;
            }
        }
        Ok::<_, E>(stats)
    })?;
    connection::close(conn)?;

    tracing::info!(
        records = stats.loaded,
        duplicates = stats.duplicates,
        path = %path.display(),
        "record store built"
    );
    Ok(stats)
}

/// Read-only handle on a finished Record Store.
pub struct RecordStore {
    conn: Connection,
    path: PathBuf,
}

impl RecordStore {
    /// Open a finished Record Store read-only.
    pub fn open(path: &Path) -> Result<Self, StorageError> {
        Ok(Self {
            conn: connection::open_read_only(path)?,
            path: path.to_path_buf(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Content for `id`, or `None`.
    pub fn get(&self, id: &str) -> Result<Option<String>, StorageError> {
        records::get_content(&self.conn, id)
    }

    /// Content for `id`; a missing record is an error.
    pub fn require(&self, id: &str) -> Result<String, StorageError> {
        self.get(id)?.ok_or_else(|| StorageError::NotFound { id: id.to_string() })
    }

    /// Batched lookup. Returns found records in request order; missing ids
    /// are omitted. Agrees with `get` for every key.
    pub fn get_many(&self, ids: &[&str]) -> Result<Vec<Record>, StorageError> {
        let mut found: FxHashMap<String, String> = FxHashMap::default();
        for chunk in ids.chunks(MAX_QUERY_IDS) {
            for record in records::get_contents(&self.conn, chunk)? {
                found.insert(record.id, record.content);
            }
        }
        Ok(ids
            .iter()
            .filter_map(|id| {
                found
                    .get(*id)
                    .map(|content| Record::new(*id, content.clone()))
            })
            .collect())
    }

    /// All ids in insertion order.
    pub fn ids(&self) -> Result<Vec<String>, StorageError> {
        records::all_ids(&self.conn)
    }

    pub fn count(&self) -> Result<u64, StorageError> {
        records::count_records(&self.conn)
    }

    /// Drive `f` over every record in batches of `batch_size` ids.
    ///
    /// Memory is bounded by one batch of content plus the id list.
    /// Returns the number of records visited.
    pub fn for_each_batch<F, E>(&self, batch_size: usize, mut f: F) -> Result<usize, E>
    where
        F: FnMut(&[Record]) -> Result<(), E>,
        E: From<StorageError>,
    {
        let _span = authgraph_core::batch_span!("records", batch_size).entered();
        let ids = self.ids()?;
        let total = ids.len();
        let mut done = 0;
        for chunk in ids.chunks(batch_size.max(1)) {
            let keys: Vec<&str> = chunk.iter().map(String::as_str).collect();
            let batch = self.get_many(&keys)?;
            f(&batch)?;
            done += batch.len();
            tracing::debug!(done, total, "record batch");
        }
        Ok(done)
    }
}
