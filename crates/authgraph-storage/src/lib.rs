//! authgraph-storage: the two embedded relational artifacts.
//!
//! - Record Store: `records(id TEXT PRIMARY KEY, content BLOB)`, bulk
//!   loaded once, read-only afterwards.
//! - Graph Store: `edges(source, target)` duplicate-free, indexed on both
//!   columns.

pub mod connection;
pub mod edge_store;
pub mod migrations;
pub mod queries;
pub mod record_store;

pub use edge_store::{build_edge_store, EdgeLoadStats, EdgeStore};
pub use migrations::Schema;
pub use record_store::{build_record_store, RecordLoadStats, RecordStore};
