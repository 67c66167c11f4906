//! V001 records schema: the per-identifier content store.

pub const MIGRATION_SQL: &str = r#"
CREATE TABLE IF NOT EXISTS records (
    id TEXT PRIMARY KEY,
    content BLOB
);
"#;
