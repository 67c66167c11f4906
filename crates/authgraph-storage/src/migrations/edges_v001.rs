//! V001 edges schema: the successor link table.
//!
//! Secondary indexes are created after the bulk load, see
//! `queries::edges::create_indexes`.

pub const MIGRATION_SQL: &str = r#"
CREATE TABLE IF NOT EXISTS edges (
    source TEXT NOT NULL,
    target TEXT NOT NULL,
    PRIMARY KEY (source, target)
);
"#;
