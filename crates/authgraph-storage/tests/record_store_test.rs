//! Record Store build and lookup tests.

use authgraph_core::errors::StorageError;
use authgraph_core::types::Record;
use authgraph_storage::{build_record_store, RecordStore};
use proptest::prelude::*;

fn records(pairs: &[(&str, &str)]) -> Vec<Result<Record, StorageError>> {
    pairs.iter().map(|(id, c)| Ok(Record::new(*id, *c))).collect()
}

fn build(pairs: &[(&str, &str)]) -> (tempfile::TempDir, RecordStore) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("records.db");
    build_record_store(&path, records(pairs)).unwrap();
    let store = RecordStore::open(&path).unwrap();
    (dir, store)
}

#[test]
fn test_get_returns_content_or_none() {
    let (_dir, store) = build(&[("118514768", "<rdf:Description>a</rdf:Description>")]);
    assert_eq!(
        store.get("118514768").unwrap().as_deref(),
        Some("<rdf:Description>a</rdf:Description>")
    );
    assert_eq!(store.get("404").unwrap(), None);
}

#[test]
fn test_require_missing_is_not_found() {
    let (_dir, store) = build(&[("1", "x")]);
    match store.require("2") {
        Err(StorageError::NotFound { id }) => assert_eq!(id, "2"),
        other => panic!("expected NotFound, got {other:?}"),
    }
}

#[test]
fn test_duplicate_ids_keep_first_occurrence() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("records.db");
    let stats = build_record_store(&path, records(&[("A", "first"), ("A", "second"), ("B", "b")]))
        .unwrap();
    assert_eq!(stats.loaded, 2);
    assert_eq!(stats.duplicates, 1);

    let store = RecordStore::open(&path).unwrap();
    assert_eq!(store.get("A").unwrap().as_deref(), Some("first"));
    assert_eq!(store.count().unwrap(), 2);
}

#[test]
fn test_ids_in_insertion_order() {
    let (_dir, store) = build(&[("C", "c"), ("A", "a"), ("B", "b")]);
    assert_eq!(store.ids().unwrap(), vec!["C", "A", "B"]);
}

#[test]
fn test_get_many_preserves_request_order_and_skips_missing() {
    let (_dir, store) = build(&[("A", "a"), ("B", "b"), ("C", "c")]);
    let found = store.get_many(&["C", "missing", "A"]).unwrap();
    let ids: Vec<&str> = found.iter().map(|r| r.id.as_str()).collect();
    assert_eq!(ids, vec!["C", "A"]);
    assert_eq!(found[0].content, "c");
}

#[test]
fn test_get_many_beyond_query_limit() {
    let owned: Vec<(String, String)> = (0..2500)
        .map(|i| (format!("id{i}"), format!("content{i}")))
        .collect();
    let pairs: Vec<(&str, &str)> = owned.iter().map(|(a, b)| (a.as_str(), b.as_str())).collect();
    let (_dir, store) = build(&pairs);

    let keys: Vec<&str> = owned.iter().map(|(id, _)| id.as_str()).collect();
    let found = store.get_many(&keys).unwrap();
    assert_eq!(found.len(), 2500);
    assert_eq!(found[2499].content, "content2499");
}

#[test]
fn test_for_each_batch_visits_every_record_once() {
    let owned: Vec<(String, String)> = (0..25).map(|i| (format!("{i}"), "x".to_string())).collect();
    let pairs: Vec<(&str, &str)> = owned.iter().map(|(a, b)| (a.as_str(), b.as_str())).collect();
    let (_dir, store) = build(&pairs);

    let mut sizes = Vec::new();
    let mut seen = Vec::new();
    let visited = store
        .for_each_batch(10, |batch| {
            sizes.push(batch.len());
            seen.extend(batch.iter().map(|r| r.id.clone()));
            Ok::<_, StorageError>(())
        })
        .unwrap();
    assert_eq!(visited, 25);
    assert_eq!(sizes, vec![10, 10, 5]);
    seen.sort();
    seen.dedup();
    assert_eq!(seen.len(), 25);
}

#[test]
fn test_source_error_aborts_load() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("records.db");
    let input = vec![
        Ok(Record::new("A", "a")),
        Err(StorageError::SqliteError {
            message: "upstream".into(),
        }),
    ];
    assert!(build_record_store(&path, input).is_err());
}

#[test]
fn test_open_missing_database_fails() {
    let dir = tempfile::tempdir().unwrap();
    assert!(RecordStore::open(&dir.path().join("nope.db")).is_err());
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(16))]

    #[test]
    fn batched_and_single_lookups_agree(
        present in proptest::collection::btree_set("[0-9X]{1,6}", 0..40),
        probes in proptest::collection::vec("[0-9X]{1,6}", 0..40),
    ) {
        let owned: Vec<(String, String)> =
            present.iter().map(|id| (id.clone(), format!("<{id}>"))).collect();
        let pairs: Vec<(&str, &str)> =
            owned.iter().map(|(a, b)| (a.as_str(), b.as_str())).collect();
        let (_dir, store) = build(&pairs);

        let keys: Vec<&str> = probes.iter().map(String::as_str).collect();
        let batched = store.get_many(&keys).unwrap();
        let single: Vec<Record> = keys
            .iter()
            .filter_map(|id| store.get(id).unwrap().map(|c| Record::new(*id, c)))
            .collect();
        prop_assert_eq!(batched, single);
    }
}
