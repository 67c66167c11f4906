//! ID Compactor tests.

use authgraph_analysis::graph::IdMap;
use authgraph_analysis::tsv::TsvWriter;
use authgraph_core::errors::GraphError;
use proptest::prelude::*;

fn to_tsv(map: &IdMap) -> Vec<u8> {
    let mut writer = TsvWriter::new(Vec::new());
    map.write_tsv(&mut writer).unwrap();
    writer.finish().unwrap()
}

#[test]
fn test_sequential_from_zero_in_first_seen_order() {
    let map = IdMap::from_ids(["118514768", "4015701-5", "118514768", "7"]).unwrap();
    assert_eq!(map.len(), 3);
    assert_eq!(map.dense("118514768"), Some(0));
    assert_eq!(map.dense("4015701-5"), Some(1));
    assert_eq!(map.dense("7"), Some(2));
    assert_eq!(map.dense("missing"), None);
    assert_eq!(map.original(3), None);
    assert_eq!(to_tsv(&map), b"118514768\t0\n4015701-5\t1\n7\t2\n");
}

#[test]
fn test_read_rejects_gaps() {
    let err = IdMap::read_tsv("a\t0\nb\t2\n".as_bytes()).unwrap_err();
    assert!(matches!(err, GraphError::InvalidDenseId { line: 2, .. }));
}

#[test]
fn test_read_rejects_duplicate_ids() {
    let err = IdMap::read_tsv("a\t0\na\t1\n".as_bytes()).unwrap_err();
    assert!(matches!(err, GraphError::DuplicateId { .. }));
}

#[test]
fn test_read_rejects_non_numeric() {
    let err = IdMap::read_tsv("a\tzero\n".as_bytes()).unwrap_err();
    assert!(matches!(err, GraphError::InvalidDenseId { .. }));
}

proptest! {
    #[test]
    fn dense_round_trip_is_identity(ids in proptest::collection::vec("[0-9X-]{1,10}", 0..200)) {
        let map = IdMap::from_ids(&ids).unwrap();
        let reloaded = IdMap::read_tsv(to_tsv(&map).as_slice()).unwrap();
        prop_assert_eq!(reloaded.len(), map.len());
        for id in &ids {
            let dense = reloaded.dense(id).unwrap();
            prop_assert_eq!(reloaded.original(dense), Some(id.as_str()));
            prop_assert_eq!(map.dense(id), Some(dense));
        }
        let distinct: std::collections::BTreeSet<&String> = ids.iter().collect();
        prop_assert_eq!(map.len(), distinct.len());
    }
}
