//! Rank Translator tests.

use authgraph_analysis::graph::IdMap;
use authgraph_analysis::rank::{
    compact_adjacency, read_rank_entries, translate_edges, translate_ranks, RankEntry, Score,
};
use authgraph_analysis::tsv::TsvWriter;
use authgraph_core::errors::GraphError;

fn output(writer: TsvWriter<Vec<u8>>) -> String {
    String::from_utf8(writer.finish().unwrap()).unwrap()
}

#[test]
fn test_translate_edges_drops_and_counts_misses() {
    let map = IdMap::from_ids(["A", "C"]).unwrap();
    let edges = "A\tC\nC\tA\nA\tZ\nY\tZ\nA\tA\n";
    let mut writer = TsvWriter::new(Vec::new());
    let stats = translate_edges(&map, edges.as_bytes(), &mut writer).unwrap();
    assert_eq!(stats.written, 2);
    assert_eq!(stats.dropped, 2);
    assert_eq!(stats.missing_ids, 2);
    assert_eq!(stats.self_loops, 1);
    assert_eq!(output(writer), "0\t1\n1\t0\n");
}

#[test]
fn test_compact_groups_successors_per_node() {
    let dense = "2\t0\n0\t2\n0\t1\n0\t2\n";
    let mut writer = TsvWriter::new(Vec::new());
    let stats = compact_adjacency(dense.as_bytes(), &mut writer).unwrap();
    assert_eq!(stats.rows, 2);
    assert_eq!(stats.edges, 3);
    assert_eq!(output(writer), "0\t1\t2\n2\t0\n");
}

#[test]
fn test_compact_rejects_non_dense_ids() {
    let mut writer = TsvWriter::new(Vec::new());
    let err = compact_adjacency("A\t1\n".as_bytes(), &mut writer).unwrap_err();
    assert!(matches!(err, GraphError::InvalidDenseId { line: 1, .. }));
}

#[test]
fn test_translate_ranks_back_to_ids() {
    let map = IdMap::from_ids(["A", "C"]).unwrap();
    let ranks = "0\t0.6\n1 0.4\n\n";
    let mut writer = TsvWriter::new(Vec::new());
    assert_eq!(translate_ranks(&map, ranks.as_bytes(), &mut writer).unwrap(), 2);
    let translated = output(writer);
    assert_eq!(translated, "A\t0.6\nC\t0.4\n");

    let entries = read_rank_entries(translated.as_bytes()).unwrap();
    assert_eq!(
        entries,
        vec![
            RankEntry { id: "A".into(), score: Score::parse("0.6").unwrap() },
            RankEntry { id: "C".into(), score: Score::parse("0.4").unwrap() },
        ]
    );
}

#[test]
fn test_translate_ranks_keeps_score_text() {
    let map = IdMap::from_ids(["A", "C"]).unwrap();
    let mut writer = TsvWriter::new(Vec::new());
    translate_ranks(&map, "0\t1.5e-7\n1\t0.60\n".as_bytes(), &mut writer).unwrap();
    assert_eq!(output(writer), "A\t1.5e-7\nC\t0.60\n");
}

#[test]
fn test_unknown_dense_id_is_fatal() {
    let map = IdMap::from_ids(["A"]).unwrap();
    let mut writer = TsvWriter::new(Vec::new());
    let err = translate_ranks(&map, "5\t0.1\n".as_bytes(), &mut writer).unwrap_err();
    assert!(matches!(err, GraphError::UnknownDenseId { id: 5 }));
}

#[test]
fn test_invalid_score_rejected() {
    let map = IdMap::from_ids(["A"]).unwrap();
    let mut writer = TsvWriter::new(Vec::new());
    let err = translate_ranks(&map, "0\tNaN\n".as_bytes(), &mut writer).unwrap_err();
    assert!(matches!(err, GraphError::InvalidScore { .. }));
}
