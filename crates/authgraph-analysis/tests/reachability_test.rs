//! Reachability Engine tests.

use std::collections::{BTreeMap, BTreeSet};

use authgraph_analysis::graph::Adjacency;
use authgraph_analysis::tsv::TsvWriter;
use proptest::prelude::*;

fn adjacency(edges: &[(&str, &str)]) -> Adjacency {
    let mut adjacency = Adjacency::new();
    for (s, t) in edges {
        adjacency.add_edge(s, t);
    }
    adjacency
}

fn reach_output(adjacency: &Adjacency) -> String {
    let mut writer = TsvWriter::new(Vec::new());
    adjacency.write_reach(&mut writer).unwrap();
    String::from_utf8(writer.finish().unwrap()).unwrap()
}

/// Closure by repeated relaxation until nothing changes.
fn exhaustive_closure(edges: &[(u8, u8)], start: u8) -> BTreeSet<u8> {
    let mut reached = BTreeSet::from([start]);
    loop {
        let before = reached.len();
        for (s, t) in edges {
            if s != t && reached.contains(s) {
                reached.insert(*t);
            }
        }
        if reached.len() == before {
            return reached;
        }
    }
}

#[test]
fn test_two_cycle() {
    let adjacency = adjacency(&[("A", "C"), ("C", "A")]);
    assert_eq!(reach_output(&adjacency), "A\t2\nC\t2\n");
}

#[test]
fn test_chain_counts_start_node() {
    let adjacency = adjacency(&[("1", "2"), ("2", "3"), ("3", "4")]);
    assert_eq!(adjacency.closure_size("1"), 4);
    assert_eq!(adjacency.closure_size("3"), 2);
    // Sinks are not sources, so they get no row.
    assert_eq!(reach_output(&adjacency), "1\t4\n2\t3\n3\t2\n");
}

#[test]
fn test_diamond_is_counted_once() {
    let adjacency = adjacency(&[("a", "b"), ("a", "c"), ("b", "d"), ("c", "d")]);
    let closure = adjacency.closure("a");
    assert_eq!(closure.len(), 4);
    assert!(closure.contains("d"));
}

#[test]
fn test_self_loops_and_duplicates_ignored() {
    let adjacency = adjacency(&[("a", "a"), ("a", "b"), ("a", "b")]);
    assert_eq!(adjacency.edge_count(), 1);
    assert_eq!(adjacency.source_count(), 1);
}

#[test]
fn test_from_tsv_rejects_malformed_line() {
    let input = "a\tb\nbroken\n";
    assert!(Adjacency::from_tsv(input.as_bytes()).is_err());
}

#[test]
fn test_from_tsv_loads_edges() {
    let adjacency = Adjacency::from_tsv("a\tb\nb\tc\n".as_bytes()).unwrap();
    assert_eq!(adjacency.sources(), vec!["a", "b"]);
    assert_eq!(adjacency.closure_size("a"), 3);
}

proptest! {
    #[test]
    fn closure_matches_exhaustive_computation(
        edges in proptest::collection::vec((0u8..12, 0u8..12), 0..60)
    ) {
        let mut adjacency = Adjacency::new();
        for (s, t) in &edges {
            adjacency.add_edge(&s.to_string(), &t.to_string());
        }

        let mut expected_sources: BTreeMap<String, usize> = BTreeMap::new();
        for (s, t) in &edges {
            if s != t {
                expected_sources.insert(s.to_string(), exhaustive_closure(&edges, *s).len());
            }
        }

        prop_assert_eq!(adjacency.source_count(), expected_sources.len());
        for (id, size) in &expected_sources {
            let closure = adjacency.closure(id);
            prop_assert!(closure.contains(id.as_str()));
            prop_assert_eq!(closure.len(), *size);
        }
    }
}
