//! Reachability benchmarks.
//!
//! Closure sizes for every source over synthetic layered graphs.
//! Run with: cargo bench -p authgraph-analysis --bench reachability_bench

use authgraph_analysis::graph::Adjacency;
use authgraph_analysis::tsv::TsvWriter;
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};

/// Layered graph: every node links to a few nodes in the next layer, and
/// the last layer links back to the first so closures are large.
fn layered(nodes: usize, fanout: usize) -> Adjacency {
    let mut adjacency = Adjacency::new();
    let layer = 100.min(nodes).max(1);
    for i in 0..nodes {
        for k in 1..=fanout {
            let target = (i + layer + k * 7) % nodes;
            adjacency.add_edge(&format!("{i}"), &format!("{target}"));
        }
    }
    adjacency
}

fn reachability_all_sources(c: &mut Criterion) {
    let mut group = c.benchmark_group("reachability");
    group.sample_size(10);

    for nodes in [500usize, 2_000] {
        let adjacency = layered(nodes, 3);
        group.bench_with_input(BenchmarkId::new("write_reach", nodes), &adjacency, |b, adj| {
            b.iter(|| {
                let mut writer = TsvWriter::new(std::io::sink());
                adj.write_reach(&mut writer).unwrap();
            });
        });
    }

    group.finish();
}

criterion_group!(benches, reachability_all_sources);
criterion_main!(benches);
