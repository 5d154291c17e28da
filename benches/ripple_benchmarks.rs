//! Ripple-spreading benchmarks.
//!
//! Run with: cargo bench --bench ripple_benchmarks

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use ripplespread::prelude::*;

const REFERENCE: &str = include_str!("../instances/rsa_12_node.yaml");

/// Layered DAG: `layers` layers of `width` nodes, each node linked to every
/// node of the next layer. Weights follow a fixed arithmetic pattern.
fn layered_graph(layers: usize, width: usize) -> Graph {
    let n = layers * width;
    let layout = ObjectiveLayout::new(2, 1, FuzzyShape::Triangular);
    let mut graph = Graph::new(n, layout).unwrap();
    for layer in 0..layers - 1 {
        for i in 0..width {
            for j in 0..width {
                let from = layer * width + i;
                let to = (layer + 1) * width + j;
                let a = ((from * 7 + to * 13) % 9 + 1) as f64;
                let b = ((from * 11 + to * 5) % 9 + 1) as f64;
                let weight = EdgeWeight::new(
                    vec![a, b],
                    vec![FuzzyNumber::triangular(b, a + b, a + 2.0 * b)],
                );
                graph.add_edge(from, to, weight).unwrap();
            }
        }
    }
    graph
}

fn bench_reference_network(c: &mut Criterion) {
    let instance = GraphInstance::from_yaml(REFERENCE).unwrap();
    let graph = instance.to_graph().unwrap();

    c.bench_function("rsa_12_node", |b| {
        b.iter(|| black_box(ripplespread::run(&graph, instance.source).unwrap()));
    });
}

fn bench_layered(c: &mut Criterion) {
    let mut group = c.benchmark_group("layered_dag");
    group.sample_size(30);

    for (layers, width) in [(4, 3), (6, 4), (8, 4)] {
        let graph = layered_graph(layers, width);
        group.bench_with_input(
            BenchmarkId::new("run", format!("{layers}x{width}")),
            &graph,
            |b, graph| b.iter(|| black_box(ripplespread::run(graph, 0).unwrap().total_paths())),
        );
    }

    group.finish();
}

fn bench_pareto_filter(c: &mut Criterion) {
    let mut group = c.benchmark_group("pareto_filter");
    let filter = ParetoFilter::<ClosedFormMetric>::default();

    for size in [8usize, 32, 128] {
        let batch: Vec<ObjectiveVector> = (0..size)
            .map(|i| {
                let x = i as f64;
                ObjectiveVector {
                    crisp: vec![x, (size - i) as f64],
                    fuzzy: vec![FuzzyNumber::triangular(x, x + 1.0, x + 3.0)],
                }
            })
            .collect();
        group.bench_with_input(BenchmarkId::new("mutual", size), &batch, |b, batch| {
            b.iter(|| black_box(filter.mutual(batch.clone()).len()));
        });
    }

    group.finish();
}

fn bench_calibration(c: &mut Criterion) {
    let graph = layered_graph(10, 6);
    let neighbors = graph.neighbor_index();
    c.bench_function("calibrate_10x6", |b| {
        b.iter(|| black_box(SpeedCalibration::calibrate(&neighbors).unwrap().speed()));
    });
}

criterion_group!(
    benches,
    bench_reference_network,
    bench_layered,
    bench_pareto_filter,
    bench_calibration
);
criterion_main!(benches);
