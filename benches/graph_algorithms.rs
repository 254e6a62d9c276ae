//! Criterion benchmarks for colored CSR operations
//!
//! Covers the hot paths:
//! - CSR construction from an edge list
//! - Sorted-merge intersection (triangle counting)
//! - Tombstone removal + reconstruction
//! - Connected components

use chroma_graph::{connected_components, triangle_count, Color, ColoredCsr, NodeId};
use criterion::{criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion};
use std::hint::black_box;

const NUM_COLORS: u32 = 2;

/// Generate scale-free-ish colored graph (simple LCG for reproducibility)
fn generate_graph(num_nodes: usize, edges_per_node: usize) -> Vec<(NodeId, NodeId, Color)> {
    let mut edges = Vec::new();
    let mut rng_state = 12345_u64;

    for node in 0..num_nodes {
        for _ in 0..edges_per_node {
            rng_state = rng_state.wrapping_mul(1103515245).wrapping_add(12345);
            let target = (rng_state % num_nodes as u64) as u32;
            let color = ((rng_state >> 33) % u64::from(NUM_COLORS)) as u32;

            if target != node as u32 {
                edges.push((NodeId(node as u32), NodeId(target), Color(color)));
            }
        }
    }

    edges
}

/// Benchmark: CSR construction from edge list
fn bench_csr_construction(c: &mut Criterion) {
    let mut group = c.benchmark_group("csr_construction");

    for size in [100, 1000, 10000].iter() {
        let edges = generate_graph(*size, 8);

        group.bench_with_input(BenchmarkId::new("from_edges", size), &edges, |b, edges| {
            b.iter(|| {
                let graph =
                    ColoredCsr::from_edges(*size, NUM_COLORS as usize, black_box(edges)).unwrap();
                black_box(graph);
            });
        });
    }

    group.finish();
}

/// Benchmark: triangle counting (one intersection per edge)
fn bench_triangle_count(c: &mut Criterion) {
    let mut group = c.benchmark_group("triangle_count");

    for size in [100, 1000, 10000].iter() {
        let edges = generate_graph(*size, 8);
        let graph = ColoredCsr::from_edges(*size, NUM_COLORS as usize, &edges).unwrap();

        group.bench_with_input(BenchmarkId::new("color_0", size), &graph, |b, graph| {
            b.iter(|| black_box(triangle_count(black_box(graph), Color(0)).unwrap()));
        });
    }

    group.finish();
}

/// Benchmark: remove 10% of edges, then reconstruct
fn bench_remove_reconstruct(c: &mut Criterion) {
    let mut group = c.benchmark_group("remove_reconstruct");

    for size in [100, 1000, 10000].iter() {
        let edges = generate_graph(*size, 8);
        let graph = ColoredCsr::from_edges(*size, NUM_COLORS as usize, &edges).unwrap();
        let victims: Vec<_> = edges
            .iter()
            .step_by(10)
            .filter(|(_, _, color)| color.0 == 0)
            .copied()
            .collect();

        group.bench_with_input(BenchmarkId::new("ten_percent", size), &graph, |b, graph| {
            b.iter_batched(
                || graph.clone(),
                |mut graph| {
                    for (from, to, color) in &victims {
                        let _ = graph.remove_edge(*from, *to, *color);
                    }
                    graph.reconstruct(Color(0)).unwrap();
                    black_box(graph);
                },
                BatchSize::LargeInput,
            );
        });
    }

    group.finish();
}

/// Benchmark: connected components
fn bench_components(c: &mut Criterion) {
    let mut group = c.benchmark_group("connected_components");

    for size in [100, 1000, 10000].iter() {
        let edges = generate_graph(*size, 2);
        let graph = ColoredCsr::from_edges(*size, NUM_COLORS as usize, &edges).unwrap();

        group.bench_with_input(BenchmarkId::new("color_0", size), &graph, |b, graph| {
            b.iter(|| black_box(connected_components(black_box(graph), Color(0)).unwrap()));
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_csr_construction,
    bench_triangle_count,
    bench_remove_reconstruct,
    bench_components
);
criterion_main!(benches);
