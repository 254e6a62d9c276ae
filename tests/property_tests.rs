//! Property-based tests for chroma-graph
//!
//! Verifies CSR invariants hold for arbitrary colored graphs and removal sequences

use proptest::prelude::*;
use chroma_graph::{intersect_sorted, Color, ColoredCsr, LoadOptions, NodeId, REMOVED};

const NUM_COLORS: u32 = 3;

// Property: loading yields exactly the input multiset per (vertex, color)
proptest! {
    #[test]
    fn prop_roundtrip_construction((n, edges) in prop_graph(60, 15)) {
        let graph = ColoredCsr::from_edges(n, NUM_COLORS as usize, &edges).unwrap();

        for color in graph.colors() {
            for v in graph.vertices() {
                let mut expected: Vec<u32> = edges.iter()
                    .filter(|(_, _, c)| *c == color)
                    .flat_map(|(a, b, _)| {
                        let mut out = Vec::new();
                        if *a == v { out.push(b.0); }
                        if *b == v { out.push(a.0); }
                        out
                    })
                    .collect();
                expected.sort_unstable();

                prop_assert_eq!(graph.neighbors(v, color).unwrap(), expected.as_slice());
            }
        }
    }
}

// Property: the text loader agrees with in-memory construction
proptest! {
    #[test]
    fn prop_loader_matches_from_edges((n, edges) in prop_graph(40, 10)) {
        let mut text = format!("{n} {NUM_COLORS} {}\n", edges.len());
        for (a, b, c) in &edges {
            text.push_str(&format!("{} {} {}\n", a.0, b.0, c.0));
        }

        let loaded = ColoredCsr::from_reader(std::io::Cursor::new(text), &LoadOptions::default()).unwrap();
        let built = ColoredCsr::from_edges(n, NUM_COLORS as usize, &edges).unwrap();
        prop_assert_eq!(loaded, built);
    }
}

// Property: degree sum per color is twice that color's edge count, and
// row offsets are monotone with slices sorted
proptest! {
    #[test]
    fn prop_degree_conservation_and_sortedness((n, edges) in prop_graph(60, 15)) {
        let graph = ColoredCsr::from_edges(n, NUM_COLORS as usize, &edges).unwrap();

        for color in graph.colors() {
            let per_color = edges.iter().filter(|(_, _, c)| *c == color).count();
            let degree_sum: usize = graph.vertices()
                .map(|v| graph.degree(v, color).unwrap())
                .sum();
            prop_assert_eq!(degree_sum, 2 * per_color);

            let (row_offsets, _) = graph.csr_components(color).unwrap();
            prop_assert!(row_offsets.windows(2).all(|w| w[0] <= w[1]));

            for v in graph.vertices() {
                let slice = graph.neighbors(v, color).unwrap();
                prop_assert!(slice.windows(2).all(|w| w[0] <= w[1]));
            }
        }
    }
}

// Property: merge intersection equals a naive set intersection
proptest! {
    #[test]
    fn prop_intersection_matches_naive(
        a in prop::collection::btree_set(0u32..100, 0..40),
        b in prop::collection::btree_set(0u32..100, 0..40),
    ) {
        let a: Vec<u32> = a.into_iter().collect();
        let b: Vec<u32> = b.into_iter().collect();

        let naive = a.iter().filter(|x| b.iter().any(|y| y == *x)).count();
        prop_assert_eq!(intersect_sorted(&a, &b), naive);
        prop_assert_eq!(intersect_sorted(&a, &a), a.len());
        prop_assert_eq!(intersect_sorted(&a, &[]), 0);
    }
}

// Property: intersection over graph ranges equals common neighbor count
proptest! {
    #[test]
    fn prop_range_intersection((n, edges) in prop_simple_graph(30, 12)) {
        let graph = ColoredCsr::from_edges(n, 1, &edges).unwrap();

        for v in graph.vertices() {
            for u in graph.vertices() {
                let rv = graph.neighbor_range(v, Color(0)).unwrap();
                let ru = graph.neighbor_range(u, Color(0)).unwrap();
                let nv = graph.neighbors(v, Color(0)).unwrap();
                let nu = graph.neighbors(u, Color(0)).unwrap();
                let naive = nv.iter().filter(|x| nu.contains(x)).count();
                prop_assert_eq!(graph.intersection_count(rv, ru, Color(0)).unwrap(), naive);
            }
        }
    }
}

// Property: removing an existing edge hides it from both endpoints,
// removing a missing edge changes nothing
proptest! {
    #[test]
    fn prop_removal_symmetry((n, edges) in prop_simple_graph(30, 12), pick in any::<prop::sample::Index>()) {
        let mut graph = ColoredCsr::from_edges(n, 1, &edges).unwrap();
        prop_assume!(!edges.is_empty());

        let (a, b, c) = edges[pick.index(edges.len())];
        prop_assert!(graph.remove_edge(a, b, c).unwrap());
        graph.reconstruct(c).unwrap();

        prop_assert!(!graph.neighbors(a, c).unwrap().contains(&b.0));
        prop_assert!(!graph.neighbors(b, c).unwrap().contains(&a.0));
        prop_assert_eq!(graph.live_entries(c).unwrap(), 2 * (edges.len() - 1));

        let before = graph.clone();
        prop_assert!(!graph.remove_edge(a, b, c).unwrap());
        graph.reconstruct(c).unwrap();
        prop_assert_eq!(graph, before);
    }
}

// Property: reconstruction is idempotent and keeps slices sorted after
// arbitrary removal sequences
proptest! {
    #[test]
    fn prop_reconstruct_idempotent(
        (n, edges) in prop_simple_graph(30, 12),
        picks in prop::collection::vec(any::<prop::sample::Index>(), 0..10),
    ) {
        let mut graph = ColoredCsr::from_edges(n, 1, &edges).unwrap();

        if !edges.is_empty() {
            for pick in &picks {
                let (a, b, c) = edges[pick.index(edges.len())];
                graph.remove_edge(a, b, c).unwrap();
            }
        }

        graph.reconstruct(Color(0)).unwrap();
        let once = graph.clone();
        graph.reconstruct(Color(0)).unwrap();
        prop_assert_eq!(&graph, &once);

        let (row_offsets, col_indices) = graph.csr_components(Color(0)).unwrap();
        let live = *row_offsets.last().unwrap() as usize;
        prop_assert!(col_indices[..live].iter().all(|&x| x != REMOVED));
        prop_assert!(col_indices[live..].iter().all(|&x| x == REMOVED));
        for v in graph.vertices() {
            let slice = graph.neighbors(v, Color(0)).unwrap();
            prop_assert!(slice.windows(2).all(|w| w[0] <= w[1]));
        }
    }
}

// Helper: arbitrary colored multigraph (self-loops and parallel edges allowed)
fn prop_graph(
    max_edges: usize,
    max_nodes: usize,
) -> impl Strategy<Value = (usize, Vec<(NodeId, NodeId, Color)>)> {
    (1..=max_nodes).prop_flat_map(move |n| {
        let edge = (0..n as u32, 0..n as u32, 0..NUM_COLORS)
            .prop_map(|(a, b, c)| (NodeId(a), NodeId(b), Color(c)));
        (Just(n), prop::collection::vec(edge, 0..=max_edges))
    })
}

// Helper: arbitrary simple graph on one color
fn prop_simple_graph(
    max_edges: usize,
    max_nodes: usize,
) -> impl Strategy<Value = (usize, Vec<(NodeId, NodeId, Color)>)> {
    (2..=max_nodes).prop_flat_map(move |n| {
        let pair = (0..n as u32, 0..n as u32).prop_filter_map("self-loop", |(a, b)| {
            (a != b).then(|| (a.min(b), a.max(b)))
        });
        (Just(n), prop::collection::btree_set(pair, 0..=max_edges)).prop_map(|(n, pairs)| {
            let edges = pairs
                .into_iter()
                .map(|(a, b)| (NodeId(a), NodeId(b), Color(0)))
                .collect();
            (n, edges)
        })
    })
}

#[cfg(test)]
mod unit_tests {
    use super::*;

    #[test]
    fn test_empty_graph_invariants() {
        let graph = ColoredCsr::from_edges(3, 2, &[]).unwrap();

        for color in graph.colors() {
            let (row_offsets, col_indices) = graph.csr_components(color).unwrap();
            assert_eq!(row_offsets, &[0, 0, 0, 0]);
            assert!(col_indices.is_empty());
        }
        assert_eq!(graph.num_edges(), 0);
    }

    #[test]
    fn test_single_edge_invariants() {
        let edges = vec![(NodeId(0), NodeId(1), Color(0))];
        let graph = ColoredCsr::from_edges(2, 1, &edges).unwrap();

        let (row_offsets, col_indices) = graph.csr_components(Color(0)).unwrap();
        assert_eq!(row_offsets, &[0, 1, 2]);
        assert_eq!(col_indices, &[1, 0]);
    }
}
