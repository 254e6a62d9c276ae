//! k-clique counting over forward adjacency
//!
//! Each clique is enumerated once, from its smallest vertex: every vertex
//! keeps only its neighbors with a larger id (the forward list), and a
//! partial clique is extended by intersecting its candidate set with the
//! forward list of the vertex just added. The last level only needs the
//! size of that intersection, which [`intersect_sorted`] gives directly.
//!
//! Self-loops and parallel edges are collapsed, so counts refer to the
//! underlying simple graph.
//!
//! # References
//! - Chiba & Nishizeki (1985): "Arboricity and Subgraph Listing Algorithms"

use crate::error::GraphResult;
use crate::storage::{intersect_sorted, Color, ColoredCsr, REMOVED};

/// Number of k-cliques in a color
///
/// `k = 1` counts vertices and `k = 2` counts distinct edges; `k = 0`
/// yields 0.
///
/// # Errors
///
/// Returns error if the color is out of range or has pending tombstones
///
/// # Example
///
/// ```
/// use chroma_graph::{clique_count, Color, ColoredCsr, NodeId};
///
/// let mut edges = Vec::new();
/// for i in 0..4 {
///     for j in i + 1..4 {
///         edges.push((NodeId(i), NodeId(j), Color(0)));
///     }
/// }
/// let graph = ColoredCsr::from_edges(4, 1, &edges).unwrap();
///
/// assert_eq!(clique_count(&graph, 3, Color(0)).unwrap(), 4);
/// assert_eq!(clique_count(&graph, 4, Color(0)).unwrap(), 1);
/// ```
pub fn clique_count(graph: &ColoredCsr, k: usize, color: Color) -> GraphResult<usize> {
    graph.ensure_reconstructed(color)?;
    match k {
        0 => return Ok(0),
        1 => return Ok(graph.num_vertices()),
        _ => {}
    }

    let forward = forward_lists(graph, color)?;
    Ok(forward
        .iter()
        .map(|candidates| count_extensions(&forward, candidates, k - 1))
        .sum())
}

/// `(k, count)` pairs for every `k >= 3` with at least one k-clique
///
/// Stops at the first empty size, so the last entry is the clique number
/// whenever the color has a triangle.
///
/// # Errors
///
/// Returns error if the color is out of range or has pending tombstones
pub fn clique_histogram(graph: &ColoredCsr, color: Color) -> GraphResult<Vec<(usize, usize)>> {
    graph.ensure_reconstructed(color)?;

    let forward = forward_lists(graph, color)?;
    let mut histogram = Vec::new();
    for k in 3.. {
        let count: usize = forward
            .iter()
            .map(|candidates| count_extensions(&forward, candidates, k - 1))
            .sum();
        if count == 0 {
            break;
        }
        histogram.push((k, count));
    }
    Ok(histogram)
}

/// Sorted, deduplicated neighbors with a larger id, per vertex
fn forward_lists(graph: &ColoredCsr, color: Color) -> GraphResult<Vec<Vec<u32>>> {
    let mut forward = Vec::with_capacity(graph.num_vertices());
    for v in graph.vertices() {
        let mut list: Vec<u32> = graph
            .neighbors(v, color)?
            .iter()
            .copied()
            .filter(|&u| u != REMOVED && u > v.0)
            .collect();
        list.dedup();
        forward.push(list);
    }
    Ok(forward)
}

/// Ways to pick `remaining` more clique vertices from `candidates`
///
/// `candidates` holds the common forward neighbors of the partial clique.
fn count_extensions(forward: &[Vec<u32>], candidates: &[u32], remaining: usize) -> usize {
    match remaining {
        0 => 1,
        1 => candidates.len(),
        2 => candidates
            .iter()
            .map(|&u| intersect_sorted(candidates, &forward[u as usize]))
            .sum(),
        _ => {
            let mut total = 0;
            let mut next = Vec::new();
            for &u in candidates {
                intersect_into(candidates, &forward[u as usize], &mut next);
                if next.len() >= remaining - 1 {
                    total += count_extensions(forward, &next, remaining - 1);
                }
            }
            total
        }
    }
}

/// Common entries of two ascending slices, written to `out`
fn intersect_into(a: &[u32], b: &[u32], out: &mut Vec<u32>) {
    out.clear();
    let (mut i, mut j) = (0, 0);
    while i < a.len() && j < b.len() {
        match a[i].cmp(&b[j]) {
            std::cmp::Ordering::Less => i += 1,
            std::cmp::Ordering::Greater => j += 1,
            std::cmp::Ordering::Equal => {
                out.push(a[i]);
                i += 1;
                j += 1;
            }
        }
    }
}
