//! k-truss decomposition by edge peeling
//!
//! The k-truss is the largest subgraph in which every edge lies in at least
//! `k - 2` triangles. Peeling works on a private copy of one color: each round
//! tombstones every edge whose support is too low, then reconstructs the CSR
//! index, until no edge is removed.
//!
//! # References
//! - Cohen (2008): "Trusses: Cohesive Subgraphs for Social Network Analysis"
//! - Wang & Cheng (2012): "Truss Decomposition in Massive Networks"

use super::components::count_components;
use super::triangles::edge_support;
use crate::error::GraphResult;
use crate::storage::{Color, ColoredCsr, NodeId, REMOVED};
use tracing::debug;

/// One level of a truss decomposition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrussLevel {
    /// Truss order
    pub k: usize,

    /// Undirected edges remaining in the k-truss
    pub edges: usize,

    /// Connected components of the k-truss that contain at least one edge
    pub components: usize,
}

/// Truss decomposition result
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrussResult {
    /// Non-empty levels in increasing `k`, starting at `k = 2` (whole graph)
    pub levels: Vec<TrussLevel>,
}

impl TrussResult {
    /// Largest `k` with a non-empty k-truss (0 for an edgeless graph)
    #[must_use]
    pub fn max_k(&self) -> usize {
        self.levels.last().map_or(0, |level| level.k)
    }

    /// `(k, edges)` pairs for report histograms
    #[must_use]
    pub fn histogram(&self) -> Vec<(usize, usize)> {
        self.levels.iter().map(|level| (level.k, level.edges)).collect()
    }
}

/// Decompose a color into its k-trusses
///
/// The input graph is left untouched: peeling runs on a compacted copy of
/// `color` alone. Results assume a simple graph.
///
/// # Errors
///
/// Returns error if the color is out of range, or
/// [`crate::GraphError::AsymmetricEdge`] if the adjacency is corrupted.
///
/// # Example
///
/// ```
/// use chroma_graph::{truss_decomposition, Color, ColoredCsr, NodeId};
///
/// // K4 (a 4-truss) with a pendant edge
/// let edges = [
///     (NodeId(0), NodeId(1), Color(0)),
///     (NodeId(0), NodeId(2), Color(0)),
///     (NodeId(0), NodeId(3), Color(0)),
///     (NodeId(1), NodeId(2), Color(0)),
///     (NodeId(1), NodeId(3), Color(0)),
///     (NodeId(2), NodeId(3), Color(0)),
///     (NodeId(3), NodeId(4), Color(0)),
/// ];
/// let graph = ColoredCsr::from_edges(5, 1, &edges).unwrap();
///
/// let result = truss_decomposition(&graph, Color(0)).unwrap();
/// assert_eq!(result.max_k(), 4);
/// assert_eq!(result.histogram(), vec![(2, 7), (3, 6), (4, 6)]);
/// ```
pub fn truss_decomposition(graph: &ColoredCsr, color: Color) -> GraphResult<TrussResult> {
    let mut work = graph.extract_color(color)?;
    let color = Color(0);

    let mut levels = Vec::new();
    let mut k = 2;

    loop {
        peel(&mut work, color, k)?;

        let edges = live_edges(&work, color)?;
        if edges == 0 {
            break;
        }

        let mut isolated = 0;
        for v in work.vertices() {
            if work.degree(v, color)? == 0 {
                isolated += 1;
            }
        }
        let components = count_components(&work, color)? - isolated;

        debug!(k, edges, components, "Truss level");
        levels.push(TrussLevel { k, edges, components });
        k += 1;
    }

    Ok(TrussResult { levels })
}

/// Remove edges with support below `k - 2` until none is left
fn peel(graph: &mut ColoredCsr, color: Color, k: usize) -> GraphResult<()> {
    let min_support = k.saturating_sub(2);

    loop {
        let mut weak = Vec::new();
        for v in graph.vertices() {
            for &u in graph.neighbors(v, color)? {
                if u != REMOVED && u > v.0 && edge_support(graph, v, NodeId(u), color)? < min_support {
                    weak.push((v, NodeId(u)));
                }
            }
        }
        // Parallel edges show up as consecutive duplicates
        weak.dedup();

        if weak.is_empty() {
            return Ok(());
        }

        for (v, u) in weak {
            graph.remove_edge(v, u, color)?;
        }
        graph.reconstruct(color)?;
    }
}

fn live_edges(graph: &ColoredCsr, color: Color) -> GraphResult<usize> {
    let mut edges = 0;
    for v in graph.vertices() {
        edges += graph
            .neighbors(v, color)?
            .iter()
            .filter(|&&u| u != REMOVED && u > v.0)
            .count();
    }
    Ok(edges)
}
