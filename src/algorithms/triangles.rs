//! Triangle counting and clustering coefficients
//!
//! Built on the sorted-merge intersection of neighbor ranges. Results assume
//! a simple graph (no self-loops or parallel edges). A color with tombstones
//! awaiting reconstruction is rejected with
//! [`GraphError::PendingTombstones`](crate::GraphError::PendingTombstones).
//!
//! # Example
//!
//! ```
//! use chroma_graph::{triangle_count, Color, ColoredCsr, NodeId};
//!
//! let edges = [
//!     (NodeId(0), NodeId(1), Color(0)),
//!     (NodeId(1), NodeId(2), Color(0)),
//!     (NodeId(2), NodeId(0), Color(0)),
//!     (NodeId(2), NodeId(3), Color(0)),
//! ];
//! let graph = ColoredCsr::from_edges(4, 1, &edges).unwrap();
//!
//! assert_eq!(triangle_count(&graph, Color(0)).unwrap(), 1);
//! ```

use crate::error::GraphResult;
use crate::storage::{Color, ColoredCsr, NodeId, REMOVED};

/// Number of common neighbors of the edge `v -- u`
///
/// This is the edge's support: the number of triangles it belongs to.
///
/// # Errors
///
/// Returns error if an id is out of range or the color has pending tombstones
pub fn edge_support(graph: &ColoredCsr, v: NodeId, u: NodeId, color: Color) -> GraphResult<usize> {
    graph.ensure_reconstructed(color)?;
    let rv = graph.neighbor_range(v, color)?;
    let ru = graph.neighbor_range(u, color)?;
    graph.intersection_count(rv, ru, color)
}

/// Count triangles of a color
///
/// Sums the support of every edge `v -- u` with `v < u`; each triangle is
/// seen once per edge.
///
/// # Errors
///
/// Returns error if the color is out of range or has pending tombstones
pub fn triangle_count(graph: &ColoredCsr, color: Color) -> GraphResult<usize> {
    graph.ensure_reconstructed(color)?;

    let mut total = 0;
    for v in graph.vertices() {
        for &u in graph.neighbors(v, color)? {
            if u != REMOVED && u > v.0 {
                total += edge_support(graph, v, NodeId(u), color)?;
            }
        }
    }
    Ok(total / 3)
}

/// Local clustering coefficient of a vertex
///
/// Fraction of neighbor pairs that are themselves adjacent. Vertices with
/// fewer than two neighbors have coefficient 0.
///
/// # Errors
///
/// Returns error if the vertex or color is out of range, or the color has
/// pending tombstones
pub fn local_clustering(graph: &ColoredCsr, v: NodeId, color: Color) -> GraphResult<f64> {
    graph.ensure_reconstructed(color)?;
    let degree = graph.degree(v, color)?;
    if degree < 2 {
        return Ok(0.0);
    }

    // Each link between two neighbors is counted from both of them
    let mut closed = 0_usize;
    for &u in graph.neighbors(v, color)? {
        if u != REMOVED {
            closed += edge_support(graph, v, NodeId(u), color)?;
        }
    }

    #[allow(clippy::cast_precision_loss)]
    let coefficient = closed as f64 / (degree * (degree - 1)) as f64;
    Ok(coefficient)
}

/// Average local clustering coefficient over all vertices of a color
///
/// # Errors
///
/// Returns error if the color is out of range or has pending tombstones
pub fn average_clustering(graph: &ColoredCsr, color: Color) -> GraphResult<f64> {
    graph.ensure_reconstructed(color)?;

    let n = graph.num_vertices();
    if n == 0 {
        return Ok(0.0);
    }

    let mut sum = 0.0;
    for v in graph.vertices() {
        sum += local_clustering(graph, v, color)?;
    }

    #[allow(clippy::cast_precision_loss)]
    let average = sum / n as f64;
    Ok(average)
}
