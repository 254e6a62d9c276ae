//! Connected components over one color
//!
//! Depth-first enumeration with an explicit stack. Visitation order matches
//! the recursive pre-order: vertices are seeded in id order and each
//! vertex's neighbors are explored in ascending order.
//!
//! # Example
//!
//! ```
//! use chroma_graph::{connected_components, Color, ColoredCsr, NodeId};
//!
//! // Two disconnected edges: 0 -- 1, 2 -- 3
//! let edges = [
//!     (NodeId(0), NodeId(1), Color(0)),
//!     (NodeId(2), NodeId(3), Color(0)),
//! ];
//! let graph = ColoredCsr::from_edges(4, 1, &edges).unwrap();
//!
//! let components = connected_components(&graph, Color(0)).unwrap();
//! assert_eq!(components, vec![vec![NodeId(0), NodeId(1)], vec![NodeId(2), NodeId(3)]]);
//! ```

use crate::error::GraphResult;
use crate::storage::{Color, ColoredCsr, NodeId, REMOVED};

/// Enumerate the connected components of a color
///
/// Components are labeled in order of their smallest vertex id; each lists
/// its vertices in discovery order. Isolated vertices form singleton
/// components. Tombstones awaiting reconstruction are skipped.
///
/// # Errors
///
/// Returns error if the color is out of range
pub fn connected_components(graph: &ColoredCsr, color: Color) -> GraphResult<Vec<Vec<NodeId>>> {
    // Reject bad colors even when there are no vertices to walk
    graph.live_entries(color)?;

    let mut visited = vec![false; graph.num_vertices()];
    let mut stack = Vec::new();
    let mut components = Vec::new();

    for start in graph.vertices() {
        if visited[start.0 as usize] {
            continue;
        }

        let mut component = Vec::new();
        stack.push(start.0);

        while let Some(v) = stack.pop() {
            if visited[v as usize] {
                continue;
            }
            visited[v as usize] = true;
            component.push(NodeId(v));

            // Reverse push so the smallest neighbor is explored first
            let neighbors = graph.neighbors(NodeId(v), color)?;
            stack.extend(
                neighbors
                    .iter()
                    .rev()
                    .copied()
                    .filter(|&u| u != REMOVED && !visited[u as usize]),
            );
        }

        components.push(component);
    }

    Ok(components)
}

/// Count the connected components of a color
///
/// # Errors
///
/// Returns error if the color is out of range
pub fn count_components(graph: &ColoredCsr, color: Color) -> GraphResult<usize> {
    Ok(connected_components(graph, color)?.len())
}
