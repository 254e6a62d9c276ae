//! Eccentricity, diameter and girth by breadth-first search
//!
//! Every measure here is exact and runs one BFS per vertex, O(V * E) per
//! color. Distances never cross components, so the diameter of a
//! disconnected color is the largest diameter among its components.
//! Tombstones awaiting reconstruction are skipped like missing edges.
//!
//! # Example
//!
//! ```
//! use chroma_graph::{diameter, girth, Color, ColoredCsr, NodeId};
//!
//! // 6-cycle
//! let edges: Vec<_> = (0..6)
//!     .map(|i| (NodeId(i), NodeId((i + 1) % 6), Color(0)))
//!     .collect();
//! let graph = ColoredCsr::from_edges(6, 1, &edges).unwrap();
//!
//! assert_eq!(diameter(&graph, Color(0)).unwrap(), 3);
//! assert_eq!(girth(&graph, Color(0)).unwrap(), Some(6));
//! ```

use super::components::connected_components;
use crate::error::GraphResult;
use crate::storage::{Color, ColoredCsr, NodeId, REMOVED};
use std::collections::VecDeque;

const UNSEEN: u32 = u32::MAX;

/// Reusable BFS state; only vertices touched by a search are reset
struct Bfs {
    dist: Vec<u32>,
    parent: Vec<u32>,
    queue: VecDeque<u32>,
    touched: Vec<u32>,
}

impl Bfs {
    fn new(num_vertices: usize) -> Self {
        Self {
            dist: vec![UNSEEN; num_vertices],
            parent: vec![UNSEEN; num_vertices],
            queue: VecDeque::new(),
            touched: Vec::new(),
        }
    }

    fn reset(&mut self) {
        for &v in &self.touched {
            self.dist[v as usize] = UNSEEN;
            self.parent[v as usize] = UNSEEN;
        }
        self.touched.clear();
        self.queue.clear();
    }

    fn visit(&mut self, v: u32, dist: u32, parent: u32) {
        self.dist[v as usize] = dist;
        self.parent[v as usize] = parent;
        self.touched.push(v);
        self.queue.push_back(v);
    }

    /// Largest distance reached from `source`
    fn eccentricity(&mut self, graph: &ColoredCsr, source: NodeId, color: Color) -> GraphResult<u32> {
        self.reset();
        self.visit(source.0, 0, UNSEEN);

        let mut farthest = 0;
        while let Some(v) = self.queue.pop_front() {
            let d = self.dist[v as usize];
            farthest = farthest.max(d);
            for &u in graph.neighbors(NodeId(v), color)? {
                if u != REMOVED && self.dist[u as usize] == UNSEEN {
                    self.visit(u, d + 1, v);
                }
            }
        }
        Ok(farthest)
    }

    /// Shortest cycle closed by a non-tree edge of the search from `source`
    ///
    /// The minimum over all sources is the girth.
    fn shortest_cycle(&mut self, graph: &ColoredCsr, source: NodeId, color: Color) -> GraphResult<Option<u32>> {
        self.reset();
        self.visit(source.0, 0, UNSEEN);

        let mut best: Option<u32> = None;
        while let Some(v) = self.queue.pop_front() {
            let d = self.dist[v as usize];
            // Any cycle closed from depth d has length at least 2d
            if best.is_some_and(|b| 2 * d >= b) {
                break;
            }
            for &u in graph.neighbors(NodeId(v), color)? {
                if u == REMOVED || u == v {
                    continue;
                }
                if self.dist[u as usize] == UNSEEN {
                    self.visit(u, d + 1, v);
                } else if self.parent[v as usize] != u && self.parent[u as usize] != v {
                    let length = d + self.dist[u as usize] + 1;
                    best = Some(best.map_or(length, |b| b.min(length)));
                }
            }
        }
        Ok(best)
    }
}

/// Largest shortest-path distance from `v` to any vertex it reaches
///
/// # Errors
///
/// Returns error if the vertex or color is out of range
pub fn eccentricity(graph: &ColoredCsr, v: NodeId, color: Color) -> GraphResult<usize> {
    graph.neighbor_range(v, color)?;
    let mut bfs = Bfs::new(graph.num_vertices());
    Ok(bfs.eccentricity(graph, v, color)? as usize)
}

/// Diameter of each connected component, in [`connected_components`] order
///
/// Isolated vertices have diameter 0.
///
/// # Errors
///
/// Returns error if the color is out of range
pub fn component_diameters(graph: &ColoredCsr, color: Color) -> GraphResult<Vec<usize>> {
    let components = connected_components(graph, color)?;
    let mut bfs = Bfs::new(graph.num_vertices());

    let mut diameters = Vec::with_capacity(components.len());
    for component in &components {
        let mut widest = 0;
        for &v in component {
            widest = widest.max(bfs.eccentricity(graph, v, color)?);
        }
        diameters.push(widest as usize);
    }
    Ok(diameters)
}

/// Largest component diameter of a color (0 for an edgeless color)
///
/// # Errors
///
/// Returns error if the color is out of range
pub fn diameter(graph: &ColoredCsr, color: Color) -> GraphResult<usize> {
    Ok(component_diameters(graph, color)?
        .into_iter()
        .max()
        .unwrap_or(0))
}

/// Length of the shortest cycle of a color, or `None` for a forest
///
/// Self-loops and parallel edges are ignored, so the result is the girth of
/// the underlying simple graph.
///
/// # Errors
///
/// Returns error if the color is out of range
pub fn girth(graph: &ColoredCsr, color: Color) -> GraphResult<Option<usize>> {
    graph.live_entries(color)?;
    let mut bfs = Bfs::new(graph.num_vertices());

    let mut best: Option<u32> = None;
    for v in graph.vertices() {
        if let Some(length) = bfs.shortest_cycle(graph, v, color)? {
            best = Some(best.map_or(length, |b| b.min(length)));
            if length == 3 {
                break;
            }
        }
    }
    Ok(best.map(|length| length as usize))
}
