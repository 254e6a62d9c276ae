//! chroma-graph: multi-color CSR graph storage
//!
//! # Overview
//!
//! Stores large sparse undirected graphs whose edges are partitioned into
//! colors, one CSR index per color, and provides the primitives structural
//! statistics are computed from: sorted neighbor ranges, merge-based
//! intersection, tombstone removal with explicit reconstruction, and
//! connected-component enumeration.
//!
//! # Quick Start
//!
//! ```no_run
//! use chroma_graph::{connected_components, Color, ColoredCsr, NodeId};
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! // "<num_vertices> <num_colors> <num_edges>" then "<from> <to> <color>" lines
//! let mut graph = ColoredCsr::load("graph.txt")?;
//!
//! // Common neighbors of 0 and 1 (sorted-merge intersection)
//! let r0 = graph.neighbor_range(NodeId(0), Color(0))?;
//! let r1 = graph.neighbor_range(NodeId(1), Color(0))?;
//! let common = graph.intersection_count(r0, r1, Color(0))?;
//!
//! // Removals become visible after reconstruction
//! graph.remove_edge(NodeId(0), NodeId(1), Color(0))?;
//! graph.reconstruct(Color(0))?;
//!
//! let components = connected_components(&graph, Color(0))?;
//! # let _ = (common, components);
//! # Ok(())
//! # }
//! ```
//!
//! # Architecture
//!
//! - **Storage**: per-color CSR (`storage::csr`), text loader (`storage::loader`)
//! - **Export**: Graphviz and component dumps, Parquet persistence
//! - **Algorithms**: components, triangles/clustering, cliques, diameter/girth,
//!   truss decomposition

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod algorithms;
pub mod error;
pub mod storage;

// Re-export core types
pub use algorithms::{
    average_clustering, clique_count, clique_histogram, component_diameters, connected_components,
    count_components, diameter, eccentricity, edge_support, girth, local_clustering,
    triangle_count, truss_decomposition, TrussLevel, TrussResult,
};
pub use error::{GraphError, GraphResult};
pub use storage::{
    intersect_sorted, palette_name, write_components, Color, ColoredCsr, LoadOptions, NodeId,
    PALETTE, REMOVED,
};

// Error type for persistence
pub use anyhow::{Error, Result};
