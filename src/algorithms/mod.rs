//! Graph statistics built on the colored CSR substrate
//!
//! Connected components, triangle/clustering statistics, clique counts,
//! diameter and girth, and truss decomposition. None of these mutate the
//! caller's graph.

pub mod clique;
pub mod components;
pub mod diameter;
pub mod triangles;
pub mod truss;

pub use clique::{clique_count, clique_histogram};
pub use components::{connected_components, count_components};
pub use diameter::{component_diameters, diameter, eccentricity, girth};
pub use triangles::{average_clustering, edge_support, local_clustering, triangle_count};
pub use truss::{truss_decomposition, TrussLevel, TrussResult};
