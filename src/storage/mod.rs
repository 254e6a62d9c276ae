//! Graph storage layer
//!
//! Provides the multi-color CSR representation, the text edge-list loader,
//! edge exports and Parquet persistence.

pub mod csr;
pub mod export;
pub mod loader;
#[cfg(feature = "storage")]
pub mod parquet;

pub use csr::{intersect_sorted, Color, ColoredCsr, NodeId, REMOVED};
pub use export::{palette_name, write_components, PALETTE};
pub use loader::LoadOptions;
