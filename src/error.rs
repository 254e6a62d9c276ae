//! Error taxonomy for loading, querying and mutating colored CSR graphs

use thiserror::Error;

/// Errors raised by the graph storage engine
///
/// Load-time failures (`Io`, `Format`) abort construction and never yield a
/// partial graph. The remaining variants are contract violations reported at
/// the entry point that detected them.
#[derive(Debug, Error)]
pub enum GraphError {
    /// Input resource missing or unreadable
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Header or edge line does not parse as the expected integer triple
    #[error("Format error at line {line}: {reason}")]
    Format {
        /// 1-based line number in the input
        line: usize,
        /// What was wrong with the line
        reason: String,
    },

    /// Vertex id outside `[0, num_vertices)`
    #[error("Vertex {vertex} out of range (num_vertices = {num_vertices})")]
    VertexOutOfRange {
        /// Offending vertex id
        vertex: u32,
        /// Number of vertices in the graph
        num_vertices: usize,
    },

    /// Color id outside `[0, num_colors)`
    #[error("Color {color} out of range (num_colors = {num_colors})")]
    ColorOutOfRange {
        /// Offending color id
        color: u32,
        /// Number of colors in the graph
        num_colors: usize,
    },

    /// Slot position or range outside the live part of a color's column array
    #[error("Slot {pos} out of range (live length = {len})")]
    SlotOutOfRange {
        /// Offending position (or range end)
        pos: usize,
        /// Live length of the column array
        len: usize,
    },

    /// Edge found in one endpoint's adjacency but not the other's
    #[error("Asymmetric edge {from} -- {to} in color {color}: adjacency is corrupted")]
    AsymmetricEdge {
        /// Source vertex passed to the removal
        from: u32,
        /// Target vertex passed to the removal
        to: u32,
        /// Color of the removal
        color: u32,
    },

    /// Color has tombstoned slots awaiting reconstruction
    #[error("Color {color} has {count} tombstones pending reconstruction")]
    PendingTombstones {
        /// Color that must be reconstructed first
        color: u32,
        /// Slots tombstoned since the last reconstruction
        count: usize,
    },

    /// Declared dimensions do not fit in memory
    #[error("Cannot allocate CSR offsets for {num_vertices} vertices x {num_colors} colors")]
    Capacity {
        /// Declared number of vertices
        num_vertices: usize,
        /// Declared number of colors
        num_colors: usize,
    },

    /// Visualization requested for a color without a palette name
    #[error("No palette entry for color {0}")]
    NoPaletteEntry(u32),
}

/// Result alias for graph storage operations
pub type GraphResult<T> = std::result::Result<T, GraphError>;
