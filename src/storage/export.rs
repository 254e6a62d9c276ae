//! Edge dumps and text exports for external presentation code
//!
//! - Graphviz: `graph { 0 -- 1 [color=red]; ... }`
//! - Components: `Comp [<index>] : <space separated ids>`

use super::csr::{Color, ColoredCsr, NodeId, REMOVED};
use crate::error::{GraphError, GraphResult};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Graphviz color names, indexed by edge color
pub const PALETTE: [&str; 3] = ["red", "blue", "green"];

/// Palette name of a color
///
/// # Errors
///
/// Returns [`GraphError::NoPaletteEntry`] for colors without a name
pub fn palette_name(color: Color) -> GraphResult<&'static str> {
    PALETTE
        .get(color.0 as usize)
        .copied()
        .ok_or(GraphError::NoPaletteEntry(color.0))
}

impl ColoredCsr {
    /// Dump every stored `(v, neighbor)` pair of a color
    ///
    /// Both directions of each undirected edge are included, in slice order.
    /// Tombstones awaiting reconstruction are skipped.
    ///
    /// # Errors
    ///
    /// Returns error if the color is out of range
    pub fn export_edges(&self, color: Color) -> GraphResult<Vec<(NodeId, NodeId)>> {
        let mut pairs = Vec::with_capacity(self.live_entries(color)?);
        for v in self.vertices() {
            for &to in self.neighbors(v, color)? {
                if to != REMOVED {
                    pairs.push((v, NodeId(to)));
                }
            }
        }
        Ok(pairs)
    }

    /// Every undirected edge of a color exactly once
    ///
    /// Emits `(v, u)` with `v < u` and one entry per self-loop instance.
    /// Parallel edges are kept.
    ///
    /// # Errors
    ///
    /// Returns error if the color is out of range
    pub fn undirected_edges(&self, color: Color) -> GraphResult<Vec<(NodeId, NodeId)>> {
        let mut edges = Vec::new();
        for v in self.vertices() {
            let mut self_loops = 0_usize;
            for &to in self.neighbors(v, color)? {
                if to == REMOVED {
                    continue;
                }
                if to == v.0 {
                    self_loops += 1;
                } else if v.0 < to {
                    edges.push((v, NodeId(to)));
                }
            }
            // A self-loop occupies two slots of its own slice
            edges.extend(std::iter::repeat((v, v)).take(self_loops / 2));
        }
        Ok(edges)
    }

    /// Write the given colors as one Graphviz `graph`
    ///
    /// # Errors
    ///
    /// Returns error if a color is out of range or has no palette entry, or
    /// if writing fails
    pub fn write_dot<W: Write>(&self, writer: &mut W, colors: &[Color]) -> GraphResult<()> {
        writeln!(writer, "graph{{")?;
        for &color in colors {
            let name = palette_name(color)?;
            for (from, to) in self.export_edges(color)? {
                writeln!(writer, "{} -- {} [color={name}];", from.0, to.0)?;
            }
        }
        writeln!(writer, "}}")?;
        Ok(())
    }

    /// Write every color as Graphviz to `path`
    ///
    /// # Errors
    ///
    /// Returns error if the file cannot be created or a color has no palette
    /// entry
    pub fn visualize<P: AsRef<Path>>(&self, path: P) -> GraphResult<()> {
        let colors: Vec<Color> = self.colors().collect();
        let mut writer = BufWriter::new(File::create(path)?);
        self.write_dot(&mut writer, &colors)?;
        writer.flush()?;
        Ok(())
    }
}

/// Write components, one line each: `Comp [<index>] : <ids>`
///
/// # Errors
///
/// Returns error if writing fails
pub fn write_components<W: Write>(writer: &mut W, components: &[Vec<NodeId>]) -> GraphResult<()> {
    for (index, component) in components.iter().enumerate() {
        write!(writer, "Comp [{index}] :")?;
        for v in component {
            write!(writer, " {}", v.0)?;
        }
        writeln!(writer)?;
    }
    Ok(())
}
