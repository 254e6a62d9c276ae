//! Text edge-list loader
//!
//! # Format
//!
//! ```text
//! <num_vertices> <num_colors> <num_edges>
//! <from> <to> <color>      // repeated exactly num_edges times
//! ```
//!
//! The header is read once. Pass 1 counts incidences per (color, vertex);
//! pass 2 seeks back to the first edge line once per color and places that
//! color's destinations. Every slice is sorted after placement.

use super::csr::{ColoredCsr, IndexBuilder, REMOVED};
use crate::error::{GraphError, GraphResult};
use std::fs::File;
use std::io::{BufRead, BufReader, Seek, SeekFrom};
use std::path::Path;
use tracing::{debug, info};

/// Options controlling how an edge list is turned into CSR indices
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadOptions {
    /// Store each line in both endpoints' slices (default: `true`)
    ///
    /// Disable for files that already list both directions of every edge.
    pub symmetrize: bool,
}

impl LoadOptions {
    /// Default options: symmetrize
    #[must_use]
    pub const fn new() -> Self {
        Self { symmetrize: true }
    }

    /// Set whether lines are stored in both directions
    #[must_use]
    pub const fn with_symmetrize(mut self, symmetrize: bool) -> Self {
        self.symmetrize = symmetrize;
        self
    }
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self::new()
    }
}

impl ColoredCsr {
    /// Load a graph from a text edge list with default options
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::Io`] if the file cannot be opened or read, and
    /// [`GraphError::Format`] if the header or an edge line is malformed.
    pub fn load<P: AsRef<Path>>(path: P) -> GraphResult<Self> {
        Self::load_with(path, &LoadOptions::default())
    }

    /// Load a graph from a text edge list
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::Io`] if the file cannot be opened or read, and
    /// [`GraphError::Format`] if the header or an edge line is malformed.
    pub fn load_with<P: AsRef<Path>>(path: P, options: &LoadOptions) -> GraphResult<Self> {
        let path = path.as_ref();
        let file = File::open(path)?;
        let graph = Self::from_reader(BufReader::new(file), options)?;

        info!(
            path = %path.display(),
            vertices = graph.num_vertices(),
            colors = graph.num_colors(),
            edges = graph.num_edges(),
            "Loaded colored CSR graph"
        );
        Ok(graph)
    }

    /// Build a graph from any seekable text source
    ///
    /// # Errors
    ///
    /// Same as [`ColoredCsr::load_with`]
    pub fn from_reader<R: BufRead + Seek>(mut reader: R, options: &LoadOptions) -> GraphResult<Self> {
        let mut line = String::new();
        let [num_vertices, num_colors, num_edges] = read_triple(&mut reader, &mut line, 1)?;

        if num_vertices == REMOVED {
            return Err(format_error(1, "vertex count collides with the removal sentinel"));
        }
        if u64::from(num_edges) * 2 > u64::from(u32::MAX) {
            return Err(format_error(1, format!("edge count {num_edges} too large")));
        }

        let edges_start = reader.stream_position()?;
        let mut builder =
            IndexBuilder::new(num_vertices as usize, num_colors as usize, options.symmetrize)
                .map_err(|e| format_error(1, e.to_string()))?;

        for_each_edge(&mut reader, num_edges, |lineno, [from, to, color]| {
            builder
                .check(from, to, color)
                .map_err(|e| format_error(lineno, e.to_string()))?;
            builder.count(from, to, color);
            Ok(())
        })?;
        builder.allocate();

        for c in 0..num_colors {
            reader.seek(SeekFrom::Start(edges_start))?;
            builder.begin_color(c);
            for_each_edge(&mut reader, num_edges, |_, [from, to, color]| {
                if color == c {
                    builder.place(from, to, color);
                }
                Ok(())
            })?;
            builder.finish_color(c);
        }

        debug!(num_vertices, num_colors, num_edges, "Parsed edge list");
        Ok(builder.build(num_edges as usize))
    }
}

fn for_each_edge<R: BufRead>(
    reader: &mut R,
    num_edges: u32,
    mut f: impl FnMut(usize, [u32; 3]) -> GraphResult<()>,
) -> GraphResult<()> {
    let mut line = String::new();
    for i in 0..num_edges as usize {
        // Header is line 1
        let lineno = i + 2;
        let triple = read_triple(reader, &mut line, lineno)?;
        f(lineno, triple)?;
    }
    Ok(())
}

fn read_triple<R: BufRead>(reader: &mut R, line: &mut String, lineno: usize) -> GraphResult<[u32; 3]> {
    line.clear();
    if reader.read_line(line)? == 0 {
        return Err(format_error(lineno, "unexpected end of input"));
    }
    parse_triple(line, lineno)
}

fn parse_triple(line: &str, lineno: usize) -> GraphResult<[u32; 3]> {
    let mut fields = line.split_whitespace();
    let mut triple = [0_u32; 3];
    for slot in &mut triple {
        let field = fields
            .next()
            .ok_or_else(|| format_error(lineno, "expected 3 integers"))?;
        *slot = field
            .parse()
            .map_err(|e| format_error(lineno, format!("invalid integer {field:?}: {e}")))?;
    }
    if fields.next().is_some() {
        return Err(format_error(lineno, "expected 3 integers, found more"));
    }
    Ok(triple)
}

fn format_error(line: usize, reason: impl Into<String>) -> GraphError {
    GraphError::Format {
        line,
        reason: reason.into(),
    }
}
