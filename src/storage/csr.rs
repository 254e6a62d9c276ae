//! Multi-color CSR (Compressed Sparse Row) graph representation
//!
//! Every color owns an independent CSR index. Each undirected edge is stored
//! in both endpoints' slices so adjacency, intersection and traversal are
//! symmetric.
//!
//! # CSR Format
//!
//! ```text
//! Graph (color 0): 0 -- 1, 0 -- 2, 1 -- 2
//!
//! CSR (color 0):
//!   row_offsets: [0, 2, 4, 6]     // Node 0: [0..2), Node 1: [2..4), Node 2: [4..6)
//!   col_indices: [1, 2, 0, 2, 0, 1]
//! ```
//!
//! # Removal lifecycle
//!
//! Edges are removed in two phases. [`ColoredCsr::remove_edge`] overwrites the
//! matching slots with [`REMOVED`]; ranges keep their old bounds and still see
//! the tombstones. [`ColoredCsr::reconstruct`] rebuilds the offsets from the
//! survivors and compacts the column array in place.

use super::loader::LoadOptions;
use crate::error::{GraphError, GraphResult};
use std::ops::Range;
use tracing::{debug, warn};

/// Sentinel marking a tombstoned column slot
///
/// Never a valid vertex id: graphs are limited to `u32::MAX` vertices.
pub const REMOVED: u32 = u32::MAX;

/// Node identifier (zero-indexed)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub u32);

/// Edge color (zero-indexed category)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Color(pub u32);

/// CSR index of a single color
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ColorIndex {
    /// `row_offsets[v]..row_offsets[v + 1]` is node v's slice.
    /// Length: `num_vertices` + 1
    row_offsets: Vec<u32>,

    /// Destination ids, sorted per slice. Length never shrinks.
    col_indices: Vec<u32>,

    /// Slots tombstoned since the last reconstruction
    tombstones: usize,
}

impl ColorIndex {
    fn empty(num_vertices: usize) -> Option<Self> {
        Some(Self {
            row_offsets: zeroed(num_vertices + 1)?,
            col_indices: Vec::new(),
            tombstones: 0,
        })
    }

    /// End of the live prefix of `col_indices`
    fn live_len(&self) -> usize {
        self.row_offsets.last().map_or(0, |&end| end as usize)
    }

    fn range(&self, v: usize) -> Range<usize> {
        self.row_offsets[v] as usize..self.row_offsets[v + 1] as usize
    }

    /// Tombstone every slot in `range` equal to `target`, returning the count
    fn tombstone_matches(&mut self, range: Range<usize>, target: u32) -> usize {
        let mut found = 0;
        for slot in &mut self.col_indices[range] {
            if *slot == target {
                *slot = REMOVED;
                found += 1;
            }
        }
        self.tombstones += found;
        found
    }
}

/// Two-pass bulk builder shared by the text loader and in-memory construction
///
/// Pass 1 calls [`IndexBuilder::count`] for every edge, then
/// [`IndexBuilder::allocate`] turns counts into offsets. Pass 2 runs once per
/// color: [`IndexBuilder::begin_color`] resets the scratch cursors,
/// [`IndexBuilder::place`] fills slots and [`IndexBuilder::finish_color`]
/// sorts each vertex's slice.
///
/// Offsets are allocated up front from the declared dimensions, so
/// [`IndexBuilder::new`] fails instead of aborting when they cannot fit.
#[derive(Debug)]
pub(crate) struct IndexBuilder {
    num_vertices: usize,
    symmetrize: bool,
    colors: Vec<ColorIndex>,
    cursor: Vec<u32>,
}

impl IndexBuilder {
    pub(crate) fn new(num_vertices: usize, num_colors: usize, symmetrize: bool) -> GraphResult<Self> {
        let capacity = || GraphError::Capacity {
            num_vertices,
            num_colors,
        };

        // Offsets of every color plus the shared cursor array, in u32 slots
        let slots = num_vertices
            .checked_add(1)
            .and_then(|row| row.checked_mul(num_colors))
            .and_then(|total| total.checked_add(num_vertices));
        if !slots.is_some_and(|total| total <= isize::MAX.unsigned_abs() / std::mem::size_of::<u32>()) {
            return Err(capacity());
        }

        let mut colors = Vec::new();
        colors.try_reserve_exact(num_colors).map_err(|_| capacity())?;
        for _ in 0..num_colors {
            colors.push(ColorIndex::empty(num_vertices).ok_or_else(capacity)?);
        }

        Ok(Self {
            num_vertices,
            symmetrize,
            colors,
            cursor: zeroed(num_vertices).ok_or_else(capacity)?,
        })
    }

    /// Validate an edge against the declared dimensions
    pub(crate) fn check(&self, from: u32, to: u32, color: u32) -> GraphResult<()> {
        for vertex in [from, to] {
            if vertex as usize >= self.num_vertices {
                return Err(GraphError::VertexOutOfRange {
                    vertex,
                    num_vertices: self.num_vertices,
                });
            }
        }
        if color as usize >= self.colors.len() {
            return Err(GraphError::ColorOutOfRange {
                color,
                num_colors: self.colors.len(),
            });
        }
        Ok(())
    }

    /// Pass 1: record the incidences of one edge (ids already checked)
    pub(crate) fn count(&mut self, from: u32, to: u32, color: u32) {
        let offsets = &mut self.colors[color as usize].row_offsets;
        offsets[from as usize + 1] += 1;
        if self.symmetrize {
            offsets[to as usize + 1] += 1;
        }
    }

    /// Prefix-sum the counts into offsets and size every column array
    pub(crate) fn allocate(&mut self) {
        for index in &mut self.colors {
            let mut sum = 0_u32;
            for offset in &mut index.row_offsets {
                sum += *offset;
                *offset = sum;
            }
            index.col_indices = vec![REMOVED; sum as usize];
        }
    }

    /// Reset the scratch cursors to the slice starts of `color`
    pub(crate) fn begin_color(&mut self, color: u32) {
        let offsets = &self.colors[color as usize].row_offsets;
        self.cursor.copy_from_slice(&offsets[..self.num_vertices]);
    }

    /// Pass 2: write one edge of the current color into its slots
    pub(crate) fn place(&mut self, from: u32, to: u32, color: u32) {
        let cols = &mut self.colors[color as usize].col_indices;

        let slot = &mut self.cursor[from as usize];
        cols[*slot as usize] = to;
        *slot += 1;

        if self.symmetrize {
            let slot = &mut self.cursor[to as usize];
            cols[*slot as usize] = from;
            *slot += 1;
        }
    }

    /// Sort each vertex's slice of `color` (bounded sub-range sorts only)
    pub(crate) fn finish_color(&mut self, color: u32) {
        let index = &mut self.colors[color as usize];
        for v in 0..self.num_vertices {
            let range = index.range(v);
            index.col_indices[range].sort_unstable();
        }
        debug!(
            color,
            entries = index.col_indices.len(),
            "Built CSR index for color"
        );
    }

    pub(crate) fn num_colors(&self) -> usize {
        self.colors.len()
    }

    pub(crate) fn build(self, num_edges: usize) -> ColoredCsr {
        ColoredCsr {
            num_vertices: self.num_vertices,
            num_edges,
            symmetric: self.symmetrize,
            colors: self.colors,
        }
    }
}

/// Zero-filled vector, or `None` if the allocation is refused
fn zeroed(len: usize) -> Option<Vec<u32>> {
    let mut values = Vec::new();
    values.try_reserve_exact(len).ok()?;
    values.resize(len, 0);
    Some(values)
}

/// Colored CSR graph
///
/// Optimized for:
/// - O(1) neighbor range lookup per (vertex, color)
/// - Sorted slices for merge-based intersection (triangle, truss, clique counting)
/// - In-place removal without reallocating the structure
///
/// # Example
///
/// ```
/// use chroma_graph::{Color, ColoredCsr, NodeId};
///
/// let edges = [
///     (NodeId(0), NodeId(1), Color(0)),
///     (NodeId(1), NodeId(2), Color(0)),
///     (NodeId(2), NodeId(0), Color(0)),
/// ];
/// let mut graph = ColoredCsr::from_edges(3, 1, &edges).unwrap();
///
/// assert_eq!(graph.neighbors(NodeId(0), Color(0)).unwrap(), &[1, 2]);
///
/// assert!(graph.remove_edge(NodeId(0), NodeId(1), Color(0)).unwrap());
/// graph.reconstruct(Color(0)).unwrap();
/// assert_eq!(graph.neighbors(NodeId(0), Color(0)).unwrap(), &[2]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColoredCsr {
    /// Number of vertices (shared by every color)
    num_vertices: usize,

    /// Number of edges declared at construction (all colors)
    num_edges: usize,

    /// Whether every edge line was stored in both endpoints' slices
    symmetric: bool,

    /// One CSR index per color
    colors: Vec<ColorIndex>,
}

impl ColoredCsr {
    /// Build a graph from an in-memory undirected edge list
    ///
    /// Every `(from, to, color)` is stored in both endpoints' slices.
    ///
    /// # Errors
    ///
    /// Returns error if an edge references a vertex or color outside the
    /// declared dimensions, or if `num_vertices` collides with [`REMOVED`].
    pub fn from_edges(
        num_vertices: usize,
        num_colors: usize,
        edges: &[(NodeId, NodeId, Color)],
    ) -> GraphResult<Self> {
        Self::from_edges_with(num_vertices, num_colors, edges, &LoadOptions::default())
    }

    /// Build a graph from an in-memory edge list with explicit options
    ///
    /// With [`LoadOptions::symmetrize`] off, each `(from, to, color)` is
    /// stored only in `from`'s slice.
    ///
    /// # Errors
    ///
    /// Same as [`ColoredCsr::from_edges`], plus [`GraphError::Capacity`] if
    /// the offsets for the declared dimensions cannot be allocated.
    pub fn from_edges_with(
        num_vertices: usize,
        num_colors: usize,
        edges: &[(NodeId, NodeId, Color)],
        options: &LoadOptions,
    ) -> GraphResult<Self> {
        if num_vertices >= REMOVED as usize {
            return Err(GraphError::VertexOutOfRange {
                vertex: REMOVED,
                num_vertices,
            });
        }

        let mut builder = IndexBuilder::new(num_vertices, num_colors, options.symmetrize)?;
        for (from, to, color) in edges {
            builder.check(from.0, to.0, color.0)?;
            builder.count(from.0, to.0, color.0);
        }
        builder.allocate();

        for c in 0..builder.num_colors() {
            #[allow(clippy::cast_possible_truncation)] // num_colors checked against u32 ids
            let c = c as u32;
            builder.begin_color(c);
            for (from, to, color) in edges.iter().filter(|(_, _, color)| color.0 == c) {
                builder.place(from.0, to.0, color.0);
            }
            builder.finish_color(c);
        }

        Ok(builder.build(edges.len()))
    }

    /// Get number of vertices
    #[must_use]
    pub const fn num_vertices(&self) -> usize {
        self.num_vertices
    }

    /// Get number of edges declared at load time (all colors)
    #[must_use]
    pub const fn num_edges(&self) -> usize {
        self.num_edges
    }

    /// Get number of colors
    #[must_use]
    pub fn num_colors(&self) -> usize {
        self.colors.len()
    }

    /// Whether edge lines were stored in both directions at construction
    #[must_use]
    pub const fn is_symmetric(&self) -> bool {
        self.symmetric
    }

    /// Number of live column entries of a color (both directions counted)
    ///
    /// # Errors
    ///
    /// Returns error if the color is out of range
    pub fn live_entries(&self, color: Color) -> GraphResult<usize> {
        Ok(self.color_index(color)?.live_len())
    }

    /// Number of slots tombstoned since the last reconstruction
    ///
    /// # Errors
    ///
    /// Returns error if the color is out of range
    pub fn pending_tombstones(&self, color: Color) -> GraphResult<usize> {
        Ok(self.color_index(color)?.tombstones)
    }

    /// Fail with [`GraphError::PendingTombstones`] unless `color` is compacted
    ///
    /// Merge-based statistics need sorted live slices, which tombstones
    /// break until [`ColoredCsr::reconstruct`] runs.
    ///
    /// # Errors
    ///
    /// Returns error if the color is out of range or has pending tombstones
    pub fn ensure_reconstructed(&self, color: Color) -> GraphResult<()> {
        match self.pending_tombstones(color)? {
            0 => Ok(()),
            count => Err(GraphError::PendingTombstones {
                color: color.0,
                count,
            }),
        }
    }

    /// Half-open range of `v`'s slice in the column array of `color`
    ///
    /// # Errors
    ///
    /// Returns error if the vertex or color is out of range
    pub fn neighbor_range(&self, v: NodeId, color: Color) -> GraphResult<Range<usize>> {
        let index = self.color_index(color)?;
        let v = self.check_vertex(v)?;
        Ok(index.range(v))
    }

    /// Neighbors of `v` in `color`, sorted ascending
    ///
    /// Until [`ColoredCsr::reconstruct`] runs, the slice may contain
    /// [`REMOVED`] entries left by [`ColoredCsr::remove_edge`].
    ///
    /// # Errors
    ///
    /// Returns error if the vertex or color is out of range
    pub fn neighbors(&self, v: NodeId, color: Color) -> GraphResult<&[u32]> {
        let index = self.color_index(color)?;
        let v = self.check_vertex(v)?;
        Ok(&index.col_indices[index.range(v)])
    }

    /// Degree of `v` in `color`
    ///
    /// # Errors
    ///
    /// Returns error if the vertex or color is out of range
    pub fn degree(&self, v: NodeId, color: Color) -> GraphResult<usize> {
        Ok(self.neighbor_range(v, color)?.len())
    }

    /// Destination id stored at a column slot
    ///
    /// # Errors
    ///
    /// Returns error if the color or slot is out of range
    pub fn to_vertex(&self, pos: usize, color: Color) -> GraphResult<u32> {
        let index = self.color_index(color)?;
        index
            .col_indices
            .get(pos)
            .copied()
            .ok_or(GraphError::SlotOutOfRange {
                pos,
                len: index.col_indices.len(),
            })
    }

    /// Count common entries of two sorted neighbor ranges of the same color
    ///
    /// Two-pointer merge: advance the smaller side, count and advance both on
    /// a match. Both ranges must come from live slices (e.g.
    /// [`ColoredCsr::neighbor_range`] after reconstruction).
    ///
    /// # Errors
    ///
    /// Returns error if the color is out of range or a range leaves the live
    /// part of the column array
    pub fn intersection_count(
        &self,
        r1: Range<usize>,
        r2: Range<usize>,
        color: Color,
    ) -> GraphResult<usize> {
        let index = self.color_index(color)?;
        let len = index.live_len();
        for r in [&r1, &r2] {
            if r.start > r.end || r.end > len {
                return Err(GraphError::SlotOutOfRange { pos: r.end, len });
            }
        }
        Ok(intersect_sorted(
            &index.col_indices[r1],
            &index.col_indices[r2],
        ))
    }

    /// Overwrite a column slot with [`REMOVED`]
    ///
    /// # Errors
    ///
    /// Returns error if the color or slot is out of range
    pub fn tombstone(&mut self, pos: usize, color: Color) -> GraphResult<()> {
        let index = self.color_index_mut(color)?;
        let len = index.live_len();
        let slot = index
            .col_indices
            .get_mut(pos)
            .filter(|_| pos < len)
            .ok_or(GraphError::SlotOutOfRange { pos, len })?;
        if *slot != REMOVED {
            *slot = REMOVED;
            index.tombstones += 1;
        }
        Ok(())
    }

    /// Remove every instance of the undirected edge `from -- to` in `color`
    ///
    /// Tombstones all matches in both endpoints' slices. The removal becomes
    /// visible to ranges after [`ColoredCsr::reconstruct`].
    ///
    /// Returns `Ok(true)` if both directions were found and `Ok(false)` if
    /// neither was (nothing is written).
    ///
    /// # Errors
    ///
    /// Returns error if an id is out of range, or
    /// [`GraphError::AsymmetricEdge`] if only one direction was found. The
    /// found direction has already been tombstoned in that case.
    pub fn remove_edge(&mut self, from: NodeId, to: NodeId, color: Color) -> GraphResult<bool> {
        let from_range = self.neighbor_range(from, color)?;
        let to_range = self.neighbor_range(to, color)?;
        let index = self.color_index_mut(color)?;

        let found_forward = index.tombstone_matches(from_range, to.0);
        if from == to {
            return Ok(found_forward > 0);
        }
        let found_backward = index.tombstone_matches(to_range, from.0);

        match (found_forward > 0, found_backward > 0) {
            (true, true) => Ok(true),
            (false, false) => Ok(false),
            _ => {
                warn!(
                    from = from.0,
                    to = to.0,
                    color = color.0,
                    found_forward,
                    found_backward,
                    "Edge found in one direction only"
                );
                Err(GraphError::AsymmetricEdge {
                    from: from.0,
                    to: to.0,
                    color: color.0,
                })
            }
        }
    }

    /// Compact tombstoned slots of `color` and rebuild its offsets
    ///
    /// A no-op when nothing was tombstoned since the last call. The column
    /// array keeps its length; slots past the new live end hold [`REMOVED`].
    ///
    /// # Errors
    ///
    /// Returns error if the color is out of range
    pub fn reconstruct(&mut self, color: Color) -> GraphResult<()> {
        let num_vertices = self.num_vertices;
        let index = self.color_index_mut(color)?;
        if index.tombstones == 0 {
            return Ok(());
        }

        let old_live = index.live_len();

        // Offsets from survivors
        let mut row_offsets = Vec::with_capacity(num_vertices + 1);
        let mut sum = 0_u32;
        row_offsets.push(sum);
        for v in 0..num_vertices {
            #[allow(clippy::cast_possible_truncation)] // bounded by the u32 offsets
            let survivors = index.col_indices[index.range(v)]
                .iter()
                .filter(|&&to| to != REMOVED)
                .count() as u32;
            sum += survivors;
            row_offsets.push(sum);
        }

        // Close gaps left to right
        let mut cur = 0;
        for nxt in 0..old_live {
            let to = index.col_indices[nxt];
            if to != REMOVED {
                index.col_indices[cur] = to;
                cur += 1;
            }
        }
        index.col_indices[cur..old_live].fill(REMOVED);

        debug!(
            color = color.0,
            removed = old_live - cur,
            live = cur,
            "Reconstructed CSR index"
        );

        index.row_offsets = row_offsets;
        index.tombstones = 0;
        Ok(())
    }

    /// Reconstruct every color
    ///
    /// # Errors
    ///
    /// Propagates errors from [`ColoredCsr::reconstruct`]
    pub fn reconstruct_all(&mut self) -> GraphResult<()> {
        for color in self.colors() {
            self.reconstruct(color)?;
        }
        Ok(())
    }

    /// Compacted single-color copy of `color`, renumbered as color 0
    ///
    /// Tombstones are squeezed out and the dead tail dropped, so the copy
    /// holds exactly the live entries. `num_edges` counts the live edge
    /// lines of the color.
    ///
    /// # Errors
    ///
    /// Returns error if the color is out of range
    pub fn extract_color(&self, color: Color) -> GraphResult<Self> {
        let index = self.color_index(color)?.clone();
        let mut single = Self {
            num_vertices: self.num_vertices,
            num_edges: 0,
            symmetric: self.symmetric,
            colors: vec![index],
        };
        single.reconstruct(Color(0))?;

        let index = &mut single.colors[0];
        let live = index.live_len();
        index.col_indices.truncate(live);
        single.num_edges = if single.symmetric { live / 2 } else { live };
        Ok(single)
    }

    /// Iterate over all color ids
    pub fn colors(&self) -> impl Iterator<Item = Color> {
        #[allow(clippy::cast_possible_truncation)] // colors are addressed by u32 ids
        let num_colors = self.colors.len() as u32;
        (0..num_colors).map(Color)
    }

    /// Iterate over all vertex ids
    pub fn vertices(&self) -> impl Iterator<Item = NodeId> {
        #[allow(clippy::cast_possible_truncation)] // bounded by REMOVED at construction
        let num_vertices = self.num_vertices as u32;
        (0..num_vertices).map(NodeId)
    }

    /// Get CSR components of a color: (`row_offsets`, `col_indices`)
    ///
    /// `col_indices` includes the dead tail past the live end.
    ///
    /// # Errors
    ///
    /// Returns error if the color is out of range
    pub fn csr_components(&self, color: Color) -> GraphResult<(&[u32], &[u32])> {
        let index = self.color_index(color)?;
        Ok((&index.row_offsets, &index.col_indices))
    }

    fn color_index(&self, color: Color) -> GraphResult<&ColorIndex> {
        self.colors
            .get(color.0 as usize)
            .ok_or(GraphError::ColorOutOfRange {
                color: color.0,
                num_colors: self.colors.len(),
            })
    }

    fn color_index_mut(&mut self, color: Color) -> GraphResult<&mut ColorIndex> {
        let num_colors = self.colors.len();
        self.colors
            .get_mut(color.0 as usize)
            .ok_or(GraphError::ColorOutOfRange {
                color: color.0,
                num_colors,
            })
    }

    fn check_vertex(&self, v: NodeId) -> GraphResult<usize> {
        if (v.0 as usize) < self.num_vertices {
            Ok(v.0 as usize)
        } else {
            Err(GraphError::VertexOutOfRange {
                vertex: v.0,
                num_vertices: self.num_vertices,
            })
        }
    }
}

/// Count common entries of two ascending slices
///
/// [`REMOVED`] never counts as a match.
///
/// # Example
///
/// ```
/// use chroma_graph::intersect_sorted;
///
/// assert_eq!(intersect_sorted(&[1, 3, 5, 7], &[2, 3, 7, 9]), 2);
/// assert_eq!(intersect_sorted(&[], &[1, 2]), 0);
/// ```
#[must_use]
pub fn intersect_sorted(a: &[u32], b: &[u32]) -> usize {
    let (mut i, mut j) = (0, 0);
    let mut count = 0;
    while i < a.len() && j < b.len() {
        match a[i].cmp(&b[j]) {
            std::cmp::Ordering::Less => i += 1,
            std::cmp::Ordering::Greater => j += 1,
            std::cmp::Ordering::Equal => {
                if a[i] != REMOVED {
                    count += 1;
                }
                i += 1;
                j += 1;
            }
        }
    }
    count
}
