//! Immutable building graph.
//!
//! # Data layout
//!
//! Adjacency is stored in **Compressed Sparse Row (CSR)** form.  Given a
//! `VertexId v`, its incident edges occupy the slice:
//!
//! ```text
//! adj_to[ adj_start[v] .. adj_start[v+1] ]
//! ```
//!
//! with the matching weights at the same indices of `adj_weight`.  Every
//! undirected edge is stored twice (once per endpoint) with equal weight, and
//! each row is sorted by neighbour id so [`Graph::weight`] is a binary search.
//!
//! A `Graph` has no mutation API.  Changing the building means building a new
//! `Graph` with [`GraphBuilder`](crate::GraphBuilder).

use rustc_hash::FxHashMap;

use egress_core::{GridPos, VertexId};

use crate::{GraphError, GraphResult};

// ── GraphSignature ────────────────────────────────────────────────────────────

/// Cheap structural fingerprint of a graph.
///
/// Tables computed over one graph (hazard arrival times in particular) record
/// the signature so that consumers can reject a table built for a different
/// graph.  Two graphs with equal signatures are not guaranteed to be equal;
/// the check catches mix-ups, not forgeries.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GraphSignature {
    pub vertices: usize,
    pub edges: usize,
    pub total_weight: u64,
}

impl std::fmt::Display for GraphSignature {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}v/{}e/w{}", self.vertices, self.edges, self.total_weight)
    }
}

// ── Graph ─────────────────────────────────────────────────────────────────────

/// Symmetric, undirected, positively weighted graph in CSR format.
///
/// Do not construct directly; use [`GraphBuilder`](crate::GraphBuilder).
#[derive(Debug)]
pub struct Graph {
    // ── Vertex data ───────────────────────────────────────────────────────
    pub(crate) labels: Vec<String>,
    pub(crate) positions: Vec<Option<GridPos>>,

    // ── CSR adjacency ─────────────────────────────────────────────────────
    /// Row pointer.  Length = `vertex_count + 1`.
    pub(crate) adj_start: Vec<u32>,
    pub(crate) adj_to: Vec<VertexId>,
    pub(crate) adj_weight: Vec<u32>,

    // ── Lookup tables ─────────────────────────────────────────────────────
    pub(crate) by_label: FxHashMap<String, VertexId>,
    pub(crate) by_pos: FxHashMap<GridPos, VertexId>,

    pub(crate) total_weight: u64,
}

impl Graph {
    // ── Dimensions ────────────────────────────────────────────────────────

    pub fn vertex_count(&self) -> usize {
        self.labels.len()
    }

    /// Number of undirected edges.
    pub fn edge_count(&self) -> usize {
        self.adj_to.len() / 2
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn signature(&self) -> GraphSignature {
        GraphSignature {
            vertices: self.vertex_count(),
            edges: self.edge_count(),
            total_weight: self.total_weight,
        }
    }

    // ── Vertices ──────────────────────────────────────────────────────────

    #[inline]
    pub fn contains(&self, v: VertexId) -> bool {
        v.index() < self.labels.len()
    }

    /// `Ok(())` if `v` belongs to this graph, `UnknownVertex` otherwise.
    #[inline]
    pub fn require(&self, v: VertexId) -> GraphResult<()> {
        if self.contains(v) { Ok(()) } else { Err(GraphError::UnknownVertex(v)) }
    }

    /// All vertex IDs in ascending order.
    pub fn vertices(&self) -> impl Iterator<Item = VertexId> + '_ {
        (0..self.labels.len()).map(|i| VertexId(i as u32))
    }

    pub fn label(&self, v: VertexId) -> Option<&str> {
        self.labels.get(v.index()).map(String::as_str)
    }

    /// Resolve a vertex by label.
    pub fn vertex(&self, label: &str) -> Option<VertexId> {
        self.by_label.get(label).copied()
    }

    pub fn position(&self, v: VertexId) -> Option<GridPos> {
        self.positions.get(v.index()).copied().flatten()
    }

    /// The vertex placed at `pos`, if any.
    pub fn vertex_at(&self, pos: GridPos) -> Option<VertexId> {
        self.by_pos.get(&pos).copied()
    }

    /// `true` if every vertex has a position (required by A*).
    pub fn has_positions(&self) -> bool {
        self.positions.iter().all(Option::is_some)
    }

    // ── Edges ─────────────────────────────────────────────────────────────

    /// Neighbours of `v` with the weight of the connecting edge, in ascending
    /// neighbour order.
    ///
    /// `v` must belong to this graph; callers validate IDs up front with
    /// [`require`](Self::require).
    #[inline]
    pub fn neighbors(&self, v: VertexId) -> impl Iterator<Item = (VertexId, u32)> + '_ {
        let range = self.row(v);
        self.adj_to[range.clone()]
            .iter()
            .copied()
            .zip(self.adj_weight[range].iter().copied())
    }

    #[inline]
    pub fn degree(&self, v: VertexId) -> usize {
        self.row(v).len()
    }

    /// Weight of the edge between `a` and `b`.
    pub fn weight(&self, a: VertexId, b: VertexId) -> GraphResult<u32> {
        self.require(a)?;
        self.require(b)?;
        let range = self.row(a);
        self.adj_to[range.clone()]
            .binary_search(&b)
            .map(|i| self.adj_weight[range.start + i])
            .map_err(|_| GraphError::InvalidEdge { a, b })
    }

    /// Every undirected edge once, as `(a, b, weight)` with `a < b`.
    pub fn edges(&self) -> impl Iterator<Item = (VertexId, VertexId, u32)> + '_ {
        self.vertices().flat_map(move |a| {
            self.neighbors(a)
                .filter(move |&(b, _)| a < b)
                .map(move |(b, w)| (a, b, w))
        })
    }

    #[inline]
    fn row(&self, v: VertexId) -> std::ops::Range<usize> {
        let start = self.adj_start[v.index()] as usize;
        let end   = self.adj_start[v.index() + 1] as usize;
        start..end
    }
}
