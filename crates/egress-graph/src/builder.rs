//! Incremental graph construction.

use rustc_hash::FxHashMap;

use egress_core::{GridPos, VertexId};

use crate::{Graph, GraphError, GraphResult};

/// Construct a [`Graph`] incrementally, then call [`build`](Self::build).
///
/// The builder accepts vertices and undirected edges in any order.  `build()`
/// validates the graph invariants (known endpoints, no self-loops, no
/// duplicate edges, weights ≥ 1, unique labels and positions), then lays the
/// adjacency out in CSR form.
///
/// # Example
///
/// ```
/// use egress_core::GridPos;
/// use egress_graph::GraphBuilder;
///
/// let mut b = GraphBuilder::new();
/// let hall  = b.add_vertex_at("hall", GridPos::new(0, 0));
/// let exit  = b.add_vertex_at("exit", GridPos::new(1, 0));
/// b.add_edge(hall, exit, 3);
/// let g = b.build().unwrap();
/// assert_eq!(g.vertex_count(), 2);
/// assert_eq!(g.weight(exit, hall), Ok(3));
/// ```
#[derive(Default)]
pub struct GraphBuilder {
    labels:    Vec<String>,
    positions: Vec<Option<GridPos>>,
    raw_edges: Vec<RawEdge>,
}

struct RawEdge {
    a:      VertexId,
    b:      VertexId,
    weight: u32,
}

impl GraphBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-allocate for the expected number of vertices and edges.
    pub fn with_capacity(vertices: usize, edges: usize) -> Self {
        Self {
            labels:    Vec::with_capacity(vertices),
            positions: Vec::with_capacity(vertices),
            raw_edges: Vec::with_capacity(edges),
        }
    }

    /// Add an unpositioned vertex and return its `VertexId` (sequential from 0).
    pub fn add_vertex(&mut self, label: impl Into<String>) -> VertexId {
        self.push_vertex(label.into(), None)
    }

    /// Add a vertex placed at `pos` on the floor plan.
    pub fn add_vertex_at(&mut self, label: impl Into<String>, pos: GridPos) -> VertexId {
        self.push_vertex(label.into(), Some(pos))
    }

    /// Add an **undirected** edge between `a` and `b`.
    pub fn add_edge(&mut self, a: VertexId, b: VertexId, weight: u32) {
        self.raw_edges.push(RawEdge { a, b, weight });
    }

    pub fn vertex_count(&self) -> usize { self.labels.len() }
    pub fn edge_count(&self) -> usize { self.raw_edges.len() }

    fn push_vertex(&mut self, label: String, pos: Option<GridPos>) -> VertexId {
        let id = VertexId(self.labels.len() as u32);
        self.labels.push(label);
        self.positions.push(pos);
        id
    }

    // ── Grid constructors ─────────────────────────────────────────────────

    /// A `cols × rows` 4-connected grid.
    ///
    /// Vertex `y * cols + x` sits at `(x, y)` and is labelled `"V{index}"`.
    /// `edge` is called once per pair of orthogonally adjacent cells and
    /// returns the edge weight, or `None` to place a wall between them.
    pub fn grid<F>(cols: u32, rows: u32, mut edge: F) -> Self
    where
        F: FnMut(GridPos, GridPos) -> Option<u32>,
    {
        let n = cols as usize * rows as usize;
        let mut b = Self::with_capacity(n, 2 * n);
        for y in 0..rows as i32 {
            for x in 0..cols as i32 {
                let i = b.vertex_count();
                b.add_vertex_at(format!("V{i}"), GridPos::new(x, y));
            }
        }
        let id = |x: i32, y: i32| VertexId((y as u32) * cols + x as u32);
        for y in 0..rows as i32 {
            for x in 0..cols as i32 {
                let here = GridPos::new(x, y);
                if x + 1 < cols as i32 {
                    let right = GridPos::new(x + 1, y);
                    if let Some(w) = edge(here, right) {
                        b.add_edge(id(x, y), id(x + 1, y), w);
                    }
                }
                if y + 1 < rows as i32 {
                    let below = GridPos::new(x, y + 1);
                    if let Some(w) = edge(here, below) {
                        b.add_edge(id(x, y), id(x, y + 1), w);
                    }
                }
            }
        }
        b
    }

    /// A wall-free grid where every edge has the same weight.
    pub fn uniform_grid(cols: u32, rows: u32, weight: u32) -> Self {
        Self::grid(cols, rows, |_, _| Some(weight))
    }

    // ── Build ─────────────────────────────────────────────────────────────

    /// Validate and consume the builder, producing an immutable [`Graph`].
    ///
    /// Time complexity: O(E log E) for the edge sort.
    pub fn build(self) -> GraphResult<Graph> {
        let vertex_count = self.labels.len();
        if vertex_count > u32::MAX as usize {
            return Err(GraphError::TooManyVertices { max: u32::MAX as usize });
        }

        // ── Lookup tables (also catch duplicate labels/positions) ─────────
        let mut by_label = FxHashMap::default();
        by_label.reserve(vertex_count);
        for (i, label) in self.labels.iter().enumerate() {
            if by_label.insert(label.clone(), VertexId(i as u32)).is_some() {
                return Err(GraphError::DuplicateLabel(label.clone()));
            }
        }
        let mut by_pos = FxHashMap::default();
        for (i, pos) in self.positions.iter().enumerate() {
            if let Some(pos) = *pos {
                if by_pos.insert(pos, VertexId(i as u32)).is_some() {
                    return Err(GraphError::DuplicatePosition(pos));
                }
            }
        }

        // ── Edge validation on normalised (low, high) pairs ───────────────
        let mut undirected: Vec<(VertexId, VertexId, u32)> = Vec::with_capacity(self.raw_edges.len());
        for e in &self.raw_edges {
            for v in [e.a, e.b] {
                if v.index() >= vertex_count {
                    return Err(GraphError::UnknownVertex(v));
                }
            }
            if e.a == e.b {
                return Err(GraphError::SelfLoop(e.a));
            }
            if e.weight == 0 {
                return Err(GraphError::NonPositiveWeight { a: e.a, b: e.b });
            }
            undirected.push((e.a.min(e.b), e.a.max(e.b), e.weight));
        }
        undirected.sort_unstable_by_key(|&(a, b, _)| (a, b));
        if let Some(dup) = undirected.windows(2).find(|w| (w[0].0, w[0].1) == (w[1].0, w[1].1)) {
            return Err(GraphError::DuplicateEdge { a: dup[0].0, b: dup[0].1 });
        }

        // ── Both directions, sorted by (from, to) for CSR ─────────────────
        let mut directed: Vec<(VertexId, VertexId, u32)> = Vec::with_capacity(2 * undirected.len());
        for &(a, b, w) in &undirected {
            directed.push((a, b, w));
            directed.push((b, a, w));
        }
        directed.sort_unstable_by_key(|&(from, to, _)| (from, to));

        let mut adj_start = vec![0u32; vertex_count + 1];
        for &(from, _, _) in &directed {
            adj_start[from.index() + 1] += 1;
        }
        for i in 1..=vertex_count {
            adj_start[i] += adj_start[i - 1];
        }
        debug_assert_eq!(adj_start[vertex_count] as usize, directed.len());

        let total_weight = undirected.iter().map(|&(_, _, w)| w as u64).sum();

        Ok(Graph {
            labels: self.labels,
            positions: self.positions,
            adj_start,
            adj_to: directed.iter().map(|&(_, to, _)| to).collect(),
            adj_weight: directed.iter().map(|&(_, _, w)| w).collect(),
            by_label,
            by_pos,
            total_weight,
        })
    }
}
