//! Per-run search state.
//!
//! Every run owns exactly one [`SearchState`], allocated fresh when the run
//! is created and dropped with it.  Nothing here is shared between runs.

use egress_core::VertexId;

use crate::frontier::Frontier;

// ── DistanceTable ─────────────────────────────────────────────────────────────

/// Best-known cost per vertex; `None` means "not reached".
#[derive(Clone, Debug, PartialEq)]
pub struct DistanceTable(Vec<Option<f64>>);

impl DistanceTable {
    /// A table with every vertex unreached.
    pub fn unreached(len: usize) -> Self {
        Self(vec![None; len])
    }

    #[inline]
    pub fn get(&self, v: VertexId) -> Option<f64> {
        self.0.get(v.index()).copied().flatten()
    }

    #[inline]
    pub(crate) fn set(&mut self, v: VertexId, value: f64) {
        self.0[v.index()] = Some(value);
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// `(vertex, value)` for every vertex, in ascending id order.
    pub fn iter(&self) -> impl Iterator<Item = (VertexId, Option<f64>)> + '_ {
        self.0.iter().enumerate().map(|(i, &d)| (VertexId(i as u32), d))
    }

    /// Number of reached vertices.
    pub fn reached(&self) -> usize {
        self.0.iter().filter(|d| d.is_some()).count()
    }
}

// ── VisitedSet ────────────────────────────────────────────────────────────────

/// Vertices settled so far, in settle order, with O(1) membership.
///
/// The set only ever grows during a run.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct VisitedSet {
    order: Vec<VertexId>,
    mask: Vec<bool>,
}

impl VisitedSet {
    pub fn new(vertex_count: usize) -> Self {
        Self { order: Vec::new(), mask: vec![false; vertex_count] }
    }

    #[inline]
    pub fn contains(&self, v: VertexId) -> bool {
        self.mask.get(v.index()).copied().unwrap_or(false)
    }

    /// Mark `v` settled.  Returns `false` if it already was.
    pub(crate) fn insert(&mut self, v: VertexId) -> bool {
        if self.mask[v.index()] {
            return false;
        }
        self.mask[v.index()] = true;
        self.order.push(v);
        true
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Settled vertices in the order they were settled.
    pub fn as_slice(&self) -> &[VertexId] {
        &self.order
    }

    pub fn iter(&self) -> impl Iterator<Item = VertexId> + '_ {
        self.order.iter().copied()
    }
}

// ── SearchState ───────────────────────────────────────────────────────────────

/// Distances, predecessors, visited set, and frontier of one run.
#[derive(Debug)]
pub struct SearchState {
    pub(crate) dist: DistanceTable,
    pub(crate) pred: Vec<Option<VertexId>>,
    /// Edges from the nearest source along the best-known path.
    pub(crate) hops: Vec<u32>,
    pub(crate) visited: VisitedSet,
    pub(crate) frontier: Frontier,
}

impl SearchState {
    pub(crate) fn new(vertex_count: usize) -> Self {
        Self {
            dist: DistanceTable::unreached(vertex_count),
            pred: vec![None; vertex_count],
            hops: vec![0; vertex_count],
            visited: VisitedSet::new(vertex_count),
            frontier: Frontier::new(),
        }
    }

    /// Start the search at `source` with cost 0.
    pub(crate) fn seed(&mut self, source: VertexId, priority: f64) {
        if self.dist.get(source).is_none() {
            self.dist.set(source, 0.0);
            self.frontier.push(source, priority);
        }
    }

    /// Pop until an unsettled vertex comes out, settle it, and return it with
    /// its distance.  Stale entries are discarded on the way.
    pub(crate) fn settle_next(&mut self) -> Option<(VertexId, f64)> {
        while let Some((v, _)) = self.frontier.pop() {
            if !self.visited.insert(v) {
                log::trace!("discarding stale frontier entry for {v}");
                continue;
            }
            return Some((v, self.dist.get(v).unwrap_or(0.0)));
        }
        None
    }

    /// Discard stale entries from the head of the frontier.  Returns `true`
    /// if an unsettled vertex is still queued.
    pub(crate) fn prune_stale(&mut self) -> bool {
        while let Some((v, _)) = self.frontier.peek() {
            if !self.visited.contains(v) {
                return true;
            }
            log::trace!("discarding stale frontier entry for {v}");
            self.frontier.pop();
        }
        false
    }

    /// Record `tentative` for `to` via `from` if it strictly improves on the
    /// best-known distance, queueing `to` with `priority`.  Returns whether
    /// the distance improved.
    pub(crate) fn relax(&mut self, from: VertexId, to: VertexId, tentative: f64, priority: f64) -> bool {
        if self.dist.get(to).is_some_and(|d| tentative >= d) {
            return false;
        }
        self.dist.set(to, tentative);
        self.pred[to.index()] = Some(from);
        self.hops[to.index()] = self.hops[from.index()] + 1;
        self.frontier.push(to, priority);
        true
    }

    /// Follow predecessors from `to` back to the source.  The result runs
    /// source-first and always ends with `to`.
    pub(crate) fn path_to(&self, to: VertexId) -> Vec<VertexId> {
        let mut path = vec![to];
        let mut cur = to;
        while let Some(p) = self.pred[cur.index()] {
            path.push(p);
            cur = p;
        }
        path.reverse();
        path
    }
}
