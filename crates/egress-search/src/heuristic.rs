//! A* heuristics.
//!
//! The only goal-directed heuristic is [`NearestExit`]: Manhattan distance
//! from a vertex's floor-plan position to the closest exit.  It never
//! overestimates the remaining cost as long as no edge is cheaper than the
//! grid distance between its endpoints; [`check_admissible`] verifies that
//! precondition for a whole graph.

use egress_core::{GridPos, VertexId};
use egress_graph::Graph;

use crate::{SearchError, SearchResult};

/// Lower bound on the remaining cost from a vertex to the nearest goal.
pub trait Heuristic {
    fn estimate(&self, v: VertexId) -> f64;

    /// Divide every estimate by `divisor`.  Used when edge costs become
    /// travel times so the bound stays admissible at the fastest velocity.
    fn rescale(&mut self, divisor: f64);
}

/// `h = 0`: turns A* into Dijkstra.
#[derive(Copy, Clone, Debug, Default)]
pub struct Zero;

impl Heuristic for Zero {
    #[inline]
    fn estimate(&self, _v: VertexId) -> f64 {
        0.0
    }

    fn rescale(&mut self, _divisor: f64) {}
}

/// Manhattan distance to the nearest of several exits.
#[derive(Clone, Debug)]
pub struct NearestExit {
    positions: Vec<GridPos>,
    exits: Vec<GridPos>,
    divisor: f64,
}

impl NearestExit {
    /// Snapshot the positions of every vertex and of the exits.
    ///
    /// Fails with [`SearchError::MissingPosition`] if any vertex of `graph`
    /// lacks a position, or [`SearchError::UnknownVertex`] for a bad exit.
    pub fn new(graph: &Graph, exits: &[VertexId]) -> SearchResult<Self> {
        let positions = graph
            .vertices()
            .map(|v| graph.position(v).ok_or(SearchError::MissingPosition(v)))
            .collect::<SearchResult<Vec<_>>>()?;
        let exits = exits
            .iter()
            .map(|&e| positions.get(e.index()).copied().ok_or(SearchError::UnknownVertex(e)))
            .collect::<SearchResult<Vec<_>>>()?;
        Ok(Self { positions, exits, divisor: 1.0 })
    }
}

impl Heuristic for NearestExit {
    fn estimate(&self, v: VertexId) -> f64 {
        let here = self.positions[v.index()];
        let steps = self.exits.iter().map(|&e| here.manhattan(e)).min().unwrap_or(0);
        steps as f64 / self.divisor
    }

    fn rescale(&mut self, divisor: f64) {
        self.divisor *= divisor;
    }
}

/// Verify that every edge weighs at least the Manhattan distance between its
/// endpoints, which makes [`NearestExit`] admissible and consistent.
pub fn check_admissible(graph: &Graph) -> SearchResult<()> {
    for (a, b, weight) in graph.edges() {
        let pa = graph.position(a).ok_or(SearchError::MissingPosition(a))?;
        let pb = graph.position(b).ok_or(SearchError::MissingPosition(b))?;
        let distance = pa.manhattan(pb);
        if weight < distance {
            return Err(SearchError::InadmissibleHeuristic { a, b, weight, distance });
        }
    }
    Ok(())
}
