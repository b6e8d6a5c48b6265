//! Route search from one origin to the nearest of several exits.
//!
//! One engine type covers all four route strategies:
//!
//! | Strategy             | Constructor                              |
//! |----------------------|------------------------------------------|
//! | Dijkstra             | [`Search::dijkstra`]                     |
//! | A*                   | [`Search::astar`]                        |
//! | Hazard-aware Dijkstra| `Search::dijkstra(..)?.avoiding(..)`     |
//! | Hazard-aware A*      | `Search::astar(..)?.avoiding(..)`        |
//!
//! # Costs
//!
//! Plain searches price an edge by its integer weight.  Hazard-aware searches
//! price it by occupant travel time, `weight / velocity(to)`, which is the
//! same clock the hazard arrival times run on.  A move into `n` that would
//! arrive at or after the hazard does is rejected outright: `n` is neither
//! relaxed nor queued through that edge.
//!
//! The origin itself is never subject to the hazard cutoff; the occupant is
//! already there at time 0.

use std::sync::Arc;

use egress_core::VertexId;
use egress_graph::Graph;

use crate::frontier::Frontier;
use crate::hazard::HazardTimes;
use crate::heuristic::{Heuristic, NearestExit, Zero};
use crate::state::{SearchState, VisitedSet};
use crate::step::{Outcome, Progressive, Step};
use crate::velocity::{self, EdgeCost, VelocityField};
use crate::{SearchError, SearchResult};

/// A single origin → nearest-exit search, advanced with
/// [`Progressive::step`].
pub struct Search<'a, H: Heuristic = Zero> {
    graph:     &'a Graph,
    origin:    VertexId,
    exits:     Vec<VertexId>,
    is_exit:   Vec<bool>,
    heuristic: H,
    cost:      EdgeCost<'a>,
    hazard:    Option<Arc<HazardTimes>>,
    state:     SearchState,
    outcome:   Option<Outcome>,
    /// Moves refused because the hazard would get there first.
    rejected:  usize,
}

impl<'a> Search<'a, Zero> {
    /// Uniform-cost search.
    pub fn dijkstra(graph: &'a Graph, origin: VertexId, exits: &[VertexId]) -> SearchResult<Self> {
        Self::with_heuristic(graph, origin, exits, Zero)
    }
}

impl<'a> Search<'a, NearestExit> {
    /// A* guided by Manhattan distance to the nearest exit.
    ///
    /// Every vertex needs a position.  The returned path is optimal when the
    /// heuristic is admissible; see [`check_admissible`](crate::check_admissible).
    pub fn astar(graph: &'a Graph, origin: VertexId, exits: &[VertexId]) -> SearchResult<Self> {
        validate_endpoints(graph, origin, exits)?;
        let heuristic = NearestExit::new(graph, exits)?;
        Self::with_heuristic(graph, origin, exits, heuristic)
    }
}

impl<'a, H: Heuristic> Search<'a, H> {
    /// Search with a caller-supplied heuristic.
    ///
    /// Fails with `UnknownVertex` if the origin or an exit is not in `graph`
    /// and with `NoExits` if `exits` is empty.  Duplicate exits are fine.
    pub fn with_heuristic(
        graph:     &'a Graph,
        origin:    VertexId,
        exits:     &[VertexId],
        heuristic: H,
    ) -> SearchResult<Self> {
        validate_endpoints(graph, origin, exits)?;

        let mut is_exit = vec![false; graph.vertex_count()];
        for e in exits {
            is_exit[e.index()] = true;
        }

        let mut search = Self {
            graph,
            origin,
            exits: exits.to_vec(),
            is_exit,
            heuristic,
            cost: EdgeCost::Weight,
            hazard: None,
            state: SearchState::new(graph.vertex_count()),
            outcome: None,
            rejected: 0,
        };
        search.reset();
        Ok(search)
    }

    /// Turn this search into its hazard-aware variant.
    ///
    /// Edge costs become travel times under `velocity` and moves that arrive
    /// no earlier than the hazard are rejected.  A heuristic is divided by the
    /// field's maximum velocity so it keeps bounding travel time from below.
    ///
    /// `hazard` must have been computed over this graph (checked by
    /// signature) and with the same velocity field (the caller's
    /// responsibility).  Any progress made so far is discarded.
    pub fn avoiding(
        mut self,
        hazard:   Arc<HazardTimes>,
        velocity: &'a dyn VelocityField,
    ) -> SearchResult<Self> {
        hazard.check_graph(self.graph)?;
        let max_velocity = velocity::validate(self.graph, velocity)?;
        self.heuristic.rescale(max_velocity);
        self.cost = EdgeCost::Travel { field: velocity, scale: 1.0 };
        self.hazard = Some(hazard);
        self.reset();
        Ok(self)
    }

    fn reset(&mut self) {
        self.state = SearchState::new(self.graph.vertex_count());
        self.state.seed(self.origin, self.heuristic.estimate(self.origin));
        self.outcome = None;
        self.rejected = 0;
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    pub fn graph(&self) -> &'a Graph {
        self.graph
    }

    pub fn origin(&self) -> VertexId {
        self.origin
    }

    pub fn exits(&self) -> &[VertexId] {
        &self.exits
    }

    pub fn hazard(&self) -> Option<&Arc<HazardTimes>> {
        self.hazard.as_ref()
    }

    pub fn is_hazard_aware(&self) -> bool {
        self.hazard.is_some()
    }

    /// Number of moves refused by the hazard cutoff so far.
    pub fn rejected_moves(&self) -> usize {
        self.rejected
    }

    /// Origin-to-exit path once an exit has been reached; empty otherwise.
    pub fn path(&self) -> Vec<VertexId> {
        match self.outcome {
            Some(Outcome::Reached(exit)) => self.state.path_to(exit),
            _ => Vec::new(),
        }
    }

    /// Cost (weight sum, or travel time when hazard-aware) of the reached
    /// exit.
    pub fn cost(&self) -> Option<f64> {
        match self.outcome {
            Some(Outcome::Reached(exit)) => self.state.dist.get(exit),
            _ => None,
        }
    }
}

impl<H: Heuristic> Progressive for Search<'_, H> {
    fn step(&mut self) -> Step {
        if let Some(outcome) = self.outcome {
            return Step::Done(outcome);
        }

        let Some((u, g)) = self.state.settle_next() else {
            log::debug!(
                "search from {} exhausted after settling {} vertices",
                self.origin,
                self.state.visited.len()
            );
            self.outcome = Some(Outcome::Exhausted);
            return Step::Done(Outcome::Exhausted);
        };

        if self.is_exit[u.index()] {
            log::debug!("search from {} reached exit {u} at cost {g}", self.origin);
            self.outcome = Some(Outcome::Reached(u));
            return Step::Done(Outcome::Reached(u));
        }

        let graph = self.graph;
        for (n, weight) in graph.neighbors(u) {
            if self.state.visited.contains(n) {
                continue;
            }
            let arrival = g + self.cost.cost(weight, n);
            if let Some(hazard) = &self.hazard {
                if hazard.blocks(n, arrival) {
                    self.rejected += 1;
                    continue;
                }
            }
            let priority = arrival + self.heuristic.estimate(n);
            self.state.relax(u, n, arrival, priority);
        }

        log::trace!("settled {u} at {g}; frontier holds {}", self.state.frontier.len());
        if !self.state.prune_stale() {
            log::debug!(
                "search from {} exhausted after settling {} vertices",
                self.origin,
                self.state.visited.len()
            );
            self.outcome = Some(Outcome::Exhausted);
            return Step::Drained(u);
        }
        Step::Settled(u)
    }

    fn outcome(&self) -> Option<Outcome> {
        self.outcome
    }

    fn visited(&self) -> &VisitedSet {
        &self.state.visited
    }

    fn frontier(&self) -> &Frontier {
        &self.state.frontier
    }

    fn distance(&self, v: VertexId) -> Option<f64> {
        self.state.dist.get(v)
    }

    fn path_to(&self, v: VertexId) -> Vec<VertexId> {
        if self.state.dist.get(v).is_none() {
            return Vec::new();
        }
        self.state.path_to(v)
    }
}

fn validate_endpoints(graph: &Graph, origin: VertexId, exits: &[VertexId]) -> SearchResult<()> {
    graph.require(origin)?;
    if exits.is_empty() {
        return Err(SearchError::NoExits);
    }
    for &e in exits {
        graph.require(e)?;
    }
    Ok(())
}

/// Sum of edge weights along `path`.
///
/// Fails with `InvalidEdge` if two consecutive vertices are not adjacent.
/// An empty or single-vertex path costs 0.
pub fn path_cost(graph: &Graph, path: &[VertexId]) -> SearchResult<u64> {
    path.windows(2)
        .map(|w| graph.weight(w[0], w[1]).map(u64::from))
        .sum::<Result<u64, _>>()
        .map_err(SearchError::from)
}

/// Occupant arrival time at each vertex of `path` under `velocity`.
///
/// The first entry (the origin) is 0.  Fails like [`path_cost`].
pub fn arrival_times(
    graph:    &Graph,
    path:     &[VertexId],
    velocity: &dyn VelocityField,
) -> SearchResult<Vec<f64>> {
    let mut times = Vec::with_capacity(path.len());
    let mut t = 0.0;
    if !path.is_empty() {
        times.push(t);
    }
    for w in path.windows(2) {
        let weight = graph.weight(w[0], w[1])?;
        t += EdgeCost::Travel { field: velocity, scale: 1.0 }.cost(weight, w[1]);
        times.push(t);
    }
    Ok(times)
}
