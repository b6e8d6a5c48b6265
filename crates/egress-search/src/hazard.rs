//! Hazard front propagation.
//!
//! The hazard (fire, smoke…) starts at every source at time 0 and spreads
//! along graph edges.  Crossing `u → n` takes
//!
//! ```text
//! weight(u, n) / velocity(n) * slowdown
//! ```
//!
//! and a vertex's arrival time is the earliest time any branch of the front
//! reaches it.  This is a multi-source Dijkstra over one shared frontier that
//! runs to exhaustion; vertices the front never reaches keep `None`.

use egress_core::{HazardConfig, VertexId};
use egress_graph::{Graph, GraphSignature};

use crate::frontier::Frontier;
use crate::state::{DistanceTable, SearchState, VisitedSet};
use crate::step::{Outcome, Progressive, Step};
use crate::velocity::{self, EdgeCost, VelocityField};
use crate::{SearchError, SearchResult};

// ── HazardTimes ───────────────────────────────────────────────────────────────

/// Hazard arrival time per vertex, plus what it was computed from.
///
/// Immutable once built.  Share it between searches with `Arc`.
#[derive(Clone, Debug, PartialEq)]
pub struct HazardTimes {
    times:     DistanceTable,
    sources:   Vec<VertexId>,
    signature: GraphSignature,
    config:    HazardConfig,
}

impl HazardTimes {
    /// A table with no hazard anywhere: no vertex is ever cut off.
    pub fn none(graph: &Graph) -> Self {
        Self {
            times:     DistanceTable::unreached(graph.vertex_count()),
            sources:   Vec::new(),
            signature: graph.signature(),
            config:    HazardConfig::default(),
        }
    }

    /// Propagate the hazard from `sources` to exhaustion.
    pub fn compute(
        graph:    &Graph,
        sources:  &[VertexId],
        velocity: &dyn VelocityField,
        config:   &HazardConfig,
    ) -> SearchResult<Self> {
        Propagation::new(graph, sources, velocity, config).map(Propagation::finish)
    }

    /// Arrival time of the hazard at `v`; `None` if it never arrives.
    #[inline]
    pub fn time(&self, v: VertexId) -> Option<f64> {
        self.times.get(v)
    }

    /// `true` if an occupant arriving at `v` at `arrival` would meet the
    /// hazard there (it arrived earlier or at the same instant).
    #[inline]
    pub fn blocks(&self, v: VertexId, arrival: f64) -> bool {
        self.time(v).is_some_and(|h| arrival >= h)
    }

    /// Vertices the hazard has reached by time `t`, in ascending id order.
    pub fn engulfed_by(&self, t: f64) -> impl Iterator<Item = VertexId> + '_ {
        self.times
            .iter()
            .filter_map(move |(v, h)| h.filter(|&h| h <= t).map(|_| v))
    }

    pub fn table(&self) -> &DistanceTable {
        &self.times
    }

    /// Sources, sorted and deduplicated.
    pub fn sources(&self) -> &[VertexId] {
        &self.sources
    }

    pub fn has_hazard(&self) -> bool {
        !self.sources.is_empty()
    }

    pub fn signature(&self) -> GraphSignature {
        self.signature
    }

    pub fn config(&self) -> &HazardConfig {
        &self.config
    }

    pub(crate) fn check_graph(&self, graph: &Graph) -> SearchResult<()> {
        let expected = graph.signature();
        if self.signature != expected {
            return Err(SearchError::HazardMismatch { expected, found: self.signature });
        }
        Ok(())
    }
}

// ── Propagation ───────────────────────────────────────────────────────────────

/// Step-driven hazard propagation.
///
/// Use [`HazardTimes::compute`] for a one-shot table; step a `Propagation`
/// directly to animate the spreading front.
pub struct Propagation<'a> {
    graph:   &'a Graph,
    cost:    EdgeCost<'a>,
    sources: Vec<VertexId>,
    config:  HazardConfig,
    state:   SearchState,
    outcome: Option<Outcome>,
}

impl<'a> Propagation<'a> {
    /// Validate inputs and seed every source at time 0.
    ///
    /// Fails on an unknown source, a bad slowdown, or a velocity that is not
    /// finite and positive somewhere on the graph.  An empty source set is
    /// valid and finishes on the first step.
    pub fn new(
        graph:    &'a Graph,
        sources:  &[VertexId],
        velocity: &'a dyn VelocityField,
        config:   &HazardConfig,
    ) -> SearchResult<Self> {
        config.validate()?;
        for &s in sources {
            graph.require(s)?;
        }
        velocity::validate(graph, velocity)?;

        let mut sources = sources.to_vec();
        sources.sort_unstable();
        sources.dedup();

        let mut state = SearchState::new(graph.vertex_count());
        for &s in &sources {
            state.seed(s, 0.0);
        }

        Ok(Self {
            graph,
            cost: EdgeCost::Travel { field: velocity, scale: config.slowdown },
            sources,
            config: config.clone(),
            state,
            outcome: None,
        })
    }

    pub fn sources(&self) -> &[VertexId] {
        &self.sources
    }

    /// Run to exhaustion and return the arrival-time table.
    pub fn finish(mut self) -> HazardTimes {
        self.run_to_end();
        log::debug!(
            "hazard from {} source(s) reached {}/{} vertices",
            self.sources.len(),
            self.state.visited.len(),
            self.graph.vertex_count()
        );
        HazardTimes {
            times:     self.state.dist,
            sources:   self.sources,
            signature: self.graph.signature(),
            config:    self.config,
        }
    }
}

impl Progressive for Propagation<'_> {
    fn step(&mut self) -> Step {
        if let Some(outcome) = self.outcome {
            return Step::Done(outcome);
        }

        let Some((u, t)) = self.state.settle_next() else {
            self.outcome = Some(Outcome::Exhausted);
            return Step::Done(Outcome::Exhausted);
        };

        let exhausted_radius = self
            .config
            .max_hops
            .is_some_and(|max| self.state.hops[u.index()] >= max);
        if !exhausted_radius {
            let graph = self.graph;
            for (n, weight) in graph.neighbors(u) {
                if self.state.visited.contains(n) {
                    continue;
                }
                let arrival = t + self.cost.cost(weight, n);
                self.state.relax(u, n, arrival, arrival);
            }
        }

        log::trace!("hazard reached {u} at {t}");
        if !self.state.prune_stale() {
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
