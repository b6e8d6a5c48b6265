//! The `Planner`: owns the inputs shared by every run over one graph.

use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::sync::{Arc, Mutex, OnceLock, PoisonError};

use egress_core::{PlannerConfig, RunId, VertexId};
use egress_graph::Graph;
use egress_search::{
    check_admissible, HazardTimes, Progressive, Propagation, Search, SearchError, VelocityField,
};

use crate::run::ActiveGuard;
use crate::{Algorithm, PlanError, PlanRequest, PlanResult, Run, RunResult};

/// Plans evacuation routes over one immutable graph.
///
/// The graph, velocity field and configuration are fixed for the planner's
/// lifetime.  The hazard arrival-time table for the most recent source set
/// is cached and shared with every run that needs it.
///
/// # Runs
///
/// | Method         | Progressive | Guarded |
/// |----------------|-------------|---------|
/// | [`start`]      | yes         | yes     |
/// | [`plan`]       | no          | no      |
/// | [`plan_batch`] | no          | no      |
///
/// At most one guarded run is alive per planner; `plan` and `plan_batch`
/// may run alongside it.
///
/// [`start`]: Planner::start
/// [`plan`]: Planner::plan
/// [`plan_batch`]: Planner::plan_batch
///
/// Create via [`PlannerBuilder`][crate::PlannerBuilder] or [`Planner::new`].
pub struct Planner<'g, V: VelocityField> {
    graph:    &'g Graph,
    velocity: V,
    config:   PlannerConfig,
    /// Maximum of `velocity` over the graph.
    max_velocity: f64,
    /// Result of `check_admissible`, filled on the first A* launch.
    admissible: OnceLock<bool>,
    active:   AtomicBool,
    next_run: AtomicU32,
    hazard:   Mutex<Option<Arc<HazardTimes>>>,
}

impl<'g, V: VelocityField> Planner<'g, V> {
    /// A planner with the default configuration.
    pub fn new(graph: &'g Graph, velocity: V) -> PlanResult<Self> {
        Self::with_config(graph, velocity, PlannerConfig::default())
    }

    /// Validates `config` and checks `velocity` at every vertex.
    pub fn with_config(graph: &'g Graph, velocity: V, config: PlannerConfig) -> PlanResult<Self> {
        config.validate().map_err(SearchError::from)?;
        let max_velocity = egress_search::velocity::validate(graph, &velocity)?;
        Ok(Self {
            graph,
            velocity,
            config,
            max_velocity,
            admissible: OnceLock::new(),
            active: AtomicBool::new(false),
            next_run: AtomicU32::new(0),
            hazard: Mutex::new(None),
        })
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    pub fn graph(&self) -> &'g Graph {
        self.graph
    }

    pub fn velocity(&self) -> &V {
        &self.velocity
    }

    pub fn config(&self) -> &PlannerConfig {
        &self.config
    }

    pub fn max_velocity(&self) -> f64 {
        self.max_velocity
    }

    /// `true` if every edge weighs at least the grid distance between its
    /// endpoints, so A* is optimal.  The graph is scanned once, on first use.
    pub fn heuristic_is_admissible(&self) -> bool {
        *self.admissible.get_or_init(|| check_admissible(self.graph).is_ok())
    }

    /// `true` while a run from [`start`](Planner::start) is alive and
    /// unfinished.
    pub fn is_busy(&self) -> bool {
        self.active.load(Ordering::Acquire)
    }

    // ── Hazard cache ──────────────────────────────────────────────────────

    /// Hazard arrival times for `sources` (order and duplicates ignored).
    ///
    /// Served from the cache when the source set matches the last one
    /// computed; otherwise recomputed and cached.
    pub fn hazard_times(&self, sources: &[VertexId]) -> PlanResult<Arc<HazardTimes>> {
        let mut key = sources.to_vec();
        key.sort_unstable();
        key.dedup();

        let mut cache = self.hazard.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(cached) = cache.as_ref().filter(|h| h.sources() == key.as_slice()) {
            return Ok(Arc::clone(cached));
        }

        log::debug!("computing hazard times for sources {key:?}");
        let table = Arc::new(HazardTimes::compute(
            self.graph,
            &key,
            &self.velocity,
            &self.config.hazard,
        )?);
        *cache = Some(Arc::clone(&table));
        Ok(table)
    }

    /// Drop the cached hazard table.
    pub fn invalidate_hazard(&self) {
        *self.hazard.lock().unwrap_or_else(PoisonError::into_inner) = None;
    }

    // ── Runs ──────────────────────────────────────────────────────────────

    /// Start a progressive run.
    ///
    /// Fails with [`PlanError::ReentrantRun`] if a run from an earlier
    /// `start` is still alive and unfinished; that run is left untouched.
    /// The slot frees up when the run finishes or is dropped.
    pub fn start(&self, request: &PlanRequest) -> PlanResult<Run<'_>> {
        if self
            .active
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            log::warn!("rejected {} run: another run is active", request.algorithm);
            return Err(PlanError::ReentrantRun);
        }
        let guard = ActiveGuard(&self.active);
        // On error the guard drops here and frees the slot again.
        Ok(self.launch(request)?.guarded(guard))
    }

    /// Run `request` to completion without touching the progressive slot.
    pub fn plan(&self, request: &PlanRequest) -> PlanResult<RunResult> {
        Ok(self.launch(request)?.finish())
    }

    /// Plan every request independently; results are in request order.
    ///
    /// With the `parallel` feature the requests run on Rayon's thread pool.
    pub fn plan_batch(&self, requests: &[PlanRequest]) -> Vec<PlanResult<RunResult>> {
        #[cfg(not(feature = "parallel"))]
        {
            requests.iter().map(|r| self.plan(r)).collect()
        }

        #[cfg(feature = "parallel")]
        {
            use rayon::prelude::*;

            requests.par_iter().map(|r| self.plan(r)).collect()
        }
    }

    fn launch(&self, request: &PlanRequest) -> PlanResult<Run<'_>> {
        let algorithm = request.algorithm;
        let graph = self.graph;
        let field: &dyn VelocityField = &self.velocity;

        if algorithm.uses_heuristic()
            && self.config.strict_heuristic
            && !self.heuristic_is_admissible()
        {
            // Rescan only to name the offending edge.
            check_admissible(graph)?;
        }

        let mut hazard: Option<Arc<HazardTimes>> = None;
        let engine: Box<dyn Progressive + '_> = match algorithm {
            Algorithm::Dijkstra => {
                Box::new(Search::dijkstra(graph, origin(request)?, &request.exits)?)
            }
            Algorithm::AStar => {
                Box::new(Search::astar(graph, origin(request)?, &request.exits)?)
            }
            Algorithm::HazardDijkstra => {
                let search = Search::dijkstra(graph, origin(request)?, &request.exits)?;
                let table = hazard.insert(self.hazard_times(&request.hazard_sources)?);
                Box::new(search.avoiding(Arc::clone(table), field)?)
            }
            Algorithm::HazardAStar => {
                let search = Search::astar(graph, origin(request)?, &request.exits)?;
                let table = hazard.insert(self.hazard_times(&request.hazard_sources)?);
                Box::new(search.avoiding(Arc::clone(table), field)?)
            }
            Algorithm::HazardSpread => {
                hazard = Some(self.hazard_times(&request.hazard_sources)?);
                Box::new(Propagation::new(
                    graph,
                    &request.hazard_sources,
                    field,
                    &self.config.hazard,
                )?)
            }
        };

        let id = RunId(self.next_run.fetch_add(1, Ordering::Relaxed));
        log::debug!("run {id}: {algorithm} over {}", graph.signature());
        Ok(Run::new(id, algorithm, engine, hazard))
    }
}

fn origin(request: &PlanRequest) -> PlanResult<VertexId> {
    request.origin.ok_or(PlanError::MissingOrigin(request.algorithm))
}
