//! What a run reports, step by step and at the end.

use std::sync::Arc;
use std::time::Duration;

use egress_core::{RunId, VertexId};
use egress_search::{HazardTimes, Outcome};

use crate::Algorithm;

/// Progress after one [`Run::step`](crate::Run::step).
///
/// Every snapshot owns its own copy of the visited set and frontier, so a
/// host that keeps all snapshots of a run over `n` vertices holds O(n²)
/// vertex ids.  Keep only the ones you render, or use
/// [`Planner::plan`](crate::Planner::plan) when no animation is needed.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Snapshot {
    pub run:      RunId,
    /// 1-based step number.
    pub step:     usize,
    /// Vertex settled by this step; `None` only when a hazard-spread run had
    /// no sources to start from.
    pub settled:  Option<VertexId>,
    /// Predecessor chain from the source to `settled`.
    pub path:     Vec<VertexId>,
    /// Every vertex settled so far, in settle order.
    pub visited:  Vec<VertexId>,
    /// Distinct queued vertices not yet settled, ascending.
    pub frontier: Vec<VertexId>,
    /// Time since the first step.
    pub elapsed:  Duration,
    pub finished: bool,
}

/// Final result of a run.  Immutable once returned.
#[derive(Clone, Debug)]
pub struct RunResult {
    pub run:          RunId,
    pub algorithm:    Algorithm,
    pub outcome:      Outcome,
    /// Origin to exit inclusive; empty when no exit is reachable and for
    /// hazard-spread runs.
    pub path:         Vec<VertexId>,
    /// Settle order.  For a hazard-spread run, every vertex the hazard reached.
    pub visited:      Vec<VertexId>,
    /// Wall-clock time from the first step to completion.
    pub elapsed:      Duration,
    /// Number of `step` calls the run took.
    pub steps:        usize,
    /// Weight sum (plain runs) or travel time (hazard-aware runs) of `path`.
    pub cost:         Option<f64>,
    pub hazard_times: Option<Arc<HazardTimes>>,
}

impl RunResult {
    pub fn elapsed_ms(&self) -> f64 {
        self.elapsed.as_secs_f64() * 1_000.0
    }

    /// `true` for a route run that found no exit.
    pub fn is_unreachable(&self) -> bool {
        self.algorithm.is_route() && self.path.is_empty()
    }
}
