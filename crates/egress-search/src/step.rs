//! The step-driven engine interface.
//!
//! Every engine is a state machine.  One call to [`Progressive::step`] pops
//! frontier entries until it settles one vertex, relaxes that vertex's edges,
//! and returns.  Stale entries never count as a step, and the step that
//! settles the last queued vertex also reports the run as finished, so a run
//! over `n` vertices finishes within `n` calls.  The host decides when (and
//! whether) to call again.

use egress_core::VertexId;

use crate::frontier::Frontier;
use crate::state::VisitedSet;

/// How a finished run ended.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Outcome {
    /// A goal vertex was settled.
    Reached(VertexId),
    /// The frontier emptied.  For a route search this means no exit is
    /// reachable; for hazard propagation it is the normal end.
    Exhausted,
}

/// Result of one [`Progressive::step`] call.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Step {
    /// `vertex` was settled and its edges relaxed; the run continues.
    Settled(VertexId),
    /// `vertex` was settled and nothing unsettled is left queued.  The run
    /// is over with [`Outcome::Exhausted`].
    Drained(VertexId),
    /// The run is over.  Calling `step` again returns the same value without
    /// doing any work.
    Done(Outcome),
}

impl Step {
    pub fn is_done(self) -> bool {
        self.outcome().is_some()
    }

    /// How the run ended, if this step ended it.
    pub fn outcome(self) -> Option<Outcome> {
        match self {
            Step::Settled(_) => None,
            Step::Drained(_) => Some(Outcome::Exhausted),
            Step::Done(outcome) => Some(outcome),
        }
    }

    /// The vertex settled by this step, if any.
    pub fn settled(self) -> Option<VertexId> {
        match self {
            Step::Settled(v) | Step::Drained(v) | Step::Done(Outcome::Reached(v)) => Some(v),
            Step::Done(Outcome::Exhausted) => None,
        }
    }
}

/// A search or propagation engine that can be advanced one settle at a time.
pub trait Progressive {
    /// Perform one settle-and-relax step.
    fn step(&mut self) -> Step;

    /// `Some` once the run has finished.
    fn outcome(&self) -> Option<Outcome>;

    fn visited(&self) -> &VisitedSet;

    fn frontier(&self) -> &Frontier;

    /// Best-known cost of `v` so far.
    fn distance(&self, v: VertexId) -> Option<f64>;

    /// Predecessor chain from the run's source to `v`, source first.
    fn path_to(&self, v: VertexId) -> Vec<VertexId>;

    /// Step until the run finishes.
    fn run_to_end(&mut self) -> Outcome {
        loop {
            if let Some(outcome) = self.step().outcome() {
                return outcome;
            }
        }
    }
}
