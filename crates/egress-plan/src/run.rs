//! The progressive run state machine.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Instant;

use egress_core::{RunId, VertexId};
use egress_search::{HazardTimes, Outcome, Progressive};

use crate::{Algorithm, RunObserver, RunResult, Snapshot};

// ── ActiveGuard ───────────────────────────────────────────────────────────────

/// Holds a planner's "run active" flag while a progressive run is alive.
pub(crate) struct ActiveGuard<'p>(pub(crate) &'p AtomicBool);

impl Drop for ActiveGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

// ── Run ───────────────────────────────────────────────────────────────────────

/// One planning run, advanced a step at a time by the host.
///
/// ```text
///   start ──► step ──► step ──► … ──► step (finished = true) ──► None
/// ```
///
/// Each [`step`](Run::step) settles at most one vertex and returns a
/// [`Snapshot`].  The step that settles the last vertex is also the one
/// marked `finished`, so a run over `n` vertices yields at most `n`
/// snapshots.  The run never advances on its own: pace it from a timer,
/// iterate it, or hand it to [`drive`](Run::drive).  Dropping an unfinished
/// run cancels it.
pub struct Run<'p> {
    id:        RunId,
    algorithm: Algorithm,
    engine:    Box<dyn Progressive + 'p>,
    hazard:    Option<Arc<HazardTimes>>,
    /// Set on the first step; `elapsed` is measured from here.
    started:   Option<Instant>,
    steps:     usize,
    finished:  bool,
    result:    Option<RunResult>,
    guard:     Option<ActiveGuard<'p>>,
}

impl<'p> Run<'p> {
    pub(crate) fn new(
        id:        RunId,
        algorithm: Algorithm,
        engine:    Box<dyn Progressive + 'p>,
        hazard:    Option<Arc<HazardTimes>>,
    ) -> Self {
        Self {
            id,
            algorithm,
            engine,
            hazard,
            started: None,
            steps: 0,
            finished: false,
            result: None,
            guard: None,
        }
    }

    pub(crate) fn guarded(mut self, guard: ActiveGuard<'p>) -> Self {
        self.guard = Some(guard);
        self
    }

    pub fn id(&self) -> RunId {
        self.id
    }

    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Steps taken so far.
    pub fn steps(&self) -> usize {
        self.steps
    }

    /// The final result, once the run has finished.
    pub fn result(&self) -> Option<&RunResult> {
        self.result.as_ref()
    }

    /// Perform one settle-and-relax step.
    ///
    /// Returns `None` once the snapshot with `finished = true` has been
    /// handed out.
    pub fn step(&mut self) -> Option<Snapshot> {
        if self.finished {
            return None;
        }
        let started = *self.started.get_or_insert_with(Instant::now);

        let step = self.engine.step();
        self.steps += 1;

        let path = step
            .settled()
            .map(|v| self.engine.path_to(v))
            .unwrap_or_default();
        let visited = self.engine.visited();
        let mut frontier: Vec<VertexId> = self
            .engine
            .frontier()
            .vertices()
            .filter(|&v| !visited.contains(v))
            .collect();
        frontier.sort_unstable();
        frontier.dedup();

        let snapshot = Snapshot {
            run: self.id,
            step: self.steps,
            settled: step.settled(),
            path,
            visited: visited.as_slice().to_vec(),
            frontier,
            elapsed: started.elapsed(),
            finished: step.is_done(),
        };

        if let Some(outcome) = step.outcome() {
            self.complete(outcome, &snapshot);
        }
        Some(snapshot)
    }

    /// Step to the end and return the result.
    pub fn finish(mut self) -> RunResult {
        loop {
            if let Some(result) = self.result.take() {
                return result;
            }
            self.step();
        }
    }

    /// Step to the end, reporting every snapshot to `observer`.
    pub fn drive<O: RunObserver>(mut self, observer: &mut O) -> RunResult {
        observer.on_start(self.id, self.algorithm);
        while let Some(snapshot) = self.step() {
            observer.on_step(&snapshot);
        }
        let result = self.finish();
        observer.on_finish(&result);
        result
    }

    fn complete(&mut self, outcome: Outcome, last: &Snapshot) {
        let (path, cost) = match outcome {
            Outcome::Reached(exit) => (self.engine.path_to(exit), self.engine.distance(exit)),
            Outcome::Exhausted => (Vec::new(), None),
        };
        log::debug!(
            "run {} ({}) finished after {} steps: {:?}, {} visited",
            self.id,
            self.algorithm,
            self.steps,
            outcome,
            last.visited.len()
        );
        self.result = Some(RunResult {
            run: self.id,
            algorithm: self.algorithm,
            outcome,
            path,
            visited: last.visited.clone(),
            elapsed: last.elapsed,
            steps: self.steps,
            cost,
            hazard_times: self.hazard.clone(),
        });
        self.finished = true;
        self.guard = None;
    }
}

impl Iterator for Run<'_> {
    type Item = Snapshot;

    fn next(&mut self) -> Option<Snapshot> {
        self.step()
    }
}
