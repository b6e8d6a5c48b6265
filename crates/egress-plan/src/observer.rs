//! Run observer trait for progress reporting and animation.

use egress_core::RunId;

use crate::{Algorithm, RunResult, Snapshot};

/// Callbacks invoked by [`Run::drive`][crate::Run::drive].
///
/// All methods have default no-op implementations so implementors only need to
/// override what they care about.
///
/// # Example: frame counter
///
/// ```rust,ignore
/// struct Frames(usize);
///
/// impl RunObserver for Frames {
///     fn on_step(&mut self, snapshot: &Snapshot) {
///         self.0 += 1;
///         println!("frame {}: {} settled", self.0, snapshot.visited.len());
///     }
/// }
/// ```
pub trait RunObserver {
    /// Called once before the first step `drive` performs.
    fn on_start(&mut self, _run: RunId, _algorithm: Algorithm) {}

    /// Called after every step, the final one included.
    fn on_step(&mut self, _snapshot: &Snapshot) {}

    /// Called once with the finished result.
    fn on_finish(&mut self, _result: &RunResult) {}
}

/// A [`RunObserver`] that does nothing.
pub struct NoopObserver;

impl RunObserver for NoopObserver {}
