//! Planner and hazard-model configuration.
//!
//! # Hazard time scale
//!
//! Occupants and the hazard move on the same graph but at different paces.
//! An occupant crossing edge `u → n` spends `weight / velocity(n)` time units;
//! the hazard spends that amount multiplied by [`HazardConfig::slowdown`].
//! The slowdown is a calibration knob for how sluggish the hazard medium is
//! relative to walking speed, not a physical constant.

use crate::{CoreError, CoreResult};

// ── HazardConfig ──────────────────────────────────────────────────────────────

/// Parameters of the hazard-propagation model.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HazardConfig {
    /// Multiplier applied to every hazard edge-crossing time.  Must be finite
    /// and > 0.  `1.0` makes the hazard advance exactly as fast as an occupant
    /// would.  Default: 1.0.
    pub slowdown: f64,

    /// Maximum number of edges the hazard can spread away from its nearest
    /// source.  Vertices reached at this depth still get an arrival time but
    /// are not expanded.  `None` = unbounded.  Default: `None`.
    pub max_hops: Option<u32>,
}

impl HazardConfig {
    /// Check the slowdown factor.
    pub fn validate(&self) -> CoreResult<()> {
        if !self.slowdown.is_finite() || self.slowdown <= 0.0 {
            return Err(CoreError::Config(format!(
                "hazard slowdown must be finite and > 0, got {}",
                self.slowdown
            )));
        }
        Ok(())
    }

    /// Builder-style setter for [`slowdown`](Self::slowdown).
    pub fn with_slowdown(mut self, slowdown: f64) -> Self {
        self.slowdown = slowdown;
        self
    }

    /// Builder-style setter for [`max_hops`](Self::max_hops).
    pub fn with_max_hops(mut self, hops: u32) -> Self {
        self.max_hops = Some(hops);
        self
    }
}

impl Default for HazardConfig {
    fn default() -> Self {
        Self { slowdown: 1.0, max_hops: None }
    }
}

// ── PlannerConfig ─────────────────────────────────────────────────────────────

/// Top-level planner configuration.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlannerConfig {
    /// Hazard model used by the hazard-aware algorithms.
    pub hazard: HazardConfig,

    /// Before an A* run, verify that no edge is cheaper than the Manhattan
    /// distance between its endpoints.  When that fails the heuristic may
    /// overestimate and A* can return a suboptimal path, so the planner
    /// refuses to run.  Default: `true`.
    pub strict_heuristic: bool,
}

impl PlannerConfig {
    pub fn validate(&self) -> CoreResult<()> {
        self.hazard.validate()
    }
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self { hazard: HazardConfig::default(), strict_heuristic: true }
    }
}
