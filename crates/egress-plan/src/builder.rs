//! Fluent builder for constructing a [`Planner`].

use egress_core::{HazardConfig, PlannerConfig};
use egress_graph::Graph;
use egress_search::VelocityField;

use crate::{PlanResult, Planner};

/// Fluent builder for [`Planner<V>`].
///
/// # Required inputs
///
/// - [`Graph`]: the building, borrowed for the planner's lifetime
/// - `V: VelocityField`: movement speed per vertex
///
/// # Optional inputs (have defaults)
///
/// | Method                    | Default                      |
/// |---------------------------|------------------------------|
/// | `.config(c)`              | `PlannerConfig::default()`   |
/// | `.hazard(h)`              | slowdown 1.0, unbounded      |
/// | `.slowdown(s)`            | 1.0                          |
/// | `.max_hops(n)`            | unbounded                    |
/// | `.strict_heuristic(b)`    | `true`                       |
///
/// # Example
///
/// ```rust,ignore
/// let planner = PlannerBuilder::new(&graph, Uniform(1.0))
///     .slowdown(4.0)
///     .build()?;
/// let result = planner.plan(&PlanRequest::new(Algorithm::AStar, origin, exits))?;
/// ```
pub struct PlannerBuilder<'g, V: VelocityField> {
    graph:    &'g Graph,
    velocity: V,
    config:   PlannerConfig,
}

impl<'g, V: VelocityField> PlannerBuilder<'g, V> {
    pub fn new(graph: &'g Graph, velocity: V) -> Self {
        Self { graph, velocity, config: PlannerConfig::default() }
    }

    /// Replace the whole configuration.
    pub fn config(mut self, config: PlannerConfig) -> Self {
        self.config = config;
        self
    }

    pub fn hazard(mut self, hazard: HazardConfig) -> Self {
        self.config.hazard = hazard;
        self
    }

    /// How much slower the hazard moves than an occupant over the same edge.
    pub fn slowdown(mut self, slowdown: f64) -> Self {
        self.config.hazard.slowdown = slowdown;
        self
    }

    /// Stop the hazard `hops` edges away from its nearest source.
    pub fn max_hops(mut self, hops: u32) -> Self {
        self.config.hazard.max_hops = Some(hops);
        self
    }

    /// Check that Manhattan distance never overestimates before A* runs.
    pub fn strict_heuristic(mut self, strict: bool) -> Self {
        self.config.strict_heuristic = strict;
        self
    }

    /// Validate all inputs and construct the [`Planner`].
    ///
    /// # Errors
    ///
    /// - A slowdown that is not finite and positive.
    /// - A velocity that is not finite and positive at some vertex.
    pub fn build(self) -> PlanResult<Planner<'g, V>> {
        Planner::with_config(self.graph, self.velocity, self.config)
    }
}
