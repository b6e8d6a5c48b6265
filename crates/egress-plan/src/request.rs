use egress_core::VertexId;

use crate::Algorithm;

/// What to run: one algorithm, its endpoints, and the hazard sources.
///
/// Hazard sources are ignored by `Dijkstra` and `AStar`.  `HazardSpread`
/// ignores the origin and exits.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlanRequest {
    pub algorithm:      Algorithm,
    pub origin:         Option<VertexId>,
    pub exits:          Vec<VertexId>,
    pub hazard_sources: Vec<VertexId>,
}

impl PlanRequest {
    /// A route request from `origin` to the nearest of `exits`.
    pub fn new(algorithm: Algorithm, origin: VertexId, exits: impl Into<Vec<VertexId>>) -> Self {
        Self {
            algorithm,
            origin: Some(origin),
            exits: exits.into(),
            hazard_sources: Vec::new(),
        }
    }

    /// Animate the hazard spreading from `sources`.
    pub fn spread(sources: impl Into<Vec<VertexId>>) -> Self {
        Self {
            algorithm:      Algorithm::HazardSpread,
            origin:         None,
            exits:          Vec::new(),
            hazard_sources: sources.into(),
        }
    }

    pub fn with_hazard(mut self, sources: impl Into<Vec<VertexId>>) -> Self {
        self.hazard_sources = sources.into();
        self
    }
}
