//! The five strategies a planner can run.

use std::fmt;
use std::str::FromStr;

use crate::PlanError;

/// Which engine a [`PlanRequest`](crate::PlanRequest) runs.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Algorithm {
    /// Uniform-cost search on edge weights.
    Dijkstra,
    /// Manhattan-guided search on edge weights.
    AStar,
    /// Dijkstra on travel time, refusing moves the hazard beats.
    HazardDijkstra,
    /// A* on travel time, refusing moves the hazard beats.
    HazardAStar,
    /// No route: step the hazard front itself.
    HazardSpread,
}

impl Algorithm {
    pub const ALL: [Algorithm; 5] = [
        Algorithm::Dijkstra,
        Algorithm::AStar,
        Algorithm::HazardDijkstra,
        Algorithm::HazardAStar,
        Algorithm::HazardSpread,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Algorithm::Dijkstra       => "dijkstra",
            Algorithm::AStar          => "astar",
            Algorithm::HazardDijkstra => "hazard-dijkstra",
            Algorithm::HazardAStar    => "hazard-astar",
            Algorithm::HazardSpread   => "hazard-spread",
        }
    }

    /// `true` if the run needs a hazard arrival-time table.
    pub fn uses_hazard(self) -> bool {
        !matches!(self, Algorithm::Dijkstra | Algorithm::AStar)
    }

    /// `true` for the Manhattan-guided variants.
    pub fn uses_heuristic(self) -> bool {
        matches!(self, Algorithm::AStar | Algorithm::HazardAStar)
    }

    /// `true` if the run searches for a route (needs an origin and exits).
    pub fn is_route(self) -> bool {
        self != Algorithm::HazardSpread
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Algorithm {
    type Err = PlanError;

    /// Case-insensitive; `_` and `-` are interchangeable.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace('_', "-");
        Algorithm::ALL
            .into_iter()
            .find(|a| a.as_str() == normalized)
            .ok_or_else(|| PlanError::UnknownAlgorithm(s.to_owned()))
    }
}
