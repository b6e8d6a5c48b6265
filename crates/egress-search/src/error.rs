//! Search-subsystem error type.

use thiserror::Error;

use egress_core::{CoreError, VertexId};
use egress_graph::{GraphError, GraphSignature};

/// Errors produced by `egress-search`.
///
/// An exit that cannot be reached is **not** an error: the engines report it
/// as [`Outcome::Exhausted`](crate::Outcome::Exhausted).
#[derive(Debug, Error)]
pub enum SearchError {
    #[error("vertex {0} not found in graph")]
    UnknownVertex(VertexId),

    #[error("no exits given")]
    NoExits,

    #[error("vertex {0} has no position; A* needs a position for every vertex")]
    MissingPosition(VertexId),

    #[error("velocity at {vertex} is {value}; velocities must be finite and > 0")]
    NonPositiveVelocity { vertex: VertexId, value: f64 },

    #[error(
        "edge {a}-{b} weighs {weight} but its endpoints are {distance} grid steps apart; \
         the Manhattan heuristic would overestimate"
    )]
    InadmissibleHeuristic { a: VertexId, b: VertexId, weight: u32, distance: u32 },

    #[error("hazard table was computed for graph {found}, search graph is {expected}")]
    HazardMismatch { expected: GraphSignature, found: GraphSignature },

    #[error(transparent)]
    Config(#[from] CoreError),

    #[error(transparent)]
    Graph(GraphError),
}

impl From<GraphError> for SearchError {
    fn from(e: GraphError) -> Self {
        match e {
            GraphError::UnknownVertex(v) => SearchError::UnknownVertex(v),
            other => SearchError::Graph(other),
        }
    }
}

pub type SearchResult<T> = Result<T, SearchError>;
