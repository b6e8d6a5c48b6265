//! Graph-model error type.

use thiserror::Error;

use egress_core::{GridPos, VertexId};

/// Errors produced by `egress-graph`.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum GraphError {
    #[error("vertex {0} not found in graph")]
    UnknownVertex(VertexId),

    #[error("{a} and {b} are not adjacent")]
    InvalidEdge { a: VertexId, b: VertexId },

    #[error("edge {a}-{b} has non-positive weight")]
    NonPositiveWeight { a: VertexId, b: VertexId },

    #[error("self-loop on {0}")]
    SelfLoop(VertexId),

    #[error("edge {a}-{b} declared more than once")]
    DuplicateEdge { a: VertexId, b: VertexId },

    #[error("label {0:?} used by more than one vertex")]
    DuplicateLabel(String),

    #[error("position {0} used by more than one vertex")]
    DuplicatePosition(GridPos),

    #[error("graph exceeds {max} vertices")]
    TooManyVertices { max: usize },
}

pub type GraphResult<T> = Result<T, GraphError>;
