//! Per-vertex speed fields and edge-crossing times.
//!
//! A [`VelocityField`] says how fast movement proceeds *into* a vertex.
//! Crossing edge `u → n` of weight `w` takes `w / velocity(n)` time units for
//! an occupant; the hazard takes that times [`HazardConfig::slowdown`].
//!
//! [`HazardConfig::slowdown`]: egress_core::HazardConfig::slowdown

use egress_core::VertexId;
use egress_graph::Graph;

use crate::{SearchError, SearchResult};

/// Pluggable speed field.
///
/// Implementations must return a finite value > 0 for every vertex of the
/// graph they are used with; [`validate`] checks this before any search
/// relaxes an edge.
///
/// # Thread safety
///
/// Fields are shared read-only between concurrent runs, so they must be
/// `Send + Sync`.
pub trait VelocityField: Send + Sync {
    fn velocity(&self, v: VertexId) -> f64;
}

/// The same speed everywhere.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Uniform(pub f64);

impl VelocityField for Uniform {
    #[inline]
    fn velocity(&self, _v: VertexId) -> f64 {
        self.0
    }
}

/// One speed per vertex, indexed by `VertexId`.
///
/// Vertices beyond the end of the table report `0.0` and therefore fail
/// validation.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PerVertex(pub Vec<f64>);

impl VelocityField for PerVertex {
    #[inline]
    fn velocity(&self, v: VertexId) -> f64 {
        self.0.get(v.index()).copied().unwrap_or(0.0)
    }
}

impl<F> VelocityField for F
where
    F: Fn(VertexId) -> f64 + Send + Sync,
{
    #[inline]
    fn velocity(&self, v: VertexId) -> f64 {
        self(v)
    }
}

/// Check `field` at every vertex of `graph` and return the maximum velocity.
///
/// Fails with [`SearchError::NonPositiveVelocity`] on the first vertex whose
/// speed is zero, negative, NaN or infinite.  An empty graph yields `1.0`.
pub fn validate(graph: &Graph, field: &dyn VelocityField) -> SearchResult<f64> {
    let mut max = 0.0f64;
    for v in graph.vertices() {
        let value = field.velocity(v);
        if !value.is_finite() || value <= 0.0 {
            return Err(SearchError::NonPositiveVelocity { vertex: v, value });
        }
        max = max.max(value);
    }
    Ok(if graph.is_empty() { 1.0 } else { max })
}

/// How an engine prices an edge crossing.
#[derive(Copy, Clone)]
pub(crate) enum EdgeCost<'a> {
    /// Raw integer weight (plain Dijkstra / A*).
    Weight,
    /// `weight / velocity(to) * scale`.
    Travel { field: &'a dyn VelocityField, scale: f64 },
}

impl EdgeCost<'_> {
    #[inline]
    pub(crate) fn cost(&self, weight: u32, to: VertexId) -> f64 {
        match *self {
            EdgeCost::Weight => weight as f64,
            EdgeCost::Travel { field, scale } => weight as f64 / field.velocity(to) * scale,
        }
    }
}
