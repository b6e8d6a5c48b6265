//! `egress-core`: foundational types for the `egress` evacuation planner.
//!
//! This crate is a dependency of every other `egress-*` crate.  It has no
//! `egress-*` dependencies and a single external one (`thiserror`, plus
//! optional `serde`).
//!
//! # What lives here
//!
//! | Module     | Contents                                                |
//! |------------|---------------------------------------------------------|
//! | [`ids`]    | `VertexId`, `RunId`                                     |
//! | [`geo`]    | `GridPos`, Manhattan distance                           |
//! | [`config`] | `HazardConfig`, `PlannerConfig`                         |
//! | [`error`]  | `CoreError`, `CoreResult`                               |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |

pub mod config;
pub mod error;
pub mod geo;
pub mod ids;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use config::{HazardConfig, PlannerConfig};
pub use error::{CoreError, CoreResult};
pub use geo::GridPos;
pub use ids::{RunId, VertexId};
