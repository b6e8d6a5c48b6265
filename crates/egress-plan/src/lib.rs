//! `egress-plan`: planner and progressive run controller for `egress`.
//!
//! # Run lifecycle
//!
//! ```text
//! Planner::start(request)
//!   ① Validate:  origin, exits and hazard sources must be in the graph.
//!   ② Hazard:    hazard-aware and spread runs fetch the arrival-time table
//!                from the planner's cache (recomputed when the source set
//!                changes).
//!   ③ Step:      the host calls Run::step; each call settles one vertex and
//!                returns a Snapshot.
//!   ④ Finish:    the last snapshot has `finished = true`; the RunResult is
//!                ready and the planner accepts a new run.
//! ```
//!
//! # Crate layout
//!
//! | Module        | Contents                                          |
//! |---------------|---------------------------------------------------|
//! | [`planner`]   | `Planner`: hazard cache, `start`, `plan`, batches |
//! | [`builder`]   | `PlannerBuilder`                                  |
//! | [`run`]       | `Run` state machine                               |
//! | [`request`]   | `PlanRequest`                                     |
//! | [`algorithm`] | `Algorithm`                                       |
//! | [`result`]    | `Snapshot`, `RunResult`                           |
//! | [`observer`]  | `RunObserver`, `NoopObserver`                     |
//! | [`error`]     | `PlanError`, `PlanResult<T>`                      |
//!
//! # Cargo features
//!
//! | Feature    | Effect                                               |
//! |------------|------------------------------------------------------|
//! | `parallel` | Runs `Planner::plan_batch` on Rayon's thread pool.   |
//! | `serde`    | Serde derives on requests, snapshots, and ids.       |
//!
//! # Quick-start
//!
//! ```
//! use egress_core::GridPos;
//! use egress_graph::GraphBuilder;
//! use egress_plan::{Algorithm, PlanRequest, PlannerBuilder};
//! use egress_search::Uniform;
//!
//! let graph = GraphBuilder::uniform_grid(3, 3, 1).build().unwrap();
//! let at = |x, y| graph.vertex_at(GridPos::new(x, y)).unwrap();
//!
//! let planner = PlannerBuilder::new(&graph, Uniform(1.0)).slowdown(4.0).build().unwrap();
//! let request = PlanRequest::new(Algorithm::HazardDijkstra, at(0, 0), [at(2, 2)])
//!     .with_hazard([at(1, 1)]);
//!
//! let mut run = planner.start(&request).unwrap();
//! while let Some(snapshot) = run.step() {
//!     // draw snapshot.visited / snapshot.frontier / snapshot.path
//!     let _ = snapshot;
//! }
//! let result = run.result().unwrap();
//! assert_eq!(result.path.len(), 5);
//! assert!(!result.path.contains(&at(1, 1)));
//! ```

pub mod algorithm;
pub mod builder;
pub mod error;
pub mod observer;
pub mod planner;
pub mod request;
pub mod result;
pub mod run;

#[cfg(test)]
mod tests;

pub use algorithm::Algorithm;
pub use builder::PlannerBuilder;
pub use error::{PlanError, PlanResult};
pub use observer::{NoopObserver, RunObserver};
pub use planner::Planner;
pub use request::PlanRequest;
pub use result::{RunResult, Snapshot};
pub use run::Run;
