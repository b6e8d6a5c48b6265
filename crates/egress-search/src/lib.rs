//! `egress-search`: route search and hazard propagation engines.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                 |
//! |---------------|----------------------------------------------------------|
//! | [`search`]    | `Search` (Dijkstra / A* / hazard-aware), `path_cost`     |
//! | [`hazard`]    | `Propagation`, `HazardTimes`                             |
//! | [`heuristic`] | `Heuristic` trait, `Zero`, `NearestExit`, admissibility  |
//! | [`velocity`]  | `VelocityField` trait, `Uniform`, `PerVertex`            |
//! | [`step`]      | `Progressive` trait, `Step`, `Outcome`                   |
//! | [`state`]     | `SearchState`, `DistanceTable`, `VisitedSet`             |
//! | [`frontier`]  | `Frontier`, a `(priority, seq)` min-heap                 |
//! | [`error`]     | `SearchError`, `SearchResult<T>`                         |
//!
//! # Determinism
//!
//! Frontier ties are broken by insertion order and neighbours are visited in
//! ascending id order, so identical inputs always settle vertices in the same
//! sequence and return the same path.
//!
//! # Example
//!
//! ```
//! use egress_core::VertexId;
//! use egress_graph::GraphBuilder;
//! use egress_search::{Progressive, Search};
//!
//! let g = GraphBuilder::uniform_grid(3, 3, 1).build().unwrap();
//! let mut search = Search::astar(&g, VertexId(0), &[VertexId(8)]).unwrap();
//! search.run_to_end();
//! assert_eq!(search.cost(), Some(4.0));
//! assert_eq!(search.path().len(), 5);
//! ```

pub mod error;
pub mod frontier;
pub mod hazard;
pub mod heuristic;
pub mod search;
pub mod state;
pub mod step;
pub mod velocity;


pub use error::{SearchError, SearchResult};
pub use frontier::Frontier;
pub use hazard::{HazardTimes, Propagation};
pub use heuristic::{check_admissible, Heuristic, NearestExit, Zero};
pub use search::{arrival_times, path_cost, Search};
pub use state::{DistanceTable, VisitedSet};
pub use step::{Outcome, Progressive, Step};
pub use velocity::{PerVertex, Uniform, VelocityField};
