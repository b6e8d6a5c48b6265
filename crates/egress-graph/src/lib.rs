//! `egress-graph`: the read-only building graph.
//!
//! # Crate layout
//!
//! | Module    | Contents                                                   |
//! |-----------|------------------------------------------------------------|
//! | [`graph`] | `Graph` (CSR adjacency + lookup tables), `GraphSignature`  |
//! | [`builder`] | `GraphBuilder`, grid constructors                        |
//! | [`error`] | `GraphError`, `GraphResult<T>`                             |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                       |
//! |---------|--------------------------------------------------------------|
//! | `serde` | Derives `Serialize`/`Deserialize` on `GraphSignature`.       |

pub mod builder;
pub mod error;
pub mod graph;


pub use builder::GraphBuilder;
pub use error::{GraphError, GraphResult};
pub use graph::{Graph, GraphSignature};
