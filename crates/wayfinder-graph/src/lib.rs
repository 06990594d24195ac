//! Location context graph for the Wayfinder toolkit.
//!
//! This crate derives a queryable structure from the host's world graph:
//! every location is classified (outdoors, building, room) and tied to the
//! outdoor root area that contains it. Compass needles, minimaps and
//! proximity checks all read from the result.
//!
//! # Modules
//!
//! - [`audit`] -- Invariant checks over a built store.
//! - [`descent`] -- Recursive, depth-bounded root-mapping descent.
//! - [`error`] -- Error types for rebuilds.
//! - [`levels`] -- Generated-level name folding (mine, skull cavern, volcano).
//! - [`overrides`] -- Static warp substitution table.
//! - [`query`] -- [`ContextQuery`], the read-only query facade.
//! - [`resolver`] -- [`GraphResolver`], which runs a full rebuild.
//! - [`sample_world`] -- A small valley map used by tests and tooling.
//! - [`scanner`] -- Outdoor-neighbor scan.
//! - [`source`] -- The [`WorldSource`] host boundary and [`WorldSnapshot`].
//! - [`store`] -- [`ContextStore`], the map of derived contexts.

pub mod audit;
pub mod descent;
pub mod error;
pub mod levels;
pub mod overrides;
pub mod query;
pub mod resolver;
pub mod sample_world;
pub mod scanner;
pub mod source;
pub mod store;

// Re-export primary types at crate root.
pub use audit::{Violation, audit};
pub use error::GraphError;
pub use levels::{LevelFolding, generated_level_name};
pub use overrides::{WarpOverride, WarpOverrides};
pub use query::ContextQuery;
pub use resolver::{DEFAULT_MAX_DEPTH, GraphResolver, MAX_DEPTH_LIMIT, ResolverSettings};
pub use sample_world::sample_world;
pub use source::{WorldSnapshot, WorldSource};
pub use store::ContextStore;
