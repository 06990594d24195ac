//! Shared type definitions for the Wayfinder location context graph.
//!
//! This crate is the single source of truth for the types that flow between
//! the host adapter, the graph resolver, and downstream consumers (compass,
//! minimap, distance checks).
//!
//! # Modules
//!
//! - [`ids`] -- The [`LocationName`] identifier newtype
//! - [`enums`] -- [`LocationKind`], the closed containment classification
//! - [`structs`] -- Tiles, warps, host location views, and the derived
//!   [`LocationContext`] record

pub mod enums;
pub mod ids;
pub mod structs;

// Re-export all public types at crate root for convenience.
pub use enums::LocationKind;
pub use ids::LocationName;
pub use structs::{HostLocation, LocationContext, Tile, Warp};
