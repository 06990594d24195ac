//! Configuration and store lifecycle for the Wayfinder location graph.
//!
//! `wayfinder-graph` knows how to build a context store. This crate decides
//! when to build one and with which settings.
//!
//! # Modules
//!
//! - [`config`] -- Configuration loading from `wayfinder.yaml` into
//!   strongly-typed structs.
//! - [`graph`] -- [`LocationGraph`], which rebuilds and swaps the store on
//!   [`TopologyEvent`]s.
//!
//! [`LocationGraph`]: graph::LocationGraph
//! [`TopologyEvent`]: graph::TopologyEvent

pub mod config;
pub mod graph;

pub use config::{ConfigError, WayfinderConfig};
pub use graph::{LocationGraph, RebuildSummary, ServiceError, TopologyEvent};
