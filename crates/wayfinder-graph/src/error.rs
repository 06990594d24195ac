//! Error types for the `wayfinder-graph` crate.
//!
//! Almost everything the resolver meets is a normal outcome: unresolvable
//! warp targets are skipped, cycles are cut by the visited set, and unknown
//! locations come back from queries as `None`. The one fatal case is a
//! descent that runs past the depth ceiling.

use wayfinder_types::LocationName;

/// Errors that abort a context graph rebuild.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GraphError {
    /// The root-mapping descent recursed deeper than the configured ceiling.
    ///
    /// This points at an internal inconsistency (the visited set should stop
    /// any real cycle long before). The rebuild is abandoned.
    #[error("descent exceeded depth ceiling at {location} (depth {depth}, limit {limit})")]
    DepthExceeded {
        /// Location being entered when the ceiling was hit.
        location: LocationName,
        /// Recursion depth at that point.
        depth: u32,
        /// Configured ceiling.
        limit: u32,
    },
}
