//! Graph resolver: builds a fresh [`ContextStore`] from a host world.
//!
//! A rebuild runs in two phases:
//!
//! 1. **Outdoor scan** -- every outdoor location becomes its own root and
//!    records its outdoor neighbors (see [`scanner`]).
//! 2. **Root mapping** -- every indoor location of the primary enumeration,
//!    then every farm building interior, seeds a fresh descent (see
//!    [`descent`]).
//!
//! The resolver never mutates a store that is already in use. It returns a
//! new one, and the caller swaps it in. A failed rebuild returns the error
//! and leaves the caller's current store alone.
//!
//! [`scanner`]: crate::scanner
//! [`descent`]: crate::descent

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::descent::Descent;
use crate::error::GraphError;
use crate::levels::LevelFolding;
use crate::overrides::WarpOverrides;
use crate::scanner;
use crate::source::WorldSource;
use crate::store::ContextStore;

/// Default recursion ceiling for the root-mapping descent.
pub const DEFAULT_MAX_DEPTH: u32 = 500;

/// Highest depth ceiling the descent honors.
///
/// The descent recurses on the call stack, one frame per hop. Larger
/// configured ceilings are clamped to this value so a long corridor ends in
/// [`GraphError::DepthExceeded`] instead of exhausting the stack.
pub const MAX_DEPTH_LIMIT: u32 = 1_000;

/// Tunables shared by the resolver and the query facade.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolverSettings {
    /// Recursion ceiling for the descent; also bounds parent-chain walks.
    pub max_depth: u32,
    /// Generated-level folding rules.
    pub levels: LevelFolding,
    /// Warp substitution table.
    pub overrides: WarpOverrides,
}

impl ResolverSettings {
    /// The depth ceiling actually enforced: `max_depth`, capped at
    /// [`MAX_DEPTH_LIMIT`].
    pub const fn depth_limit(&self) -> u32 {
        if self.max_depth > MAX_DEPTH_LIMIT {
            MAX_DEPTH_LIMIT
        } else {
            self.max_depth
        }
    }
}

impl Default for ResolverSettings {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            levels: LevelFolding::default(),
            overrides: WarpOverrides::default(),
        }
    }
}

/// Builds location context stores from a [`WorldSource`].
#[derive(Debug, Clone, Default)]
pub struct GraphResolver {
    settings: ResolverSettings,
}

impl GraphResolver {
    /// Create a resolver with the given settings.
    pub const fn new(settings: ResolverSettings) -> Self {
        Self { settings }
    }

    /// The settings this resolver builds with.
    pub const fn settings(&self) -> &ResolverSettings {
        &self.settings
    }

    /// Build a complete store from the current host topology.
    ///
    /// Deterministic: the same topology always yields an identical store.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::DepthExceeded`] if any descent passes the depth
    /// ceiling. The partially built store is discarded.
    pub fn rebuild<W: WorldSource>(&self, world: &W) -> Result<ContextStore, GraphError> {
        let mut store = ContextStore::new();
        let outdoors = scanner::scan_outdoors(world, &mut store, &self.settings);

        let mut seeds: usize = 0;
        let mut descent = Descent::new(world, &mut store, &self.settings);
        let indoor = world.locations().filter(|loc| !loc.outdoors);
        for location in indoor.chain(world.building_interiors()) {
            descent.descend_from(location)?;
            seeds = seeds.saturating_add(1);
        }
        debug!(seeds, "root-mapping descent complete");

        info!(
            locations = store.len(),
            outdoors,
            unresolved = store.unresolved_count(),
            "location context graph rebuilt"
        );
        Ok(store)
    }
}

#[cfg(test)]
mod tests {
    use wayfinder_types::{HostLocation, LocationKind};

    use super::*;
    use crate::source::WorldSnapshot;

    #[test]
    fn every_host_location_gets_one_context() {
        let world = WorldSnapshot::new(
            vec![
                HostLocation::outdoors("Farm").with_warp("BusStop", 10, 23),
                HostLocation::outdoors("BusStop").with_warp("Farm", 80, 16),
                HostLocation::indoors("FarmHouse").with_warp("Farm", 64, 15),
                HostLocation::indoors("Attic"),
            ],
            vec![HostLocation::indoors("Barn").with_warp("Farm", 20, 8)],
        );
        let store = GraphResolver::default().rebuild(&world);
        assert!(store.is_ok());
        let store = store.unwrap_or_default();
        assert_eq!(store.len(), 5);
        for name in ["Farm", "BusStop", "FarmHouse", "Attic", "Barn"] {
            assert!(store.contains(name), "missing context for {name}");
        }
        assert_eq!(store.unresolved_count(), 1);
    }

    #[test]
    fn building_interiors_resolve_to_farm() {
        let world = WorldSnapshot::new(
            vec![HostLocation::outdoors("Farm")],
            vec![
                HostLocation::indoors("Coop").with_warp("Farm", 40, 12),
                HostLocation::indoors("Shed").with_warp("Farm", 52, 9),
            ],
        );
        let store = GraphResolver::default().rebuild(&world).unwrap_or_default();
        for name in ["Coop", "Shed"] {
            let ctx = store.get(name);
            assert_eq!(ctx.map(|c| c.kind), Some(LocationKind::Building));
            assert!(ctx.is_some_and(|c| c.root.as_ref().is_some_and(|r| *r == "Farm")));
        }
        let farm = store.get("Farm");
        assert!(farm.is_some_and(|c| c.children.contains("Coop") && c.children.contains("Shed")));
    }

    #[test]
    fn depth_failure_discards_the_store() {
        let world = WorldSnapshot::new(
            vec![
                HostLocation::indoors("Hall0").with_warp("Hall1", 1, 1),
                HostLocation::indoors("Hall1").with_warp("Hall2", 1, 1),
                HostLocation::indoors("Hall2").with_warp("Yard", 1, 1),
                HostLocation::outdoors("Yard"),
            ],
            Vec::new(),
        );
        let resolver = GraphResolver::new(ResolverSettings {
            max_depth: 1,
            ..ResolverSettings::default()
        });
        let result = resolver.rebuild(&world);
        assert!(matches!(result, Err(GraphError::DepthExceeded { .. })));
    }
}
