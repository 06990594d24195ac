//! Outdoor-neighbor scan.
//!
//! Every location the host reports as outdoors is its own root. The scan
//! stamps that, then records each *other* outdoor location reachable by
//! one of its warps, keyed by the target's canonical name and valued by the
//! tile the player arrives on. The first warp discovered for a given
//! neighbor wins.
//!
//! Neighbor links are directed. `A` listing `B` says nothing about `B`
//! listing `A`, since warps are one-way.

use tracing::{debug, trace};
use wayfinder_types::{HostLocation, LocationKind};

use crate::resolver::ResolverSettings;
use crate::source::WorldSource;
use crate::store::ContextStore;

/// Scan every outdoor location of the primary enumeration.
///
/// Returns the number of outdoor locations scanned.
pub fn scan_outdoors<W: WorldSource>(
    world: &W,
    store: &mut ContextStore,
    settings: &ResolverSettings,
) -> usize {
    let mut scanned: usize = 0;
    for location in world.locations().filter(|loc| loc.outdoors) {
        scan_location(world, store, settings, location);
        scanned = scanned.saturating_add(1);
    }
    debug!(scanned, "outdoor neighbor scan complete");
    scanned
}

/// Stamp one outdoor location and record its outdoor neighbors.
pub fn scan_location<W: WorldSource>(
    world: &W,
    store: &mut ContextStore,
    settings: &ResolverSettings,
    location: &HostLocation,
) {
    let name = settings.levels.canonical(location.name.as_str());
    let warps = settings
        .overrides
        .effective_warps(location, &settings.levels);

    let ctx = store.get_or_create(&name);
    ctx.kind = LocationKind::Outdoors;
    ctx.root = Some(name.clone());

    for warp in warps.iter() {
        let Some(target) = world.resolve(warp.target.as_str()) else {
            trace!(from = %name, target = %warp.target, "skipping unresolvable warp");
            continue;
        };
        if !target.outdoors {
            continue;
        }
        let neighbor = settings.levels.canonical(target.name.as_str());
        if neighbor == name {
            continue;
        }
        ctx.neighbors.entry(neighbor).or_insert(warp.tile);
    }
}

#[cfg(test)]
mod tests {
    use wayfinder_types::Tile;

    use super::*;
    use crate::source::WorldSnapshot;

    fn scan(world: &WorldSnapshot) -> ContextStore {
        let mut store = ContextStore::new();
        scan_outdoors(world, &mut store, &ResolverSettings::default());
        store
    }

    #[test]
    fn valley_and_beach_are_mutual_neighbors() {
        let world = WorldSnapshot::new(
            vec![
                HostLocation::outdoors("Valley").with_warp("Beach", 20, 4),
                HostLocation::outdoors("Beach").with_warp("Valley", 54, 103),
            ],
            Vec::new(),
        );
        let store = scan(&world);

        let valley = store.get("Valley");
        let beach = store.get("Beach");
        assert_eq!(
            valley.and_then(|c| c.neighbors.get("Beach")).copied(),
            Some(Tile::new(20, 4))
        );
        assert_eq!(
            beach.and_then(|c| c.neighbors.get("Valley")).copied(),
            Some(Tile::new(54, 103))
        );
        assert!(valley.is_some_and(|c| c.is_root() && c.kind == LocationKind::Outdoors));
        assert!(beach.is_some_and(|c| c.is_root() && c.kind == LocationKind::Outdoors));
    }

    #[test]
    fn neighbor_links_are_directed() {
        let world = WorldSnapshot::new(
            vec![
                HostLocation::outdoors("Desert"),
                HostLocation::outdoors("BusStop").with_warp("Desert", 18, 27),
            ],
            Vec::new(),
        );
        let store = scan(&world);
        assert!(
            store
                .get("BusStop")
                .is_some_and(|c| c.neighbors.contains_key("Desert"))
        );
        assert!(store.get("Desert").is_some_and(|c| c.neighbors.is_empty()));
    }

    #[test]
    fn first_discovered_neighbor_tile_wins() {
        let world = WorldSnapshot::new(
            vec![
                HostLocation::outdoors("Town")
                    .with_warp("Beach", 38, 1)
                    .with_warp("Beach", 39, 1),
                HostLocation::outdoors("Beach"),
            ],
            Vec::new(),
        );
        let store = scan(&world);
        let tile = store
            .get("Town")
            .and_then(|c| c.neighbors.get("Beach"))
            .copied();
        assert_eq!(tile, Some(Tile::new(38, 1)));
    }

    #[test]
    fn skips_indoor_unresolvable_and_self_targets() {
        let world = WorldSnapshot::new(
            vec![
                HostLocation::outdoors("Town")
                    .with_warp("Saloon", 14, 24)
                    .with_warp("Sewer", 16, 10)
                    .with_warp("Town", 3, 3),
                HostLocation::indoors("Saloon").with_warp("Town", 45, 71),
            ],
            Vec::new(),
        );
        let store = scan(&world);
        assert!(store.get("Town").is_some_and(|c| c.neighbors.is_empty()));
        // Indoor locations are left for the descent.
        assert!(!store.contains("Saloon"));
    }

    #[test]
    fn caldera_borders_island_north_through_substitution() {
        let world = WorldSnapshot::new(
            vec![
                HostLocation::outdoors("Caldera").with_warp("VolcanoDungeon9", 30, 36),
                HostLocation::outdoors("IslandNorth").with_warp("VolcanoDungeon0", 31, 53),
                HostLocation::indoors("VolcanoDungeon9").with_warp("VolcanoDungeon8", 5, 5),
            ],
            Vec::new(),
        );
        let store = scan(&world);
        let caldera = store.get("Caldera");
        assert_eq!(
            caldera.and_then(|c| c.neighbors.get("IslandNorth")).copied(),
            Some(Tile::new(40, 24))
        );
        assert!(caldera.is_some_and(|c| !c.neighbors.contains_key("VolcanoDungeon")));
        assert!(!store.contains("VolcanoDungeon9"));
    }
}
