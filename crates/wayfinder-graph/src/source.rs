//! The host boundary: a read-only view of the live world.
//!
//! The host owns the world model. During a rebuild the resolver needs
//! three things from it: the loaded locations in host order, the farm
//! building interiors that the primary enumeration does not reach, and a
//! by-name lookup for warp targets. The [`WorldSource`] trait abstracts
//! those so the resolver can run against a live host adapter, a test
//! fixture, or a [`WorldSnapshot`] loaded from disk.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use wayfinder_types::{HostLocation, LocationName};

/// A read-only view of the host's loaded world.
pub trait WorldSource {
    /// All currently loaded locations, in host order.
    fn locations(&self) -> impl Iterator<Item = &HostLocation>;

    /// Farm building interiors not reachable through [`locations`].
    ///
    /// Each one is seeded as a fresh traversal root during a rebuild.
    ///
    /// [`locations`]: WorldSource::locations
    fn building_interiors(&self) -> impl Iterator<Item = &HostLocation>;

    /// Look up a live location by its literal name.
    ///
    /// Returns `None` if the host cannot currently provide it (not loaded,
    /// lazily created, or simply unknown). Callers treat that as "skip".
    fn resolve(&self, name: &str) -> Option<&HostLocation>;
}

/// Which enumeration a snapshot entry came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Slot {
    Primary(usize),
    Interior(usize),
}

/// On-disk layout of a [`WorldSnapshot`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct SnapshotFile {
    #[serde(default)]
    locations: Vec<HostLocation>,
    #[serde(default)]
    building_interiors: Vec<HostLocation>,
}

/// An in-memory [`WorldSource`] holding a copy of the host's topology.
///
/// Lookups by name go through an index rebuilt on every mutation. When two
/// entries share a name, the one enumerated first wins, primary locations
/// before interiors.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(from = "SnapshotFile", into = "SnapshotFile")]
pub struct WorldSnapshot {
    locations: Vec<HostLocation>,
    building_interiors: Vec<HostLocation>,
    index: BTreeMap<LocationName, Slot>,
}

impl From<SnapshotFile> for WorldSnapshot {
    fn from(file: SnapshotFile) -> Self {
        Self::new(file.locations, file.building_interiors)
    }
}

impl From<WorldSnapshot> for SnapshotFile {
    fn from(snapshot: WorldSnapshot) -> Self {
        Self {
            locations: snapshot.locations,
            building_interiors: snapshot.building_interiors,
        }
    }
}

impl WorldSnapshot {
    /// Build a snapshot from the two host enumerations.
    pub fn new(locations: Vec<HostLocation>, building_interiors: Vec<HostLocation>) -> Self {
        let mut snapshot = Self {
            locations,
            building_interiors,
            index: BTreeMap::new(),
        };
        snapshot.reindex();
        snapshot
    }

    /// Append a location to the primary enumeration.
    pub fn push_location(&mut self, location: HostLocation) {
        self.locations.push(location);
        self.reindex();
    }

    /// Append a farm building interior.
    pub fn push_interior(&mut self, interior: HostLocation) {
        self.building_interiors.push(interior);
        self.reindex();
    }

    /// Remove every entry named `name` from both enumerations.
    ///
    /// Returns `true` if anything was removed.
    pub fn remove(&mut self, name: &str) -> bool {
        let before = self.location_count();
        self.locations.retain(|loc| loc.name != name);
        self.building_interiors.retain(|loc| loc.name != name);
        let removed = self.location_count() != before;
        if removed {
            self.reindex();
        }
        removed
    }

    /// Total number of entries across both enumerations.
    pub fn location_count(&self) -> usize {
        self.locations
            .len()
            .saturating_add(self.building_interiors.len())
    }

    fn reindex(&mut self) {
        self.index.clear();
        for (i, loc) in self.locations.iter().enumerate() {
            self.index
                .entry(loc.name.clone())
                .or_insert(Slot::Primary(i));
        }
        for (i, loc) in self.building_interiors.iter().enumerate() {
            self.index
                .entry(loc.name.clone())
                .or_insert(Slot::Interior(i));
        }
    }
}

impl WorldSource for WorldSnapshot {
    fn locations(&self) -> impl Iterator<Item = &HostLocation> {
        self.locations.iter()
    }

    fn building_interiors(&self) -> impl Iterator<Item = &HostLocation> {
        self.building_interiors.iter()
    }

    fn resolve(&self, name: &str) -> Option<&HostLocation> {
        match self.index.get(name)? {
            Slot::Primary(i) => self.locations.get(*i),
            Slot::Interior(i) => self.building_interiors.get(*i),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_snapshot() -> WorldSnapshot {
        WorldSnapshot::new(
            vec![
                HostLocation::outdoors("Farm").with_warp("BusStop", 10, 23),
                HostLocation::indoors("FarmHouse").with_warp("Farm", 64, 15),
            ],
            vec![HostLocation::indoors("Coop").with_warp("Farm", 30, 20)],
        )
    }

    #[test]
    fn resolves_both_enumerations() {
        let snapshot = make_snapshot();
        assert!(snapshot.resolve("Farm").is_some_and(|l| l.outdoors));
        assert!(snapshot.resolve("Coop").is_some());
        assert!(snapshot.resolve("BusStop").is_none());
        assert_eq!(snapshot.location_count(), 3);
    }

    #[test]
    fn push_and_remove_keep_index_current() {
        let mut snapshot = make_snapshot();
        snapshot.push_location(HostLocation::outdoors("BusStop"));
        assert!(snapshot.resolve("BusStop").is_some());

        assert!(snapshot.remove("FarmHouse"));
        assert!(snapshot.resolve("FarmHouse").is_none());
        assert!(snapshot.resolve("Farm").is_some());
        assert!(!snapshot.remove("FarmHouse"));
    }

    #[test]
    fn first_entry_wins_on_duplicate_names() {
        let snapshot = WorldSnapshot::new(
            vec![HostLocation::outdoors("Shed")],
            vec![HostLocation::indoors("Shed")],
        );
        assert!(snapshot.resolve("Shed").is_some_and(|l| l.outdoors));
    }

    #[test]
    fn deserializes_and_indexes() {
        let raw = r#"{
            "locations": [
                { "name": "Town", "outdoors": true,
                  "warps": [ { "target": "Beach", "tile": { "x": 38, "y": 1 } } ] },
                { "name": "Beach", "outdoors": true }
            ]
        }"#;
        let snapshot: WorldSnapshot = serde_json::from_str(raw).unwrap_or_default();
        assert!(snapshot.resolve("Beach").is_some());
        assert_eq!(snapshot.building_interiors().count(), 0);
        let town_warps = snapshot.resolve("Town").map(|l| l.warps.len());
        assert_eq!(town_warps, Some(1));
    }
}
