//! Core structs: tiles, warps, the host's view of a location, and the
//! derived [`LocationContext`] record.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::enums::LocationKind;
use crate::ids::LocationName;

// ---------------------------------------------------------------------------
// Tile
// ---------------------------------------------------------------------------

/// A tile coordinate within a location's map.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct Tile {
    /// Column.
    pub x: i32,
    /// Row.
    pub y: i32,
}

impl Tile {
    /// The origin tile. Hosts use it to mean "no warp position".
    pub const ORIGIN: Self = Self { x: 0, y: 0 };

    /// Create a tile coordinate.
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Whether this is the origin placeholder rather than a real position.
    pub const fn is_origin(self) -> bool {
        self.x == 0 && self.y == 0
    }
}

impl core::fmt::Display for Tile {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

// ---------------------------------------------------------------------------
// Warp
// ---------------------------------------------------------------------------

/// A directed link from one location to a tile in another.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Warp {
    /// Literal name of the target location, as the host reports it.
    pub target: LocationName,
    /// Tile in the target where the player arrives.
    pub tile: Tile,
}

impl Warp {
    /// Create a warp to `target`, arriving at `(x, y)`.
    pub fn new(target: impl Into<LocationName>, x: i32, y: i32) -> Self {
        Self {
            target: target.into(),
            tile: Tile::new(x, y),
        }
    }

    /// The arrival tile, or `None` if the host left it at the origin.
    pub const fn arrival(&self) -> Option<Tile> {
        if self.tile.is_origin() {
            None
        } else {
            Some(self.tile)
        }
    }
}

// ---------------------------------------------------------------------------
// HostLocation
// ---------------------------------------------------------------------------

/// The host's read-only view of one loaded location.
///
/// Warps are kept in host order. The root-mapping descent follows the
/// first viable warp, so the order is significant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HostLocation {
    /// Literal location name.
    pub name: LocationName,
    /// Whether the host reports this location as outdoors.
    #[serde(default)]
    pub outdoors: bool,
    /// Outgoing warps in host order.
    #[serde(default)]
    pub warps: Vec<Warp>,
}

impl HostLocation {
    /// An outdoor location with no warps yet.
    pub fn outdoors(name: impl Into<LocationName>) -> Self {
        Self {
            name: name.into(),
            outdoors: true,
            warps: Vec::new(),
        }
    }

    /// An indoor location with no warps yet.
    pub fn indoors(name: impl Into<LocationName>) -> Self {
        Self {
            name: name.into(),
            outdoors: false,
            warps: Vec::new(),
        }
    }

    /// Append a warp to `target` arriving at `(x, y)`.
    #[must_use]
    pub fn with_warp(mut self, target: impl Into<LocationName>, x: i32, y: i32) -> Self {
        self.warps.push(Warp::new(target, x, y));
        self
    }
}

// ---------------------------------------------------------------------------
// LocationContext
// ---------------------------------------------------------------------------

/// Derived metadata for one location in the context graph.
///
/// Created with defaults the first time the resolver touches a location and
/// stamped as traversals discover its root, parent, and entry tile. A
/// context whose `root` is still `None` after a rebuild is an unknown
/// location for query purposes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocationContext {
    /// Canonical identifier (generated levels are already folded).
    pub name: LocationName,
    /// Position in the containment hierarchy.
    pub kind: LocationKind,
    /// Outdoor location that transitively contains this one.
    pub root: Option<LocationName>,
    /// Immediate containing location, one level toward the root.
    pub parent: Option<LocationName>,
    /// Locations directly contained by this one.
    pub children: BTreeSet<LocationName>,
    /// Outdoor neighbors reachable by a direct warp, with their arrival tile.
    pub neighbors: BTreeMap<LocationName, Tile>,
    /// Tile within the parent through which this location is entered.
    pub warp: Option<Tile>,
}

impl LocationContext {
    /// A fresh, unclassified context.
    pub const fn new(name: LocationName) -> Self {
        Self {
            name,
            kind: LocationKind::Room,
            root: None,
            parent: None,
            children: BTreeSet::new(),
            neighbors: BTreeMap::new(),
            warp: None,
        }
    }

    /// Whether a traversal has stamped a root on this context.
    pub const fn is_resolved(&self) -> bool {
        self.root.is_some()
    }

    /// Whether this context is its own root.
    pub fn is_root(&self) -> bool {
        self.root.as_ref() == Some(&self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn origin_warp_has_no_arrival() {
        let warp = Warp::new("Farm", 0, 0);
        assert!(warp.arrival().is_none());
        let warp = Warp::new("Farm", 64, 15);
        assert_eq!(warp.arrival(), Some(Tile::new(64, 15)));
    }

    #[test]
    fn new_context_is_unresolved() {
        let ctx = LocationContext::new(LocationName::from("Cellar"));
        assert!(!ctx.is_resolved());
        assert!(!ctx.is_root());
        assert_eq!(ctx.kind, LocationKind::Room);
        assert!(ctx.children.is_empty());
        assert!(ctx.neighbors.is_empty());
    }

    #[test]
    fn host_location_defaults_from_yaml_like_json() {
        let raw = r#"{ "name": "Tunnel" }"#;
        let parsed: Option<HostLocation> = serde_json::from_str(raw).ok();
        assert_eq!(parsed, Some(HostLocation::indoors("Tunnel")));
    }

    #[test]
    fn builder_keeps_host_order() {
        let loc = HostLocation::outdoors("Town")
            .with_warp("Beach", 38, 0)
            .with_warp("BusStop", 34, 23);
        let targets: Vec<&str> = loc.warps.iter().map(|w| w.target.as_str()).collect();
        assert_eq!(targets, vec!["Beach", "BusStop"]);
    }
}
