//! Static warp substitution table.
//!
//! Some outdoor areas are only connected to their logical neighbor through
//! a chain of generated levels that should never appear in the graph. The
//! volcano caldera is the canonical example: it sits at the bottom of the
//! generated volcano floors, yet logically borders the island's north shore.
//!
//! For a listed source location, warps into generated levels are discarded
//! and a single substitute warp (the place the chain eventually resolves to)
//! is appended. Both the outdoor-neighbor scan and the root-mapping descent
//! enumerate warps through [`WarpOverrides::effective_warps`].

use std::borrow::Cow;

use serde::{Deserialize, Serialize};
use wayfinder_types::{HostLocation, LocationName, Tile, Warp};

use crate::levels::LevelFolding;

/// One substitution entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WarpOverride {
    /// Literal name of the location whose warps are rewritten.
    pub source: LocationName,
    /// Location the generated chain eventually leads to.
    pub target: LocationName,
    /// Arrival tile in `target`.
    pub tile: Tile,
}

impl WarpOverride {
    /// The substitute warp this entry contributes.
    pub fn warp(&self) -> Warp {
        Warp {
            target: self.target.clone(),
            tile: self.tile,
        }
    }
}

/// The substitution table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WarpOverrides(Vec<WarpOverride>);

impl Default for WarpOverrides {
    fn default() -> Self {
        Self(vec![WarpOverride {
            source: LocationName::from("Caldera"),
            target: LocationName::from("IslandNorth"),
            tile: Tile::new(40, 24),
        }])
    }
}

impl WarpOverrides {
    /// Build a table from explicit entries.
    pub const fn new(entries: Vec<WarpOverride>) -> Self {
        Self(entries)
    }

    /// A table with no entries.
    pub const fn empty() -> Self {
        Self(Vec::new())
    }

    /// The entry for `source`, if any. The first matching entry wins.
    pub fn get(&self, source: &str) -> Option<&WarpOverride> {
        self.0.iter().find(|entry| entry.source == source)
    }

    /// Iterate over all entries.
    pub fn iter(&self) -> impl Iterator<Item = &WarpOverride> {
        self.0.iter()
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the table has no entries.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The warps to enumerate for `location`, in host order.
    ///
    /// Unlisted locations borrow their own warp list unchanged.
    pub fn effective_warps<'a>(
        &self,
        location: &'a HostLocation,
        levels: &LevelFolding,
    ) -> Cow<'a, [Warp]> {
        let Some(entry) = self.get(location.name.as_str()) else {
            return Cow::Borrowed(location.warps.as_slice());
        };

        let mut warps: Vec<Warp> = location
            .warps
            .iter()
            .filter(|warp| levels.fold(warp.target.as_str()).is_none())
            .cloned()
            .collect();
        warps.push(entry.warp());
        Cow::Owned(warps)
    }
}
