//! Enumeration types for the location context graph.

use serde::{Deserialize, Serialize};

/// Where a location sits in the containment hierarchy.
///
/// The host only reports whether a location is outdoors. `Building` and
/// `Room` are derived by the root-mapping descent from where a location's
/// first viable warp leads.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum LocationKind {
    /// A root area the host reports as outdoors.
    Outdoors,
    /// An indoor location whose path to the root has crossed an outdoor warp.
    Building,
    /// An indoor location whose warps stay indoors. Also the kind of a
    /// freshly created, not yet classified context.
    #[default]
    Room,
}

impl LocationKind {
    /// Whether this is [`LocationKind::Outdoors`].
    pub const fn is_outdoors(self) -> bool {
        matches!(self, Self::Outdoors)
    }

    /// Whether this is [`LocationKind::Building`].
    pub const fn is_building(self) -> bool {
        matches!(self, Self::Building)
    }
}

impl core::fmt::Display for LocationKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let label = match self {
            Self::Outdoors => "outdoors",
            Self::Building => "building",
            Self::Room => "room",
        };
        f.write_str(label)
    }
}
