//! Consistency audit for a built store.
//!
//! The resolver maintains these invariants by construction:
//!
//! - every root names an `Outdoors` context that is its own root;
//! - from a resolved location, the parent chain ends within the depth
//!   ceiling at a location carrying the same root;
//! - only `Outdoors` contexts hold neighbors;
//! - no context is keyed by a literal generated-level name.
//!
//! [`audit`] re-checks them and reports each breach as a [`Violation`].
//! Violations are diagnostics: the service logs them and keeps serving.

use std::collections::BTreeSet;

use wayfinder_types::{LocationContext, LocationKind, LocationName};

use crate::resolver::ResolverSettings;
use crate::store::ContextStore;

/// One broken store invariant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Violation {
    /// A context's root is missing from the store or is not an outdoor root.
    RootNotOutdoors {
        /// The location carrying the bad root.
        location: LocationName,
        /// The root it names.
        root: LocationName,
    },
    /// An `Outdoors` context whose root is not itself.
    OutdoorsNotOwnRoot {
        /// The outdoor location.
        location: LocationName,
    },
    /// The parent chain loops or exceeds the depth ceiling.
    UnboundedParentChain {
        /// The location the walk started from.
        location: LocationName,
    },
    /// The parent chain ends at a location with a different root.
    RootMismatch {
        /// The location the walk started from.
        location: LocationName,
        /// Where the chain ended.
        chain_end: LocationName,
    },
    /// An indoor context holds outdoor neighbors.
    NeighborsOnIndoor {
        /// The indoor location.
        location: LocationName,
    },
    /// A context is keyed by a literal generated-level name.
    UnfoldedGeneratedLevel {
        /// The literal name used as a key.
        location: LocationName,
    },
}

impl core::fmt::Display for Violation {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::RootNotOutdoors { location, root } => {
                write!(f, "{location} has root {root}, which is not an outdoor root")
            }
            Self::OutdoorsNotOwnRoot { location } => {
                write!(f, "outdoor location {location} is not its own root")
            }
            Self::UnboundedParentChain { location } => {
                write!(f, "parent chain from {location} does not terminate")
            }
            Self::RootMismatch {
                location,
                chain_end,
            } => write!(
                f,
                "parent chain from {location} ends at {chain_end} under a different root"
            ),
            Self::NeighborsOnIndoor { location } => {
                write!(f, "indoor location {location} has outdoor neighbors")
            }
            Self::UnfoldedGeneratedLevel { location } => {
                write!(f, "generated level {location} stored under its literal name")
            }
        }
    }
}

/// Check every invariant of `store`.
///
/// Returns an empty list for a consistent store. Violations come back in
/// store (name) order.
pub fn audit(store: &ContextStore, settings: &ResolverSettings) -> Vec<Violation> {
    let mut violations = Vec::new();

    for (name, ctx) in store.iter() {
        if settings.levels.is_foldable(name.as_str()) {
            violations.push(Violation::UnfoldedGeneratedLevel {
                location: name.clone(),
            });
        }

        if ctx.kind == LocationKind::Outdoors && !ctx.is_root() {
            violations.push(Violation::OutdoorsNotOwnRoot {
                location: name.clone(),
            });
        }

        if ctx.kind != LocationKind::Outdoors && !ctx.neighbors.is_empty() {
            violations.push(Violation::NeighborsOnIndoor {
                location: name.clone(),
            });
        }

        let Some(root) = ctx.root.as_ref() else {
            continue;
        };

        let root_ok = store
            .get(root.as_str())
            .is_some_and(|r| r.kind == LocationKind::Outdoors && r.is_root());
        if !root_ok {
            violations.push(Violation::RootNotOutdoors {
                location: name.clone(),
                root: root.clone(),
            });
        }

        match chain_end(store, ctx, settings.max_depth) {
            None => violations.push(Violation::UnboundedParentChain {
                location: name.clone(),
            }),
            Some(end) if end.root.as_ref() != Some(root) => {
                violations.push(Violation::RootMismatch {
                    location: name.clone(),
                    chain_end: end.name.clone(),
                });
            }
            Some(_) => {}
        }
    }

    violations
}

/// Follow parent links from `start` to the last context reached.
///
/// Returns `None` if the chain revisits a location or needs more than
/// `max_hops` hops. A parent missing from the store ends the chain.
fn chain_end<'a>(
    store: &'a ContextStore,
    start: &'a LocationContext,
    max_hops: u32,
) -> Option<&'a LocationContext> {
    let mut seen: BTreeSet<&LocationName> = BTreeSet::new();
    let mut current = start;
    let mut hops: u32 = 0;
    seen.insert(&current.name);

    while let Some(parent) = current.parent.as_ref() {
        let Some(next) = store.get(parent.as_str()) else {
            break;
        };
        hops = hops.checked_add(1)?;
        if hops > max_hops || !seen.insert(&next.name) {
            return None;
        }
        current = next;
    }
    Some(current)
}

#[cfg(test)]
mod tests {
    use wayfinder_types::{HostLocation, Tile};

    use super::*;
    use crate::resolver::GraphResolver;
    use crate::source::WorldSnapshot;

    fn named(name: &str) -> LocationName {
        LocationName::from(name)
    }

    #[test]
    fn resolver_output_is_consistent() {
        let world = WorldSnapshot::new(
            vec![
                HostLocation::outdoors("Farm").with_warp("Forest", 0, 6),
                HostLocation::outdoors("Forest").with_warp("Farm", 68, 116),
                HostLocation::indoors("Kitchen").with_warp("House", 6, 4),
                HostLocation::indoors("House")
                    .with_warp("Kitchen", 2, 9)
                    .with_warp("Farm", 64, 15),
                HostLocation::indoors("UndergroundMine7").with_warp("Mine", 1, 1),
                HostLocation::indoors("A").with_warp("B", 1, 1),
                HostLocation::indoors("B").with_warp("A", 1, 1),
            ],
            Vec::new(),
        );
        let settings = ResolverSettings::default();
        let store = GraphResolver::new(settings.clone())
            .rebuild(&world)
            .unwrap_or_default();
        assert!(audit(&store, &settings).is_empty());
    }

    #[test]
    fn reports_hand_broken_store() {
        let mut store = ContextStore::new();
        let settings = ResolverSettings::default();

        let farm = store.get_or_create(&named("Farm"));
        farm.kind = LocationKind::Outdoors;

        let shed = store.get_or_create(&named("Shed"));
        shed.root = Some(named("Cellar"));
        shed.neighbors.insert(named("Farm"), Tile::new(1, 1));

        store.get_or_create(&named("UndergroundMine3"));

        let violations = audit(&store, &settings);
        assert!(violations.contains(&Violation::OutdoorsNotOwnRoot {
            location: named("Farm")
        }));
        assert!(violations.contains(&Violation::RootNotOutdoors {
            location: named("Shed"),
            root: named("Cellar"),
        }));
        assert!(violations.contains(&Violation::NeighborsOnIndoor {
            location: named("Shed")
        }));
        assert!(violations.contains(&Violation::UnfoldedGeneratedLevel {
            location: named("UndergroundMine3")
        }));
    }

    #[test]
    fn reports_parent_loops_and_mismatched_roots() {
        let mut store = ContextStore::new();
        let settings = ResolverSettings::default();

        let farm = store.get_or_create(&named("Farm"));
        farm.kind = LocationKind::Outdoors;
        farm.root = Some(named("Farm"));

        let a = store.get_or_create(&named("A"));
        a.root = Some(named("Farm"));
        a.parent = Some(named("B"));
        let b = store.get_or_create(&named("B"));
        b.root = Some(named("Farm"));
        b.parent = Some(named("A"));

        let c = store.get_or_create(&named("C"));
        c.root = Some(named("Farm"));
        c.parent = Some(named("D"));
        store.get_or_create(&named("D"));

        let violations = audit(&store, &settings);
        assert!(violations.contains(&Violation::UnboundedParentChain {
            location: named("A")
        }));
        assert!(violations.contains(&Violation::RootMismatch {
            location: named("C"),
            chain_end: named("D"),
        }));
        assert_eq!(violations.len(), 3);
    }

    #[test]
    fn violation_messages_name_the_location() {
        let v = Violation::UnboundedParentChain {
            location: named("Cellar"),
        };
        assert_eq!(v.to_string(), "parent chain from Cellar does not terminate");
    }
}
