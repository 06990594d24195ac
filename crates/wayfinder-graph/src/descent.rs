//! Root-mapping descent.
//!
//! For an indoor location, follow warps until an outdoor location is
//! reached, then propagate that root back along the path. Every location on
//! the way is stamped with its root, kind, parent and entry tile.
//!
//! # Traversal rules
//!
//! - Only the first viable warp of a location is followed, in host order.
//!   That warp decides the location's kind and parent.
//! - A warp is not viable if it leads straight back to the current or
//!   previous location, or if the host cannot resolve its target.
//! - A location already visited in this traversal yields no root. This cuts
//!   real cycles and converging warps alike.
//! - An indoor location already resolved by an earlier traversal of the
//!   same rebuild returns its stored root without re-deciding its kind or
//!   parent.
//! - Recursing past the depth limit is fatal: [`GraphError::DepthExceeded`].
//!   The limit is `max_depth`, capped at [`MAX_DEPTH_LIMIT`].
//!
//! [`MAX_DEPTH_LIMIT`]: crate::resolver::MAX_DEPTH_LIMIT

use std::collections::BTreeSet;

use tracing::{error, trace};
use wayfinder_types::{HostLocation, LocationKind, LocationName, Tile};

use crate::error::GraphError;
use crate::resolver::ResolverSettings;
use crate::source::WorldSource;
use crate::store::ContextStore;

/// One step of the descent.
#[derive(Debug)]
struct Hop<'a> {
    /// Location being entered.
    location: &'a HostLocation,
    /// Canonical name of the location we came from.
    previous: Option<LocationName>,
    /// Whether a warp to an outdoor location has been seen on this path.
    outdoor_seen: bool,
    /// Tile in `location` where the previous hop's warp lands.
    arrival: Option<Tile>,
    depth: u32,
}

impl<'a> Hop<'a> {
    const fn seed(location: &'a HostLocation) -> Self {
        Self {
            location,
            previous: None,
            outdoor_seen: false,
            arrival: None,
            depth: 0,
        }
    }
}

/// Recursive root-mapping over a host world, writing into a store.
pub struct Descent<'a, W> {
    world: &'a W,
    store: &'a mut ContextStore,
    settings: &'a ResolverSettings,
}

impl<'a, W: WorldSource> Descent<'a, W> {
    /// Create a descent writing into `store`.
    pub const fn new(
        world: &'a W,
        store: &'a mut ContextStore,
        settings: &'a ResolverSettings,
    ) -> Self {
        Self {
            world,
            store,
            settings,
        }
    }

    /// Run a fresh traversal seeded at `seed`.
    ///
    /// Returns the discovered root, or `None` if no outdoor location is
    /// reachable through first-viable warps.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::DepthExceeded`] if the recursion passes the
    /// configured ceiling.
    pub fn descend_from(
        &mut self,
        seed: &'a HostLocation,
    ) -> Result<Option<LocationName>, GraphError> {
        let mut visited = BTreeSet::new();
        self.descend(Hop::seed(seed), &mut visited)
    }

    fn descend(
        &mut self,
        hop: Hop<'a>,
        visited: &mut BTreeSet<LocationName>,
    ) -> Result<Option<LocationName>, GraphError> {
        let settings = self.settings;
        let world = self.world;
        let name = settings.levels.canonical(hop.location.name.as_str());

        if !visited.insert(name.clone()) {
            return Ok(None);
        }

        let limit = settings.depth_limit();
        if hop.depth > limit {
            error!(
                location = %name,
                depth = hop.depth,
                limit,
                "root-mapping descent exceeded depth ceiling"
            );
            return Err(GraphError::DepthExceeded {
                location: name,
                depth: hop.depth,
                limit,
            });
        }

        self.store.get_or_create(&name);

        // Stamp how the previous location is entered from here. A location
        // one hop from its root keeps no parent.
        if let Some(prev) = hop.previous.as_ref()
            && let Some(tile) = hop.arrival
        {
            let parent = (!hop.location.outdoors).then(|| name.clone());
            let prev_ctx = self.store.get_or_create(prev);
            prev_ctx.warp = Some(tile);
            prev_ctx.parent = parent;
        }

        if hop.location.outdoors {
            let ctx = self.store.get_or_create(&name);
            ctx.kind = LocationKind::Outdoors;
            ctx.root = Some(name.clone());
            if let Some(prev) = hop.previous {
                ctx.children.insert(prev);
            }
            return Ok(Some(name));
        }

        let ctx = self.store.get_or_create(&name);
        if let Some(known) = ctx.root.clone() {
            if let Some(prev) = hop.previous {
                ctx.children.insert(prev);
            }
            return Ok(Some(known));
        }

        let warps = settings
            .overrides
            .effective_warps(hop.location, &settings.levels);
        let mut outdoor_seen = hop.outdoor_seen;

        for warp in warps.iter() {
            let target_name = settings.levels.canonical(warp.target.as_str());
            if target_name == name || hop.previous.as_ref() == Some(&target_name) {
                continue;
            }
            let Some(target) = world.resolve(warp.target.as_str()) else {
                trace!(from = %name, target = %warp.target, "skipping unresolvable warp");
                continue;
            };
            if target.outdoors {
                outdoor_seen = true;
            }

            let ctx = self.store.get_or_create(&name);
            ctx.kind = if outdoor_seen {
                LocationKind::Building
            } else {
                LocationKind::Room
            };
            if let Some(prev) = hop.previous.as_ref() {
                ctx.children.insert(prev.clone());
            }

            let depth = hop.depth.saturating_add(1);
            let next = Hop {
                location: target,
                previous: Some(name.clone()),
                outdoor_seen,
                arrival: warp.arrival(),
                depth,
            };
            let root = self.descend(next, visited)?;
            if let Some(found) = root.as_ref() {
                self.store.get_or_create(&name).root = Some(found.clone());
            }
            return Ok(root);
        }

        Ok(None)
    }
}
