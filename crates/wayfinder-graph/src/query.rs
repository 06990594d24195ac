//! Query facade over a populated [`ContextStore`].
//!
//! [`ContextQuery`] is a borrowed, stateless view. Every lookup folds a
//! possibly-generated name once at the start, then follows the canonical
//! names stored in `parent` links without re-folding. Unknown locations are
//! never errors: lookups return `None`, predicates return `false`.
//!
//! Parent walks are bounded by the resolver's depth ceiling and stop on any
//! revisited location, so a store holding a stale parent loop cannot hang a
//! consumer.

use std::collections::{BTreeMap, BTreeSet};

use wayfinder_types::{LocationContext, LocationKind, LocationName, Tile};

use crate::levels::LevelFolding;
use crate::resolver::ResolverSettings;
use crate::store::ContextStore;

/// Read-only queries over a built store.
#[derive(Debug, Clone, Copy)]
pub struct ContextQuery<'a> {
    store: &'a ContextStore,
    levels: &'a LevelFolding,
    max_hops: u32,
}

impl<'a> ContextQuery<'a> {
    /// Create a query view using the settings the store was built with.
    pub const fn new(store: &'a ContextStore, settings: &'a ResolverSettings) -> Self {
        Self {
            store,
            levels: &settings.levels,
            max_hops: settings.max_depth,
        }
    }

    /// Look up the context for `id`, folding generated levels unless
    /// `fold_generated` is `false`.
    pub fn get_context(&self, id: &str, fold_generated: bool) -> Option<&'a LocationContext> {
        if fold_generated && let Some(canonical) = self.levels.fold(id) {
            return self.store.get(canonical.as_str());
        }
        self.store.get(id)
    }

    /// Shorthand for [`get_context`] with folding enabled.
    ///
    /// [`get_context`]: ContextQuery::get_context
    pub fn context(&self, id: &str) -> Option<&'a LocationContext> {
        self.get_context(id, true)
    }

    /// The canonical entry for a generated level, or `None` if `id` is not one.
    pub fn generated_level_name(&self, id: &str) -> Option<LocationName> {
        self.levels.fold(id)
    }

    /// The name `id` is stored under.
    pub fn canonical_name(&self, id: &str) -> LocationName {
        self.levels.canonical(id)
    }

    /// The nearest location classified [`LocationKind::Building`], starting
    /// at `id` itself and walking up `parent` links.
    ///
    /// Returns `None` if the chain ends (root reached, missing parent, loop,
    /// or hop limit) without meeting a building.
    pub fn get_building_ancestor(&self, id: &str) -> Option<&'a LocationName> {
        let start = self.context(id)?;
        self.ancestors(start)
            .find(|ctx| ctx.kind == LocationKind::Building)
            .map(|ctx| &ctx.name)
    }

    /// Whether `id` is an outdoor location. `false` for unknown locations.
    pub fn is_outdoors(&self, id: &str) -> bool {
        self.context(id).is_some_and(|ctx| ctx.kind.is_outdoors())
    }

    /// The outdoor root containing `id`, if resolved.
    pub fn root_of(&self, id: &str) -> Option<&'a LocationName> {
        self.context(id)?.root.as_ref()
    }

    /// Whether `a` and `b` are both resolved and share a root.
    pub fn same_root(&self, a: &str, b: &str) -> bool {
        match (self.root_of(a), self.root_of(b)) {
            (Some(ra), Some(rb)) => ra == rb,
            _ => false,
        }
    }

    /// Whether `a` and `b` are inside the same building.
    pub fn same_building(&self, a: &str, b: &str) -> bool {
        match (self.get_building_ancestor(a), self.get_building_ancestor(b)) {
            (Some(ba), Some(bb)) => ba == bb,
            _ => false,
        }
    }

    /// Outdoor neighbors of `id` with their arrival tiles.
    pub fn neighbors(&self, id: &str) -> Option<&'a BTreeMap<LocationName, Tile>> {
        self.context(id).map(|ctx| &ctx.neighbors)
    }

    /// The tile inside `current` through which `target` is reached.
    ///
    /// Walks up from `target` to the location directly inside `current` and
    /// returns that location's entry tile. A location with no parent counts
    /// as directly inside its root. Returns `None` if `target` is not inside
    /// `current`, if they are the same location, or if the entry tile was
    /// never recorded.
    pub fn door_toward(&self, current: &str, target: &str) -> Option<Tile> {
        let current = self.canonical_name(current);
        let start = self.context(target)?;

        for ctx in self.ancestors(start) {
            if ctx.name == current {
                return None;
            }
            let directly_inside = match ctx.parent.as_ref() {
                Some(parent) => *parent == current,
                None => ctx.root.as_ref() == Some(&current),
            };
            if directly_inside {
                return ctx.warp;
            }
        }
        None
    }

    /// `id`, then each parent in turn, ending with the root.
    ///
    /// Empty for unknown locations. For an unresolved location the chain
    /// ends wherever its parent links end.
    pub fn containment_chain(&self, id: &str) -> Vec<&'a LocationName> {
        let Some(start) = self.context(id) else {
            return Vec::new();
        };
        let mut chain: Vec<&'a LocationName> = self.ancestors(start).map(|ctx| &ctx.name).collect();
        if let Some(root) = start.root.as_ref()
            && chain.last().is_none_or(|last| *last != root)
        {
            chain.push(root);
        }
        chain
    }

    fn ancestors(&self, start: &'a LocationContext) -> Ancestors<'a> {
        Ancestors {
            store: self.store,
            next: Some(start),
            seen: BTreeSet::new(),
            hops_left: self.max_hops,
        }
    }
}

/// Iterator over a context and its parents.
struct Ancestors<'a> {
    store: &'a ContextStore,
    next: Option<&'a LocationContext>,
    seen: BTreeSet<&'a LocationName>,
    hops_left: u32,
}

impl<'a> Iterator for Ancestors<'a> {
    type Item = &'a LocationContext;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next.take()?;
        if !self.seen.insert(&current.name) {
            return None;
        }
        if let Some(hops) = self.hops_left.checked_sub(1) {
            self.hops_left = hops;
            self.next = current
                .parent
                .as_ref()
                .and_then(|parent| self.store.get(parent.as_str()));
        }
        Some(current)
    }
}
