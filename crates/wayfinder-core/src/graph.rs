//! Lifecycle owner for the location context store.
//!
//! [`LocationGraph`] holds the store that queries read from and replaces it
//! whenever the host reports a topology change. A rebuild always writes
//! into a fresh store. The swap happens only after the build succeeds, so a
//! failed rebuild leaves readers on the previous (possibly stale) store.
//!
//! # Events
//!
//! - [`TopologyEvent::SaveLoaded`] -- a save finished loading; rebuild.
//! - [`TopologyEvent::LocationsChanged`] -- locations were added or
//!   removed at runtime; rebuild.
//! - [`TopologyEvent::ReturnedToTitle`] -- the session ended; drop the
//!   store.

use chrono::{DateTime, Utc};
use tracing::{error, info, warn};
use wayfinder_graph::{
    ContextQuery, ContextStore, GraphError, GraphResolver, ResolverSettings, Violation,
    WorldSource, audit,
};
use wayfinder_types::{LocationKind, LocationName};

/// Errors surfaced by the graph service.
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    /// The rebuild was abandoned. The previous store is still being served.
    #[error("rebuild failed, previous store retained: {0}")]
    Rebuild(#[from] GraphError),
}

/// A change in the host's world topology.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TopologyEvent {
    /// A save file finished loading.
    SaveLoaded,
    /// Locations were added to or removed from the live world.
    LocationsChanged {
        /// Names of the locations that appeared.
        added: Vec<LocationName>,
        /// Names of the locations that went away.
        removed: Vec<LocationName>,
    },
    /// The player returned to the title screen.
    ReturnedToTitle,
}

/// Counts reported after a successful rebuild.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RebuildSummary {
    /// Generation number of the store that was swapped in.
    pub generation: u64,
    /// Total number of contexts.
    pub locations: usize,
    /// Number of `Outdoors` contexts.
    pub outdoors: usize,
    /// Number of contexts with no root.
    pub unresolved: usize,
    /// Consistency violations found by the post-build audit.
    pub violations: Vec<Violation>,
}

/// Owns the current context store and rebuilds it on topology events.
#[derive(Debug, Clone, Default)]
pub struct LocationGraph {
    /// Resolver used for every rebuild.
    resolver: GraphResolver,

    /// Store currently being served.
    store: ContextStore,

    /// Incremented on every successful swap. Zero until the first build.
    generation: u64,

    /// Wall-clock time of the last successful build.
    built_at: Option<DateTime<Utc>>,
}

impl LocationGraph {
    /// Create an empty graph that will build with `settings`.
    pub fn new(settings: ResolverSettings) -> Self {
        Self {
            resolver: GraphResolver::new(settings),
            store: ContextStore::new(),
            generation: 0,
            built_at: None,
        }
    }

    /// React to a topology event, rebuilding from `world` where needed.
    ///
    /// Returns the rebuild summary, or `None` for events that only clear
    /// the store.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::Rebuild`] if the rebuild fails. The previous
    /// store stays in place.
    pub fn handle<W: WorldSource>(
        &mut self,
        event: &TopologyEvent,
        world: &W,
    ) -> Result<Option<RebuildSummary>, ServiceError> {
        match event {
            TopologyEvent::SaveLoaded => {
                info!("save loaded, rebuilding location graph");
                self.rebuild(world).map(Some)
            }
            TopologyEvent::LocationsChanged { added, removed } => {
                info!(
                    added = added.len(),
                    removed = removed.len(),
                    "locations changed, rebuilding location graph"
                );
                self.rebuild(world).map(Some)
            }
            TopologyEvent::ReturnedToTitle => {
                self.clear();
                Ok(None)
            }
        }
    }

    /// Build a fresh store from `world` and swap it in.
    ///
    /// The new store is audited after the build. Violations are logged and
    /// reported in the summary but do not block the swap.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::Rebuild`] if the resolver fails. The current
    /// store, generation and timestamp are left untouched.
    pub fn rebuild<W: WorldSource>(&mut self, world: &W) -> Result<RebuildSummary, ServiceError> {
        let store = match self.resolver.rebuild(world) {
            Ok(store) => store,
            Err(e) => {
                error!(error = %e, "location graph rebuild failed");
                warn!(
                    generation = self.generation,
                    locations = self.store.len(),
                    "keeping previous location graph"
                );
                return Err(e.into());
            }
        };

        let violations = audit(&store, self.resolver.settings());
        for violation in &violations {
            warn!(%violation, "location graph inconsistency");
        }

        self.store = store;
        self.generation = self.generation.saturating_add(1);
        self.built_at = Some(Utc::now());

        let summary = RebuildSummary {
            generation: self.generation,
            locations: self.store.len(),
            outdoors: self.store.count_kind(LocationKind::Outdoors),
            unresolved: self.store.unresolved_count(),
            violations,
        };
        info!(
            generation = summary.generation,
            locations = summary.locations,
            outdoors = summary.outdoors,
            unresolved = summary.unresolved,
            violations = summary.violations.len(),
            "location graph swapped in"
        );
        Ok(summary)
    }

    /// Drop the current store.
    ///
    /// The generation counter keeps counting across sessions.
    pub fn clear(&mut self) {
        info!(
            locations = self.store.len(),
            "returned to title, clearing location graph"
        );
        self.store = ContextStore::new();
        self.built_at = None;
    }

    /// Query facade over the current store.
    pub fn query(&self) -> ContextQuery<'_> {
        ContextQuery::new(&self.store, self.resolver.settings())
    }

    /// The store currently being served.
    pub const fn store(&self) -> &ContextStore {
        &self.store
    }

    /// The settings every rebuild uses.
    pub const fn settings(&self) -> &ResolverSettings {
        self.resolver.settings()
    }

    /// Generation number of the current store.
    pub const fn generation(&self) -> u64 {
        self.generation
    }

    /// When the current store was built, if one has been built this session.
    pub const fn built_at(&self) -> Option<DateTime<Utc>> {
        self.built_at
    }
}

#[cfg(test)]
mod tests {
    use wayfinder_graph::{WorldSnapshot, sample_world};
    use wayfinder_types::HostLocation;

    use super::*;

    fn make_graph() -> LocationGraph {
        LocationGraph::new(ResolverSettings::default())
    }

    #[test]
    fn new_graph_is_empty() {
        let graph = make_graph();
        assert!(graph.store().is_empty());
        assert_eq!(graph.generation(), 0);
        assert!(graph.built_at().is_none());
        assert!(graph.query().context("Farm").is_none());
    }

    #[test]
    fn save_loaded_builds_and_counts() {
        let mut graph = make_graph();
        let result = graph.handle(&TopologyEvent::SaveLoaded, &sample_world());
        assert!(result.is_ok());

        let summary = result.ok().flatten();
        assert_eq!(summary.as_ref().map(|s| s.generation), Some(1));
        assert_eq!(summary.as_ref().map(|s| s.outdoors), Some(9));
        assert!(summary.is_some_and(|s| s.violations.is_empty()));
        assert!(graph.built_at().is_some());
        assert!(graph.query().is_outdoors("Town"));
    }

    #[test]
    fn locations_changed_picks_up_new_location() {
        let mut graph = make_graph();
        let mut world = sample_world();
        assert!(graph.rebuild(&world).is_ok());
        assert!(graph.query().context("Greenhouse").is_none());

        world.push_interior(HostLocation::indoors("Greenhouse").with_warp("Farm", 28, 16));
        let event = TopologyEvent::LocationsChanged {
            added: vec![LocationName::from("Greenhouse")],
            removed: Vec::new(),
        };
        assert!(graph.handle(&event, &world).is_ok());

        assert_eq!(graph.generation(), 2);
        assert_eq!(
            graph.query().root_of("Greenhouse").map(LocationName::as_str),
            Some("Farm")
        );
    }

    #[test]
    fn returned_to_title_clears_store() {
        let mut graph = make_graph();
        assert!(graph.rebuild(&sample_world()).is_ok());
        assert!(!graph.store().is_empty());

        let result = graph.handle(&TopologyEvent::ReturnedToTitle, &WorldSnapshot::default());
        assert!(matches!(result, Ok(None)));
        assert!(graph.store().is_empty());
        assert!(graph.built_at().is_none());
        assert_eq!(graph.generation(), 1);
    }
}
