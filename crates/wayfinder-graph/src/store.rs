//! The location context store.
//!
//! A plain ordered map from canonical location name to its
//! [`LocationContext`]. The store has no behavior beyond storage and default
//! construction: the resolver is its single writer, and the query facade
//! reads it. A store is built fresh for every rebuild and then swapped in
//! whole. Entries are never deleted individually.
//!
//! `BTreeMap` keeps iteration and serialization order deterministic, so two
//! rebuilds of the same topology serialize to identical bytes.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use wayfinder_types::{LocationContext, LocationKind, LocationName};

/// In-memory map of location contexts keyed by canonical name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContextStore {
    contexts: BTreeMap<LocationName, LocationContext>,
}

impl ContextStore {
    /// Create an empty store.
    pub const fn new() -> Self {
        Self {
            contexts: BTreeMap::new(),
        }
    }

    /// Get the context stored under `name`.
    pub fn get(&self, name: &str) -> Option<&LocationContext> {
        self.contexts.get(name)
    }

    /// Get a mutable reference to the context stored under `name`.
    pub fn get_mut(&mut self, name: &str) -> Option<&mut LocationContext> {
        self.contexts.get_mut(name)
    }

    /// Get the context for `name`, creating a default one on first touch.
    pub fn get_or_create(&mut self, name: &LocationName) -> &mut LocationContext {
        self.contexts
            .entry(name.clone())
            .or_insert_with(|| LocationContext::new(name.clone()))
    }

    /// Whether a context exists for `name`.
    pub fn contains(&self, name: &str) -> bool {
        self.contexts.contains_key(name)
    }

    /// Number of stored contexts.
    pub fn len(&self) -> usize {
        self.contexts.len()
    }

    /// Whether the store is empty.
    pub fn is_empty(&self) -> bool {
        self.contexts.is_empty()
    }

    /// Iterate over all contexts in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&LocationName, &LocationContext)> {
        self.contexts.iter()
    }

    /// Iterate over all stored names in order.
    pub fn names(&self) -> impl Iterator<Item = &LocationName> {
        self.contexts.keys()
    }

    /// Number of contexts of the given kind.
    pub fn count_kind(&self, kind: LocationKind) -> usize {
        self.contexts.values().filter(|ctx| ctx.kind == kind).count()
    }

    /// Number of contexts that no traversal could resolve to a root.
    pub fn unresolved_count(&self) -> usize {
        self.contexts
            .values()
            .filter(|ctx| !ctx.is_resolved())
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn get_or_create_inserts_once() {
        let mut store = ContextStore::new();
        let name = LocationName::from("Farm");
        store.get_or_create(&name).kind = LocationKind::Outdoors;
        store.get_or_create(&name);
        assert_eq!(store.len(), 1);
        assert_eq!(
            store.get("Farm").map(|ctx| ctx.kind),
            Some(LocationKind::Outdoors)
        );
    }

    #[test]
    fn unknown_name_is_absent() {
        let store = ContextStore::new();
        assert!(store.is_empty());
        assert!(store.get("Nowhere").is_none());
        assert!(!store.contains("Nowhere"));
    }

    #[test]
    fn counts_by_kind_and_resolution() {
        let mut store = ContextStore::new();
        let farm = LocationName::from("Farm");
        let ctx = store.get_or_create(&farm);
        ctx.kind = LocationKind::Outdoors;
        ctx.root = Some(farm.clone());
        store.get_or_create(&LocationName::from("Attic"));

        assert_eq!(store.count_kind(LocationKind::Outdoors), 1);
        assert_eq!(store.count_kind(LocationKind::Room), 1);
        assert_eq!(store.unresolved_count(), 1);
    }

    #[test]
    fn serializes_in_name_order() {
        let mut store = ContextStore::new();
        store.get_or_create(&LocationName::from("Town"));
        store.get_or_create(&LocationName::from("Beach"));
        let names: Vec<&str> = store.names().map(LocationName::as_str).collect();
        assert_eq!(names, vec!["Beach", "Town"]);

        let json = serde_json::to_string(&store).unwrap_or_default();
        let beach = json.find("\"Beach\"");
        let town = json.find("\"Town\"");
        assert!(beach.is_some() && town.is_some());
        assert!(beach < town);
    }
}
