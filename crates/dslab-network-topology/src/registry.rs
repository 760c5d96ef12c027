//! Mapping between simulation actors and dense node ids.

use std::hash::{BuildHasherDefault, Hash};

use indexmap::IndexSet;
use rustc_hash::FxHasher;

use crate::graph::NodeId;

/// Assigns dense node ids to actors in order of first appearance.
///
/// Ids start at 0 and are never reused: an actor keeps its id for the lifetime of the registry.
pub struct NodeRegistry<A> {
    actors: IndexSet<A, BuildHasherDefault<FxHasher>>,
}

impl<A: Eq + Hash> NodeRegistry<A> {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self {
            actors: IndexSet::default(),
        }
    }

    /// Returns the node id of the actor, allocating the next free id on first call.
    ///
    /// The second value is `true` if a new id was allocated.
    pub fn resolve(&mut self, actor: A) -> (NodeId, bool) {
        self.actors.insert_full(actor)
    }

    /// Returns the node id of the actor without allocating one.
    pub fn get(&self, actor: &A) -> Option<NodeId> {
        self.actors.get_index_of(actor)
    }

    /// Returns the actor mapped to the node id.
    pub fn actor(&self, node: NodeId) -> Option<&A> {
        self.actors.get_index(node)
    }

    /// Checks whether the actor has a node id.
    pub fn contains(&self, actor: &A) -> bool {
        self.actors.contains(actor)
    }

    /// Returns the number of registered actors.
    pub fn len(&self) -> usize {
        self.actors.len()
    }

    /// Checks whether no actors are registered.
    pub fn is_empty(&self) -> bool {
        self.actors.is_empty()
    }

    /// Iterates over `(node id, actor)` pairs in id order.
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &A)> {
        self.actors.iter().enumerate()
    }
}

impl<A: Eq + Hash> Default for NodeRegistry<A> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_dense_and_stable() {
        let mut registry = NodeRegistry::new();
        assert_eq!(registry.resolve("broker"), (0, true));
        assert_eq!(registry.resolve("datacenter"), (1, true));
        assert_eq!(registry.resolve("broker"), (0, false));
        assert_eq!(registry.resolve("host"), (2, true));
        assert_eq!(registry.len(), 3);
    }

    #[test]
    fn lookup_does_not_allocate() {
        let mut registry = NodeRegistry::new();
        registry.resolve(7u32);
        assert_eq!(registry.get(&7), Some(0));
        assert_eq!(registry.get(&8), None);
        assert!(!registry.contains(&8));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn reverse_lookup() {
        let mut registry = NodeRegistry::new();
        registry.resolve("a".to_string());
        registry.resolve("b".to_string());
        assert_eq!(registry.actor(1).map(String::as_str), Some("b"));
        assert_eq!(registry.actor(2), None);
        let ids: Vec<_> = registry.iter().map(|(id, _)| id).collect();
        assert_eq!(ids, vec![0, 1]);
    }
}
