//! Weighted relevance sets
//!
//! A `RelevantProperties` set records which other entities an entity is
//! structurally related to (field access, method call, inheritance), each
//! with an accumulated integer weight. Intersection size is the count of
//! distinct shared entities, not the sum of min-weights: the union is a
//! distinct count, and mixing the two would let the Jaccard term exceed 1.

use crate::core::entity::{EntityArena, EntityHandle};
use std::collections::{BTreeSet, HashMap};

/// Weighted multiset of entity references, keyed by handle.
///
/// Built by exactly one producer, then handed off read-only inside the
/// analysis snapshot. Not synchronized.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RelevantProperties {
    weights: HashMap<EntityHandle, u32>,
}

impl RelevantProperties {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a relation to `reference`, merging with any prior weight.
    pub fn add(&mut self, reference: EntityHandle, weight: u32) {
        let entry = self.weights.entry(reference).or_insert(0);
        *entry = entry.saturating_add(weight);
    }

    /// Merge another set into this one, accumulating weights.
    pub fn merge(&mut self, other: &RelevantProperties) {
        for (&reference, &weight) in &other.weights {
            self.add(reference, weight);
        }
    }

    pub fn contains(&self, reference: EntityHandle) -> bool {
        self.weights.contains_key(&reference)
    }

    /// Accumulated weight for a reference, 0 when absent.
    pub fn weight_of(&self, reference: EntityHandle) -> u32 {
        self.weights.get(&reference).copied().unwrap_or(0)
    }

    /// Count of distinct entities present in both sets.
    pub fn size_of_intersection(&self, other: &RelevantProperties) -> usize {
        let (small, large) = if self.weights.len() <= other.weights.len() {
            (self, other)
        } else {
            (other, self)
        };
        small
            .weights
            .keys()
            .filter(|reference| large.weights.contains_key(reference))
            .count()
    }

    /// Count of distinct entities present in either set.
    pub fn size_of_union(&self, other: &RelevantProperties) -> usize {
        self.weights.len() + other.weights.len() - self.size_of_intersection(other)
    }

    /// Class handles referenced by this set, in handle order.
    pub fn classes(&self, arena: &EntityArena) -> BTreeSet<EntityHandle> {
        self.weights
            .keys()
            .filter(|&&reference| arena.contains(reference) && arena.get(reference).kind().is_class())
            .copied()
            .collect()
    }

    pub fn len(&self) -> usize {
        self.weights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }

    /// Iterate (reference, weight) pairs in unspecified order.
    pub fn iter(&self) -> impl Iterator<Item = (EntityHandle, u32)> + '_ {
        self.weights.iter().map(|(&r, &w)| (r, w))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::entity::EntityArena;

    fn handle(i: usize) -> EntityHandle {
        EntityHandle::from_index(i)
    }

    #[test]
    fn add_merges_weights() {
        let mut props = RelevantProperties::new();
        props.add(handle(0), 2);
        props.add(handle(0), 3);
        assert_eq!(props.weight_of(handle(0)), 5);
        assert_eq!(props.len(), 1);
    }

    #[test]
    fn intersection_counts_distinct_shared_keys() {
        let mut a = RelevantProperties::new();
        a.add(handle(0), 5);
        a.add(handle(1), 1);

        let mut b = RelevantProperties::new();
        b.add(handle(1), 7);
        b.add(handle(2), 2);

        // Shared key {1} counts once regardless of weights
        assert_eq!(a.size_of_intersection(&b), 1);
        assert_eq!(b.size_of_intersection(&a), 1);
        assert_eq!(a.size_of_union(&b), 3);
    }

    #[test]
    fn disjoint_sets_have_empty_intersection() {
        let mut a = RelevantProperties::new();
        a.add(handle(0), 1);
        let mut b = RelevantProperties::new();
        b.add(handle(1), 1);
        assert_eq!(a.size_of_intersection(&b), 0);
        assert_eq!(a.size_of_union(&b), 2);
    }

    #[test]
    fn merge_accumulates() {
        let mut a = RelevantProperties::new();
        a.add(handle(0), 1);
        let mut b = RelevantProperties::new();
        b.add(handle(0), 4);
        b.add(handle(1), 2);

        a.merge(&b);
        assert_eq!(a.weight_of(handle(0)), 5);
        assert_eq!(a.weight_of(handle(1)), 2);
    }

    #[test]
    fn classes_filters_member_references() {
        let mut arena = EntityArena::new();
        let class = arena.add_class("A").unwrap();
        let method = arena.add_method("A.m()", class).unwrap();

        let mut props = RelevantProperties::new();
        props.add(class, 1);
        props.add(method, 3);

        let classes = props.classes(&arena);
        assert!(classes.contains(&class));
        assert!(!classes.contains(&method));
    }
}
