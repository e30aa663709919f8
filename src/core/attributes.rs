//! Per-entity attributes and the immutable analysis snapshot
//!
//! The snapshot is built once per analysis run and then shared read-only
//! across clustering runs. Each entity carries a fixed-length feature vector
//! (magnitude metrics computed by the upstream static analyzer) and a
//! relevance set describing its structural neighbors.

use crate::core::entity::{EntityArena, EntityHandle, EntityKind};
use crate::core::errors::{Error, Result};
use crate::core::properties::RelevantProperties;
use std::collections::HashMap;
use std::sync::Arc;

/// Feature vector plus relevance set for a single entity.
#[derive(Debug, Clone)]
pub struct EntityAttributes {
    handle: EntityHandle,
    kind: EntityKind,
    features: Vec<f64>,
    properties: RelevantProperties,
}

impl EntityAttributes {
    pub fn handle(&self) -> EntityHandle {
        self.handle
    }

    pub fn kind(&self) -> &EntityKind {
        &self.kind
    }

    /// Magnitude features from complexity metrics. May be empty when the
    /// upstream analyzer supplies none.
    pub fn features(&self) -> &[f64] {
        &self.features
    }

    pub fn properties(&self) -> &RelevantProperties {
        &self.properties
    }
}

/// Accumulates entities, relations, and feature vectors, then freezes them
/// into an [`AnalysisSnapshot`].
#[derive(Debug, Default)]
pub struct SnapshotBuilder {
    arena: EntityArena,
    features: HashMap<EntityHandle, Vec<f64>>,
    properties: HashMap<EntityHandle, RelevantProperties>,
}

impl SnapshotBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_class(&mut self, name: impl Into<String>) -> Result<EntityHandle> {
        self.arena.add_class(name)
    }

    pub fn add_method(
        &mut self,
        name: impl Into<String>,
        owner: EntityHandle,
    ) -> Result<EntityHandle> {
        self.arena.add_method(name, owner)
    }

    pub fn add_field(
        &mut self,
        name: impl Into<String>,
        owner: EntityHandle,
    ) -> Result<EntityHandle> {
        self.arena.add_field(name, owner)
    }

    /// Attach a feature vector to an entity, replacing any prior vector.
    pub fn set_features(&mut self, handle: EntityHandle, features: Vec<f64>) -> Result<()> {
        self.check_handle(handle)?;
        self.features.insert(handle, features);
        Ok(())
    }

    /// Record a weighted structural relation from `from` to `to`.
    ///
    /// Self-relations are dropped: an entity is never relevant to itself.
    pub fn relate(&mut self, from: EntityHandle, to: EntityHandle, weight: u32) -> Result<()> {
        self.check_handle(from)?;
        self.check_handle(to)?;
        if from == to {
            log::debug!(
                "ignoring self-relation on '{}'",
                self.arena.get(from).name()
            );
            return Ok(());
        }
        self.properties.entry(from).or_default().add(to, weight);
        Ok(())
    }

    fn check_handle(&self, handle: EntityHandle) -> Result<()> {
        if self.arena.contains(handle) {
            Ok(())
        } else {
            Err(Error::validation(format!(
                "unknown entity handle {}",
                handle.index()
            )))
        }
    }

    /// Freeze the accumulated state into an immutable snapshot.
    pub fn build(mut self) -> Result<AnalysisSnapshot> {
        let mut attributes = Vec::with_capacity(self.arena.len());
        for (handle, entity) in self.arena.iter() {
            attributes.push(EntityAttributes {
                handle,
                kind: *entity.kind(),
                features: self.features.remove(&handle).unwrap_or_default(),
                properties: self.properties.remove(&handle).unwrap_or_default(),
            });
        }
        Ok(AnalysisSnapshot {
            arena: self.arena,
            attributes,
        })
    }
}

/// Immutable entity/attribute snapshot for an analysis run.
///
/// Wrap in an `Arc` via [`AnalysisSnapshot::shared`] to run several
/// clustering configurations concurrently over the same data.
#[derive(Debug)]
pub struct AnalysisSnapshot {
    arena: EntityArena,
    attributes: Vec<EntityAttributes>,
}

impl AnalysisSnapshot {
    pub fn arena(&self) -> &EntityArena {
        &self.arena
    }

    pub fn attributes_of(&self, handle: EntityHandle) -> &EntityAttributes {
        &self.attributes[handle.index()]
    }

    /// Iterate attributes in handle order.
    pub fn iter(&self) -> impl Iterator<Item = &EntityAttributes> {
        self.attributes.iter()
    }

    pub fn len(&self) -> usize {
        self.attributes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
    }

    /// Relevance set of a class merged with those of all its members.
    /// For members this is just a copy of their own set.
    pub fn aggregated_properties(&self, handle: EntityHandle) -> RelevantProperties {
        let mut merged = self.attributes_of(handle).properties().clone();
        for &child in self.arena.children_of(handle) {
            merged.merge(self.attributes_of(child).properties());
        }
        merged
    }

    pub fn shared(self) -> Arc<Self> {
        Arc::new(self)
    }
}
