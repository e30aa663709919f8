//! Entity arena and handle types
//!
//! Code elements (classes, methods, fields) are interned once into an
//! `EntityArena` and referenced everywhere else by stable integer handles.
//! Attributes, relevance sets, and graph vertices all key off handles, so
//! two lookups of the same element can never produce distinct nodes.

use crate::core::errors::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Stable index of an entity within an [`EntityArena`].
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct EntityHandle(u32);

impl EntityHandle {
    /// Position of this entity in the arena.
    pub fn index(self) -> usize {
        self.0 as usize
    }

    pub(crate) fn from_index(index: usize) -> Self {
        Self(index as u32)
    }
}

/// Kind of code element, carrying the ownership payload for members.
///
/// Methods and fields name exactly one owning class; classes have no owner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Class,
    Method { owner: EntityHandle },
    Field { owner: EntityHandle },
}

impl EntityKind {
    /// Owning class handle, or `None` for classes.
    pub fn owner(&self) -> Option<EntityHandle> {
        match self {
            EntityKind::Class => None,
            EntityKind::Method { owner } | EntityKind::Field { owner } => Some(*owner),
        }
    }

    pub fn is_class(&self) -> bool {
        matches!(self, EntityKind::Class)
    }

    pub fn is_member(&self) -> bool {
        !self.is_class()
    }

    /// True when both values are the same concrete kind, ignoring ownership.
    pub fn same_kind(&self, other: &EntityKind) -> bool {
        std::mem::discriminant(self) == std::mem::discriminant(other)
    }
}

/// A uniquely named code element. Immutable after insertion.
#[derive(Debug, Clone)]
pub struct Entity {
    name: String,
    kind: EntityKind,
}

impl Entity {
    /// Unique qualified name or signature.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> &EntityKind {
        &self.kind
    }
}

/// Arena of entities indexed by stable handles.
///
/// Inserting a name that already exists returns the existing handle, so
/// repeated inserts of the same element cannot duplicate it. Owner handles
/// are validated at insertion: a member whose owner is missing or not a
/// class is rejected, since downstream label propagation assumes a complete
/// class-ownership forest.
#[derive(Debug, Default)]
pub struct EntityArena {
    entities: Vec<Entity>,
    by_name: HashMap<String, EntityHandle>,
    children: HashMap<EntityHandle, Vec<EntityHandle>>,
}

impl EntityArena {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a class, or return the existing handle for the same name.
    pub fn add_class(&mut self, name: impl Into<String>) -> Result<EntityHandle> {
        self.insert(name.into(), EntityKind::Class)
    }

    /// Insert a method owned by `owner`, or return the existing handle.
    pub fn add_method(
        &mut self,
        name: impl Into<String>,
        owner: EntityHandle,
    ) -> Result<EntityHandle> {
        self.validate_owner(owner)?;
        let handle = self.insert(name.into(), EntityKind::Method { owner })?;
        self.record_child(owner, handle);
        Ok(handle)
    }

    /// Insert a field owned by `owner`, or return the existing handle.
    pub fn add_field(
        &mut self,
        name: impl Into<String>,
        owner: EntityHandle,
    ) -> Result<EntityHandle> {
        self.validate_owner(owner)?;
        let handle = self.insert(name.into(), EntityKind::Field { owner })?;
        self.record_child(owner, handle);
        Ok(handle)
    }

    fn insert(&mut self, name: String, kind: EntityKind) -> Result<EntityHandle> {
        if let Some(&existing) = self.by_name.get(&name) {
            let entity = &self.entities[existing.index()];
            if !entity.kind.same_kind(&kind) || entity.kind.owner() != kind.owner() {
                return Err(Error::validation(format!(
                    "entity '{}' re-inserted with a different kind or owner",
                    name
                )));
            }
            return Ok(existing);
        }

        let handle = EntityHandle::from_index(self.entities.len());
        self.entities.push(Entity {
            name: name.clone(),
            kind,
        });
        self.by_name.insert(name, handle);
        Ok(handle)
    }

    fn validate_owner(&self, owner: EntityHandle) -> Result<()> {
        match self.entities.get(owner.index()) {
            Some(entity) if entity.kind.is_class() => Ok(()),
            Some(entity) => Err(Error::validation(format!(
                "owner '{}' is not a class",
                entity.name
            ))),
            None => Err(Error::validation(format!(
                "dangling owner handle {}",
                owner.index()
            ))),
        }
    }

    fn record_child(&mut self, owner: EntityHandle, child: EntityHandle) {
        let children = self.children.entry(owner).or_default();
        if !children.contains(&child) {
            children.push(child);
        }
    }

    /// Look up a handle by qualified name.
    pub fn handle_of(&self, name: &str) -> Option<EntityHandle> {
        self.by_name.get(name).copied()
    }

    /// Entity for a handle. Panics on a foreign handle, which cannot occur
    /// for handles issued by this arena.
    pub fn get(&self, handle: EntityHandle) -> &Entity {
        &self.entities[handle.index()]
    }

    /// True when the handle was issued by this arena.
    pub fn contains(&self, handle: EntityHandle) -> bool {
        handle.index() < self.entities.len()
    }

    /// Members owned by a class, in insertion order.
    pub fn children_of(&self, class: EntityHandle) -> &[EntityHandle] {
        self.children.get(&class).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Owning class of a member, or `None` for classes.
    pub fn owner_of(&self, handle: EntityHandle) -> Option<EntityHandle> {
        self.get(handle).kind.owner()
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Iterate entities in handle order.
    pub fn iter(&self) -> impl Iterator<Item = (EntityHandle, &Entity)> {
        self.entities
            .iter()
            .enumerate()
            .map(|(i, e)| (EntityHandle::from_index(i), e))
    }
}
