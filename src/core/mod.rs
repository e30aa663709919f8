//! Core entity/attribute model shared by all clustering strategies

pub mod attributes;
pub mod entity;
pub mod errors;
pub mod properties;

pub use attributes::{AnalysisSnapshot, EntityAttributes, SnapshotBuilder};
pub use entity::{Entity, EntityArena, EntityHandle, EntityKind};
pub use errors::{Error, Result};
pub use properties::RelevantProperties;
