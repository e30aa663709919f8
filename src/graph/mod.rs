//! Weighted coupling graph and label propagation
//!
//! Vertices are entity handles; edges carry coupling weights. Storage is
//! directed (petgraph `DiGraph`) but influence is symmetric: neighbor scans
//! walk both edge directions, and each undirected pair is stored once.

pub mod builder;
pub mod propagation;

pub use builder::build_graph;
pub use propagation::{
    CancellationFlag, ClusteringAlgorithm, LabelAssignment, LabelPropagation,
};

use crate::core::entity::EntityHandle;
use petgraph::graph::{DiGraph, NodeIndex};
use serde::{Deserialize, Serialize};

/// Class label claimed by a graph vertex.
///
/// A label value is the arena index of a class handle; [`Label::NONE`] means
/// unassigned.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct Label(u32);

impl Label {
    /// Distinguished "unassigned" sentinel.
    pub const NONE: Label = Label(u32::MAX);

    pub fn from_class(class: EntityHandle) -> Self {
        Label(class.index() as u32)
    }

    /// Class handle this label stands for, or `None` for the sentinel.
    pub fn class_handle(self) -> Option<EntityHandle> {
        if self == Self::NONE {
            None
        } else {
            Some(EntityHandle::from_index(self.0 as usize))
        }
    }
}

/// Weighted graph over an entity snapshot, with initial label per vertex.
///
/// Vertices are added in handle order, so `NodeIndex` and handle index
/// coincide; the same snapshot and configuration always produce the same
/// vertex set and edge weights.
#[derive(Debug)]
pub struct CouplingGraph {
    pub(crate) graph: DiGraph<EntityHandle, f64>,
    pub(crate) initial_labels: Vec<Label>,
    pub(crate) anchors: Vec<bool>,
}

impl CouplingGraph {
    pub fn vertex_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Initial label per vertex, in vertex order.
    pub fn initial_labels(&self) -> &[Label] {
        &self.initial_labels
    }

    /// Entity behind a vertex.
    pub fn entity_of(&self, vertex: usize) -> EntityHandle {
        self.graph[NodeIndex::new(vertex)]
    }

    /// True for class vertices, which may be pinned to their own label.
    pub fn is_anchor(&self, vertex: usize) -> bool {
        self.anchors[vertex]
    }

    /// Weight of the stored edge between two vertices, in either direction.
    pub fn edge_weight(&self, a: usize, b: usize) -> Option<f64> {
        let (a, b) = (NodeIndex::new(a), NodeIndex::new(b));
        self.graph
            .find_edge(a, b)
            .or_else(|| self.graph.find_edge(b, a))
            .map(|e| self.graph[e])
    }
}
