//! Coupling graph construction
//!
//! Connects every related entity pair with a weight derived from the
//! configured policy. Iteration is handle-ordered, so the same snapshot and
//! configuration always yield the same graph.

use crate::config::{AnalysisConfig, EdgeWeightPolicy};
use crate::core::attributes::AnalysisSnapshot;
use crate::core::entity::EntityHandle;
use crate::distance::distance;
use crate::graph::{CouplingGraph, Label};
use petgraph::graph::DiGraph;

/// Guards division when the distance between two entities is exactly zero.
const DISTANCE_EPSILON: f64 = 1e-9;

/// Build the weighted coupling graph for a snapshot.
///
/// Every entity becomes a vertex. Members start labeled with their owning
/// class; classes start labeled with themselves, so unmoved code begins
/// "labeled correctly."
pub fn build_graph(snapshot: &AnalysisSnapshot, config: &AnalysisConfig) -> CouplingGraph {
    let n = snapshot.len();
    let mut graph = DiGraph::with_capacity(n, n);

    let mut initial_labels = Vec::with_capacity(n);
    let mut anchors = Vec::with_capacity(n);
    for (handle, entity) in snapshot.arena().iter() {
        graph.add_node(handle);
        let label = match entity.kind().owner() {
            Some(owner) => Label::from_class(owner),
            None => Label::from_class(handle),
        };
        initial_labels.push(label);
        anchors.push(entity.kind().is_class());
    }

    let nodes: Vec<_> = graph.node_indices().collect();
    for i in 0..n {
        for j in (i + 1)..n {
            if let Some(weight) = edge_weight(snapshot, config, i, j) {
                graph.add_edge(nodes[i], nodes[j], weight);
            }
        }
    }

    CouplingGraph {
        graph,
        initial_labels,
        anchors,
    }
}

fn edge_weight(
    snapshot: &AnalysisSnapshot,
    config: &AnalysisConfig,
    i: usize,
    j: usize,
) -> Option<f64> {
    let a = snapshot.attributes_of(EntityHandle::from_index(i));
    let b = snapshot.attributes_of(EntityHandle::from_index(j));

    match config.edge_weight {
        EdgeWeightPolicy::Structural => {
            let weight = a.properties().weight_of(b.handle()) as u64
                + b.properties().weight_of(a.handle()) as u64;
            if weight == 0 {
                None
            } else {
                Some(weight as f64)
            }
        }
        EdgeWeightPolicy::InverseDistance => {
            let d = distance(a, b);
            if d.is_finite() {
                Some(1.0 / (d + DISTANCE_EPSILON))
            } else {
                None
            }
        }
    }
}
