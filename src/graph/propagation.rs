//! Label propagation clustering engine
//!
//! Iteratively reassigns each vertex to the label with the maximum
//! accumulated neighbor weight until no vertex changes or the round budget
//! runs out. Rounds are synchronous (Jacobi): every vertex reads the
//! previous round's state and writes the next round's, so the per-round
//! scan parallelizes cleanly and the result is independent of visit order.

use crate::config::{AnalysisConfig, TieBreak};
use crate::graph::{CouplingGraph, Label};
use petgraph::graph::NodeIndex;
use petgraph::visit::EdgeRef;
use petgraph::Direction;
use rayon::prelude::*;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Tolerance when comparing accumulated edge weights for the tie-break.
const WEIGHT_TOLERANCE: f64 = 1e-9;

/// Cooperative cancellation flag, checked between rounds.
#[derive(Debug, Clone, Default)]
pub struct CancellationFlag(Arc<AtomicBool>);

impl CancellationFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// Terminal state of a clustering run.
///
/// `converged == false` is a status, not an error: the best-known labels are
/// still returned, and callers decide whether to accept them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelAssignment {
    /// Final label per vertex, in vertex order.
    pub labels: Vec<Label>,
    pub converged: bool,
    /// Completed rounds, including the quiet round that proves convergence.
    pub rounds: usize,
}

/// Strategy interface for clustering algorithms over a coupling graph.
///
/// Label propagation is the one required implementation; alternative
/// strategies share the same snapshot/distance foundation.
pub trait ClusteringAlgorithm {
    fn assign_labels(&self, graph: &CouplingGraph, cancel: &CancellationFlag)
        -> LabelAssignment;
}

/// Weighted majority label propagation.
pub struct LabelPropagation {
    config: AnalysisConfig,
}

impl LabelPropagation {
    pub fn new(config: AnalysisConfig) -> Self {
        Self { config }
    }

    fn next_label(&self, graph: &CouplingGraph, labels: &[Label], vertex: usize) -> Label {
        let current = labels[vertex];
        if self.config.anchor_classes && graph.is_anchor(vertex) {
            return current;
        }

        let tally = tally_neighbor_labels(graph, labels, vertex);
        if tally.is_empty() {
            return current;
        }

        let max_weight = tally.values().fold(f64::NEG_INFINITY, |m, &w| m.max(w));
        let mut tied: Vec<Label> = tally
            .iter()
            .filter(|(_, &w)| max_weight - w <= WEIGHT_TOLERANCE)
            .map(|(&label, _)| label)
            .collect();
        tied.sort_unstable();

        match self.config.tie_break {
            TieBreak::OwnLabelPreferred if tied.contains(&current) => current,
            _ => tied[0],
        }
    }
}

impl ClusteringAlgorithm for LabelPropagation {
    fn assign_labels(
        &self,
        graph: &CouplingGraph,
        cancel: &CancellationFlag,
    ) -> LabelAssignment {
        let mut labels = graph.initial_labels().to_vec();

        for round in 1..=self.config.max_rounds {
            if cancel.is_cancelled() {
                log::warn!("label propagation cancelled after {} rounds", round - 1);
                return LabelAssignment {
                    labels,
                    converged: false,
                    rounds: round - 1,
                };
            }

            let next: Vec<Label> = (0..labels.len())
                .into_par_iter()
                .map(|v| self.next_label(graph, &labels, v))
                .collect();

            let changed = next
                .iter()
                .zip(labels.iter())
                .filter(|(a, b)| a != b)
                .count();
            labels = next;
            log::debug!("round {}: {} vertices changed label", round, changed);

            if changed == 0 {
                return LabelAssignment {
                    labels,
                    converged: true,
                    rounds: round,
                };
            }
        }

        log::warn!(
            "label propagation did not converge within {} rounds",
            self.config.max_rounds
        );
        LabelAssignment {
            labels,
            converged: false,
            rounds: self.config.max_rounds,
        }
    }
}

/// Accumulate edge weight per distinct neighbor label, walking both stored
/// edge directions. Unlabeled neighbors contribute nothing.
fn tally_neighbor_labels(
    graph: &CouplingGraph,
    labels: &[Label],
    vertex: usize,
) -> HashMap<Label, f64> {
    let node = NodeIndex::new(vertex);
    let mut tally = HashMap::new();

    for direction in [Direction::Outgoing, Direction::Incoming] {
        for edge in graph.graph.edges_directed(node, direction) {
            let neighbor = if direction == Direction::Outgoing {
                edge.target()
            } else {
                edge.source()
            };
            let label = labels[neighbor.index()];
            if label == Label::NONE {
                continue;
            }
            *tally.entry(label).or_insert(0.0) += *edge.weight();
        }
    }

    tally
}

/// Winning and total accumulated weight at a vertex under a label state.
///
/// The ratio `winning / total` is the confidence that the vertex's label
/// reflects genuine structural coupling.
pub fn dominance(graph: &CouplingGraph, labels: &[Label], vertex: usize) -> (f64, f64) {
    let tally = tally_neighbor_labels(graph, labels, vertex);
    let total: f64 = tally.values().sum();
    let winning = tally.get(&labels[vertex]).copied().unwrap_or(0.0);
    (winning, total)
}
