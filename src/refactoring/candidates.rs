//! Move-member refactoring candidates
//!
//! Maps the terminal label assignment back to concrete suggestions: every
//! member whose final label differs from its owning class becomes a move
//! candidate, scored by the dominance of the winning label's weight in the
//! final round.

use crate::core::attributes::AnalysisSnapshot;
use crate::core::entity::EntityKind;
use crate::core::errors::Result;
use crate::graph::propagation::{dominance, LabelAssignment};
use crate::graph::{CouplingGraph, Label};
use crate::refactoring::constraints::AcceptanceConstraint;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RefactoringKind {
    MoveMethod,
    MoveField,
}

/// A proposed move of one member to another class.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RefactoringCandidate {
    pub kind: RefactoringKind,
    /// Qualified name of the member to move.
    pub member: String,
    /// Class currently containing the member.
    pub source_class: String,
    /// Class the member's label converged to.
    pub target_class: String,
    /// Confidence in `[0, 1]`: winning label weight over total neighbor
    /// weight in the final round.
    pub accuracy: f64,
}

/// Generate move candidates from a terminal label assignment.
///
/// A member whose label equals its owning class is never reported, so the
/// output contains no no-op moves. Candidates are sorted by source class
/// then member name for reproducible output.
pub fn generate_candidates(
    snapshot: &AnalysisSnapshot,
    graph: &CouplingGraph,
    assignment: &LabelAssignment,
    constraint: &dyn AcceptanceConstraint,
) -> Vec<RefactoringCandidate> {
    let arena = snapshot.arena();
    let mut candidates = Vec::new();

    for (handle, entity) in arena.iter() {
        let (owner, kind) = match entity.kind() {
            EntityKind::Method { owner } => (*owner, RefactoringKind::MoveMethod),
            EntityKind::Field { owner } => (*owner, RefactoringKind::MoveField),
            EntityKind::Class => continue,
        };

        let vertex = handle.index();
        let final_label = assignment.labels[vertex];
        if final_label == Label::NONE || final_label == Label::from_class(owner) {
            continue;
        }
        let target = match final_label.class_handle() {
            Some(target) => target,
            None => continue,
        };

        let (winning, total) = dominance(graph, &assignment.labels, vertex);
        let accuracy = if total > 0.0 { winning / total } else { 0.0 };

        let candidate = RefactoringCandidate {
            kind,
            member: entity.name().to_string(),
            source_class: arena.get(owner).name().to_string(),
            target_class: arena.get(target).name().to_string(),
            accuracy,
        };

        if constraint.accept(&candidate) {
            candidates.push(candidate);
        }
    }

    candidates.sort_by(|a, b| {
        a.source_class
            .cmp(&b.source_class)
            .then_with(|| a.member.cmp(&b.member))
    });
    candidates
}

/// Serialize a candidate list to JSON for downstream consumers.
pub fn candidates_to_json(candidates: &[RefactoringCandidate]) -> Result<String> {
    Ok(serde_json::to_string_pretty(candidates)?)
}

/// Restore a candidate list from its JSON form, preserving order.
pub fn candidates_from_json(json: &str) -> Result<Vec<RefactoringCandidate>> {
    Ok(serde_json::from_str(json)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AnalysisConfig;
    use crate::core::attributes::SnapshotBuilder;
    use crate::graph::propagation::{CancellationFlag, ClusteringAlgorithm, LabelPropagation};
    use crate::graph::build_graph;
    use crate::refactoring::constraints::{AcceptAll, MinAccuracy};

    fn analyze(
        snapshot: &AnalysisSnapshot,
        constraint: &dyn AcceptanceConstraint,
    ) -> Vec<RefactoringCandidate> {
        let config = AnalysisConfig::default();
        let graph = build_graph(snapshot, &config);
        let assignment =
            LabelPropagation::new(config).assign_labels(&graph, &CancellationFlag::new());
        generate_candidates(snapshot, &graph, &assignment, constraint)
    }

    fn envy_snapshot() -> AnalysisSnapshot {
        let mut builder = SnapshotBuilder::new();
        let a = builder.add_class("A").unwrap();
        let b = builder.add_class("B").unwrap();
        let m = builder.add_method("A.m1()", a).unwrap();
        builder.relate(m, b, 5).unwrap();
        builder.relate(m, a, 1).unwrap();
        builder.build().unwrap()
    }

    #[test]
    fn envious_method_produces_move_candidate() {
        let snapshot = envy_snapshot();
        let candidates = analyze(&snapshot, &AcceptAll);

        assert_eq!(candidates.len(), 1);
        let candidate = &candidates[0];
        assert_eq!(candidate.kind, RefactoringKind::MoveMethod);
        assert_eq!(candidate.member, "A.m1()");
        assert_eq!(candidate.source_class, "A");
        assert_eq!(candidate.target_class, "B");
        assert!((candidate.accuracy - 5.0 / 6.0).abs() < 1e-12);
    }

    #[test]
    fn loyal_members_produce_no_candidates() {
        let mut builder = SnapshotBuilder::new();
        let a = builder.add_class("A").unwrap();
        let m = builder.add_method("A.m1()", a).unwrap();
        let f = builder.add_field("A.f", a).unwrap();
        builder.relate(m, a, 3).unwrap();
        builder.relate(f, a, 2).unwrap();
        let snapshot = builder.build().unwrap();

        let candidates = analyze(&snapshot, &AcceptAll);
        assert!(candidates.is_empty());
    }

    #[test]
    fn constraint_filters_low_accuracy_moves() {
        let snapshot = envy_snapshot();

        let strict = analyze(&snapshot, &MinAccuracy(0.9));
        assert!(strict.is_empty());

        let lenient = analyze(&snapshot, &MinAccuracy(0.8));
        assert_eq!(lenient.len(), 1);
    }

    #[test]
    fn methods_and_fields_map_to_their_kinds() {
        let mut builder = SnapshotBuilder::new();
        let a = builder.add_class("A").unwrap();
        let b = builder.add_class("B").unwrap();
        let m = builder.add_method("A.m()", a).unwrap();
        let f = builder.add_field("A.f", a).unwrap();
        builder.relate(m, b, 4).unwrap();
        builder.relate(f, b, 4).unwrap();
        let snapshot = builder.build().unwrap();

        let candidates = analyze(&snapshot, &AcceptAll);
        assert_eq!(candidates.len(), 2);
        let kinds: Vec<_> = candidates
            .iter()
            .map(|c| (c.member.as_str(), c.kind))
            .collect();
        assert!(kinds.contains(&("A.m()", RefactoringKind::MoveMethod)));
        assert!(kinds.contains(&("A.f", RefactoringKind::MoveField)));
    }

    #[test]
    fn malformed_json_surfaces_as_error() {
        let err = super::candidates_from_json("not json").unwrap_err();
        assert!(matches!(err, crate::core::Error::Json(_)));
    }

    #[test]
    fn fields_move_as_move_field() {
        let mut builder = SnapshotBuilder::new();
        let a = builder.add_class("A").unwrap();
        let b = builder.add_class("B").unwrap();
        let f = builder.add_field("A.f", a).unwrap();
        builder.relate(f, b, 4).unwrap();
        let snapshot = builder.build().unwrap();

        let candidates = analyze(&snapshot, &AcceptAll);
        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].kind, RefactoringKind::MoveField);
    }

    #[test]
    fn output_is_sorted_by_source_then_member() {
        let mut builder = SnapshotBuilder::new();
        let a = builder.add_class("A").unwrap();
        let z = builder.add_class("Z").unwrap();
        let target = builder.add_class("T").unwrap();
        let m2 = builder.add_method("Z.m2()", z).unwrap();
        let m1 = builder.add_method("A.m1()", a).unwrap();
        let m0 = builder.add_method("A.m0()", a).unwrap();
        for m in [m0, m1, m2] {
            builder.relate(m, target, 9).unwrap();
        }
        let snapshot = builder.build().unwrap();

        let candidates = analyze(&snapshot, &AcceptAll);
        let keys: Vec<_> = candidates
            .iter()
            .map(|c| (c.source_class.clone(), c.member.clone()))
            .collect();
        let mut sorted = keys.clone();
        sorted.sort();
        assert_eq!(keys, sorted);
        assert_eq!(candidates.len(), 3);
    }
}
