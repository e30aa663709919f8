//! Pluggable acceptance constraints for refactoring candidates
//!
//! The generator filters every candidate through a caller-supplied
//! predicate. Closures work directly; stock constraints cover the common
//! cases.

use crate::refactoring::candidates::RefactoringCandidate;

/// Predicate deciding whether a candidate is worth reporting.
pub trait AcceptanceConstraint {
    fn accept(&self, candidate: &RefactoringCandidate) -> bool;
}

impl<F> AcceptanceConstraint for F
where
    F: Fn(&RefactoringCandidate) -> bool,
{
    fn accept(&self, candidate: &RefactoringCandidate) -> bool {
        self(candidate)
    }
}

/// Accepts every candidate.
#[derive(Debug, Clone, Copy, Default)]
pub struct AcceptAll;

impl AcceptanceConstraint for AcceptAll {
    fn accept(&self, _candidate: &RefactoringCandidate) -> bool {
        true
    }
}

/// Accepts candidates whose accuracy meets a threshold.
#[derive(Debug, Clone, Copy)]
pub struct MinAccuracy(pub f64);

impl AcceptanceConstraint for MinAccuracy {
    fn accept(&self, candidate: &RefactoringCandidate) -> bool {
        candidate.accuracy >= self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::refactoring::candidates::RefactoringKind;

    fn candidate(accuracy: f64) -> RefactoringCandidate {
        RefactoringCandidate {
            kind: RefactoringKind::MoveMethod,
            member: "A.m()".to_string(),
            source_class: "A".to_string(),
            target_class: "B".to_string(),
            accuracy,
        }
    }

    #[test]
    fn min_accuracy_filters_below_threshold() {
        let constraint = MinAccuracy(0.7);
        assert!(constraint.accept(&candidate(0.8)));
        assert!(!constraint.accept(&candidate(0.6)));
    }

    #[test]
    fn closures_are_constraints() {
        let constraint = |c: &RefactoringCandidate| c.target_class != "B";
        assert!(!constraint.accept(&candidate(0.9)));
    }
}
