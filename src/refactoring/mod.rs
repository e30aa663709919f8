//! Refactoring candidate generation and acceptance constraints

pub mod candidates;
pub mod constraints;

pub use candidates::{
    candidates_from_json, candidates_to_json, generate_candidates, RefactoringCandidate,
    RefactoringKind,
};
pub use constraints::{AcceptAll, AcceptanceConstraint, MinAccuracy};
