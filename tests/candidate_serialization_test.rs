//! Candidate list serialization round-trips
//!
//! Consumers persist candidate lists as JSON; deserializing must yield the
//! identical ordered list.

use envymap::{
    candidates_from_json, candidates_to_json, Error, RefactoringCandidate, RefactoringKind,
};
use pretty_assertions::assert_eq;

fn sample_candidates() -> Vec<RefactoringCandidate> {
    vec![
        RefactoringCandidate {
            kind: RefactoringKind::MoveMethod,
            member: "com.example.A.m1()".to_string(),
            source_class: "com.example.A".to_string(),
            target_class: "com.example.B".to_string(),
            accuracy: 5.0 / 6.0,
        },
        RefactoringCandidate {
            kind: RefactoringKind::MoveField,
            member: "com.example.A.count".to_string(),
            source_class: "com.example.A".to_string(),
            target_class: "com.example.C".to_string(),
            accuracy: 0.5,
        },
    ]
}

#[test]
fn candidate_list_round_trips_through_json() {
    let candidates = sample_candidates();
    let json = candidates_to_json(&candidates).unwrap();
    let restored = candidates_from_json(&json).unwrap();
    assert_eq!(candidates, restored);
}

#[test]
fn malformed_candidate_json_is_a_json_error() {
    let err = candidates_from_json("{\"kind\":").unwrap_err();
    assert!(matches!(err, Error::Json(_)));
}

#[test]
fn candidate_json_shape_is_stable() {
    let json = serde_json::to_value(&sample_candidates()[0]).unwrap();
    assert_eq!(json["kind"], "MoveMethod");
    assert_eq!(json["member"], "com.example.A.m1()");
    assert_eq!(json["source_class"], "com.example.A");
    assert_eq!(json["target_class"], "com.example.B");
}
