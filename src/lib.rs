//! envymap — feature envy detection via weighted label propagation
//!
//! Takes a pre-extracted snapshot of code entities (classes, methods,
//! fields) with weighted relevance sets and feature vectors, clusters them
//! over a coupling graph, and proposes move-member refactorings with
//! confidence scores. Source parsing and applying refactorings are left to
//! external collaborators.
//!
//! ```
//! use envymap::{
//!     analysis, AcceptAll, AnalysisConfig, CancellationFlag, SnapshotBuilder,
//! };
//!
//! let mut builder = SnapshotBuilder::new();
//! let a = builder.add_class("A")?;
//! let b = builder.add_class("B")?;
//! let m1 = builder.add_method("A.m1()", a)?;
//! builder.relate(m1, b, 5)?;
//! builder.relate(m1, a, 1)?;
//! let snapshot = builder.build()?;
//!
//! let report = analysis::run(
//!     &snapshot,
//!     &AnalysisConfig::default(),
//!     &AcceptAll,
//!     &CancellationFlag::new(),
//! )?;
//! assert_eq!(report.candidates[0].target_class, "B");
//! # Ok::<(), envymap::Error>(())
//! ```

pub mod analysis;
pub mod config;
pub mod core;
pub mod distance;
pub mod graph;
pub mod refactoring;

// Re-export commonly used types
pub use crate::analysis::{run, run_many, AnalysisReport};
pub use crate::config::{AnalysisConfig, EdgeWeightPolicy, TieBreak};
pub use crate::core::{
    AnalysisSnapshot, Entity, EntityArena, EntityAttributes, EntityHandle, EntityKind, Error,
    RelevantProperties, Result, SnapshotBuilder,
};
pub use crate::distance::distance;
pub use crate::graph::{
    build_graph, CancellationFlag, ClusteringAlgorithm, CouplingGraph, Label, LabelAssignment,
    LabelPropagation,
};
pub use crate::refactoring::{
    candidates_from_json, candidates_to_json, generate_candidates, AcceptAll,
    AcceptanceConstraint, MinAccuracy, RefactoringCandidate, RefactoringKind,
};
