//! Analysis configuration
//!
//! All tunables are passed explicitly; nothing is read from global state.
//! Several configurations can run concurrently over one shared snapshot.

use serde::{Deserialize, Serialize};

/// Tie-break policy when several labels reach the maximum accumulated
/// weight at a vertex.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TieBreak {
    /// Keep the vertex's current label when it is among the tied maxima,
    /// otherwise fall back to the lowest label. Damps oscillation.
    #[default]
    OwnLabelPreferred,
    /// Always pick the lowest tied label.
    LowestLabel,
}

/// How edge weights are derived when building the coupling graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EdgeWeightPolicy {
    /// Accumulated relevance weight between the two entities, in both
    /// directions. Pairs with no structural relation get no edge.
    #[default]
    Structural,
    /// `1 / (distance + ε)` from the distance metric. Pairs at infinite
    /// distance get no edge.
    InverseDistance,
}

/// Configuration for one clustering run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// Upper bound on propagation rounds before giving up on convergence.
    #[serde(default = "default_max_rounds")]
    pub max_rounds: usize,

    #[serde(default)]
    pub tie_break: TieBreak,

    #[serde(default)]
    pub edge_weight: EdgeWeightPolicy,

    /// Pin class vertices to their own label. Classes act as cluster
    /// seeds; without anchoring, a lone member/class pair oscillates under
    /// synchronous updates.
    #[serde(default = "default_anchor_classes")]
    pub anchor_classes: bool,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            max_rounds: default_max_rounds(),
            tie_break: TieBreak::default(),
            edge_weight: EdgeWeightPolicy::default(),
            anchor_classes: default_anchor_classes(),
        }
    }
}

impl AnalysisConfig {
    pub fn validate(&self) -> Result<(), String> {
        if self.max_rounds == 0 {
            return Err("max_rounds must be at least 1".to_string());
        }
        Ok(())
    }
}

fn default_max_rounds() -> usize {
    100
}

fn default_anchor_classes() -> bool {
    true
}
