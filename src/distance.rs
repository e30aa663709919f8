//! Inter-entity dissimilarity metric
//!
//! Combines a magnitude term over the feature vectors with a Jaccard term
//! over the relevance sets. Entities sharing no relevant properties are at
//! infinite distance: there is no structural basis for clustering them
//! together, and the infinity is the signal, not an error.
//!
//! Same-kind comparison sums the two vectors before squaring, while
//! cross-kind comparison sums each vector's squares independently. That is
//! the contract inherited from the original metric and is reproduced as-is.

use crate::core::attributes::EntityAttributes;

/// Dissimilarity between two entities. Symmetric, total, never negative;
/// `f64::INFINITY` when the relevance sets are disjoint.
pub fn distance(from: &EntityAttributes, to: &EntityAttributes) -> f64 {
    let intersection = from.properties().size_of_intersection(to.properties());
    if intersection == 0 {
        return f64::INFINITY;
    }

    let union = from.properties().size_of_union(to.properties());
    debug_assert!(union >= intersection && union > 0);

    let w = if from.kind().same_kind(to.kind()) {
        summed_square(from.features(), to.features())
    } else {
        sum_of_squares(from.features()) + sum_of_squares(to.features())
    };

    let base = if w == 0.0 { 0.0 } else { 1.0 / (w + 1.0) };
    let jaccard_term = 1.0 - intersection as f64 / union as f64;

    (base + jaccard_term).sqrt()
}

/// `Σ (a[i] + b[i])²`, padding the shorter vector with zeros.
fn summed_square(a: &[f64], b: &[f64]) -> f64 {
    let len = a.len().max(b.len());
    (0..len)
        .map(|i| {
            let x = a.get(i).copied().unwrap_or(0.0);
            let y = b.get(i).copied().unwrap_or(0.0);
            (x + y) * (x + y)
        })
        .sum()
}

fn sum_of_squares(v: &[f64]) -> f64 {
    v.iter().map(|x| x * x).sum()
}
