//! Cosine-similarity ranking against a generation's vector table

use ndarray::Array1;
use std::cmp::Ordering;

/// One scored row of the ranked table, identified by its insertion index.
#[derive(Debug, Clone, PartialEq)]
pub struct RankEntry {
    pub index: usize,
    pub score: f32,
}

/// Cosine similarity between two nonnegative weighted vectors, clamped to
/// [0, 1] against floating-point drift at the boundary.
///
/// Both vectors must come from the same space and generation; a
/// dimensionality mismatch is an invariant violation, not a recoverable
/// error.
pub fn cosine_similarity(a: &Array1<f32>, b: &Array1<f32>) -> f32 {
    assert_eq!(
        a.len(),
        b.len(),
        "cosine similarity between vectors of different dimensionality"
    );
    let norm_a = a.dot(a).sqrt();
    let norm_b = b.dot(b).sqrt();
    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    (a.dot(b) / (norm_a * norm_b)).clamp(0.0, 1.0)
}

/// Score every row of `table` against `query` and return the full list in
/// descending score order. The sort is stable, so equal scores keep their
/// insertion order and repeated calls produce identical output.
///
/// Works in either direction (candidate against positions or position
/// against candidates); the caller picks which table is which.
pub fn rank(query: &Array1<f32>, table: &[Array1<f32>]) -> Vec<RankEntry> {
    let mut entries: Vec<RankEntry> = table
        .iter()
        .enumerate()
        .map(|(index, row)| RankEntry {
            index,
            score: cosine_similarity(query, row),
        })
        .collect();
    entries.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));
    entries
}
