//! k-nearest-neighbour search over the tagged working matrix.

use crate::matrix::SampleMatrix;

use super::{BatchTag, Metric};

pub fn distance(metric: Metric, a: &[f32], b: &[f32]) -> f32 {
    match metric {
        Metric::Euclidean => crate::math::stats::euclidean_distance(a, b),
        Metric::Cosine => 1.0 - crate::math::stats::cosine_similarity(a, b),
    }
}

/// Rows of `working` carrying `tag`.
pub fn batch_rows(tags: &[BatchTag], tag: BatchTag) -> Vec<usize> {
    tags.iter()
        .enumerate()
        .filter(|(_, t)| **t == tag)
        .map(|(i, _)| i)
        .collect()
}

/// Indices of the k candidates nearest to `query_idx`, closest first. A k
/// larger than the candidate count degrades to using all candidates.
pub fn k_nearest(
    metric: Metric,
    working: &SampleMatrix,
    query_idx: usize,
    candidates: &[usize],
    k: usize,
) -> Vec<usize> {
    let query = working.row(query_idx);
    let mut scored: Vec<(f32, usize)> = candidates
        .iter()
        .map(|&c| (distance(metric, query, working.row(c)), c))
        .collect();
    scored.sort_by(|a, b| a.0.total_cmp(&b.0));
    scored
        .into_iter()
        .take(k.min(candidates.len()))
        .map(|(_, c)| c)
        .collect()
}
