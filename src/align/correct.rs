//! Mutual pairing and correction-vector application.

use tracing::debug;

use crate::error::StratError;
use crate::matrix::SampleMatrix;
use crate::reference::ReferenceSet;

use super::{knn, AlignOptions, BatchTag, NeighbourPair};

/// Multiple of the gate scale beyond which a candidate pair is not
/// considered mutual. Keeps far-field input samples out of the neighbour
/// graph so they surface as outliers.
const GATE_FACTOR: f32 = 3.0;

/// Finds mutual nearest-neighbour pairs across the batch boundary.
///
/// A pair (i, r) is mutual iff r is among i's k nearest reference rows, i
/// is among r's k nearest input rows, and their distance passes the
/// adaptive gate.
pub fn mutual_pairs(
    working: &SampleMatrix,
    tags: &[BatchTag],
    opts: &AlignOptions,
) -> Result<Vec<NeighbourPair>, StratError> {
    let input_rows = knn::batch_rows(tags, BatchTag::Input);
    let ref_rows = knn::batch_rows(tags, BatchTag::Reference);
    if ref_rows.is_empty() {
        return Err(StratError::AlignmentFailure(
            "reference batch is empty".to_string(),
        ));
    }

    let gates = distance_gates(working, &input_rows, &ref_rows, opts);
    debug!(k = opts.k, metric = opts.metric.name(), "neighbour search");

    // Reference-side neighbour lists, then intersect from the input side.
    let mut ref_neighbours: Vec<Vec<usize>> = Vec::with_capacity(ref_rows.len());
    for &r in &ref_rows {
        ref_neighbours.push(knn::k_nearest(opts.metric, working, r, &input_rows, opts.k));
    }

    let n_input = input_rows.len();
    let mut pairs = Vec::new();
    for (local, &i) in input_rows.iter().enumerate() {
        let gate = gates[local];
        let nearest_refs = knn::k_nearest(opts.metric, working, i, &ref_rows, opts.k);
        for r in nearest_refs {
            let ref_local = r - n_input;
            if !ref_neighbours[ref_local].contains(&i) {
                continue;
            }
            let d = knn::distance(opts.metric, working.row(i), working.row(r));
            if d > gate {
                continue;
            }
            pairs.push(NeighbourPair {
                input_idx: i,
                ref_idx: ref_local,
            });
        }
    }
    Ok(pairs)
}

/// Per-sample mutuality gates, `GATE_FACTOR` times the gate scale.
///
/// The scale for a sample is the larger of the reference's median
/// nearest-neighbour spacing and the closest cross-batch distance achieved
/// by the rest of the input cohort. A cohort-wide batch shift raises every
/// sample's cross-batch distance together and the gate widens with it; a
/// sample far beyond what its own cohort reaches still fails. References
/// with fewer than two rows give no spacing estimate and disable the gate.
fn distance_gates(
    working: &SampleMatrix,
    input_rows: &[usize],
    ref_rows: &[usize],
    opts: &AlignOptions,
) -> Vec<f32> {
    if ref_rows.len() < 2 {
        return vec![f32::INFINITY; input_rows.len()];
    }
    let mut nearest = Vec::with_capacity(ref_rows.len());
    for &r in ref_rows {
        let mut best = f32::INFINITY;
        for &other in ref_rows {
            if other == r {
                continue;
            }
            let d = knn::distance(opts.metric, working.row(r), working.row(other));
            if d < best {
                best = d;
            }
        }
        if best.is_finite() {
            nearest.push(best);
        }
    }
    let spacing = crate::math::stats::median(&mut nearest);

    let nearest_cross: Vec<f32> = input_rows
        .iter()
        .map(|&i| {
            ref_rows
                .iter()
                .map(|&r| knn::distance(opts.metric, working.row(i), working.row(r)))
                .fold(f32::INFINITY, f32::min)
        })
        .collect();

    (0..input_rows.len())
        .map(|local| {
            let offset = nearest_cross
                .iter()
                .enumerate()
                .filter(|(j, _)| *j != local)
                .map(|(_, &d)| d)
                .fold(f32::INFINITY, f32::min);
            let scale = if offset.is_finite() {
                spacing.max(offset)
            } else {
                spacing
            };
            if scale > 0.0 && scale.is_finite() {
                GATE_FACTOR * scale
            } else {
                f32::INFINITY
            }
        })
        .collect()
}

/// Applies the per-sample correction: each paired input sample moves by the
/// mean of (reference profile - input profile) over its mutual pairs.
/// Unpaired samples are returned unchanged.
pub fn apply_corrections(
    input: &SampleMatrix,
    reference: &ReferenceSet,
    pairs: &[NeighbourPair],
) -> SampleMatrix {
    let width = input.n_genes();
    let mut corrected = input.clone();
    for i in 0..input.n_samples() {
        let mine: Vec<&NeighbourPair> = pairs.iter().filter(|p| p.input_idx == i).collect();
        if mine.is_empty() {
            continue;
        }
        let mut row = input.row(i).to_vec();
        for g in 0..width {
            let mut delta = 0.0f32;
            for pair in &mine {
                delta += reference.matrix.value(pair.ref_idx, g) - input.value(i, g);
            }
            row[g] += delta / mine.len() as f32;
        }
        corrected.set_row(i, &row);
    }
    corrected
}
