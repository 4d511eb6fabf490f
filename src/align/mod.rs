//! Mutual-nearest-neighbour batch correction of an input matrix against a
//! reference cohort.
//!
//! The reference is the anchor batch: mutual pairs across the batch
//! boundary yield per-sample correction vectors that move input samples
//! into the reference's expression space. Samples with no mutual pair are
//! left uncorrected and reported as outliers, never dropped.

pub mod correct;
pub mod knn;

use serde::Serialize;

use crate::error::StratError;
use crate::matrix::SampleMatrix;
use crate::reference::ReferenceSet;

/// Distance strategy for the neighbour search. The published mNN method
/// does not pin one down; Euclidean is the default here, cosine is kept as
/// an alternative for scale-free comparisons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    Euclidean,
    Cosine,
}

impl Metric {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Euclidean => "euclidean",
            Self::Cosine => "cosine",
        }
    }
}

/// Batch tag carried by every row of the merged working matrix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BatchTag {
    Input,
    Reference,
}

#[derive(Debug, Clone, Copy)]
pub struct AlignOptions {
    pub k: usize,
    pub metric: Metric,
}

impl Default for AlignOptions {
    fn default() -> Self {
        Self {
            k: 20,
            metric: Metric::Euclidean,
        }
    }
}

/// One mutual correspondence: input sample `input_idx` and reference sample
/// `ref_idx` are each within the other's k nearest cross-batch neighbours.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NeighbourPair {
    pub input_idx: usize,
    pub ref_idx: usize,
}

/// Output of one alignment run.
#[derive(Debug)]
pub struct Alignment {
    /// Corrected input rows, same ids and column set as the input subset.
    pub corrected: SampleMatrix,
    /// Corrected input rows stacked on the untouched reference rows.
    pub merged: SampleMatrix,
    pub pairs: Vec<NeighbourPair>,
    /// Mutual-pair count per input sample, in input row order.
    pub pairs_per_sample: Vec<usize>,
    /// Input row indices with zero mutual pairs.
    pub outliers: Vec<usize>,
}

/// Aligns `input` onto `reference`. Both must share the signature's column
/// set; `input` rows must be finite.
pub fn align(
    input: &SampleMatrix,
    reference: &ReferenceSet,
    opts: &AlignOptions,
) -> Result<Alignment, StratError> {
    if input.n_samples() == 0 {
        return Err(StratError::AlignmentFailure(
            "input matrix has no sample rows".to_string(),
        ));
    }
    if input.genes() != reference.genes() {
        return Err(StratError::ColumnMismatch(
            "input columns differ from the reference column set".to_string(),
        ));
    }
    for i in 0..input.n_samples() {
        let row = input.row(i);
        if row.iter().any(|v| !v.is_finite()) {
            return Err(StratError::AlignmentFailure(format!(
                "non-finite value in sample `{}`",
                input.sample_ids()[i]
            )));
        }
        if opts.metric == Metric::Cosine && crate::math::stats::norm(row) == 0.0 {
            return Err(StratError::AlignmentFailure(format!(
                "zero-norm sample `{}` has no cosine direction",
                input.sample_ids()[i]
            )));
        }
    }

    // Merged working matrix: input rows first, reference rows after, each
    // tagged with its batch.
    let working = input.vstack(&reference.matrix)?;
    let mut tags = vec![BatchTag::Input; input.n_samples()];
    tags.extend(std::iter::repeat(BatchTag::Reference).take(reference.n_samples()));

    if degenerate_columns(&working) {
        return Err(StratError::AlignmentFailure(
            "every gene column is constant across the merged matrix".to_string(),
        ));
    }

    let pairs = correct::mutual_pairs(&working, &tags, opts)?;
    let corrected = correct::apply_corrections(input, reference, &pairs);

    let mut pairs_per_sample = vec![0usize; input.n_samples()];
    for pair in &pairs {
        pairs_per_sample[pair.input_idx] += 1;
    }
    let outliers: Vec<usize> = pairs_per_sample
        .iter()
        .enumerate()
        .filter(|(_, &c)| c == 0)
        .map(|(i, _)| i)
        .collect();

    let merged = corrected.vstack(&reference.matrix)?;
    Ok(Alignment {
        corrected,
        merged,
        pairs,
        pairs_per_sample,
        outliers,
    })
}

fn degenerate_columns(matrix: &SampleMatrix) -> bool {
    let mut column = Vec::with_capacity(matrix.n_samples());
    for g in 0..matrix.n_genes() {
        column.clear();
        for i in 0..matrix.n_samples() {
            column.push(matrix.value(i, g));
        }
        if crate::math::stats::variance(&column) > 0.0 {
            return false;
        }
    }
    true
}
