//! Lazy-learning projection for small cohorts.
//!
//! Instead of batch alignment and trained models, each input sample is
//! compared by cosine similarity to every reference sample and inherits the
//! labels of its k most similar neighbours through similarity-weighted
//! voting. Recommended below ~25 samples, where mNN alignment is unstable.
//!
//! Unit convention: unlike [`crate::stratify`], qPCR data is expected as
//! `2^(-Cq)` (positive values), not as negative Cq. Microarray and RNA-seq
//! units match the stratification path. Not validated programmatically.

use anyhow::{ensure, Context, Result};

use crate::ctx::{CallKind, Ctx};
use crate::matrix::SampleMatrix;
use crate::pipeline::stage0_validate::Stage0Validate;
use crate::pipeline::stage1_subset::Stage1Subset;
use crate::pipeline::stage4_project::Stage4Project;
use crate::pipeline::Pipeline;
use crate::reference::ReferenceSet;
use crate::result::PredictionResult;
use crate::signature::{Signature, SrsGroup, SRS_GROUPS};

#[derive(Debug, Clone, Copy)]
pub struct ProjectOptions {
    /// Number of reference neighbours to vote. Degrades to the full
    /// reference when larger than the cohort.
    pub k: usize,
    /// Optional low-confidence extension: samples whose best neighbour
    /// similarity falls below this are flagged. `None` flags nothing.
    pub min_similarity: Option<f32>,
    pub verbose: bool,
}

impl Default for ProjectOptions {
    fn default() -> Self {
        Self {
            k: 5,
            min_similarity: None,
            verbose: false,
        }
    }
}

/// Projects SRS labels and SRSq scores onto `matrix` by similarity-weighted
/// k-NN voting against the built-in reference cohort. Input rows must be
/// finite.
pub fn project(
    matrix: &SampleMatrix,
    gene_set: &str,
    opts: &ProjectOptions,
) -> Result<PredictionResult> {
    let signature = Signature::parse(gene_set)?;
    ensure!(opts.k >= 1, "k must be a positive integer");

    let mut ctx = Ctx::new(
        matrix.clone(),
        CallKind::Project,
        signature,
        opts.k,
        std::path::PathBuf::from("."),
        env!("CARGO_PKG_VERSION"),
    );
    ctx.verbose = opts.verbose;
    ctx.min_similarity = opts.min_similarity;

    let pipeline = Pipeline::new(vec![
        Box::new(Stage0Validate::new()),
        Box::new(Stage1Subset::new()),
        Box::new(Stage4Project::new()),
    ]);
    pipeline.run(&mut ctx)?;
    ctx.result
        .take()
        .context("pipeline produced no prediction result")
}

/// One neighbour's contribution to a sample's vote; ephemeral per call.
#[derive(Debug, Clone, Copy)]
pub struct SimilarityVote {
    pub ref_idx: usize,
    pub weight: f32,
}

/// The k reference samples most similar to `row`, best first.
pub fn top_k_similarities(row: &[f32], reference: &ReferenceSet, k: usize) -> Vec<(usize, f32)> {
    let mut scored: Vec<(usize, f32)> = (0..reference.n_samples())
        .map(|i| {
            (
                i,
                crate::math::stats::cosine_similarity(row, reference.matrix.row(i)),
            )
        })
        .collect();
    scored.sort_by(|a, b| b.1.total_cmp(&a.1));
    scored.truncate(k.min(reference.n_samples()));
    scored
}

/// Normalizes neighbour similarities into vote weights: non-negative,
/// summing to 1. Negative similarities contribute nothing; if every
/// similarity is non-positive the vote falls back to uniform weights.
pub fn vote_weights(neighbours: &[(usize, f32)]) -> Vec<SimilarityVote> {
    let total: f32 = neighbours.iter().map(|(_, s)| s.max(0.0)).sum();
    if total > 0.0 {
        neighbours
            .iter()
            .map(|&(ref_idx, s)| SimilarityVote {
                ref_idx,
                weight: s.max(0.0) / total,
            })
            .collect()
    } else {
        let uniform = 1.0 / neighbours.len() as f32;
        neighbours
            .iter()
            .map(|&(ref_idx, _)| SimilarityVote {
                ref_idx,
                weight: uniform,
            })
            .collect()
    }
}

/// Aggregates a sample's votes: the probability vector is the per-group
/// weight sum, the label is the heaviest group (ties broken by lowest group
/// index), and SRSq is the weighted mean of neighbour SRSq values.
pub fn tally(votes: &[SimilarityVote], reference: &ReferenceSet) -> (SrsGroup, [f32; 3], f32) {
    let mut probabilities = [0.0f32; 3];
    let mut srsq = 0.0f32;
    for vote in votes {
        probabilities[reference.groups[vote.ref_idx].index()] += vote.weight;
        srsq += vote.weight * reference.srsq[vote.ref_idx];
    }
    let mut best = SRS_GROUPS[0];
    for group in SRS_GROUPS {
        if probabilities[group.index()] > probabilities[best.index()] {
            best = group;
        }
    }
    (best, probabilities, srsq)
}
