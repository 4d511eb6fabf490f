//! The stratification service: column validation, mNN alignment against
//! the reference cohort, then the trained classifier/regressor pair.
//!
//! Expected units (not validated programmatically): microarray data as
//! background-corrected, VSN-normalized log intensity; RNA-seq as
//! log(counts-per-million); qPCR as negative Cq. The lazy-learning path in
//! [`crate::project`] expects a different qPCR transform.

use anyhow::{ensure, Context, Result};

use crate::align::Metric;
use crate::ctx::{CallKind, Ctx};
use crate::matrix::SampleMatrix;
use crate::pipeline::stage0_validate::Stage0Validate;
use crate::pipeline::stage1_subset::Stage1Subset;
use crate::pipeline::stage2_align::Stage2Align;
use crate::pipeline::stage3_predict::Stage3Predict;
use crate::pipeline::Pipeline;
use crate::result::PredictionResult;
use crate::signature::Signature;

#[derive(Debug, Clone, Copy)]
pub struct StratifyOptions {
    /// Neighbour count for the mNN search; 20-30% of the input sample
    /// count is the recommended range.
    pub k: usize,
    pub metric: Metric,
    /// Progress narration only; never affects output values.
    pub verbose: bool,
}

impl Default for StratifyOptions {
    fn default() -> Self {
        Self {
            k: 5,
            metric: Metric::Euclidean,
            verbose: false,
        }
    }
}

/// Classifies every sample of `matrix` into an SRS group with a continuous
/// SRSq score, after aligning the samples onto the `gene_set` reference
/// cohort. Fails before touching any reference data when `gene_set` is not
/// recognized.
pub fn stratify(
    matrix: &SampleMatrix,
    gene_set: &str,
    opts: &StratifyOptions,
) -> Result<PredictionResult> {
    let signature = Signature::parse(gene_set)?;
    ensure!(opts.k >= 1, "k must be a positive integer");

    let mut ctx = Ctx::new(
        matrix.clone(),
        CallKind::Stratify,
        signature,
        opts.k,
        std::path::PathBuf::from("."),
        env!("CARGO_PKG_VERSION"),
    );
    ctx.metric = opts.metric;
    ctx.verbose = opts.verbose;

    let pipeline = Pipeline::new(vec![
        Box::new(Stage0Validate::new()),
        Box::new(Stage1Subset::new()),
        Box::new(Stage2Align::new()),
        Box::new(Stage3Predict::new()),
    ]);
    pipeline.run(&mut ctx)?;
    ctx.result
        .take()
        .context("pipeline produced no prediction result")
}
