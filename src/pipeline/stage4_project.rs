use anyhow::{bail, Context, Result};

use crate::ctx::Ctx;
use crate::pipeline::{narrate, Stage};
use crate::project::{tally, top_k_similarities, vote_weights};
use crate::reference;
use crate::result::{PredictionResult, SamplePrediction};

/// Similarity-weighted k-NN voting against the reference cohort; the
/// lazy-learning alternative to alignment plus trained models.
pub struct Stage4Project;

impl Stage4Project {
    pub fn new() -> Self {
        Self
    }
}

impl Stage for Stage4Project {
    fn name(&self) -> &'static str {
        "stage4_project"
    }

    fn run(&self, ctx: &mut Ctx) -> Result<()> {
        let predictors = ctx
            .predictors
            .as_ref()
            .context("predictor matrix missing before projection")?;
        let set = reference::builtin(ctx.signature);

        for (i, id) in predictors.sample_ids().iter().enumerate() {
            if predictors.row(i).iter().any(|v| !v.is_finite()) {
                bail!("non-finite value in sample `{}`", id);
            }
        }

        let mut samples = Vec::with_capacity(predictors.n_samples());
        let mut flagged = 0usize;
        for (i, id) in predictors.sample_ids().iter().enumerate() {
            let neighbours = top_k_similarities(predictors.row(i), set, ctx.k);
            let best_similarity = neighbours.first().map(|&(_, s)| s).unwrap_or(0.0);
            let votes = vote_weights(&neighbours);
            let (group, probabilities, srsq) = tally(&votes, set);
            let outlier = match ctx.min_similarity {
                Some(threshold) => best_similarity < threshold,
                None => false,
            };
            if outlier {
                flagged += 1;
            }
            samples.push(SamplePrediction {
                id: id.clone(),
                group,
                probabilities,
                srsq,
                outlier,
                mutual_pairs: 0,
            });
        }

        narrate!(
            ctx,
            n_samples = samples.len(),
            low_confidence = flagged,
            "projection finished"
        );
        // No correction is applied on this path; the transformed predictors
        // are the subset input itself.
        let aligned = predictors.vstack(&set.matrix)?;
        ctx.result = Some(PredictionResult {
            signature: ctx.signature,
            k: ctx.k,
            samples,
            raw_predictors: predictors.clone(),
            transformed_predictors: predictors.clone(),
            aligned,
        });
        Ok(())
    }
}
