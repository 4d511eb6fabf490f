use anyhow::{Context, Result};

use crate::ctx::Ctx;
use crate::model::{self, Model};
use crate::pipeline::{narrate, Stage};
use crate::result::{PredictionResult, SamplePrediction};

/// Runs the trained classifier and regressor over the aligned input rows
/// and assembles the final `PredictionResult`.
pub struct Stage3Predict;

impl Stage3Predict {
    pub fn new() -> Self {
        Self
    }
}

impl Stage for Stage3Predict {
    fn name(&self) -> &'static str {
        "stage3_predict"
    }

    fn run(&self, ctx: &mut Ctx) -> Result<()> {
        let predictors = ctx
            .predictors
            .as_ref()
            .context("predictor matrix missing before prediction")?;
        let alignment = ctx
            .alignment
            .as_ref()
            .context("alignment missing before prediction")?;
        let model = model::builtin(ctx.signature);

        let mut samples = Vec::with_capacity(predictors.n_samples());
        for (i, id) in predictors.sample_ids().iter().enumerate() {
            let row = alignment.corrected.row(i);
            let (group, probabilities) = model.predict_label(row);
            let srsq = model.predict_score(row);
            let mutual_pairs = alignment.pairs_per_sample[i];
            samples.push(SamplePrediction {
                id: id.clone(),
                group,
                probabilities,
                srsq,
                outlier: mutual_pairs == 0,
                mutual_pairs,
            });
        }

        narrate!(ctx, n_samples = samples.len(), "model predictions ready");
        ctx.result = Some(PredictionResult {
            signature: ctx.signature,
            k: ctx.k,
            samples,
            raw_predictors: predictors.clone(),
            transformed_predictors: alignment.corrected.clone(),
            aligned: alignment.merged.clone(),
        });
        Ok(())
    }
}
