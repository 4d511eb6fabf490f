use anyhow::{Context, Result};
use tracing::warn;

use crate::align::{self, AlignOptions};
use crate::ctx::Ctx;
use crate::pipeline::{narrate, Stage};
use crate::reference;

/// Mutual-nearest-neighbour alignment of the subset input against the
/// signature's reference cohort.
pub struct Stage2Align;

impl Stage2Align {
    pub fn new() -> Self {
        Self
    }
}

impl Stage for Stage2Align {
    fn name(&self) -> &'static str {
        "stage2_align"
    }

    fn run(&self, ctx: &mut Ctx) -> Result<()> {
        let predictors = ctx
            .predictors
            .as_ref()
            .context("predictor matrix missing before alignment")?;

        // k between 20-30% of the input sample count is the published
        // recommendation; advisory only.
        let n = predictors.n_samples();
        let low = (n as f32 * 0.2).floor().max(1.0) as usize;
        let high = (n as f32 * 0.3).ceil().max(1.0) as usize;
        if n >= 10 && (ctx.k < low || ctx.k > high) {
            let msg = format!(
                "k={} is outside the recommended 20-30% of the input size ({}-{})",
                ctx.k, low, high
            );
            warn!("{}", msg);
            ctx.warnings.push(msg);
        }

        let set = reference::builtin(ctx.signature);
        let opts = AlignOptions {
            k: ctx.k,
            metric: ctx.metric,
        };
        let alignment = align::align(predictors, set, &opts)?;
        narrate!(
            ctx,
            pairs = alignment.pairs.len(),
            outliers = alignment.outliers.len(),
            metric = ctx.metric.name(),
            "alignment finished"
        );
        ctx.alignment = Some(alignment);
        Ok(())
    }
}
