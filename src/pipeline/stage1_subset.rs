use anyhow::Result;

use crate::ctx::Ctx;
use crate::pipeline::{narrate, Stage};

/// Subsets the input to the signature's genes in canonical reference
/// column order; extra columns are dropped silently.
pub struct Stage1Subset;

impl Stage1Subset {
    pub fn new() -> Self {
        Self
    }
}

impl Stage for Stage1Subset {
    fn name(&self) -> &'static str {
        "stage1_subset"
    }

    fn run(&self, ctx: &mut Ctx) -> Result<()> {
        let predictors = ctx.raw.subset(ctx.signature.genes())?;
        let dropped = ctx.raw.n_genes() - predictors.n_genes();
        narrate!(
            ctx,
            kept = predictors.n_genes(),
            dropped,
            "input subset to signature columns"
        );
        ctx.predictors = Some(predictors);
        Ok(())
    }
}
