use anyhow::Result;

use crate::ctx::Ctx;
use crate::pipeline::{narrate, Stage};

/// Column validation. Fails with `MissingColumns` enumerating every absent
/// gene before any reference or model access happens.
pub struct Stage0Validate;

impl Stage0Validate {
    pub fn new() -> Self {
        Self
    }
}

impl Stage for Stage0Validate {
    fn name(&self) -> &'static str {
        "stage0_validate"
    }

    fn run(&self, ctx: &mut Ctx) -> Result<()> {
        ctx.raw.validate_signature(ctx.signature)?;
        narrate!(
            ctx,
            signature = %ctx.signature,
            n_samples = ctx.raw.n_samples(),
            n_genes = ctx.raw.n_genes(),
            "required gene columns present"
        );
        Ok(())
    }
}
