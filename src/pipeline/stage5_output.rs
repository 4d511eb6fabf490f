use anyhow::{Context, Result};

use crate::ctx::Ctx;
use crate::io::{json_writer, tsv_writer};
use crate::pipeline::{narrate, Stage};

/// Writes the JSON report and/or the per-sample TSV when the caller asked
/// for them. CLI-only stage; the library entry points stop at the result.
pub struct Stage5Output;

impl Stage5Output {
    pub fn new() -> Self {
        Self
    }
}

impl Stage for Stage5Output {
    fn name(&self) -> &'static str {
        "stage5_output"
    }

    fn run(&self, ctx: &mut Ctx) -> Result<()> {
        if !ctx.write_json && !ctx.write_tsv {
            return Ok(());
        }
        std::fs::create_dir_all(&ctx.output.out_dir).with_context(|| {
            format!(
                "failed to create output directory {}",
                ctx.output.out_dir.display()
            )
        })?;
        if ctx.write_tsv {
            let result = ctx.result.as_ref().context("prediction result missing")?;
            tsv_writer::write_predictions(&ctx.output.tsv_path, result)?;
            narrate!(ctx, path = %ctx.output.tsv_path.display(), "tsv written");
        }
        if ctx.write_json {
            let report = json_writer::build_report(ctx)?;
            json_writer::write_json(&ctx.output.json_path, &report)?;
            narrate!(ctx, path = %ctx.output.json_path.display(), "json written");
        }
        Ok(())
    }
}
