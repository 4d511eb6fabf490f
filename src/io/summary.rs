use crate::ctx::Ctx;
use crate::result::PredictionResult;

pub fn format_summary(ctx: &Ctx, result: &PredictionResult) -> String {
    let counts = result.group_counts();
    let mut out = String::new();
    out.push_str(&format!("sepstrat v{}\n", ctx.tool_version));
    out.push_str(&format!(
        "Input: {} samples, signature={}, k={}, mode={}\n",
        result.n_samples(),
        result.signature,
        result.k,
        ctx.kind.as_str()
    ));
    out.push_str(&format!(
        "Groups: SRS1={} SRS2={} SRS3={}\n",
        counts[0], counts[1], counts[2]
    ));
    out.push_str(&format!("Outliers: {}\n", result.outlier_count()));
    if !ctx.warnings.is_empty() {
        out.push_str("warnings:\n");
        for warning in &ctx.warnings {
            out.push_str(&format!("- {}\n", warning));
        }
    }
    out
}
