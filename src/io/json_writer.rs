use std::path::Path;

use anyhow::{Context, Result};

use crate::ctx::{CallKind, Ctx};
use crate::schema::v1::{AlignmentMeta, Mode, PerSamplePrediction, StratReportV1};

pub fn build_report(ctx: &Ctx) -> Result<StratReportV1> {
    let result = ctx.result.as_ref().context("prediction result missing")?;

    let per_sample: Vec<PerSamplePrediction> = result
        .samples
        .iter()
        .map(|s| PerSamplePrediction {
            id: s.id.clone(),
            srs: s.group.as_str().to_string(),
            p_srs1: s.probabilities[0] as f64,
            p_srs2: s.probabilities[1] as f64,
            p_srs3: s.probabilities[2] as f64,
            srsq: s.srsq as f64,
            outlier: s.outlier,
            mutual_pairs: s.mutual_pairs as u64,
        })
        .collect();

    let alignment = match ctx.kind {
        CallKind::Stratify => {
            let a = ctx.alignment.as_ref().context("alignment missing")?;
            Some(AlignmentMeta {
                k: ctx.k as u64,
                metric: ctx.metric.name().to_string(),
                n_pairs: a.pairs.len() as u64,
                n_outliers: a.outliers.len() as u64,
            })
        }
        CallKind::Project => None,
    };

    Ok(StratReportV1 {
        tool_version: ctx.tool_version.clone(),
        mode: match ctx.kind {
            CallKind::Stratify => Mode::Stratify,
            CallKind::Project => Mode::Project,
        },
        signature: ctx.signature,
        n_samples: result.n_samples() as u64,
        alignment,
        per_sample,
        warnings: ctx.warnings.clone(),
    })
}

pub fn write_json(path: &Path, report: &StratReportV1) -> Result<()> {
    let json = serde_json::to_string_pretty(report).context("failed to serialize report")?;
    std::fs::write(path, json).with_context(|| format!("failed to write {}", path.display()))?;
    Ok(())
}
