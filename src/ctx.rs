use std::path::PathBuf;

use crate::align::{Alignment, Metric};
use crate::matrix::SampleMatrix;
use crate::result::PredictionResult;
use crate::signature::Signature;

/// Which entry point a pipeline run serves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallKind {
    Stratify,
    Project,
}

impl CallKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Stratify => "stratify",
            Self::Project => "project",
        }
    }
}

#[derive(Debug, Clone)]
pub struct OutputPaths {
    pub out_dir: PathBuf,
    pub json_path: PathBuf,
    pub tsv_path: PathBuf,
}

/// Per-call state owned by one pipeline run. Nothing here outlives the
/// call; the only process-wide state is the read-only reference cohorts and
/// model artifacts.
#[derive(Debug)]
pub struct Ctx {
    pub kind: CallKind,
    pub signature: Signature,
    pub k: usize,
    pub metric: Metric,
    pub verbose: bool,
    pub min_similarity: Option<f32>,
    pub write_json: bool,
    pub write_tsv: bool,
    /// Input matrix exactly as supplied by the caller.
    pub raw: SampleMatrix,
    /// Input subset to the signature's genes in canonical column order.
    pub predictors: Option<SampleMatrix>,
    pub alignment: Option<Alignment>,
    pub result: Option<PredictionResult>,
    pub warnings: Vec<String>,
    pub output: OutputPaths,
    pub tool_version: String,
}

impl Ctx {
    pub fn new(
        raw: SampleMatrix,
        kind: CallKind,
        signature: Signature,
        k: usize,
        out_dir: PathBuf,
        tool_version: &str,
    ) -> Self {
        let json_path = out_dir.join("sepstrat.json");
        let tsv_path = out_dir.join("sepstrat.tsv");
        Self {
            kind,
            signature,
            k,
            metric: Metric::Euclidean,
            verbose: false,
            min_similarity: None,
            write_json: false,
            write_tsv: false,
            raw,
            predictors: None,
            alignment: None,
            result: None,
            warnings: Vec::new(),
            output: OutputPaths {
                out_dir,
                json_path,
                tsv_path,
            },
            tool_version: tool_version.to_string(),
        }
    }
}
