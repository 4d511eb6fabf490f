//! Versioned JSON report schema.

use serde::{Deserialize, Serialize};

use crate::signature::Signature;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    Stratify,
    Project,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PerSamplePrediction {
    pub id: String,
    pub srs: String,
    #[serde(rename = "p_SRS1")]
    pub p_srs1: f64,
    #[serde(rename = "p_SRS2")]
    pub p_srs2: f64,
    #[serde(rename = "p_SRS3")]
    pub p_srs3: f64,
    #[serde(rename = "SRSq")]
    pub srsq: f64,
    pub outlier: bool,
    pub mutual_pairs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlignmentMeta {
    pub k: u64,
    pub metric: String,
    pub n_pairs: u64,
    pub n_outliers: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StratReportV1 {
    pub tool_version: String,
    pub mode: Mode,
    pub signature: Signature,
    pub n_samples: u64,
    /// Present for stratify runs only; projection has no alignment step.
    pub alignment: Option<AlignmentMeta>,
    pub per_sample: Vec<PerSamplePrediction>,
    pub warnings: Vec<String>,
}
