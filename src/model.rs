//! Pre-trained model artifacts consumed as black boxes.
//!
//! The core never trains anything: a [`Model`] answers a discrete group
//! label with its probability vector and a continuous SRSq score for one
//! aligned predictor row. The shipped implementation pairs a
//! centroid/softmax classifier with an RBF-kernel regressor over the
//! reference rows, both loaded once from an embedded JSON artifact; a
//! serialized tree ensemble could substitute behind the same trait.

use std::collections::BTreeMap;
use std::sync::OnceLock;

use anyhow::{bail, Context, Result};
use serde::Deserialize;

use crate::reference::{self, ReferenceSet};
use crate::signature::{Signature, SrsGroup, SRS_GROUPS};

/// Trained classifier/regressor capability for one signature variant.
pub trait Model {
    /// Discrete group label plus the per-group probability vector, indexed
    /// by [`SrsGroup::index`]. Probabilities are non-negative and sum to 1.
    fn predict_label(&self, row: &[f32]) -> (SrsGroup, [f32; 3]);

    /// Continuous SRSq score, nominally in [0, 1] but not clamped.
    fn predict_score(&self, row: &[f32]) -> f32;
}

#[derive(Debug, Deserialize)]
struct ModelArtifact {
    signature: Signature,
    temperature: f32,
    bandwidth: f32,
    centroids: BTreeMap<String, Vec<f32>>,
}

/// Centroid/softmax classifier + RBF-kernel regressor over the reference
/// cohort. Read-only after construction.
pub struct ReferenceModel {
    centroids: [Vec<f32>; 3],
    temperature: f32,
    bandwidth: f32,
    training: &'static ReferenceSet,
}

impl ReferenceModel {
    fn from_artifact(artifact: ModelArtifact, training: &'static ReferenceSet) -> Result<Self> {
        if artifact.signature != training.signature {
            bail!(
                "model artifact signature `{}` does not match reference `{}`",
                artifact.signature,
                training.signature
            );
        }
        if artifact.temperature <= 0.0 || artifact.bandwidth <= 0.0 {
            bail!("model artifact temperature and bandwidth must be positive");
        }
        let width = training.genes().len();
        let mut centroids: [Vec<f32>; 3] = [Vec::new(), Vec::new(), Vec::new()];
        for group in SRS_GROUPS {
            let c = artifact
                .centroids
                .get(group.as_str())
                .with_context(|| format!("model artifact missing centroid for {}", group))?;
            if c.len() != width {
                bail!(
                    "centroid for {} has {} entries, expected {}",
                    group,
                    c.len(),
                    width
                );
            }
            centroids[group.index()] = c.clone();
        }
        Ok(Self {
            centroids,
            temperature: artifact.temperature,
            bandwidth: artifact.bandwidth,
            training,
        })
    }
}

impl Model for ReferenceModel {
    fn predict_label(&self, row: &[f32]) -> (SrsGroup, [f32; 3]) {
        let d2: Vec<f32> = self
            .centroids
            .iter()
            .map(|c| crate::math::stats::squared_distance(row, c))
            .collect();
        // Softmax over negative squared centroid distances, shifted by the
        // minimum so far-field rows stay numerically stable.
        let min = d2.iter().cloned().fold(f32::INFINITY, f32::min);
        let mut probs = [0.0f32; 3];
        let mut total = 0.0f32;
        for (i, d) in d2.iter().enumerate() {
            let w = (-(d - min) / self.temperature).exp();
            probs[i] = w;
            total += w;
        }
        for p in &mut probs {
            *p /= total;
        }
        let mut best = SRS_GROUPS[0];
        for group in SRS_GROUPS {
            if probs[group.index()] > probs[best.index()] {
                best = group;
            }
        }
        (best, probs)
    }

    fn predict_score(&self, row: &[f32]) -> f32 {
        let n = self.training.n_samples();
        let mut d2 = Vec::with_capacity(n);
        for i in 0..n {
            d2.push(crate::math::stats::squared_distance(
                row,
                self.training.matrix.row(i),
            ));
        }
        // Kernel weights are normalized against the nearest training row so
        // the weight sum never underflows to zero.
        let min = d2.iter().cloned().fold(f32::INFINITY, f32::min);
        let h2 = 2.0 * self.bandwidth * self.bandwidth;
        let mut total = 0.0f32;
        let mut acc = 0.0f32;
        for (i, d) in d2.iter().enumerate() {
            let w = (-(d - min) / h2).exp();
            total += w;
            acc += w * self.training.srsq[i];
        }
        acc / total
    }
}

static MINIMAL: OnceLock<ReferenceModel> = OnceLock::new();
static EXTENDED: OnceLock<ReferenceModel> = OnceLock::new();

/// Process-wide model pair for `signature`, loaded from the embedded JSON
/// artifact on first use.
pub fn builtin(signature: Signature) -> &'static ReferenceModel {
    let cell = match signature {
        Signature::Minimal => &MINIMAL,
        Signature::Extended => &EXTENDED,
    };
    cell.get_or_init(|| load_embedded(signature).expect("embedded model artifact parses"))
}

fn load_embedded(signature: Signature) -> Result<ReferenceModel> {
    let content = match signature {
        Signature::Minimal => include_str!("../assets/reference/minimal_model.json"),
        Signature::Extended => include_str!("../assets/reference/extended_model.json"),
    };
    let artifact: ModelArtifact = serde_json::from_str(content)
        .with_context(|| format!("model artifact for `{}` is invalid JSON", signature))?;
    ReferenceModel::from_artifact(artifact, reference::builtin(signature))
}
