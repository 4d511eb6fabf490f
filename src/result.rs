use crate::matrix::SampleMatrix;
use crate::signature::{Signature, SrsGroup};

/// Per-sample prediction. `outlier` means zero mutual pairs for the
/// stratification path, or best similarity below the configured threshold
/// for the projection path.
#[derive(Debug, Clone)]
pub struct SamplePrediction {
    pub id: String,
    pub group: SrsGroup,
    /// Indexed by [`SrsGroup::index`]; non-negative, sums to 1.
    pub probabilities: [f32; 3],
    pub srsq: f32,
    pub outlier: bool,
    pub mutual_pairs: usize,
}

/// Immutable output of one `stratify` or `project` call. Sample order and
/// identifiers match the input matrix exactly.
#[derive(Debug)]
pub struct PredictionResult {
    pub signature: Signature,
    pub k: usize,
    pub samples: Vec<SamplePrediction>,
    /// Input predictors after subsetting, before correction.
    pub raw_predictors: SampleMatrix,
    /// Input predictors after alignment (identical to raw for `project`).
    pub transformed_predictors: SampleMatrix,
    /// Transformed input rows stacked on the reference rows.
    pub aligned: SampleMatrix,
}

impl PredictionResult {
    pub fn n_samples(&self) -> usize {
        self.samples.len()
    }

    pub fn sample_ids(&self) -> impl Iterator<Item = &str> {
        self.samples.iter().map(|s| s.id.as_str())
    }

    pub fn outlier_count(&self) -> usize {
        self.samples.iter().filter(|s| s.outlier).count()
    }

    pub fn group_counts(&self) -> [usize; 3] {
        let mut counts = [0usize; 3];
        for s in &self.samples {
            counts[s.group.index()] += 1;
        }
        counts
    }
}
