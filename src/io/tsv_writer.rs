use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};

use crate::result::PredictionResult;

pub fn write_predictions(path: &Path, result: &PredictionResult) -> Result<()> {
    let file = std::fs::File::create(path)
        .with_context(|| format!("failed to create {}", path.display()))?;
    let mut w = BufWriter::new(file);

    writeln!(w, "sample_id\tSRS\tp_SRS1\tp_SRS2\tp_SRS3\tSRSq\toutlier\tmutual_pairs")?;
    for sample in &result.samples {
        writeln!(
            w,
            "{}\t{}\t{:.6}\t{:.6}\t{:.6}\t{:.6}\t{}\t{}",
            sample.id,
            sample.group,
            sample.probabilities[0],
            sample.probabilities[1],
            sample.probabilities[2],
            sample.srsq,
            sample.outlier,
            sample.mutual_pairs
        )?;
    }
    w.flush()?;
    Ok(())
}
