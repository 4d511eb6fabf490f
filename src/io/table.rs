//! TSV reader for sample-by-gene expression tables.
//!
//! First header cell names the id column (any text), remaining header cells
//! are gene IDs; each data row starts with a unique sample id.

use std::path::Path;

use anyhow::{bail, Context, Result};

use crate::matrix::SampleMatrix;

pub fn read_matrix(path: &Path) -> Result<SampleMatrix> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read input table {}", path.display()))?;
    parse_matrix(&content, &path.display().to_string())
}

pub fn parse_matrix(content: &str, source: &str) -> Result<SampleMatrix> {
    let mut lines = content.lines().enumerate();
    let (_, header) = lines
        .next()
        .with_context(|| format!("{}: empty input table", source))?;
    let columns: Vec<&str> = header.split('\t').collect();
    if columns.len() < 2 {
        bail!("{}:1 header must contain an id column and at least one gene", source);
    }
    let genes: Vec<String> = columns[1..].iter().map(|g| g.trim().to_string()).collect();

    let mut sample_ids = Vec::new();
    let mut values = Vec::new();
    for (idx, line) in lines {
        let line_no = idx + 1;
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        let parts: Vec<&str> = trimmed.split('\t').collect();
        if parts.len() != columns.len() {
            bail!(
                "{}:{} expected {} columns, found {}",
                source,
                line_no,
                columns.len(),
                parts.len()
            );
        }
        sample_ids.push(parts[0].to_string());
        for field in &parts[1..] {
            let v: f32 = field.trim().parse().with_context(|| {
                format!("{}:{} invalid expression value `{}`", source, line_no, field)
            })?;
            values.push(v);
        }
    }
    if sample_ids.is_empty() {
        bail!("{}: input table has no sample rows", source);
    }

    SampleMatrix::new(sample_ids, genes, values)
        .with_context(|| format!("{}: invalid sample matrix", source))
}
