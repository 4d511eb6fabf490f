use anyhow::{bail, Context, Result};

use crate::matrix::SampleMatrix;
use crate::reference::ReferenceSet;
use crate::signature::{Signature, SrsGroup};

pub fn load_embedded(signature: Signature) -> Result<ReferenceSet> {
    let content = match signature {
        Signature::Minimal => include_str!("../../assets/reference/minimal.tsv"),
        Signature::Extended => include_str!("../../assets/reference/extended.tsv"),
    };
    parse_reference_tsv(content, signature)
}

fn parse_reference_tsv(content: &str, signature: Signature) -> Result<ReferenceSet> {
    let source = signature.name();
    let mut lines = content.lines().enumerate();

    let (_, header) = lines
        .next()
        .with_context(|| format!("{}: empty reference asset", source))?;
    let columns: Vec<&str> = header.split('\t').collect();
    if columns.len() < 4 || columns[0] != "sample_id" || columns[1] != "srs" || columns[2] != "srsq"
    {
        bail!("{}:1 malformed header (expected sample_id, srs, srsq, genes...)", source);
    }
    let genes: Vec<String> = columns[3..].iter().map(|g| g.to_string()).collect();
    let expected: Vec<&str> = signature.genes().to_vec();
    if genes != expected {
        bail!("{}:1 gene columns disagree with the {} signature", source, source);
    }

    let mut sample_ids = Vec::new();
    let mut groups = Vec::new();
    let mut srsq = Vec::new();
    let mut values = Vec::new();

    for (idx, line) in lines {
        let line_no = idx + 1;
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        let parts: Vec<&str> = trimmed.split('\t').collect();
        if parts.len() != 3 + genes.len() {
            bail!(
                "{}:{} malformed row (expected {} columns, found {})",
                source,
                line_no,
                3 + genes.len(),
                parts.len()
            );
        }
        sample_ids.push(parts[0].to_string());
        let group = SrsGroup::parse(parts[1])
            .with_context(|| format!("{}:{} unknown SRS group `{}`", source, line_no, parts[1]))?;
        groups.push(group);
        let q: f32 = parts[2]
            .parse()
            .with_context(|| format!("{}:{} invalid srsq value", source, line_no))?;
        srsq.push(q);
        for field in &parts[3..] {
            let v: f32 = field
                .parse()
                .with_context(|| format!("{}:{} invalid expression value", source, line_no))?;
            values.push(v);
        }
    }

    if sample_ids.is_empty() {
        bail!("{}: reference asset has no sample rows", source);
    }

    let matrix = SampleMatrix::new(sample_ids, genes, values)?;
    Ok(ReferenceSet {
        signature,
        matrix,
        groups,
        srsq,
    })
}
