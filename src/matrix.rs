use std::collections::{HashMap, HashSet};

use anyhow::{bail, Result};

use crate::error::StratError;
use crate::signature::Signature;

/// Rectangular numeric table, one row per sample and one named gene per
/// column. Values are row-major.
#[derive(Debug, Clone)]
pub struct SampleMatrix {
    sample_ids: Vec<String>,
    genes: Vec<String>,
    values: Vec<f32>,
    gene_index: HashMap<String, usize>,
}

impl SampleMatrix {
    pub fn new(sample_ids: Vec<String>, genes: Vec<String>, values: Vec<f32>) -> Result<Self> {
        if values.len() != sample_ids.len() * genes.len() {
            bail!(
                "matrix shape mismatch: {} samples x {} genes but {} values",
                sample_ids.len(),
                genes.len(),
                values.len()
            );
        }
        let mut seen = HashSet::new();
        for id in &sample_ids {
            if !seen.insert(id.as_str()) {
                bail!("duplicate sample id `{}`", id);
            }
        }
        let gene_index = genes
            .iter()
            .enumerate()
            .map(|(i, g)| (g.clone(), i))
            .collect();
        Ok(Self {
            sample_ids,
            genes,
            values,
            gene_index,
        })
    }

    pub fn n_samples(&self) -> usize {
        self.sample_ids.len()
    }

    pub fn n_genes(&self) -> usize {
        self.genes.len()
    }

    pub fn sample_ids(&self) -> &[String] {
        &self.sample_ids
    }

    pub fn genes(&self) -> &[String] {
        &self.genes
    }

    pub fn gene_position(&self, gene: &str) -> Option<usize> {
        self.gene_index.get(gene).copied()
    }

    pub fn row(&self, i: usize) -> &[f32] {
        let w = self.genes.len();
        &self.values[i * w..(i + 1) * w]
    }

    pub fn value(&self, sample: usize, gene: usize) -> f32 {
        self.values[sample * self.genes.len() + gene]
    }

    /// Checks that every gene required by `signature` is present, collecting
    /// every missing ID rather than stopping at the first.
    pub fn validate_signature(&self, signature: Signature) -> Result<(), StratError> {
        let missing: Vec<String> = signature
            .genes()
            .iter()
            .filter(|g| !self.gene_index.contains_key(**g))
            .map(|g| g.to_string())
            .collect();
        if missing.is_empty() {
            Ok(())
        } else {
            Err(StratError::MissingColumns {
                signature: signature.name(),
                genes: missing,
            })
        }
    }

    /// Subsets to the signature's genes in canonical reference column order.
    /// Extra columns are dropped. Unreachable when `validate_signature`
    /// passed, but kept as a consistency check after subsetting decisions.
    pub fn subset(&self, genes: &[&str]) -> Result<SampleMatrix, StratError> {
        let mut positions = Vec::with_capacity(genes.len());
        for gene in genes {
            match self.gene_position(gene) {
                Some(p) => positions.push(p),
                None => {
                    return Err(StratError::ColumnMismatch(format!(
                        "gene `{}` absent from working matrix",
                        gene
                    )))
                }
            }
        }
        let mut values = Vec::with_capacity(self.n_samples() * genes.len());
        for i in 0..self.n_samples() {
            let row = self.row(i);
            for &p in &positions {
                values.push(row[p]);
            }
        }
        let gene_names: Vec<String> = genes.iter().map(|g| g.to_string()).collect();
        let gene_index = gene_names
            .iter()
            .enumerate()
            .map(|(i, g)| (g.clone(), i))
            .collect();
        Ok(SampleMatrix {
            sample_ids: self.sample_ids.clone(),
            genes: gene_names,
            values,
            gene_index,
        })
    }

    /// Stacks `self` on top of `other`; both must share the same column set
    /// in the same order.
    pub fn vstack(&self, other: &SampleMatrix) -> Result<SampleMatrix, StratError> {
        if self.genes != other.genes {
            return Err(StratError::ColumnMismatch(
                "cannot stack matrices with differing column sets".to_string(),
            ));
        }
        let mut sample_ids = self.sample_ids.clone();
        sample_ids.extend(other.sample_ids.iter().cloned());
        let mut values = self.values.clone();
        values.extend_from_slice(&other.values);
        let gene_index = self.gene_index.clone();
        Ok(SampleMatrix {
            sample_ids,
            genes: self.genes.clone(),
            values,
            gene_index,
        })
    }

    /// Replaces row `i` with `row`. Panics if the width differs; callers
    /// only pass rows drawn from the same column space.
    pub(crate) fn set_row(&mut self, i: usize, row: &[f32]) {
        let w = self.genes.len();
        self.values[i * w..(i + 1) * w].copy_from_slice(row);
    }
}
