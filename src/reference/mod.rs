mod loader;

use std::sync::OnceLock;

use crate::matrix::SampleMatrix;
use crate::signature::{Signature, SrsGroup};

/// Immutable cohort of known-origin samples for one signature variant.
///
/// Rows carry the SRS group and SRSq value assigned during model training;
/// the matrix columns are the signature's genes in canonical order. Never
/// mutated after load.
#[derive(Debug)]
pub struct ReferenceSet {
    pub signature: Signature,
    pub matrix: SampleMatrix,
    pub groups: Vec<SrsGroup>,
    pub srsq: Vec<f32>,
}

impl ReferenceSet {
    pub fn n_samples(&self) -> usize {
        self.matrix.n_samples()
    }

    pub fn genes(&self) -> &[String] {
        self.matrix.genes()
    }
}

static MINIMAL: OnceLock<ReferenceSet> = OnceLock::new();
static EXTENDED: OnceLock<ReferenceSet> = OnceLock::new();

/// Process-wide read-only reference cohort for `signature`, parsed from the
/// embedded asset on first use and shared by every subsequent call.
pub fn builtin(signature: Signature) -> &'static ReferenceSet {
    let cell = match signature {
        Signature::Minimal => &MINIMAL,
        Signature::Extended => &EXTENDED,
    };
    cell.get_or_init(|| {
        loader::load_embedded(signature).expect("embedded reference cohort parses")
    })
}
