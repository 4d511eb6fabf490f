use thiserror::Error;

/// Failures surfaced by the stratification and projection entry points.
///
/// Every variant is fatal for the call that raised it: validation runs
/// before alignment, alignment before modelling, and no partial result is
/// ever returned.
#[derive(Debug, Error)]
pub enum StratError {
    #[error("unrecognised gene set `{0}` (expected `minimal` or `extended`)")]
    InvalidSignature(String),

    #[error("missing required genes for the `{signature}` signature: {}", .genes.join(", "))]
    MissingColumns {
        signature: &'static str,
        genes: Vec<String>,
    },

    #[error("alignment failed: {0}")]
    AlignmentFailure(String),

    #[error("column mismatch against the reference set: {0}")]
    ColumnMismatch(String),
}
