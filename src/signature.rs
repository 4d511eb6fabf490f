use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::StratError;

/// Ensembl IDs of the 7-gene Davenport signature.
pub const MINIMAL_GENES: [&str; 7] = [
    "ENSG00000152219",
    "ENSG00000100814",
    "ENSG00000127334",
    "ENSG00000131355",
    "ENSG00000137337",
    "ENSG00000156414",
    "ENSG00000115085",
];

/// Ensembl IDs of the 19-gene extended signature. The first seven entries
/// are the minimal signature in the same canonical order.
pub const EXTENDED_GENES: [&str; 19] = [
    "ENSG00000152219",
    "ENSG00000100814",
    "ENSG00000127334",
    "ENSG00000131355",
    "ENSG00000137337",
    "ENSG00000156414",
    "ENSG00000115085",
    "ENSG00000144659",
    "ENSG00000103423",
    "ENSG00000135372",
    "ENSG00000079134",
    "ENSG00000135972",
    "ENSG00000087157",
    "ENSG00000165006",
    "ENSG00000111667",
    "ENSG00000182670",
    "ENSG00000097033",
    "ENSG00000165733",
    "ENSG00000103264",
];

/// Gene-signature variant selecting the reference cohort and model pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Signature {
    Minimal,
    Extended,
}

impl Signature {
    /// Parses a user-supplied gene-set identifier. `davenport` and
    /// `extended_set` are accepted as aliases for the two variants.
    pub fn parse(name: &str) -> Result<Self, StratError> {
        match name {
            "minimal" | "davenport" => Ok(Self::Minimal),
            "extended" | "extended_set" => Ok(Self::Extended),
            other => Err(StratError::InvalidSignature(other.to_string())),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Minimal => "minimal",
            Self::Extended => "extended",
        }
    }

    /// Required predictor genes, in canonical reference column order.
    pub fn genes(&self) -> &'static [&'static str] {
        match self {
            Self::Minimal => &MINIMAL_GENES,
            Self::Extended => &EXTENDED_GENES,
        }
    }
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The three discrete molecular risk groups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SrsGroup {
    #[serde(rename = "SRS1")]
    Srs1,
    #[serde(rename = "SRS2")]
    Srs2,
    #[serde(rename = "SRS3")]
    Srs3,
}

pub const SRS_GROUPS: [SrsGroup; 3] = [SrsGroup::Srs1, SrsGroup::Srs2, SrsGroup::Srs3];

impl SrsGroup {
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "SRS1" => Some(Self::Srs1),
            "SRS2" => Some(Self::Srs2),
            "SRS3" => Some(Self::Srs3),
            _ => None,
        }
    }

    /// Numeric group index, used for probability-vector layout and for
    /// tie-breaking in the lazy-learning vote (lowest index wins).
    pub fn index(&self) -> usize {
        match self {
            Self::Srs1 => 0,
            Self::Srs2 => 1,
            Self::Srs3 => 2,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Srs1 => "SRS1",
            Self::Srs2 => "SRS2",
            Self::Srs3 => "SRS3",
        }
    }
}

impl fmt::Display for SrsGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
