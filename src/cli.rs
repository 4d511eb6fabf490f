use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::align::Metric;

#[derive(Debug, Parser)]
#[command(name = "sepstrat", version, about = "SRS stratification of gene-expression samples")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Align samples onto the reference cohort and run the trained models.
    Stratify(StratifyArgs),
    /// Lazy-learning projection for small cohorts (no alignment, no models).
    Project(ProjectArgs),
    /// Inspect the built-in gene signatures.
    Signature(SignatureArgs),
}

#[derive(Debug, Args)]
pub struct StratifyArgs {
    #[arg(long, help = "Input TSV (rows = samples, columns = gene IDs)")]
    pub input: PathBuf,

    #[arg(long)]
    pub out: PathBuf,

    #[arg(long, value_enum, default_value_t = GeneSetArg::Extended)]
    pub gene_set: GeneSetArg,

    #[arg(long, default_value_t = 5, help = "Neighbour count for the mNN search")]
    pub k: usize,

    #[arg(long, value_enum, default_value_t = MetricArg::Euclidean)]
    pub metric: MetricArg,

    #[arg(long, default_value_t = false)]
    pub verbose: bool,

    #[arg(long, default_value_t = false)]
    pub json: bool,

    #[arg(long, default_value_t = false)]
    pub tsv: bool,
}

#[derive(Debug, Args)]
pub struct ProjectArgs {
    #[arg(long, help = "Input TSV (rows = samples, columns = gene IDs)")]
    pub input: PathBuf,

    #[arg(long)]
    pub out: PathBuf,

    #[arg(long, value_enum, default_value_t = GeneSetArg::Extended)]
    pub gene_set: GeneSetArg,

    #[arg(long, default_value_t = 5, help = "Number of reference neighbours to vote")]
    pub k: usize,

    #[arg(
        long,
        help = "Flag samples whose best neighbour similarity falls below this"
    )]
    pub min_similarity: Option<f32>,

    #[arg(long, default_value_t = false)]
    pub verbose: bool,

    #[arg(long, default_value_t = false)]
    pub json: bool,

    #[arg(long, default_value_t = false)]
    pub tsv: bool,
}

#[derive(Debug, Args)]
pub struct SignatureArgs {
    #[command(subcommand)]
    pub command: SignatureCommand,
}

#[derive(Debug, Subcommand)]
pub enum SignatureCommand {
    Show(SignatureShowArgs),
}

#[derive(Debug, Args)]
pub struct SignatureShowArgs {
    #[arg(long, value_enum, help = "Limit output to one signature")]
    pub gene_set: Option<GeneSetArg>,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum GeneSetArg {
    Minimal,
    Extended,
}

impl GeneSetArg {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Minimal => "minimal",
            Self::Extended => "extended",
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum MetricArg {
    Euclidean,
    Cosine,
}

impl From<MetricArg> for Metric {
    fn from(value: MetricArg) -> Self {
        match value {
            MetricArg::Euclidean => Metric::Euclidean,
            MetricArg::Cosine => Metric::Cosine,
        }
    }
}
