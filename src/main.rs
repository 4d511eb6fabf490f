use anyhow::{ensure, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use sepstrat::cli::{Cli, Commands, GeneSetArg, SignatureCommand};
use sepstrat::ctx::{CallKind, Ctx};
use sepstrat::io;
use sepstrat::pipeline::stage0_validate::Stage0Validate;
use sepstrat::pipeline::stage1_subset::Stage1Subset;
use sepstrat::pipeline::stage2_align::Stage2Align;
use sepstrat::pipeline::stage3_predict::Stage3Predict;
use sepstrat::pipeline::stage4_project::Stage4Project;
use sepstrat::pipeline::stage5_output::Stage5Output;
use sepstrat::pipeline::Pipeline;
use sepstrat::reference;
use sepstrat::signature::Signature;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Stratify(args) => {
            ensure!(args.k >= 1, "--k must be a positive integer");
            let signature = Signature::parse(args.gene_set.as_str())?;
            let matrix = io::table::read_matrix(&args.input)?;
            let mut ctx = Ctx::new(
                matrix,
                CallKind::Stratify,
                signature,
                args.k,
                args.out,
                env!("CARGO_PKG_VERSION"),
            );
            ctx.metric = args.metric.into();
            ctx.verbose = args.verbose;
            ctx.write_json = args.json;
            ctx.write_tsv = args.tsv;

            let pipeline = Pipeline::new(vec![
                Box::new(Stage0Validate::new()),
                Box::new(Stage1Subset::new()),
                Box::new(Stage2Align::new()),
                Box::new(Stage3Predict::new()),
                Box::new(Stage5Output::new()),
            ]);
            pipeline.run(&mut ctx)?;
            print_summary(&ctx)?;
        }
        Commands::Project(args) => {
            ensure!(args.k >= 1, "--k must be a positive integer");
            let signature = Signature::parse(args.gene_set.as_str())?;
            let matrix = io::table::read_matrix(&args.input)?;
            let mut ctx = Ctx::new(
                matrix,
                CallKind::Project,
                signature,
                args.k,
                args.out,
                env!("CARGO_PKG_VERSION"),
            );
            ctx.verbose = args.verbose;
            ctx.min_similarity = args.min_similarity;
            ctx.write_json = args.json;
            ctx.write_tsv = args.tsv;

            let pipeline = Pipeline::new(vec![
                Box::new(Stage0Validate::new()),
                Box::new(Stage1Subset::new()),
                Box::new(Stage4Project::new()),
                Box::new(Stage5Output::new()),
            ]);
            pipeline.run(&mut ctx)?;
            print_summary(&ctx)?;
        }
        Commands::Signature(args) => match args.command {
            SignatureCommand::Show(show) => {
                let selected: Vec<Signature> = match show.gene_set {
                    Some(GeneSetArg::Minimal) => vec![Signature::Minimal],
                    Some(GeneSetArg::Extended) => vec![Signature::Extended],
                    None => vec![Signature::Minimal, Signature::Extended],
                };
                for signature in selected {
                    print_signature(signature);
                }
            }
        },
    }

    Ok(())
}

fn print_summary(ctx: &Ctx) -> Result<()> {
    let result = ctx
        .result
        .as_ref()
        .ok_or_else(|| anyhow::anyhow!("prediction result missing"))?;
    print!("{}", io::summary::format_summary(ctx, result));
    Ok(())
}

fn print_signature(signature: Signature) {
    let set = reference::builtin(signature);
    println!(
        "{} signature: {} genes, {} reference samples",
        signature,
        signature.genes().len(),
        set.n_samples()
    );
    for gene in signature.genes() {
        println!("- {}", gene);
    }
}
