//! Drug-disease hypothesis generation and ranking CLI.

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;
mod output;

#[derive(Parser)]
#[command(
    name = "remedyx",
    version,
    about = "Generate and rank drug-disease hypotheses from gene overlap and PPI proximity"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Precompute the gene index and all-pairs distance matrix.
    Precompute(commands::precompute::PrecomputeArgs),
    /// Annotate a drug-disease pair list with PPI proximity from a
    /// precomputed matrix.
    Annotate(commands::annotate::AnnotateArgs),
    /// Run the full ranking pipeline on CSV inputs.
    Rank(commands::rank::RankArgs),
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    match cli.command {
        Command::Precompute(args) => commands::precompute::run(args),
        Command::Annotate(args) => commands::annotate::run(args),
        Command::Rank(args) => commands::rank::run(args),
    }
}
