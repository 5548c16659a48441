mod commands;
mod reporter;
mod summary;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "superres", about = "Multi-frame super-resolution tool")]
#[command(version)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Worker threads for parallel stages (defaults to all cores)
    #[arg(long, global = true)]
    threads: Option<usize>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Reconstruct a high-resolution image from a frame sequence
    Run(commands::run::RunArgs),
    /// Print per-frame displacements and their lattice phases
    Register(commands::register::RegisterArgs),
    /// Print or save the default pipeline config
    Config(commands::config::ConfigArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("warn")
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    if let Some(threads) = cli.threads {
        rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build_global()
            .context("Failed to configure thread pool")?;
        tracing::debug!(threads, "Configured worker pool");
    }

    match &cli.command {
        Commands::Run(args) => commands::run::run(args),
        Commands::Register(args) => commands::register::run(args),
        Commands::Config(args) => commands::config::run(args),
    }
}
