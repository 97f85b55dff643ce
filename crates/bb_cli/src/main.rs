//! bb_cli
//!
//! Simulate card-model baseball games from JSON requests.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "bb_cli")]
#[command(about = "Deterministic card-model baseball simulator", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Simulate one game
    Simulate {
        /// Game request JSON
        #[arg(long)]
        r#in: PathBuf,

        /// Result JSON (stdout when omitted)
        #[arg(long)]
        out: Option<PathBuf>,

        /// Replace the request's seed
        #[arg(long)]
        seed: Option<u64>,

        #[arg(long, default_value = "false")]
        pretty: bool,
    },

    /// Simulate a slate of games in parallel
    Slate {
        /// Slate request JSON
        #[arg(long)]
        r#in: PathBuf,

        #[arg(long)]
        out: Option<PathBuf>,

        #[arg(long, default_value = "false")]
        pretty: bool,
    },

    /// Replay a request several times and compare play-log digests
    Verify {
        #[arg(long)]
        r#in: PathBuf,

        #[arg(long, default_value = "5")]
        runs: usize,
    },

    /// Write a sample game request
    Sample {
        #[arg(long)]
        out: Option<PathBuf>,

        #[arg(long, default_value = "42")]
        seed: u64,
    },
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).init();
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Commands::Simulate { r#in, out, seed, pretty } => {
            let json = bb_cli::simulate(&r#in, seed, pretty)?;
            bb_cli::write_output(out.as_deref(), &json)?;
        }
        Commands::Slate { r#in, out, pretty } => {
            let json = bb_cli::slate(&r#in, pretty)?;
            bb_cli::write_output(out.as_deref(), &json)?;
        }
        Commands::Verify { r#in, runs } => {
            let report = bb_cli::verify(&r#in, runs)?;
            tracing::info!(runs = report.runs, seed = report.seed, "deterministic");
            println!("OK {} runs, seed {}, digest {}", report.runs, report.seed, report.digest);
        }
        Commands::Sample { out, seed } => {
            let json = bb_cli::sample(seed)?;
            bb_cli::write_output(out.as_deref(), &json)?;
        }
    }

    Ok(())
}
