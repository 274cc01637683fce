//! mixer - Run PCM mixing scenarios from YAML files.

mod output;
mod scenario;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use output::Output;

/// Mixer CLI - mix PCM sources into a shared ring buffer.
///
/// A scenario file describes the sink ring and a list of sources that are
/// mixed into it in order. The resulting ring contents are printed as YAML
/// or JSON.
#[derive(Parser)]
#[command(name = "mixer")]
#[command(about = "Fixed-point PCM ring mixer")]
#[command(version)]
pub struct Cli {
    /// Output file (default: stdout)
    #[arg(short = 'o', long, global = true)]
    pub output: Option<PathBuf>,

    /// Output as JSON (for piping)
    #[arg(long, global = true)]
    pub json: bool,

    /// Verbose output
    #[arg(short = 'v', long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Mix the sources of a scenario file
    Run {
        /// Scenario file (YAML or JSON)
        #[arg(short = 'f', long = "file")]
        file: PathBuf,

        /// Drain the mixed samples after the run
        #[arg(long)]
        drain: bool,
    },
    /// List the frame formats this build can mix
    Formats,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup logging
    if cli.verbose {
        tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_target(false)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::from_default_env())
            .with_target(false)
            .init();
    }

    let out = Output::new(cli.json, cli.output.clone());

    match &cli.command {
        Commands::Run { file, drain } => {
            let scenario = scenario::Scenario::load(file)?;
            let report = scenario.run(*drain)?;
            out.write(&report)
        }
        Commands::Formats => out.write(&scenario::formats()),
    }
}
