//! cdl - CDL grading-metadata inspection CLI

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "cdl")]
#[command(author, version, about = "Inspect ASC CDL grading metadata")]
#[command(long_about = "
Parse color decision lists and print the grading records they carry.

Examples:
  cdl info grades.cdl                   # List every color item
  cdl info conform.edl -f edl -t 25     # EDL-embedded CDL comments
  cdl json grades.cdl                   # First correction as JSON
")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Print every color item parsed from a document
    #[command(visible_alias = "i")]
    Info(InfoArgs),

    /// Dump the first color correction as JSON
    #[command(visible_alias = "j")]
    Json(InfoArgs),
}

#[derive(Args)]
struct InfoArgs {
    /// Input document (.cdl/.ccc/.cc XML, or an EDL)
    input: PathBuf,

    /// Input flavour: xml, edl
    #[arg(short, long, default_value = "xml")]
    flavour: String,

    /// EDL frame-rate timebase
    #[arg(short, long, default_value = "24")]
    timebase: String,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Info(args) => commands::info::run(args, cli.verbose),
        Commands::Json(args) => commands::json::run(args),
    }
}
