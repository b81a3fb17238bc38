use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Naiad solver output toolkit.
#[derive(Parser)]
#[command(
    name = "naiad",
    version,
    about = "Inspect and compare hydraulic solver binary output files"
)]
pub struct Cli {
    /// Increase verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Available subcommands.
#[derive(Subcommand)]
pub enum Command {
    /// Summarise the contents of an output file.
    Info(InfoArgs),
    /// Compare an output file against an accepted reference.
    Compare(CompareArgs),
}

/// Arguments for the `info` subcommand.
#[derive(clap::Args)]
pub struct InfoArgs {
    /// Path to the binary output file.
    pub file: PathBuf,

    /// Number of element IDs to list per table.
    #[arg(long, default_value_t = 5)]
    pub ids: usize,
}

/// Arguments for the `compare` subcommand.
#[derive(clap::Args)]
pub struct CompareArgs {
    /// Path to the output file under test.
    pub test: PathBuf,

    /// Path to the reference output file.
    pub reference: PathBuf,

    /// Path to TOML configuration file.
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Absolute tolerance, overrides the config file.
    #[arg(long = "abs-tol")]
    pub abs_tol: Option<f64>,

    /// Relative tolerance, overrides the config file.
    #[arg(long = "rel-tol")]
    pub rel_tol: Option<f64>,

    /// Path for the comparison report JSON output.
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}
