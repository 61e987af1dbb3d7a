//! Command-line parsing for the synthetic household dataset generator.
//!
//! The goal of this module is to keep **argument parsing** and **command
//! dispatch** separate from the ingest/sampling code.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(
    name = "hsynth",
    version,
    about = "Synthetic household budget dataset generator"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Generate a synthetic dataset from the reference tables and write it to CSV.
    Generate(GenerateArgs),
    /// Load the reference tables and print the derived shares and scalars.
    Inspect(InspectArgs),
    /// Print the active demographic profile set.
    Profiles(ProfilesArgs),
}

/// Options for dataset generation.
#[derive(Debug, Parser, Clone)]
pub struct GenerateArgs {
    /// Number of household records to generate.
    #[arg(short = 'n', long, default_value_t = 30000)]
    pub records: usize,

    /// Random seed for reproducible output. Omit for a fresh dataset per run.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Reference year (must exist in both reference tables).
    #[arg(long, default_value = "2022")]
    pub year: String,

    /// Expense composition table (categories x years, percent of total).
    #[arg(long, default_value = "Expense composition percentage.csv")]
    pub shares: PathBuf,

    /// Income and expense totals table (years x aggregates, currency units).
    #[arg(long, default_value = "Income and expenses in shekels.csv")]
    pub totals: PathBuf,

    /// Banner rows above the header in both reference tables.
    #[arg(long, default_value_t = 2)]
    pub skip_rows: usize,

    /// JSON file overriding the built-in demographic profiles.
    #[arg(long)]
    pub profiles: Option<PathBuf>,

    /// Output CSV path (overwritten wholesale on each run).
    #[arg(short = 'o', long, default_value = "financial_data_il_detailed.csv")]
    pub output: PathBuf,

    /// Suppress the run summary.
    #[arg(long)]
    pub quiet: bool,
}

/// Options for inspecting the reference tables.
#[derive(Debug, Parser)]
pub struct InspectArgs {
    /// Reference year (must exist in both reference tables).
    #[arg(long, default_value = "2022")]
    pub year: String,

    /// Expense composition table (categories x years, percent of total).
    #[arg(long, default_value = "Expense composition percentage.csv")]
    pub shares: PathBuf,

    /// Income and expense totals table (years x aggregates, currency units).
    #[arg(long, default_value = "Income and expenses in shekels.csv")]
    pub totals: PathBuf,

    /// Banner rows above the header in both reference tables.
    #[arg(long, default_value_t = 2)]
    pub skip_rows: usize,
}

/// Options for listing profiles.
#[derive(Debug, Parser)]
pub struct ProfilesArgs {
    /// JSON file overriding the built-in demographic profiles.
    #[arg(long)]
    pub profiles: Option<PathBuf>,
}
