//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - parses CLI arguments
//! - loads the reference tables
//! - generates the synthetic population
//! - writes the output CSV
//! - prints the run summary

use clap::Parser;

use crate::cli::{Command, GenerateArgs, InspectArgs, ProfilesArgs};
use crate::domain::GenerateConfig;
use crate::error::AppError;

pub mod pipeline;

/// Entry point for the `hsynth` binary.
pub fn run() -> Result<(), AppError> {
    // `hsynth` and `hsynth -n 500` should behave like `hsynth generate ...`.
    //
    // Clap requires a subcommand name, so we do a small, explicit rewrite of
    // the argv list before parsing. This preserves a clean clap structure
    // while retaining the requested one-shot batch UX.
    let argv = rewrite_args(std::env::args().collect());
    let cli = crate::cli::Cli::parse_from(argv);

    match cli.command {
        Command::Generate(args) => handle_generate(args),
        Command::Inspect(args) => handle_inspect(args),
        Command::Profiles(args) => handle_profiles(args),
    }
}

fn handle_generate(args: GenerateArgs) -> Result<(), AppError> {
    let config = generate_config_from_args(&args);
    let run = pipeline::run_generate(&config)?;

    // The output path is only touched after generation fully succeeded, so a
    // missing reference key can never leave a partial dataset behind.
    crate::io::export::write_dataset_csv(&config.output, &run.dataset)?;

    if !config.quiet {
        println!("{}", crate::report::format_run_summary(&run, &config));
    }

    Ok(())
}

fn handle_inspect(args: InspectArgs) -> Result<(), AppError> {
    let reference =
        crate::io::ingest::load_reference(&args.shares, &args.totals, &args.year, args.skip_rows)?;
    println!("{}", crate::report::format_reference(&reference));
    Ok(())
}

fn handle_profiles(args: ProfilesArgs) -> Result<(), AppError> {
    let profiles = crate::data::profiles::resolve(args.profiles.as_deref())?;
    println!("{}", crate::report::format_profiles(&profiles));
    Ok(())
}

pub fn generate_config_from_args(args: &GenerateArgs) -> GenerateConfig {
    GenerateConfig {
        records: args.records,
        seed: args.seed,
        year: args.year.clone(),
        shares_path: args.shares.clone(),
        totals_path: args.totals.clone(),
        skip_rows: args.skip_rows,
        profiles_path: args.profiles.clone(),
        output: args.output.clone(),
        quiet: args.quiet,
    }
}

/// Rewrite argv so `hsynth` defaults to `hsynth generate`.
///
/// Rules:
/// - `hsynth`                  -> `hsynth generate`
/// - `hsynth -n 500 ...`       -> `hsynth generate -n 500 ...`
/// - `hsynth --help/--version` -> unchanged (show top-level help/version)
fn rewrite_args(mut argv: Vec<String>) -> Vec<String> {
    let Some(arg1) = argv.get(1).cloned() else {
        argv.push("generate".to_string());
        return argv;
    };

    let is_top_level_help_or_version = matches!(
        arg1.as_str(),
        "-h" | "--help" | "-V" | "--version" | "help"
    );
    if is_top_level_help_or_version {
        return argv;
    }

    let is_subcommand = matches!(arg1.as_str(), "generate" | "inspect" | "profiles");
    if is_subcommand {
        return argv;
    }

    // If the first token is a flag, treat it as "generate flags".
    if arg1.starts_with('-') {
        argv.insert(1, "generate".to_string());
        return argv;
    }

    // Otherwise, leave as-is.
    argv
}
