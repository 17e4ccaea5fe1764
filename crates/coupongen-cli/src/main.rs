mod config;
mod logging;

use std::collections::HashSet;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};
use coupongen_core::Pattern;
use coupongen_generate::{CouponGenerator, GenerationError, read_codes};
use thiserror::Error;
use tracing::{error, info, warn};

use config::{ConfigError, GenerateArgs};
use logging::{LogFormat, init_logging};

#[derive(Debug, Error)]
enum CliError {
    #[error(transparent)]
    Generation(#[from] GenerationError),
    #[error("config error: {0}")]
    Config(#[from] ConfigError),
    #[error("failed to read {path}: {source}")]
    Read { path: PathBuf, source: csv::Error },
    #[error("verification failed: {0}")]
    Verify(String),
}

#[derive(Parser, Debug)]
#[command(name = "coupongen", version, about = "Generate unique coupon codes")]
struct Cli {
    /// Log level used when RUST_LOG is unset.
    #[arg(long, global = true, default_value = "info")]
    log_level: String,
    #[arg(long, global = true, value_enum, default_value_t = LogFormat::Text)]
    log_format: LogFormat,
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate coupons and export them as CSV (default).
    Generate(GenerateArgs),
    /// Print how many distinct codes a pattern can produce.
    Capacity(CapacityArgs),
    /// Check an exported CSV for duplicates and pattern mismatches.
    Verify(VerifyArgs),
}

#[derive(Args, Debug)]
struct CapacityArgs {
    #[arg(long, short)]
    pattern: String,
}

#[derive(Args, Debug)]
struct VerifyArgs {
    /// CSV file written by `generate`.
    path: PathBuf,
    /// Also require every code to match this pattern.
    #[arg(long, short)]
    pattern: Option<String>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(err) = init_logging(&cli.log_level, cli.log_format) {
        eprintln!("failed to initialise logging: {err}");
        return ExitCode::FAILURE;
    }

    match run(command_or_default(cli.command)) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(error = %err, "coupongen failed");
            ExitCode::FAILURE
        }
    }
}

/// A bare `coupongen` behaves like `coupongen generate` with defaults.
fn command_or_default(command: Option<Command>) -> Command {
    command.unwrap_or_else(|| Command::Generate(GenerateArgs::default()))
}

fn run(command: Command) -> Result<(), CliError> {
    match command {
        Command::Generate(args) => run_generate(args),
        Command::Capacity(args) => {
            let pattern = Pattern::parse(&args.pattern);
            println!("{}", pattern.max_combinations());
            Ok(())
        }
        Command::Verify(args) => run_verify(args),
    }
}

fn run_generate(args: GenerateArgs) -> Result<(), CliError> {
    let settings = args.resolve()?;
    let generator = CouponGenerator::new(settings.options);
    let result = generator.run(&settings.pattern, settings.count)?;

    info!(
        path = %result.out_path.display(),
        coupons = result.report.generated,
        "coupons exported"
    );
    Ok(())
}

fn run_verify(args: VerifyArgs) -> Result<(), CliError> {
    let codes = read_codes(&args.path).map_err(|source| CliError::Read {
        path: args.path.clone(),
        source,
    })?;
    let pattern = args.pattern.as_deref().map(Pattern::parse);

    let mut seen = HashSet::with_capacity(codes.len());
    let mut duplicates = 0_u64;
    let mut mismatched = 0_u64;
    for code in &codes {
        if !seen.insert(code.as_str()) {
            duplicates += 1;
        }
        if let Some(pattern) = &pattern {
            if !pattern.matches(code) {
                mismatched += 1;
                warn!(code = %code, pattern = %pattern, "code does not match pattern");
            }
        }
    }

    info!(
        path = %args.path.display(),
        coupons = codes.len(),
        placeholders = pattern.as_ref().map_or(0, Pattern::placeholder_count),
        duplicates,
        mismatched,
        "verification finished"
    );

    if duplicates > 0 || mismatched > 0 {
        return Err(CliError::Verify(format!(
            "{duplicates} duplicate(s), {mismatched} pattern mismatch(es) in {} coupons",
            codes.len()
        )));
    }

    println!("{} coupons ok", codes.len());
    Ok(())
}
