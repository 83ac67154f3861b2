mod commands;
mod error;
mod output;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use licscan_core::ErrorCode;
use tracing_subscriber::EnvFilter;

use crate::commands::Commands;
use crate::error::CliError;

#[derive(Parser)]
#[command(name = "pnpm-licscan")]
#[command(bin_name = "pnpm-licscan")]
#[command(about = "Report dependency licenses across a pnpm workspace", long_about = None)]
struct Cli {
    /// Monorepo root to scan (default: current directory)
    #[arg(long = "path", short = 'C', global = true)]
    path: Option<PathBuf>,

    /// Log scan progress to stderr
    #[arg(long, short = 'v', global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let root = match resolve_root(cli.path) {
        Ok(path) => path,
        Err(e) => {
            print_error(&e);
            return ExitCode::FAILURE;
        }
    };

    if let Err(e) = cli.command.execute(&root) {
        print_error(&e);
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}

/// `RUST_LOG` wins over `--verbose`.
fn init_logging(verbose: bool) {
    let default_directive = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn resolve_root(path: Option<PathBuf>) -> Result<PathBuf, CliError> {
    match path {
        Some(p) => Ok(p),
        None => std::env::current_dir().map_err(CliError::CurrentDir),
    }
}

fn print_error(error: &CliError) {
    eprintln!("error: {error}");

    let mut source = std::error::Error::source(error);
    while let Some(cause) = source {
        eprintln!("caused by: {cause}");
        source = std::error::Error::source(cause);
    }

    if let Some(hint) = error.code().and_then(remediation_hint) {
        eprintln!("hint: {hint}");
    }
}

fn remediation_hint(code: ErrorCode) -> Option<&'static str> {
    match code {
        ErrorCode::LockfileNotFound | ErrorCode::ProjectNotFound => {
            Some("run `pnpm install` to create or refresh pnpm-lock.yaml")
        }
        ErrorCode::InvalidLockfileVersion => Some(
            "upgrade pnpm to version 8 or newer and run `pnpm install` to rewrite the lockfile",
        ),
        ErrorCode::WorkspaceConfigNotFound => {
            Some("run from the monorepo root or pass it with `-C <dir>`")
        }
        ErrorCode::WorkspaceConfigParseError
        | ErrorCode::LockfileParseError
        | ErrorCode::PackageJsonParseError
        | ErrorCode::IoError => None,
    }
}
