use std::io::Write;
use std::num::NonZeroUsize;
use std::path::Path;

use clap::Args;
use licscan_operations::operations::{ScanInput, ScanOperation};
use licscan_operations::providers::{
    FileSystemLicenseResolver, FileSystemLockfileProvider, FileSystemWorkspaceProvider,
};

use crate::error::{CliError, Result};
use crate::output::OutputFormat;

#[derive(Args)]
pub(crate) struct ScanArgs {
    /// Report format written to stdout
    #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
    format: OutputFormat,

    /// Leave dev dependencies out of the report
    #[arg(long)]
    no_dev: bool,

    /// Number of projects scanned in parallel (default: number of CPUs)
    #[arg(long, short = 'j')]
    jobs: Option<NonZeroUsize>,
}

pub(crate) fn run(root: &Path, args: &ScanArgs) -> Result<()> {
    let operation = ScanOperation::new(
        FileSystemWorkspaceProvider::new(),
        FileSystemLockfileProvider::new(),
        FileSystemLicenseResolver::new(),
    );
    let input = ScanInput {
        include_dev: args.no_dev.then_some(false),
        jobs: args.jobs,
    };

    let result = operation.execute(root, &input)?;
    let report = args.format.formatter().format_scan(&result)?;

    std::io::stdout()
        .lock()
        .write_all(report.as_bytes())
        .map_err(CliError::Output)
}
