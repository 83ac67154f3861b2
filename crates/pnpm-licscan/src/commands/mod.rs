mod scan;

use std::path::Path;

use clap::Subcommand;

use crate::error::Result;

pub(crate) use scan::ScanArgs;

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Scan every workspace project and report the licenses of its dependencies
    Scan(ScanArgs),
}

impl Commands {
    pub(crate) fn execute(self, root: &Path) -> Result<()> {
        match self {
            Self::Scan(args) => scan::run(root, &args),
        }
    }
}
