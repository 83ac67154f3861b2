use std::path::Path;

use licscan_core::{Dependency, LicenseInfo};

use crate::Result;

/// Finds the license of one dependency of the project in `project_dir`.
///
/// A package that cannot be located resolves to `UNKNOWN` rather than an error.
pub trait LicenseResolver: Send + Sync {
    /// # Errors
    ///
    /// Returns an error if the located package's manifest cannot be read or parsed.
    fn resolve(&self, root: &Path, project_dir: &Path, dependency: &Dependency)
    -> Result<LicenseInfo>;
}
