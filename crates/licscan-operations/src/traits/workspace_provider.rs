use std::path::Path;

use licscan_core::MonorepoInfo;
use licscan_workspace::{ProjectManifest, ScanSettings};

use crate::Result;

pub trait WorkspaceProvider: Send + Sync {
    /// # Errors
    ///
    /// Returns an error if the workspace config is missing or invalid, or if the
    /// project directories cannot be enumerated.
    fn discover_monorepo(&self, root: &Path) -> Result<MonorepoInfo>;

    /// # Errors
    ///
    /// Returns an error if the project's `package.json` cannot be read or parsed.
    fn read_project_manifest(&self, project_dir: &Path) -> Result<ProjectManifest>;

    /// # Errors
    ///
    /// Returns an error if the root manifest or its scan settings are invalid.
    fn load_settings(&self, root: &Path) -> Result<ScanSettings>;
}
