use std::path::Path;

use licscan_core::MonorepoInfo;
use licscan_workspace::{
    ProjectManifest, ScanSettings, discover_monorepo, load_scan_settings, read_project_manifest,
};

use crate::Result;
use crate::traits::WorkspaceProvider;

pub struct FileSystemWorkspaceProvider;

impl FileSystemWorkspaceProvider {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Default for FileSystemWorkspaceProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl WorkspaceProvider for FileSystemWorkspaceProvider {
    fn discover_monorepo(&self, root: &Path) -> Result<MonorepoInfo> {
        Ok(discover_monorepo(root)?)
    }

    fn read_project_manifest(&self, project_dir: &Path) -> Result<ProjectManifest> {
        Ok(read_project_manifest(project_dir)?)
    }

    fn load_settings(&self, root: &Path) -> Result<ScanSettings> {
        Ok(load_scan_settings(root)?)
    }
}
