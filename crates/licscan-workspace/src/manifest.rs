use std::path::{Path, PathBuf};

use licscan_core::MANIFEST_FILE_NAME;
use serde::Deserialize;

use crate::error::WorkspaceError;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct PackageManifest {
    pub(crate) name: Option<String>,
    pub(crate) version: Option<String>,
    pub(crate) package_manager: Option<String>,
    pub(crate) licscan: Option<LicscanMetadata>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct LicscanMetadata {
    pub(crate) include_dev: Option<bool>,
    pub(crate) jobs: Option<usize>,
    #[serde(default)]
    pub(crate) ignored_projects: Vec<String>,
}

pub(crate) fn read_manifest(path: &Path) -> Result<PackageManifest, WorkspaceError> {
    let content = std::fs::read_to_string(path).map_err(|source| WorkspaceError::ManifestRead {
        path: path.to_path_buf(),
        source,
    })?;

    serde_json::from_str(&content).map_err(|source| WorkspaceError::ManifestParse {
        path: path.to_path_buf(),
        source,
    })
}

/// The parts of a project's `package.json` a scan reports on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectManifest {
    pub path: PathBuf,
    pub name: Option<String>,
    pub version: Option<String>,
    pub package_manager: Option<String>,
}

impl ProjectManifest {
    /// The pnpm version pinned through the `packageManager` field, if any.
    ///
    /// `pnpm@8.15.4+sha256.abc` yields `8.15.4`.
    #[must_use]
    pub fn pnpm_version(&self) -> Option<&str> {
        let spec = self.package_manager.as_deref()?.trim();
        let version = spec.strip_prefix("pnpm@")?;
        let version = version.split('+').next().unwrap_or(version);
        (!version.is_empty()).then_some(version)
    }
}

/// # Errors
///
/// Returns `WorkspaceError::ManifestRead` if `package.json` cannot be read and
/// `WorkspaceError::ManifestParse` if it is not valid JSON of the expected shape.
pub fn read_project_manifest(project_dir: &Path) -> Result<ProjectManifest, WorkspaceError> {
    let path = project_dir.join(MANIFEST_FILE_NAME);
    let manifest = read_manifest(&path)?;

    Ok(ProjectManifest {
        path,
        name: manifest.name,
        version: manifest.version,
        package_manager: manifest.package_manager,
    })
}
