use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Sentinel SPDX id for a dependency whose license could not be determined.
pub const UNKNOWN_LICENSE: &str = "UNKNOWN";

/// Sentinel for packages that declare themselves proprietary. Not an SPDX identifier.
pub const UNLICENSED: &str = "UNLICENSED";

/// Glob patterns from `pnpm-workspace.yaml`, in file order.
///
/// Patterns prefixed with `!` exclude directories matched by the other patterns.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkspaceConfig {
    pub packages: Vec<String>,
}

impl WorkspaceConfig {
    pub fn include_patterns(&self) -> impl Iterator<Item = &str> {
        self.packages
            .iter()
            .filter(|p| !p.starts_with('!'))
            .map(String::as_str)
    }

    pub fn exclude_patterns(&self) -> impl Iterator<Item = &str> {
        self.packages.iter().filter_map(|p| p.strip_prefix('!'))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonorepoInfo {
    pub root: PathBuf,
    pub workspace_globs: Vec<String>,
    /// Sorted, deduplicated, relative to `root`; `.` is the root project.
    pub project_paths: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LicenseSource {
    ManifestField,
    ManifestArray,
    LicenseFile,
    Unknown,
}

impl fmt::Display for LicenseSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::ManifestField => "manifest-field",
            Self::ManifestArray => "manifest-array",
            Self::LicenseFile => "license-file",
            Self::Unknown => "unknown",
        };
        write!(f, "{s}")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LicenseInfo {
    pub spdx_id: String,
    pub source: LicenseSource,
    /// Original declaration, kept only when normalization changed it.
    pub raw_value: Option<String>,
}

impl LicenseInfo {
    #[must_use]
    pub fn unknown() -> Self {
        Self {
            spdx_id: UNKNOWN_LICENSE.to_string(),
            source: LicenseSource::Unknown,
            raw_value: None,
        }
    }

    /// Builds a license record, keeping `raw` only if it differs from `spdx_id`.
    #[must_use]
    pub fn from_declared(spdx_id: String, source: LicenseSource, raw: &str) -> Self {
        let raw_value = (raw != spdx_id).then(|| raw.to_string());
        Self {
            spdx_id,
            source,
            raw_value,
        }
    }

    #[must_use]
    pub fn is_unknown(&self) -> bool {
        self.spdx_id == UNKNOWN_LICENSE
    }
}

impl Default for LicenseInfo {
    fn default() -> Self {
        Self::unknown()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dependency {
    pub name: String,
    pub version: String,
    pub license: LicenseInfo,
    pub is_workspace_dependency: bool,
    pub is_dev: bool,
    /// Range exactly as declared in the project manifest.
    pub specifier: String,
}

impl Dependency {
    #[must_use]
    pub fn key(&self) -> (&str, &str) {
        (&self.name, &self.version)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub name: String,
    pub path: String,
    pub version: String,
    pub dependencies: Vec<Dependency>,
    pub dev_dependencies: Vec<Dependency>,
    pub is_workspace_root: bool,
}

impl Project {
    pub fn all_dependencies(&self) -> impl Iterator<Item = &Dependency> {
        self.dependencies.iter().chain(&self.dev_dependencies)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanMetadata {
    pub monorepo_root: PathBuf,
    pub lockfile_version: String,
    pub scan_timestamp: String,
    pub pnpm_version: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanSummary {
    pub total_projects: usize,
    pub total_dependencies: usize,
    pub unique_dependencies: usize,
    pub license_counts: BTreeMap<String, usize>,
    pub unknown_license_count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanResult {
    pub projects: Vec<Project>,
    pub metadata: ScanMetadata,
    pub summary: ScanSummary,
}
