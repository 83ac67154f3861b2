use indexmap::IndexMap;
use licscan_core::ROOT_PROJECT_PATH;

/// A validated pnpm lockfile.
///
/// * Specification: <https://github.com/pnpm/spec/blob/master/lockfile/6.0.md>
#[derive(Debug, Clone, PartialEq)]
pub struct LockfileData {
    pub lockfile_version: String,
    /// Keyed by project path relative to the workspace root; `.` is the root project.
    pub importers: IndexMap<String, ImporterData>,
    /// Keyed by package coordinate, e.g. `/lodash@4.17.21` or `lodash@4.17.21`.
    pub packages: IndexMap<String, PackageData>,
    /// Passed through unvalidated.
    pub settings: Option<serde_yml::Value>,
}

impl LockfileData {
    #[must_use]
    pub fn importer(&self, project_path: &str) -> Option<&ImporterData> {
        let key = if project_path.is_empty() {
            ROOT_PROJECT_PATH
        } else {
            project_path
        };
        self.importers.get(key)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImporterData {
    pub dependencies: Option<IndexMap<String, DependencyRef>>,
    pub dev_dependencies: Option<IndexMap<String, DependencyRef>>,
    pub optional_dependencies: Option<IndexMap<String, DependencyRef>>,
}

impl ImporterData {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.dependencies.is_none()
            && self.dev_dependencies.is_none()
            && self.optional_dependencies.is_none()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DependencyRef {
    pub specifier: String,
    pub version: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PackageResolution {
    /// Empty when the lockfile records no integrity hash (e.g. git or directory sources).
    pub integrity: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PackageData {
    pub resolution: PackageResolution,
    pub dependencies: Option<IndexMap<String, String>>,
    pub dev: Option<bool>,
    pub optional: Option<bool>,
}
