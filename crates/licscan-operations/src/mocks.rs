use std::collections::HashMap;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};

use licscan_core::{
    Dependency, LOCKFILE_NAME, LicenseInfo, LicenseSource, MANIFEST_FILE_NAME, MonorepoInfo,
    ROOT_PROJECT_PATH,
};
use licscan_lockfile::{LockfileData, parse_lockfile};
use licscan_workspace::{ProjectManifest, ScanSettings, WorkspaceError};

use crate::Result;
use crate::error::OperationError;
use crate::traits::{LicenseResolver, LockfileProvider, WorkspaceProvider};

pub struct MockWorkspaceProvider {
    monorepo: MonorepoInfo,
    manifests: HashMap<PathBuf, ProjectManifest>,
    settings: ScanSettings,
}

impl MockWorkspaceProvider {
    #[must_use]
    pub fn new(root: &str, project_paths: &[&str]) -> Self {
        Self {
            monorepo: MonorepoInfo {
                root: PathBuf::from(root),
                workspace_globs: vec!["packages/*".to_string()],
                project_paths: project_paths.iter().map(ToString::to_string).collect(),
            },
            manifests: HashMap::new(),
            settings: ScanSettings::default(),
        }
    }

    #[must_use]
    pub fn with_manifest(
        mut self,
        project_path: &str,
        name: Option<&str>,
        version: Option<&str>,
        package_manager: Option<&str>,
    ) -> Self {
        let dir = self.project_dir(project_path);
        self.manifests.insert(
            dir.clone(),
            ProjectManifest {
                path: dir.join(MANIFEST_FILE_NAME),
                name: name.map(str::to_string),
                version: version.map(str::to_string),
                package_manager: package_manager.map(str::to_string),
            },
        );
        self
    }

    #[must_use]
    pub fn with_project(mut self, project_path: &str, name: Option<&str>) -> Self {
        self.monorepo.project_paths.push(project_path.to_string());
        self.with_manifest(project_path, name, None, None)
    }

    #[must_use]
    pub fn with_include_dev(mut self, include_dev: bool) -> Self {
        self.settings = self.settings.with_include_dev(include_dev);
        self
    }

    fn project_dir(&self, project_path: &str) -> PathBuf {
        if project_path == ROOT_PROJECT_PATH {
            self.monorepo.root.clone()
        } else {
            self.monorepo.root.join(project_path)
        }
    }
}

impl WorkspaceProvider for MockWorkspaceProvider {
    fn discover_monorepo(&self, _root: &Path) -> Result<MonorepoInfo> {
        Ok(self.monorepo.clone())
    }

    fn read_project_manifest(&self, project_dir: &Path) -> Result<ProjectManifest> {
        self.manifests.get(project_dir).cloned().ok_or_else(|| {
            WorkspaceError::ManifestRead {
                path: project_dir.join(MANIFEST_FILE_NAME),
                source: io::Error::from(io::ErrorKind::NotFound),
            }
            .into()
        })
    }

    fn load_settings(&self, _root: &Path) -> Result<ScanSettings> {
        Ok(self.settings.clone())
    }
}

/// Parses its content on every load, so invalid lockfiles fail the way real ones do.
pub struct MockLockfileProvider {
    content: String,
}

impl MockLockfileProvider {
    #[must_use]
    pub fn from_yaml(content: &str) -> Self {
        Self {
            content: content.to_string(),
        }
    }
}

impl LockfileProvider for MockLockfileProvider {
    fn load_lockfile(&self, root: &Path) -> Result<LockfileData> {
        Ok(parse_lockfile(&self.content, &root.join(LOCKFILE_NAME))?)
    }
}

pub struct MockLicenseResolver {
    licenses: HashMap<(String, String), String>,
    failing: Option<String>,
    calls: AtomicUsize,
}

impl MockLicenseResolver {
    #[must_use]
    pub fn new() -> Self {
        Self {
            licenses: HashMap::new(),
            failing: None,
            calls: AtomicUsize::new(0),
        }
    }

    #[must_use]
    pub fn with_license(mut self, name: &str, version: &str, spdx_id: &str) -> Self {
        self.licenses
            .insert((name.to_string(), version.to_string()), spdx_id.to_string());
        self
    }

    #[must_use]
    pub fn failing_on(mut self, name: &str) -> Self {
        self.failing = Some(name.to_string());
        self
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl LicenseResolver for MockLicenseResolver {
    fn resolve(
        &self,
        root: &Path,
        _project_dir: &Path,
        dependency: &Dependency,
    ) -> Result<LicenseInfo> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        if self.failing.as_deref() == Some(dependency.name.as_str()) {
            return Err(OperationError::PackageRead {
                path: root.join("node_modules").join(&dependency.name),
                source: io::Error::from(io::ErrorKind::PermissionDenied),
            });
        }

        let key = (dependency.name.clone(), dependency.version.clone());
        Ok(self
            .licenses
            .get(&key)
            .map_or_else(LicenseInfo::unknown, |spdx_id| LicenseInfo {
                spdx_id: spdx_id.clone(),
                source: LicenseSource::ManifestField,
                raw_value: None,
            }))
    }
}
