use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};

use licscan_core::{Project, ROOT_PROJECT_PATH, ScanResult};
use licscan_license::LicenseCache;
use licscan_lockfile::{LockfileData, ProjectDependencies, extract_dependencies};
use rayon::prelude::*;
use tracing::{debug, info};

use crate::Result;
use crate::operations::aggregate::{ScanContext, aggregate};
use crate::operations::enrich::enrich_licenses;
use crate::traits::{LicenseResolver, LockfileProvider, WorkspaceProvider};

const FALLBACK_VERSION: &str = "0.0.0";

/// Overrides for the settings stored in the root manifest. `None` keeps the stored value.
#[derive(Debug, Clone, Default)]
pub struct ScanInput {
    pub include_dev: Option<bool>,
    pub jobs: Option<NonZeroUsize>,
}

pub struct ScanOperation<W, L, R> {
    workspace_provider: W,
    lockfile_provider: L,
    license_resolver: R,
}

impl<W, L, R> ScanOperation<W, L, R>
where
    W: WorkspaceProvider,
    L: LockfileProvider,
    R: LicenseResolver,
{
    pub fn new(workspace_provider: W, lockfile_provider: L, license_resolver: R) -> Self {
        Self {
            workspace_provider,
            lockfile_provider,
            license_resolver,
        }
    }

    /// Scans the monorepo at `root`.
    ///
    /// Projects are processed in parallel but reported in discovery order. The scan is
    /// all or nothing: the first failing project fails the whole scan.
    ///
    /// # Errors
    ///
    /// Returns an error if the workspace or lockfile cannot be loaded, if a project has
    /// no importer in the lockfile, or if a manifest cannot be parsed.
    pub fn execute(&self, root: &Path, input: &ScanInput) -> Result<ScanResult> {
        let monorepo = self.workspace_provider.discover_monorepo(root)?;
        let settings = self.workspace_provider.load_settings(&monorepo.root)?;
        let lockfile = self.lockfile_provider.load_lockfile(&monorepo.root)?;

        let include_dev = input.include_dev.unwrap_or(settings.include_dev());
        let jobs = input.jobs.or(settings.jobs());

        let project_paths: Vec<&str> = monorepo
            .project_paths
            .iter()
            .map(String::as_str)
            .filter(|path| {
                let ignored = settings.is_ignored(path);
                if ignored {
                    debug!(project = path, "skipping ignored project");
                }
                !ignored
            })
            .collect();

        info!(
            root = %monorepo.root.display(),
            projects = project_paths.len(),
            lockfile_version = %lockfile.lockfile_version,
            include_dev,
            "starting license scan"
        );

        let pnpm_version = if monorepo
            .project_paths
            .iter()
            .any(|path| path == ROOT_PROJECT_PATH)
        {
            self.workspace_provider
                .read_project_manifest(&monorepo.root)?
                .pnpm_version()
                .map(str::to_string)
        } else {
            None
        };

        let cache = LicenseCache::new();
        let pool = build_pool(jobs)?;
        let projects = pool.install(|| {
            project_paths
                .par_iter()
                .map(|path| {
                    self.scan_project(&monorepo.root, &lockfile, path, include_dev, &cache)
                })
                .collect::<Result<Vec<_>>>()
        })?;

        let result = aggregate(
            projects,
            ScanContext {
                monorepo_root: monorepo.root,
                lockfile_version: lockfile.lockfile_version,
                pnpm_version,
            },
        );

        info!(
            projects = result.summary.total_projects,
            unique_dependencies = result.summary.unique_dependencies,
            unknown_licenses = result.summary.unknown_license_count,
            "license scan finished"
        );

        Ok(result)
    }

    fn scan_project(
        &self,
        root: &Path,
        lockfile: &LockfileData,
        project_path: &str,
        include_dev: bool,
        cache: &LicenseCache,
    ) -> Result<Project> {
        let project_dir = project_dir(root, project_path);
        let manifest = self.workspace_provider.read_project_manifest(&project_dir)?;

        let ProjectDependencies {
            mut dependencies,
            mut dev_dependencies,
        } = extract_dependencies(lockfile, project_path)?;
        if !include_dev {
            dev_dependencies.clear();
        }

        enrich_licenses(
            &mut dependencies,
            &self.license_resolver,
            cache,
            root,
            &project_dir,
        )?;
        enrich_licenses(
            &mut dev_dependencies,
            &self.license_resolver,
            cache,
            root,
            &project_dir,
        )?;

        debug!(
            project = project_path,
            dependencies = dependencies.len(),
            dev_dependencies = dev_dependencies.len(),
            "scanned project"
        );

        let name = manifest
            .name
            .unwrap_or_else(|| fallback_name(&project_dir, project_path));

        Ok(Project {
            name,
            path: project_path.to_string(),
            version: manifest
                .version
                .unwrap_or_else(|| FALLBACK_VERSION.to_string()),
            dependencies,
            dev_dependencies,
            is_workspace_root: project_path == ROOT_PROJECT_PATH,
        })
    }
}

fn project_dir(root: &Path, project_path: &str) -> PathBuf {
    if project_path == ROOT_PROJECT_PATH {
        root.to_path_buf()
    } else {
        root.join(project_path)
    }
}

fn fallback_name(project_dir: &Path, project_path: &str) -> String {
    project_dir
        .file_name()
        .map_or_else(|| project_path.to_string(), |name| name.to_string_lossy().into_owned())
}

fn build_pool(jobs: Option<NonZeroUsize>) -> Result<rayon::ThreadPool> {
    let mut builder = rayon::ThreadPoolBuilder::new();
    if let Some(jobs) = jobs {
        builder = builder.num_threads(jobs.get());
    }
    Ok(builder.build()?)
}
