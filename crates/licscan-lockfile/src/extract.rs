use indexmap::IndexMap;
use licscan_core::{Dependency, LicenseInfo, WORKSPACE_PROTOCOL};

use crate::error::LockfileError;
use crate::model::{DependencyRef, LockfileData};

/// The direct dependencies of one project, split by the bucket they were declared in.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectDependencies {
    pub dependencies: Vec<Dependency>,
    pub dev_dependencies: Vec<Dependency>,
}

/// Looks up `project_path` among the lockfile importers and lists its dependencies.
///
/// Licenses start out as `UNKNOWN`; enrichment is a separate step. Optional dependencies
/// are not listed.
///
/// # Errors
///
/// Returns `LockfileError::ProjectNotFound` if the lockfile has no importer for the
/// project, which usually means the lockfile is older than the project.
pub fn extract_dependencies(
    lockfile: &LockfileData,
    project_path: &str,
) -> Result<ProjectDependencies, LockfileError> {
    let importer = lockfile
        .importer(project_path)
        .ok_or_else(|| LockfileError::ProjectNotFound {
            project_path: project_path.to_string(),
        })?;

    Ok(ProjectDependencies {
        dependencies: to_dependencies(importer.dependencies.as_ref(), false),
        dev_dependencies: to_dependencies(importer.dev_dependencies.as_ref(), true),
    })
}

#[must_use]
pub fn is_workspace_specifier(specifier: &str) -> bool {
    specifier.starts_with(WORKSPACE_PROTOCOL)
}

fn to_dependencies(
    bucket: Option<&IndexMap<String, DependencyRef>>,
    is_dev: bool,
) -> Vec<Dependency> {
    bucket
        .into_iter()
        .flatten()
        .map(|(name, dep)| Dependency {
            name: name.clone(),
            version: dep.version.clone(),
            license: LicenseInfo::unknown(),
            is_workspace_dependency: is_workspace_specifier(&dep.specifier),
            is_dev,
            specifier: dep.specifier.clone(),
        })
        .collect()
}
