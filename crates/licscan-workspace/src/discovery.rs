use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use globset::{GlobBuilder, GlobSet, GlobSetBuilder};
use licscan_core::{MANIFEST_FILE_NAME, MonorepoInfo, ROOT_PROJECT_PATH, WorkspaceConfig};
use tracing::debug;

use crate::error::WorkspaceError;
use crate::workspace_config::read_workspace_config;

const SKIPPED_DIR: &str = "node_modules";

/// Locates the workspace config under `root` and enumerates its projects.
///
/// # Errors
///
/// Returns `WorkspaceError` if the root cannot be resolved, the workspace config is
/// missing or invalid, or the directory tree cannot be read.
pub fn discover_monorepo(root: &Path) -> Result<MonorepoInfo, WorkspaceError> {
    let root = root
        .canonicalize()
        .map_err(|source| WorkspaceError::DirectoryRead {
            path: root.to_path_buf(),
            source,
        })?;

    let config = read_workspace_config(&root)?;
    enumerate_projects(&root, &config)
}

/// Expands the workspace patterns against the filesystem below `root`.
///
/// Every pattern is matched against manifest paths (`<pattern>/package.json`), so exclude
/// patterns apply to directories at any depth. `node_modules` trees are never entered.
/// The root is listed as `.` whenever it has a manifest of its own.
///
/// # Errors
///
/// Returns `WorkspaceError::GlobPattern` for an invalid pattern and
/// `WorkspaceError::DirectoryRead` if a directory cannot be listed.
pub fn enumerate_projects(
    root: &Path,
    config: &WorkspaceConfig,
) -> Result<MonorepoInfo, WorkspaceError> {
    let includes = build_manifest_glob_set(config.include_patterns())?;
    let excludes = build_manifest_glob_set(config.exclude_patterns())?;

    let mut manifests = Vec::new();
    collect_manifests(root, root, &mut manifests)?;

    let mut project_paths = BTreeSet::new();
    for relative in manifests {
        let manifest_path = to_slash_path(&relative);
        let project_dir = project_dir_of(&manifest_path);
        let is_root = project_dir == ROOT_PROJECT_PATH;

        if excludes.is_match(&manifest_path) {
            debug!(project = project_dir, "excluded by workspace pattern");
            continue;
        }

        if is_root || includes.is_match(&manifest_path) {
            project_paths.insert(project_dir.to_string());
        }
    }

    debug!(
        root = %root.display(),
        projects = project_paths.len(),
        "enumerated workspace projects"
    );

    Ok(MonorepoInfo {
        root: root.to_path_buf(),
        workspace_globs: config.packages.clone(),
        project_paths: project_paths.into_iter().collect(),
    })
}

/// Turns a workspace pattern into a glob over manifest paths.
fn manifest_glob(pattern: &str) -> String {
    let trimmed = pattern.trim().trim_start_matches("./").trim_end_matches('/');
    if trimmed.is_empty() || trimmed == ROOT_PROJECT_PATH {
        MANIFEST_FILE_NAME.to_string()
    } else {
        format!("{trimmed}/{MANIFEST_FILE_NAME}")
    }
}

fn build_manifest_glob_set<'a>(
    patterns: impl Iterator<Item = &'a str>,
) -> Result<GlobSet, WorkspaceError> {
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        let glob = GlobBuilder::new(&manifest_glob(pattern))
            .literal_separator(true)
            .build()
            .map_err(|source| WorkspaceError::GlobPattern {
                pattern: pattern.to_string(),
                source,
            })?;
        builder.add(glob);
    }
    builder.build().map_err(|source| WorkspaceError::GlobPattern {
        pattern: "<workspace patterns>".to_string(),
        source,
    })
}

fn collect_manifests(
    base: &Path,
    current: &Path,
    results: &mut Vec<PathBuf>,
) -> Result<(), WorkspaceError> {
    let read_error = |source| WorkspaceError::DirectoryRead {
        path: current.to_path_buf(),
        source,
    };

    let entries = std::fs::read_dir(current).map_err(read_error)?;

    for entry in entries {
        let entry = entry.map_err(read_error)?;
        let file_type = entry.file_type().map_err(read_error)?;
        let path = entry.path();

        if file_type.is_dir() {
            if entry.file_name() == SKIPPED_DIR {
                continue;
            }
            collect_manifests(base, &path, results)?;
        } else if file_type.is_file() && entry.file_name() == MANIFEST_FILE_NAME {
            // read_dir yields children of `base`, so the prefix is always present
            let relative = path.strip_prefix(base).unwrap_or(&path);
            results.push(relative.to_path_buf());
        }
    }

    Ok(())
}

fn to_slash_path(path: &Path) -> String {
    path.components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

fn project_dir_of(manifest_path: &str) -> &str {
    manifest_path
        .strip_suffix(MANIFEST_FILE_NAME)
        .map(|dir| dir.trim_end_matches('/'))
        .filter(|dir| !dir.is_empty())
        .unwrap_or(ROOT_PROJECT_PATH)
}
