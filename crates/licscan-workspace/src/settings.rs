use std::num::NonZeroUsize;
use std::path::Path;

use globset::{Glob, GlobSet, GlobSetBuilder};
use licscan_core::MANIFEST_FILE_NAME;

use crate::error::WorkspaceError;
use crate::manifest::{LicscanMetadata, read_manifest};

/// Scan settings read from the `licscan` object of the root `package.json`.
#[derive(Debug, Clone)]
pub struct ScanSettings {
    include_dev: bool,
    jobs: Option<NonZeroUsize>,
    ignored_projects: GlobSet,
}

impl Default for ScanSettings {
    fn default() -> Self {
        Self {
            include_dev: true,
            jobs: None,
            ignored_projects: GlobSet::empty(),
        }
    }
}

impl ScanSettings {
    #[must_use]
    pub fn include_dev(&self) -> bool {
        self.include_dev
    }

    #[must_use]
    pub fn jobs(&self) -> Option<NonZeroUsize> {
        self.jobs
    }

    #[must_use]
    pub fn is_ignored(&self, project_path: &str) -> bool {
        self.ignored_projects.is_match(project_path)
    }

    #[must_use]
    pub fn with_include_dev(mut self, include_dev: bool) -> Self {
        self.include_dev = include_dev;
        self
    }
}

fn build_glob_set(patterns: &[String], path: &Path) -> Result<GlobSet, WorkspaceError> {
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        let glob = Glob::new(pattern).map_err(|source| WorkspaceError::GlobPattern {
            pattern: pattern.clone(),
            source,
        })?;
        builder.add(glob);
    }
    builder
        .build()
        .map_err(|source| WorkspaceError::ConfigStructure {
            path: path.to_path_buf(),
            message: format!("invalid ignoredProjects patterns: {source}"),
        })
}

fn build_settings(
    metadata: Option<&LicscanMetadata>,
    path: &Path,
) -> Result<ScanSettings, WorkspaceError> {
    let defaults = ScanSettings::default();
    match metadata {
        None => Ok(defaults),
        Some(meta) => Ok(ScanSettings {
            include_dev: meta.include_dev.unwrap_or(defaults.include_dev),
            jobs: meta.jobs.and_then(NonZeroUsize::new),
            ignored_projects: build_glob_set(&meta.ignored_projects, path)?,
        }),
    }
}

/// Loads scan settings from the root manifest. A missing root manifest yields defaults.
///
/// # Errors
///
/// Returns `WorkspaceError` if the manifest cannot be parsed or an `ignoredProjects`
/// pattern is not a valid glob.
pub fn load_scan_settings(root: &Path) -> Result<ScanSettings, WorkspaceError> {
    let path = root.join(MANIFEST_FILE_NAME);
    if !path.exists() {
        return Ok(ScanSettings::default());
    }

    let manifest = read_manifest(&path)?;
    build_settings(manifest.licscan.as_ref(), &path)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_root_manifest(content: &str) -> tempfile::TempDir {
        let dir = tempfile::tempdir().expect("create temp dir");
        std::fs::write(dir.path().join("package.json"), content).expect("write manifest");
        dir
    }

    #[test]
    fn defaults_without_manifest() {
        let dir = tempfile::tempdir().expect("create temp dir");

        let settings = load_scan_settings(dir.path()).expect("should load");

        assert!(settings.include_dev());
        assert_eq!(settings.jobs(), None);
        assert!(!settings.is_ignored("packages/a"));
    }

    #[test]
    fn defaults_without_licscan_section() {
        let dir = write_root_manifest(r#"{ "name": "root", "private": true }"#);

        let settings = load_scan_settings(dir.path()).expect("should load");

        assert!(settings.include_dev());
    }

    #[test]
    fn reads_licscan_section() {
        let dir = write_root_manifest(
            r#"{
  "name": "root",
  "licscan": {
    "includeDev": false,
    "jobs": 2,
    "ignoredProjects": ["examples/*", "fixtures/**"]
  }
}"#,
        );

        let settings = load_scan_settings(dir.path()).expect("should load");

        assert!(!settings.include_dev());
        assert_eq!(settings.jobs().map(NonZeroUsize::get), Some(2));
        assert!(settings.is_ignored("examples/basic"));
        assert!(settings.is_ignored("fixtures/a/b"));
        assert!(!settings.is_ignored("packages/core"));
    }

    #[test]
    fn zero_jobs_means_unset() {
        let dir = write_root_manifest(r#"{ "licscan": { "jobs": 0 } }"#);

        let settings = load_scan_settings(dir.path()).expect("should load");

        assert_eq!(settings.jobs(), None);
    }

    #[test]
    fn invalid_ignored_pattern_is_rejected() {
        let dir = write_root_manifest(r#"{ "licscan": { "ignoredProjects": ["a/[b"] } }"#);

        let err = load_scan_settings(dir.path()).expect_err("should fail");

        assert!(matches!(err, WorkspaceError::GlobPattern { .. }));
    }

    #[test]
    fn include_dev_override_replaces_file_value() {
        let dir = write_root_manifest(r#"{ "licscan": { "includeDev": true, "jobs": 3 } }"#);

        let settings = load_scan_settings(dir.path())
            .expect("should load")
            .with_include_dev(false);

        assert!(!settings.include_dev());
        assert_eq!(settings.jobs().map(NonZeroUsize::get), Some(3));
    }
}
