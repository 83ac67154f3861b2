use std::path::Path;

use indexmap::IndexMap;
use licscan_core::{LOCKFILE_NAME, ROOT_PROJECT_PATH};
use serde_yml::Value;
use tracing::debug;

use crate::error::LockfileError;
use crate::model::{ImporterData, LockfileData};
use crate::validate::{validate_importer, validate_importers, validate_packages};
use crate::version::{LockfileVersion, MINIMUM_LOCKFILE_VERSION};

/// Reads `pnpm-lock.yaml` from the monorepo root.
///
/// # Errors
///
/// Returns `LockfileError::NotFound` if the file does not exist, or any error produced
/// by [`parse_lockfile`].
pub fn read_lockfile(root: &Path) -> Result<LockfileData, LockfileError> {
    let path = root.join(LOCKFILE_NAME);
    let content = std::fs::read_to_string(&path).map_err(|source| {
        if source.kind() == std::io::ErrorKind::NotFound {
            LockfileError::NotFound { path: path.clone() }
        } else {
            LockfileError::Read {
                path: path.clone(),
                source,
            }
        }
    })?;

    parse_lockfile(&content, &path)
}

/// Parses and validates lockfile content. `path` is only used in error messages.
///
/// # Errors
///
/// Returns `LockfileError::Syntax` for malformed YAML. Returns `LockfileError::Structure`
/// for an empty document, a missing or unreadable `lockfileVersion`, or an `importers` or
/// `packages` section that is not a mapping. Returns `LockfileError::UnsupportedVersion`
/// if the version is older than [`MINIMUM_LOCKFILE_VERSION`].
pub fn parse_lockfile(content: &str, path: &Path) -> Result<LockfileData, LockfileError> {
    if content.trim().is_empty() {
        return Err(structure_error(path, "empty or invalid lockfile"));
    }

    let document: Value =
        serde_yml::from_str(content).map_err(|source| LockfileError::Syntax {
            path: path.to_path_buf(),
            source,
        })?;

    if !document.is_mapping() {
        return Err(structure_error(path, "empty or invalid lockfile"));
    }

    let lockfile_version = check_version(&document, path)?;
    check_section(&document, "importers", path)?;
    check_section(&document, "packages", path)?;

    let importers = match document.get("importers") {
        Some(section) => validate_importers(section),
        None => single_project_importers(&document),
    };

    let packages = document
        .get("packages")
        .map(validate_packages)
        .unwrap_or_default();

    debug!(
        path = %path.display(),
        version = %lockfile_version,
        importers = importers.len(),
        packages = packages.len(),
        "parsed lockfile"
    );

    Ok(LockfileData {
        lockfile_version,
        importers,
        packages,
        settings: document.get("settings").cloned(),
    })
}

fn check_version(document: &Value, path: &Path) -> Result<String, LockfileError> {
    let raw = document
        .get("lockfileVersion")
        .ok_or_else(|| structure_error(path, "missing required field 'lockfileVersion'"))?;

    // Lockfiles written before v6 store the version as an unquoted number; those are only
    // read far enough to report them as unsupported.
    let found = match raw {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        _ => return Err(structure_error(path, "field 'lockfileVersion' must be a string")),
    };

    let version = LockfileVersion::parse_prefix(&found).ok_or_else(|| {
        structure_error(path, &format!("unreadable lockfileVersion '{found}'"))
    })?;

    if version < MINIMUM_LOCKFILE_VERSION {
        return Err(LockfileError::UnsupportedVersion {
            path: path.to_path_buf(),
            found,
            minimum: MINIMUM_LOCKFILE_VERSION.to_string(),
        });
    }

    if !raw.is_string() {
        return Err(structure_error(path, "field 'lockfileVersion' must be a string"));
    }

    Ok(found)
}

/// A top-level section may be absent or null but must otherwise be a mapping.
fn check_section(document: &Value, key: &str, path: &Path) -> Result<(), LockfileError> {
    match document.get(key) {
        Some(section) if !section.is_mapping() && !section.is_null() => Err(structure_error(
            path,
            &format!("field '{key}' must be a mapping"),
        )),
        _ => Ok(()),
    }
}

/// A lockfile of a repository without workspace keeps its buckets at the top level.
fn single_project_importers(document: &Value) -> IndexMap<String, ImporterData> {
    let importer = validate_importer(document);
    let mut importers = IndexMap::new();
    if !importer.is_empty() {
        importers.insert(ROOT_PROJECT_PATH.to_string(), importer);
    }
    importers
}

fn structure_error(path: &Path, message: &str) -> LockfileError {
    LockfileError::Structure {
        path: path.to_path_buf(),
        message: message.to_string(),
    }
}
