use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use licscan_core::{Dependency, LINK_PROTOCOL, LicenseInfo, MANIFEST_FILE_NAME};
use licscan_license::{
    LICENSE_FILE_NAMES, extract_from_license_file, extract_from_manifest, is_license_file_name,
};
use licscan_workspace::read_project_manifest;
use tracing::{debug, warn};

use crate::Result;
use crate::error::OperationError;
use crate::traits::LicenseResolver;

const NODE_MODULES: &str = "node_modules";
const VIRTUAL_STORE: &str = ".pnpm";

/// Reads licenses from packages installed by pnpm under `node_modules`.
pub struct FileSystemLicenseResolver;

impl FileSystemLicenseResolver {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Default for FileSystemLicenseResolver {
    fn default() -> Self {
        Self::new()
    }
}

impl LicenseResolver for FileSystemLicenseResolver {
    fn resolve(
        &self,
        root: &Path,
        project_dir: &Path,
        dependency: &Dependency,
    ) -> Result<LicenseInfo> {
        let Some(package_dir) =
            locate_package(root, project_dir, &dependency.name, &dependency.version)
        else {
            debug!(
                package = %dependency.name,
                version = %dependency.version,
                "package not installed, license unknown"
            );
            return Ok(LicenseInfo::unknown());
        };

        read_package_license(&package_dir)
    }
}

/// Finds the installed directory of `name` at `version`, as seen from `project_dir`.
fn locate_package(root: &Path, project_dir: &Path, name: &str, version: &str) -> Option<PathBuf> {
    if let Some(target) = version.strip_prefix(LINK_PROTOCOL) {
        let dir = project_dir.join(target);
        return dir.is_dir().then_some(dir);
    }

    let (package_name, package_version) = split_alias(version).unwrap_or((name, version));

    let bare_version = strip_peer_suffix(package_version);
    for node_modules in [project_dir.join(NODE_MODULES), root.join(NODE_MODULES)] {
        let dir = node_modules.join(name);
        if installed_version(&dir).as_deref() == Some(bare_version) {
            return Some(dir);
        }
    }

    let store_dir = root
        .join(NODE_MODULES)
        .join(VIRTUAL_STORE)
        .join(virtual_store_dir_name(package_name, package_version))
        .join(NODE_MODULES)
        .join(package_name);
    store_dir.is_dir().then_some(store_dir)
}

/// Splits an npm alias target into the real package name and version.
///
/// Aliased dependencies record `string-width@4.2.3` (or `/string-width@4.2.3` in v6
/// lockfiles) as their version; plain versions yield `None`.
fn split_alias(version: &str) -> Option<(&str, &str)> {
    let target = version.strip_prefix('/').unwrap_or(version);
    // skip the first char so a scope's leading `@` is not taken as the separator
    let at = strip_peer_suffix(target).get(1..)?.find('@')? + 1;
    Some((&target[..at], &target[at + 1..]))
}

/// `18.2.0(react@18.2.0)` is installed as plain `18.2.0`.
fn strip_peer_suffix(version: &str) -> &str {
    version.split_once('(').map_or(version, |(bare, _)| bare)
}

/// Directory name pnpm gives a package inside `node_modules/.pnpm`.
fn virtual_store_dir_name(name: &str, version: &str) -> String {
    format!("{name}@{version}")
        .replace('/', "+")
        .replace(")(", "_")
        .replace('(', "_")
        .replace(')', "")
}

fn installed_version(dir: &Path) -> Option<String> {
    if !dir.join(MANIFEST_FILE_NAME).is_file() {
        return None;
    }
    read_project_manifest(dir).ok()?.version
}

/// The manifest declaration wins; the license file is only consulted when the manifest
/// yields `UNKNOWN`.
fn read_package_license(package_dir: &Path) -> Result<LicenseInfo> {
    let manifest_path = package_dir.join(MANIFEST_FILE_NAME);
    let declared = match fs::read_to_string(&manifest_path) {
        Ok(content) => extract_from_manifest(&content, &manifest_path)?,
        Err(err) if err.kind() == ErrorKind::NotFound => LicenseInfo::unknown(),
        Err(source) => {
            return Err(OperationError::PackageRead {
                path: manifest_path,
                source,
            });
        }
    };

    if !declared.is_unknown() {
        return Ok(declared);
    }

    let Some(license_file) = find_license_file(package_dir) else {
        return Ok(declared);
    };

    match fs::read_to_string(&license_file) {
        Ok(text) => {
            let detected = extract_from_license_file(&text);
            Ok(if detected.is_unknown() {
                declared
            } else {
                detected
            })
        }
        Err(err) => {
            warn!(
                path = %license_file.display(),
                error = %err,
                "could not read license file"
            );
            Ok(declared)
        }
    }
}

fn find_license_file(package_dir: &Path) -> Option<PathBuf> {
    let entries = fs::read_dir(package_dir).ok()?;
    let candidates: Vec<(String, PathBuf)> = entries
        .filter_map(std::result::Result::ok)
        .filter(|entry| entry.file_type().is_ok_and(|t| t.is_file()))
        .filter_map(|entry| {
            let file_name = entry.file_name().to_str()?.to_string();
            is_license_file_name(&file_name).then(|| (file_name, entry.path()))
        })
        .collect();

    LICENSE_FILE_NAMES.iter().find_map(|wanted| {
        candidates
            .iter()
            .find(|(file_name, _)| file_name.eq_ignore_ascii_case(wanted))
            .map(|(_, path)| path.clone())
    })
}
