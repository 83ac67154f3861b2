//! Field-by-field validation of raw lockfile sections into the typed model.
//!
//! Malformed entries are dropped with a warning and the rest of the section is kept.

use indexmap::IndexMap;
use serde_yml::Value;
use tracing::warn;

use crate::model::{DependencyRef, ImporterData, PackageData, PackageResolution};

const DEPENDENCIES: &str = "dependencies";
const DEV_DEPENDENCIES: &str = "devDependencies";
const OPTIONAL_DEPENDENCIES: &str = "optionalDependencies";

pub(crate) fn validate_importers(section: &Value) -> IndexMap<String, ImporterData> {
    entries(section, "importers")
        .map(|(path, importer)| (path.to_string(), validate_importer(importer)))
        .collect()
}

/// Keeps every importer even when none of its buckets survive.
pub(crate) fn validate_importer(importer: &Value) -> ImporterData {
    ImporterData {
        dependencies: validate_dependency_bucket(importer.get(DEPENDENCIES)),
        dev_dependencies: validate_dependency_bucket(importer.get(DEV_DEPENDENCIES)),
        optional_dependencies: validate_dependency_bucket(importer.get(OPTIONAL_DEPENDENCIES)),
    }
}

pub(crate) fn validate_dependency_bucket(
    bucket: Option<&Value>,
) -> Option<IndexMap<String, DependencyRef>> {
    let bucket = bucket?;
    if !bucket.is_mapping() {
        return None;
    }

    let refs = entries(bucket, "dependency bucket").fold(
        IndexMap::new(),
        |mut refs, (name, raw)| {
            if let Some(dep) = validate_dependency_ref(raw) {
                refs.insert(name.to_string(), dep);
            } else {
                warn!(
                    dependency = name,
                    "dropping lockfile dependency without string specifier and version"
                );
            }
            refs
        },
    );

    Some(refs)
}

pub(crate) fn validate_dependency_ref(raw: &Value) -> Option<DependencyRef> {
    let specifier = raw.get("specifier")?.as_str()?;
    let version = raw.get("version")?.as_str()?;

    Some(DependencyRef {
        specifier: specifier.to_string(),
        version: version.to_string(),
    })
}

pub(crate) fn validate_packages(section: &Value) -> IndexMap<String, PackageData> {
    entries(section, "packages")
        .map(|(coordinate, package)| (coordinate.to_string(), validate_package(package)))
        .collect()
}

pub(crate) fn validate_package(package: &Value) -> PackageData {
    let integrity = package
        .get("resolution")
        .and_then(|resolution| resolution.get("integrity"))
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string();

    let dependencies = package
        .get(DEPENDENCIES)
        .and_then(Value::as_mapping)
        .map(|deps| {
            deps.iter()
                .filter_map(|(name, version)| {
                    Some((name.as_str()?.to_string(), version.as_str()?.to_string()))
                })
                .collect::<IndexMap<_, _>>()
        })
        .filter(|deps| !deps.is_empty());

    PackageData {
        resolution: PackageResolution { integrity },
        dependencies,
        dev: package.get("dev").and_then(Value::as_bool),
        optional: package.get("optional").and_then(Value::as_bool),
    }
}

/// String-keyed entries of a mapping. Non-string keys are skipped; a non-mapping yields
/// nothing.
fn entries<'a>(
    section: &'a Value,
    label: &'static str,
) -> impl Iterator<Item = (&'a str, &'a Value)> {
    let mapping = section.as_mapping();
    if mapping.is_none() && !section.is_null() {
        warn!(section = label, "ignoring lockfile section that is not a mapping");
    }

    mapping.into_iter().flat_map(move |m| {
        m.iter().filter_map(move |(key, value)| match key.as_str() {
            Some(key) => Some((key, value)),
            None => {
                warn!(section = label, "ignoring lockfile entry with non-string key");
                None
            }
        })
    })
}
