use std::path::Path;

use licscan_core::{LicenseInfo, LicenseSource};
use serde_json::Value;

use crate::error::LicenseError;
use crate::normalize::normalize_license;

/// Reads the declared license of an installed package from its `package.json` content.
///
/// The scalar `license` field wins (the legacy `{ "type": ... }` object form counts as the
/// same field), then the first `type` of the deprecated `licenses` array. A manifest
/// declaring neither yields `UNKNOWN`. `path` is only used in error messages.
///
/// # Errors
///
/// Returns `LicenseError::ManifestParse` if the content is not valid JSON.
pub fn extract_from_manifest(content: &str, path: &Path) -> Result<LicenseInfo, LicenseError> {
    let manifest: Value =
        serde_json::from_str(content).map_err(|source| LicenseError::ManifestParse {
            path: path.to_path_buf(),
            source,
        })?;

    if let Some(declared) = manifest.get("license").and_then(declared_type) {
        return Ok(declared_license(declared, LicenseSource::ManifestField));
    }

    let first_entry = manifest
        .get("licenses")
        .and_then(Value::as_array)
        .and_then(|entries| entries.first());
    if let Some(declared) = first_entry.and_then(declared_type) {
        return Ok(declared_license(declared, LicenseSource::ManifestArray));
    }

    Ok(LicenseInfo::unknown())
}

/// A non-blank string, or the `type` of a `{ "type": ..., "url": ... }` object.
fn declared_type(value: &Value) -> Option<&str> {
    let declared = match value {
        Value::String(s) => s.as_str(),
        Value::Object(object) => object.get("type")?.as_str()?,
        _ => return None,
    };

    let declared = declared.trim();
    (!declared.is_empty()).then_some(declared)
}

fn declared_license(declared: &str, source: LicenseSource) -> LicenseInfo {
    LicenseInfo::from_declared(normalize_license(declared), source, declared)
}
