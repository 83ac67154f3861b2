use std::path::Path;

use licscan_core::{Dependency, LINK_PROTOCOL};
use licscan_license::LicenseCache;
use tracing::debug;

use crate::Result;
use crate::traits::LicenseResolver;

/// Fills in the license of every dependency, consulting `cache` before `resolver`.
///
/// # Errors
///
/// Returns the first error reported by the resolver.
pub fn enrich_licenses<R>(
    dependencies: &mut [Dependency],
    resolver: &R,
    cache: &LicenseCache,
    root: &Path,
    project_dir: &Path,
) -> Result<()>
where
    R: LicenseResolver + ?Sized,
{
    for dependency in dependencies.iter_mut() {
        // `link:` targets are relative to the project, so equal versions may differ on disk
        let cacheable = !dependency.version.starts_with(LINK_PROTOCOL);
        let cached = if cacheable {
            cache.get(&dependency.name, &dependency.version)
        } else {
            None
        };
        if let Some(license) = cached {
            dependency.license = license;
            continue;
        }

        let license = resolver.resolve(root, project_dir, dependency)?;
        debug!(
            package = %dependency.name,
            version = %dependency.version,
            license = %license.spdx_id,
            source = %license.source,
            "resolved license"
        );
        if cacheable {
            cache.insert(&dependency.name, &dependency.version, license.clone());
        }
        dependency.license = license;
    }

    Ok(())
}
