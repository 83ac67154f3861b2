use std::collections::{BTreeMap, HashSet};
use std::path::PathBuf;

use chrono::{DateTime, SecondsFormat, Utc};
use licscan_core::{Project, ScanMetadata, ScanResult, ScanSummary, UNKNOWN_LICENSE};

/// Scan-level facts recorded next to the projects in a [`ScanResult`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanContext {
    pub monorepo_root: PathBuf,
    pub lockfile_version: String,
    pub pnpm_version: Option<String>,
}

/// Builds the scan result, stamped with the current time.
#[must_use]
pub fn aggregate(projects: Vec<Project>, context: ScanContext) -> ScanResult {
    aggregate_at(projects, context, Utc::now())
}

/// Builds the scan result for `projects`, kept in the given order.
///
/// Licenses are counted once per distinct `(name, version)`, however many projects
/// depend on it; the first occurrence decides which license is counted.
#[must_use]
pub fn aggregate_at(
    projects: Vec<Project>,
    context: ScanContext,
    timestamp: DateTime<Utc>,
) -> ScanResult {
    let summary = summarize(&projects);

    ScanResult {
        projects,
        metadata: ScanMetadata {
            monorepo_root: context.monorepo_root,
            lockfile_version: context.lockfile_version,
            scan_timestamp: timestamp.to_rfc3339_opts(SecondsFormat::Millis, true),
            pnpm_version: context.pnpm_version,
        },
        summary,
    }
}

fn summarize(projects: &[Project]) -> ScanSummary {
    let mut seen = HashSet::new();
    let mut license_counts: BTreeMap<String, usize> = BTreeMap::new();
    let mut total_dependencies = 0;

    for dependency in projects.iter().flat_map(Project::all_dependencies) {
        total_dependencies += 1;
        if seen.insert(dependency.key()) {
            *license_counts
                .entry(dependency.license.spdx_id.clone())
                .or_default() += 1;
        }
    }

    let unknown_license_count = license_counts.get(UNKNOWN_LICENSE).copied().unwrap_or(0);

    ScanSummary {
        total_projects: projects.len(),
        total_dependencies,
        unique_dependencies: seen.len(),
        license_counts,
        unknown_license_count,
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use licscan_core::{Dependency, LicenseInfo, LicenseSource};

    use super::*;

    fn dep(name: &str, version: &str, license: &str) -> Dependency {
        let license = if license == UNKNOWN_LICENSE {
            LicenseInfo::unknown()
        } else {
            LicenseInfo {
                spdx_id: license.to_string(),
                source: LicenseSource::ManifestField,
                raw_value: None,
            }
        };
        Dependency {
            name: name.to_string(),
            version: version.to_string(),
            license,
            is_workspace_dependency: false,
            is_dev: false,
            specifier: format!("^{version}"),
        }
    }

    fn project(path: &str, dependencies: Vec<Dependency>) -> Project {
        Project {
            name: path.rsplit('/').next().unwrap_or(path).to_string(),
            path: path.to_string(),
            version: "1.0.0".to_string(),
            dependencies,
            dev_dependencies: Vec::new(),
            is_workspace_root: path == ".",
        }
    }

    fn context() -> ScanContext {
        ScanContext {
            monorepo_root: PathBuf::from("/repo"),
            lockfile_version: "9.0".to_string(),
            pnpm_version: Some("9.1.0".to_string()),
        }
    }

    fn fixed_time() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 1, 12, 30, 45)
            .single()
            .expect("valid timestamp")
    }

    #[test]
    fn shared_package_counts_once() {
        let projects = vec![
            project("packages/a", vec![dep("lodash", "4.17.21", "MIT")]),
            project("packages/b", vec![dep("lodash", "4.17.21", "MIT")]),
        ];

        let result = aggregate_at(projects, context(), fixed_time());

        assert_eq!(result.summary.total_projects, 2);
        assert_eq!(result.summary.total_dependencies, 2);
        assert_eq!(result.summary.unique_dependencies, 1);
        assert_eq!(result.summary.license_counts["MIT"], 1);
    }

    #[test]
    fn distinct_versions_are_distinct_packages() {
        let projects = vec![
            project("packages/a", vec![dep("lodash", "4.17.21", "MIT")]),
            project("packages/b", vec![dep("lodash", "4.17.20", "MIT")]),
        ];

        let result = aggregate_at(projects, context(), fixed_time());

        assert_eq!(result.summary.unique_dependencies, 2);
        assert_eq!(result.summary.license_counts["MIT"], 2);
    }

    #[test]
    fn aggregation_is_idempotent() {
        let projects = vec![
            project(
                ".",
                vec![dep("react", "18.2.0", "MIT"), dep("left-pad", "1.3.0", "WTFPL")],
            ),
            project("packages/a", vec![dep("react", "18.2.0", "MIT")]),
        ];

        let first = aggregate_at(projects.clone(), context(), fixed_time());
        let second = aggregate_at(projects, context(), fixed_time());

        assert_eq!(first.summary, second.summary);
    }

    #[test]
    fn dev_dependencies_are_counted() {
        let mut app = project("apps/web", vec![dep("react", "18.2.0", "MIT")]);
        app.dev_dependencies = vec![dep("typescript", "5.3.3", "Apache-2.0")];

        let result = aggregate_at(vec![app], context(), fixed_time());

        assert_eq!(result.summary.total_dependencies, 2);
        assert_eq!(result.summary.license_counts["Apache-2.0"], 1);
    }

    #[test]
    fn unknown_count_reads_unknown_key() {
        let projects = vec![project(
            ".",
            vec![
                dep("mystery", "1.0.0", UNKNOWN_LICENSE),
                dep("enigma", "2.0.0", UNKNOWN_LICENSE),
                dep("lodash", "4.17.21", "MIT"),
            ],
        )];

        let result = aggregate_at(projects, context(), fixed_time());

        assert_eq!(result.summary.unknown_license_count, 2);
        assert_eq!(result.summary.license_counts[UNKNOWN_LICENSE], 2);
    }

    #[test]
    fn no_unknown_licenses_counts_zero() {
        let result = aggregate_at(
            vec![project(".", vec![dep("lodash", "4.17.21", "MIT")])],
            context(),
            fixed_time(),
        );

        assert_eq!(result.summary.unknown_license_count, 0);
        assert!(!result.summary.license_counts.contains_key(UNKNOWN_LICENSE));
    }

    #[test]
    fn first_occurrence_decides_conflicting_license() {
        let projects = vec![
            project("packages/a", vec![dep("forked", "1.0.0", "MIT")]),
            project("packages/b", vec![dep("forked", "1.0.0", "ISC")]),
        ];

        let result = aggregate_at(projects, context(), fixed_time());

        assert_eq!(result.summary.license_counts.get("MIT"), Some(&1));
        assert_eq!(result.summary.license_counts.get("ISC"), None);
    }

    #[test]
    fn empty_scan_has_empty_summary() {
        let result = aggregate_at(Vec::new(), context(), fixed_time());

        assert_eq!(result.summary, ScanSummary::default());
        assert!(result.projects.is_empty());
    }

    #[test]
    fn keeps_project_order_and_metadata() {
        let projects = vec![project("packages/z", vec![]), project("apps/a", vec![])];

        let result = aggregate_at(projects, context(), fixed_time());

        let paths: Vec<_> = result.projects.iter().map(|p| p.path.as_str()).collect();
        assert_eq!(paths, vec!["packages/z", "apps/a"]);
        assert_eq!(result.metadata.monorepo_root, PathBuf::from("/repo"));
        assert_eq!(result.metadata.lockfile_version, "9.0");
        assert_eq!(result.metadata.pnpm_version.as_deref(), Some("9.1.0"));
        assert_eq!(result.metadata.scan_timestamp, "2024-03-01T12:30:45.000Z");
    }

    #[test]
    fn aggregate_stamps_current_time() {
        let before = Utc::now();

        let result = aggregate(Vec::new(), context());

        let stamped = DateTime::parse_from_rfc3339(&result.metadata.scan_timestamp)
            .expect("timestamp is RFC 3339");
        assert!(stamped.timestamp() >= before.timestamp() - 1);
        assert!(result.metadata.scan_timestamp.ends_with('Z'));
    }
}
