use licscan_core::{Project, ScanResult};

use super::ScanFormatter;
use crate::error::Result;

pub(crate) struct PlainTextFormatter;

impl PlainTextFormatter {
    fn format_header(output: &mut String, result: &ScanResult) {
        let metadata = &result.metadata;
        output.push_str(&format!(
            "Scanned {} in {}\n",
            plural(result.summary.total_projects, "project", "projects"),
            metadata.monorepo_root.display()
        ));

        let pnpm = metadata
            .pnpm_version
            .as_deref()
            .map(|version| format!(", pnpm {version}"))
            .unwrap_or_default();
        output.push_str(&format!(
            "Lockfile {}{pnpm}, scanned at {}\n",
            metadata.lockfile_version, metadata.scan_timestamp
        ));
    }

    fn format_projects(output: &mut String, projects: &[Project]) {
        if projects.is_empty() {
            return;
        }

        output.push('\n');
        output.push_str("Projects:\n");
        for project in projects {
            output.push_str(&format!(
                "  {} ({}@{}): {}, {}\n",
                project.path,
                project.name,
                project.version,
                plural(project.dependencies.len(), "dependency", "dependencies"),
                plural(
                    project.dev_dependencies.len(),
                    "dev dependency",
                    "dev dependencies"
                )
            ));
        }
    }

    fn format_licenses(output: &mut String, result: &ScanResult) {
        let summary = &result.summary;
        if summary.license_counts.is_empty() {
            return;
        }

        output.push('\n');
        output.push_str(&format!(
            "Licenses ({} unique of {} dependencies):\n",
            summary.unique_dependencies, summary.total_dependencies
        ));

        let width = summary
            .license_counts
            .keys()
            .map(String::len)
            .max()
            .unwrap_or_default();
        for (license, count) in &summary.license_counts {
            output.push_str(&format!("  {license:<width$}  {count}\n"));
        }
    }

    fn format_unknown(output: &mut String, projects: &[Project]) {
        let mut unknown: Vec<String> = projects
            .iter()
            .flat_map(|project| {
                project
                    .all_dependencies()
                    .filter(|dep| dep.license.is_unknown())
                    .map(move |dep| format!("{}@{} ({})", dep.name, dep.version, project.path))
            })
            .collect();
        if unknown.is_empty() {
            return;
        }
        unknown.sort();
        unknown.dedup();

        output.push('\n');
        output.push_str("Unknown licenses:\n");
        for entry in unknown {
            output.push_str(&format!("  {entry}\n"));
        }
    }
}

impl ScanFormatter for PlainTextFormatter {
    fn format_scan(&self, result: &ScanResult) -> Result<String> {
        let mut output = String::new();

        Self::format_header(&mut output, result);
        Self::format_projects(&mut output, &result.projects);
        Self::format_licenses(&mut output, result);
        Self::format_unknown(&mut output, &result.projects);

        Ok(output)
    }
}

fn plural(count: usize, singular: &str, plural: &str) -> String {
    if count == 1 {
        format!("{count} {singular}")
    } else {
        format!("{count} {plural}")
    }
}
