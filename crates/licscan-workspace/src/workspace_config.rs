use std::path::Path;

use licscan_core::{WORKSPACE_FILE_NAME, WorkspaceConfig};
use serde_yml::Value;
use tracing::debug;

use crate::error::WorkspaceError;

/// Reads `pnpm-workspace.yaml` from the monorepo root.
///
/// # Errors
///
/// Returns `WorkspaceError::ConfigNotFound` if the file does not exist, or any error
/// produced by [`parse_workspace_config`].
pub fn read_workspace_config(root: &Path) -> Result<WorkspaceConfig, WorkspaceError> {
    let path = root.join(WORKSPACE_FILE_NAME);
    let content = std::fs::read_to_string(&path).map_err(|source| {
        if source.kind() == std::io::ErrorKind::NotFound {
            WorkspaceError::ConfigNotFound { path: path.clone() }
        } else {
            WorkspaceError::ConfigRead {
                path: path.clone(),
                source,
            }
        }
    })?;

    parse_workspace_config(&content, &path)
}

/// Parses the content of a workspace config. `path` is only used in error messages.
///
/// An empty document yields an empty pattern list. Non-string entries in `packages` are
/// dropped.
///
/// # Errors
///
/// Returns `WorkspaceError::ConfigSyntax` for malformed YAML and
/// `WorkspaceError::ConfigStructure` if the root is not a mapping or `packages` is missing
/// or not a sequence.
pub fn parse_workspace_config(
    content: &str,
    path: &Path,
) -> Result<WorkspaceConfig, WorkspaceError> {
    if content.trim().is_empty() {
        return Ok(WorkspaceConfig::default());
    }

    let document: Value =
        serde_yml::from_str(content).map_err(|source| WorkspaceError::ConfigSyntax {
            path: path.to_path_buf(),
            source,
        })?;

    if document.is_null() {
        return Ok(WorkspaceConfig::default());
    }

    if !document.is_mapping() {
        return Err(structure_error(
            path,
            format!(
                "expected a mapping at the document root, found {}",
                describe(&document)
            ),
        ));
    }

    let packages = document
        .get("packages")
        .ok_or_else(|| structure_error(path, "missing required field 'packages'".to_string()))?;

    let Some(entries) = packages.as_sequence() else {
        return Err(structure_error(
            path,
            format!("field 'packages' must be a sequence, found {}", describe(packages)),
        ));
    };

    let packages: Vec<String> = entries
        .iter()
        .filter_map(|entry| entry.as_str().map(str::to_string))
        .collect();

    if packages.len() < entries.len() {
        debug!(
            path = %path.display(),
            dropped = entries.len() - packages.len(),
            "ignoring non-string workspace patterns"
        );
    }

    Ok(WorkspaceConfig { packages })
}

fn structure_error(path: &Path, message: String) -> WorkspaceError {
    WorkspaceError::ConfigStructure {
        path: path.to_path_buf(),
        message,
    }
}

fn describe(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Sequence(_) => "a sequence",
        Value::Mapping(_) => "a mapping",
        Value::Tagged(_) => "a tagged value",
    }
}
