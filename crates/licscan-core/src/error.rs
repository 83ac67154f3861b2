use std::fmt;

use serde::Serialize;

/// Stable identifiers for every failure a scan can surface.
///
/// Each crate's error type maps its variants onto one of these so callers can choose
/// remediation without matching on crate-specific enums.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    WorkspaceConfigNotFound,
    WorkspaceConfigParseError,
    LockfileNotFound,
    LockfileParseError,
    InvalidLockfileVersion,
    ProjectNotFound,
    PackageJsonParseError,
    IoError,
}

impl ErrorCode {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::WorkspaceConfigNotFound => "WORKSPACE_CONFIG_NOT_FOUND",
            Self::WorkspaceConfigParseError => "WORKSPACE_CONFIG_PARSE_ERROR",
            Self::LockfileNotFound => "LOCKFILE_NOT_FOUND",
            Self::LockfileParseError => "LOCKFILE_PARSE_ERROR",
            Self::InvalidLockfileVersion => "INVALID_LOCKFILE_VERSION",
            Self::ProjectNotFound => "PROJECT_NOT_FOUND",
            Self::PackageJsonParseError => "PACKAGE_JSON_PARSE_ERROR",
            Self::IoError => "IO_ERROR",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
