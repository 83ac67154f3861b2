use std::path::PathBuf;

use licscan_core::ErrorCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum WorkspaceError {
    #[error("workspace config not found at '{path}'")]
    ConfigNotFound { path: PathBuf },

    #[error("failed to read workspace config at '{path}'")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse workspace config at '{path}'")]
    ConfigSyntax {
        path: PathBuf,
        #[source]
        source: serde_yml::Error,
    },

    #[error("invalid workspace config at '{path}': {message}")]
    ConfigStructure { path: PathBuf, message: String },

    #[error("invalid glob pattern '{pattern}'")]
    GlobPattern {
        pattern: String,
        #[source]
        source: globset::Error,
    },

    #[error("failed to read directory '{path}'")]
    DirectoryRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to read manifest at '{path}'")]
    ManifestRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse manifest at '{path}'")]
    ManifestParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl WorkspaceError {
    #[must_use]
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::ConfigNotFound { .. } => ErrorCode::WorkspaceConfigNotFound,
            Self::ConfigSyntax { .. } | Self::ConfigStructure { .. } | Self::GlobPattern { .. } => {
                ErrorCode::WorkspaceConfigParseError
            }
            Self::ManifestParse { .. } => ErrorCode::PackageJsonParseError,
            Self::ConfigRead { .. } | Self::DirectoryRead { .. } | Self::ManifestRead { .. } => {
                ErrorCode::IoError
            }
        }
    }
}
