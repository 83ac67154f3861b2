use std::path::PathBuf;

use licscan_core::ErrorCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LockfileError {
    #[error("lockfile not found at '{path}'")]
    NotFound { path: PathBuf },

    #[error("failed to read lockfile at '{path}'")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse lockfile at '{path}'")]
    Syntax {
        path: PathBuf,
        #[source]
        source: serde_yml::Error,
    },

    #[error("invalid lockfile at '{path}': {message}")]
    Structure { path: PathBuf, message: String },

    #[error(
        "unsupported lockfile version '{found}' at '{path}' (minimum supported version is {minimum})"
    )]
    UnsupportedVersion {
        path: PathBuf,
        found: String,
        minimum: String,
    },

    #[error("project '{project_path}' has no importer entry in the lockfile")]
    ProjectNotFound { project_path: String },
}

impl LockfileError {
    #[must_use]
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::NotFound { .. } => ErrorCode::LockfileNotFound,
            Self::Read { .. } => ErrorCode::IoError,
            Self::Syntax { .. } | Self::Structure { .. } => ErrorCode::LockfileParseError,
            Self::UnsupportedVersion { .. } => ErrorCode::InvalidLockfileVersion,
            Self::ProjectNotFound { .. } => ErrorCode::ProjectNotFound,
        }
    }
}
