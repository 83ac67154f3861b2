use std::path::PathBuf;

use licscan_core::ErrorCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum OperationError {
    #[error(transparent)]
    Workspace(#[from] licscan_workspace::WorkspaceError),

    #[error(transparent)]
    Lockfile(#[from] licscan_lockfile::LockfileError),

    #[error(transparent)]
    License(#[from] licscan_license::LicenseError),

    #[error("failed to read installed package at '{path}'")]
    PackageRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to start scan workers")]
    WorkerPool(#[from] rayon::ThreadPoolBuildError),
}

impl OperationError {
    #[must_use]
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::Workspace(err) => err.code(),
            Self::Lockfile(err) => err.code(),
            Self::License(err) => err.code(),
            Self::PackageRead { .. } | Self::WorkerPool(_) => ErrorCode::IoError,
        }
    }
}

pub type Result<T> = std::result::Result<T, OperationError>;
