use std::path::PathBuf;

use licscan_core::ErrorCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LicenseError {
    #[error("failed to parse package manifest at '{path}'")]
    ManifestParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl LicenseError {
    #[must_use]
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::ManifestParse { .. } => ErrorCode::PackageJsonParseError,
        }
    }
}
