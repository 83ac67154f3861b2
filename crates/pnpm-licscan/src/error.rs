use licscan_core::ErrorCode;
use licscan_operations::OperationError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("license scan failed")]
    Operation(#[from] OperationError),

    #[error("failed to determine current directory")]
    CurrentDir(#[source] std::io::Error),

    #[error("failed to serialize scan result")]
    Serialize(#[from] serde_json::Error),

    #[error("failed to write scan report")]
    Output(#[source] std::io::Error),
}

impl CliError {
    /// The scan failure category, for errors raised by the scan itself.
    #[must_use]
    pub fn code(&self) -> Option<ErrorCode> {
        match self {
            Self::Operation(err) => Some(err.code()),
            Self::CurrentDir(_) | Self::Serialize(_) | Self::Output(_) => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, CliError>;
