mod discovery;
mod error;
mod manifest;
mod settings;
mod workspace_config;

pub use discovery::{discover_monorepo, enumerate_projects};
pub use error::WorkspaceError;
pub use manifest::{ProjectManifest, read_project_manifest};
pub use settings::{ScanSettings, load_scan_settings};
pub use workspace_config::{parse_workspace_config, read_workspace_config};

pub type Result<T> = std::result::Result<T, WorkspaceError>;
