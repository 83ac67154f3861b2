pub mod error;
pub mod types;

pub use error::*;
pub use types::*;

/// Name of the pnpm workspace definition file at the monorepo root.
pub const WORKSPACE_FILE_NAME: &str = "pnpm-workspace.yaml";

/// Name of the pnpm lockfile at the monorepo root.
pub const LOCKFILE_NAME: &str = "pnpm-lock.yaml";

/// Name of the per-project manifest.
pub const MANIFEST_FILE_NAME: &str = "package.json";

/// Specifier prefix marking a dependency on another project of the same workspace.
pub const WORKSPACE_PROTOCOL: &str = "workspace:";

/// Lockfile version prefix of a dependency resolved to a directory relative to its project.
pub const LINK_PROTOCOL: &str = "link:";

/// Path under which the workspace root is recorded in project lists and lockfile importers.
pub const ROOT_PROJECT_PATH: &str = ".";
