mod error;
mod extract;
mod model;
mod parse;
mod validate;
mod version;

pub use error::LockfileError;
pub use extract::{ProjectDependencies, extract_dependencies, is_workspace_specifier};
pub use model::{DependencyRef, ImporterData, LockfileData, PackageData, PackageResolution};
pub use parse::{parse_lockfile, read_lockfile};
pub use version::{LockfileVersion, MINIMUM_LOCKFILE_VERSION};

pub type Result<T> = std::result::Result<T, LockfileError>;
