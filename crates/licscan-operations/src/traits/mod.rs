mod license_resolver;
mod lockfile_provider;
mod workspace_provider;

pub use license_resolver::LicenseResolver;
pub use lockfile_provider::LockfileProvider;
pub use workspace_provider::WorkspaceProvider;
