mod license;
mod lockfile;
mod workspace;

pub use license::FileSystemLicenseResolver;
pub use lockfile::FileSystemLockfileProvider;
pub use workspace::FileSystemWorkspaceProvider;
