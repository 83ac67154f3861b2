use std::path::Path;

use licscan_lockfile::LockfileData;

use crate::Result;

pub trait LockfileProvider: Send + Sync {
    /// # Errors
    ///
    /// Returns an error if the lockfile is missing, malformed, or older than the
    /// minimum supported version.
    fn load_lockfile(&self, root: &Path) -> Result<LockfileData>;
}
