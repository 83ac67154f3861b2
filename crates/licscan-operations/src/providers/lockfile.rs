use std::path::Path;

use licscan_lockfile::{LockfileData, read_lockfile};

use crate::Result;
use crate::traits::LockfileProvider;

pub struct FileSystemLockfileProvider;

impl FileSystemLockfileProvider {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Default for FileSystemLockfileProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl LockfileProvider for FileSystemLockfileProvider {
    fn load_lockfile(&self, root: &Path) -> Result<LockfileData> {
        Ok(read_lockfile(root)?)
    }
}
