use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

use licscan_core::LicenseInfo;

/// Licenses already resolved during one scan, keyed by package name and version.
///
/// Shared by reference between the workers of a scan.
#[derive(Debug, Default)]
pub struct LicenseCache {
    entries: RwLock<HashMap<(String, String), LicenseInfo>>,
}

impl LicenseCache {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn get(&self, name: &str, version: &str) -> Option<LicenseInfo> {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&(name.to_string(), version.to_string()))
            .cloned()
    }

    pub fn insert(&self, name: &str, version: &str, license: LicenseInfo) {
        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert((name.to_string(), version.to_string()), license);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
