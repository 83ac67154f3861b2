//! License detection for installed npm packages.
//!
//! Declared licenses are read from `package.json` and corrected into SPDX expressions;
//! packages without a declaration fall back to matching their bundled license file.
//! Locating the package on disk is left to the caller.

mod cache;
mod correct;
mod error;
mod license_file;
mod manifest;
mod normalize;

pub use cache::LicenseCache;
pub use correct::correct_spdx;
pub use error::LicenseError;
pub use license_file::{LICENSE_FILE_NAMES, extract_from_license_file, is_license_file_name};
pub use manifest::extract_from_manifest;
pub use normalize::normalize_license;

pub type Result<T> = std::result::Result<T, LicenseError>;
