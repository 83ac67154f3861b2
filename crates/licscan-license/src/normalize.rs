use licscan_core::{UNKNOWN_LICENSE, UNLICENSED};

use crate::correct::correct_spdx;

/// Turns a declared license string into an SPDX expression or a sentinel.
///
/// `UNLICENSED` in any case is kept as the proprietary sentinel. Blank input and
/// anything the corrector cannot resolve become `UNKNOWN`.
#[must_use]
pub fn normalize_license(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return UNKNOWN_LICENSE.to_string();
    }
    if trimmed.eq_ignore_ascii_case(UNLICENSED) {
        return UNLICENSED.to_string();
    }

    correct_spdx(trimmed).unwrap_or_else(|| UNKNOWN_LICENSE.to_string())
}
