//! License detection from the text of a bundled license file.
//!
//! Probes run in a fixed order and the first match wins. ISC is probed before MIT
//! because ISC text shares MIT's warranty disclaimer, and BSD-3-Clause before
//! BSD-2-Clause because the former is the latter plus a non-endorsement clause.

use std::sync::LazyLock;

use licscan_core::{LicenseInfo, LicenseSource};
use regex::{Regex, RegexBuilder};

/// File names searched in a package directory, compared without regard to case.
pub const LICENSE_FILE_NAMES: &[&str] = &[
    "LICENSE",
    "LICENSE.md",
    "LICENSE.txt",
    "LICENCE",
    "LICENCE.md",
    "COPYING",
];

const PROBES: &[(&str, &str)] = &[
    (r"apache\s+license,?\s+version\s+2\.0", "Apache-2.0"),
    (r"licensed\s+under\s+the\s+apache\s+license", "Apache-2.0"),
    (r"\bapache[\s-]+2\.0\b", "Apache-2.0"),
    (r"\bisc\s+license\b", "ISC"),
    (
        r"permission\s+to\s+use,\s+copy,\s+modify,\s+and(/or)?\s+distribute\s+this\s+software\s+for\s+any\s+purpose\s+with\s+or\s+without\s+fee\s+is\s+hereby\s+granted",
        "ISC",
    ),
    (r"\bmit\s+license\b", "MIT"),
    (
        r"permission\s+is\s+hereby\s+granted,\s+free\s+of\s+charge,\s+to\s+any\s+person\s+obtaining\s+a\s+copy",
        "MIT",
    ),
    (r#"the\s+software\s+is\s+provided\s+"as\s+is""#, "MIT"),
    (
        r"redistribution\s+and\s+use\s+in\s+source\s+and\s+binary\s+forms.*neither\s+the\s+name",
        "BSD-3-Clause",
    ),
    (
        r"redistribution\s+and\s+use\s+in\s+source\s+and\s+binary\s+forms",
        "BSD-2-Clause",
    ),
    (r"gnu\s+general\s+public\s+license\s+version\s+3", "GPL-3.0"),
    (r"gnu\s+general\s+public\s+license\s+version\s+2", "GPL-2.0"),
    (
        r"gnu\s+lesser\s+general\s+public\s+license\s+version\s+3",
        "LGPL-3.0",
    ),
    (
        r"mozilla\s+public\s+license,?\s+(version|v\.?)\s*2\.0",
        "MPL-2.0",
    ),
    (
        r"this\s+is\s+free\s+and\s+unencumbered\s+software\s+released\s+into\s+the\s+public\s+domain",
        "Unlicense",
    ),
];

static COMPILED_PROBES: LazyLock<Vec<(Regex, &'static str)>> = LazyLock::new(|| {
    PROBES
        .iter()
        .map(|(pattern, id)| {
            let regex = RegexBuilder::new(pattern)
                .case_insensitive(true)
                .dot_matches_new_line(true)
                .build()
                .expect("license probe patterns are valid");
            (regex, *id)
        })
        .collect()
});

/// Identifies the license in `text`, or returns `UNKNOWN` if no probe matches.
#[must_use]
pub fn extract_from_license_file(text: &str) -> LicenseInfo {
    COMPILED_PROBES
        .iter()
        .find(|(regex, _)| regex.is_match(text))
        .map_or_else(LicenseInfo::unknown, |(_, id)| LicenseInfo {
            spdx_id: (*id).to_string(),
            source: LicenseSource::LicenseFile,
            raw_value: None,
        })
}

#[must_use]
pub fn is_license_file_name(file_name: &str) -> bool {
    LICENSE_FILE_NAMES
        .iter()
        .any(|candidate| candidate.eq_ignore_ascii_case(file_name))
}
