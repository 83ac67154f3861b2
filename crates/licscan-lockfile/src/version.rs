use std::fmt;

/// Lowest lockfile schema the parser understands (pnpm 8).
pub const MINIMUM_LOCKFILE_VERSION: LockfileVersion = LockfileVersion { major: 6, minor: 0 };

/// The leading `major.minor` of a `lockfileVersion` value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct LockfileVersion {
    pub major: u32,
    pub minor: u32,
}

impl LockfileVersion {
    /// Reads the numeric `major[.minor]` prefix and ignores anything after it, so
    /// `5.4-inlineSpecifiers` reads as `5.4`. Returns `None` without a leading digit.
    #[must_use]
    pub fn parse_prefix(input: &str) -> Option<Self> {
        let input = input.trim();
        let (major, rest) = split_number(input)?;
        let minor = rest
            .strip_prefix('.')
            .and_then(split_number)
            .map_or(0, |(minor, _)| minor);

        Some(Self { major, minor })
    }
}

fn split_number(input: &str) -> Option<(u32, &str)> {
    let end = input
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(input.len());
    if end == 0 {
        return None;
    }
    let number = input[..end].parse().ok()?;
    Some((number, &input[end..]))
}

impl fmt::Display for LockfileVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.major, self.minor)
    }
}
