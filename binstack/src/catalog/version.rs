//! Version identifier parsing and ordering.
//!
//! A version directory name has one of two shapes:
//!
//! - `MAJOR.MINOR.PATCH` (three integer components)
//! - `MAJOR.MINOR.PATCH-SUFFIX` (three integers plus one trailing string)
//!
//! Numeric components compare numerically (so `1.2.10` outranks `1.2.3`),
//! the suffix compares lexically. A name matching neither shape parses to
//! [`ParsedVersion::Unparseable`], which callers filter out before
//! comparing.

use std::cmp::Ordering;
use std::fmt;
use std::sync::OnceLock;

use regex::Regex;

/// Get the pattern for a plain three-component version.
///
/// Example: `1.2.10`
fn plain_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^(\d+)\.(\d+)\.(\d+)$").unwrap())
}

/// Get the pattern for a suffixed four-component version.
///
/// Example: `2.0.0-rc1`
fn suffixed_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^(\d+)\.(\d+)\.(\d+)-(.+)$").unwrap())
}

/// A parsed version identifier.
///
/// Ordering is component-wise: `major`, then `minor`, then `patch`
/// numerically, then the suffix lexically. A plain version ranks above any
/// suffixed version with the same numeric prefix, since the suffix marks a
/// variant build of that release rather than a newer one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactVersion {
    /// Major component.
    pub major: u64,
    /// Minor component.
    pub minor: u64,
    /// Patch component.
    pub patch: u64,
    /// Trailing string component, if the name carried one.
    pub suffix: Option<String>,
}

impl ArtifactVersion {
    /// Create a plain three-component version.
    pub fn new(major: u64, minor: u64, patch: u64) -> Self {
        Self {
            major,
            minor,
            patch,
            suffix: None,
        }
    }

    /// Create a suffixed version.
    pub fn with_suffix(major: u64, minor: u64, patch: u64, suffix: impl Into<String>) -> Self {
        Self {
            major,
            minor,
            patch,
            suffix: Some(suffix.into()),
        }
    }

    /// The major.minor family key this version belongs to.
    ///
    /// Every version belongs to exactly one family.
    pub fn major_minor(&self) -> String {
        format!("{}.{}", self.major, self.minor)
    }

    /// Whether both versions have the same shape (plain or suffixed).
    pub fn same_arity(&self, other: &Self) -> bool {
        self.suffix.is_some() == other.suffix.is_some()
    }
}

impl Ord for ArtifactVersion {
    fn cmp(&self, other: &Self) -> Ordering {
        self.major
            .cmp(&other.major)
            .then_with(|| self.minor.cmp(&other.minor))
            .then_with(|| self.patch.cmp(&other.patch))
            .then_with(|| match (&self.suffix, &other.suffix) {
                (None, None) => Ordering::Equal,
                // A plain release outranks a suffixed build of the same
                // numeric prefix.
                (None, Some(_)) => Ordering::Greater,
                (Some(_), None) => Ordering::Less,
                (Some(a), Some(b)) => a.cmp(b),
            })
    }
}

impl PartialOrd for ArtifactVersion {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for ArtifactVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.suffix {
            Some(suffix) => write!(f, "{}.{}.{}-{}", self.major, self.minor, self.patch, suffix),
            None => write!(f, "{}.{}.{}", self.major, self.minor, self.patch),
        }
    }
}

/// Result of attempting to parse a directory name as a version.
///
/// Unparseable names are a value, not an error: callers filter them out at
/// each selection site instead of aborting the scan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParsedVersion {
    /// The name matched one of the accepted shapes.
    Parsed(ArtifactVersion),
    /// The name matched neither shape and is excluded from comparison.
    Unparseable,
}

impl ParsedVersion {
    /// The parsed version, if the name was parseable.
    pub fn parsed(&self) -> Option<&ArtifactVersion> {
        match self {
            Self::Parsed(version) => Some(version),
            Self::Unparseable => None,
        }
    }

    /// Consume, yielding the parsed version if there was one.
    pub fn into_parsed(self) -> Option<ArtifactVersion> {
        match self {
            Self::Parsed(version) => Some(version),
            Self::Unparseable => None,
        }
    }

    /// Whether the name parsed.
    pub fn is_parsed(&self) -> bool {
        matches!(self, Self::Parsed(_))
    }
}

/// Parse a directory name into a version.
///
/// The plain three-component pattern is tried first, then the suffixed
/// pattern. Numeric components wider than a `u64` are treated as
/// unparseable rather than panicking.
///
/// # Examples
///
/// ```
/// use binstack::catalog::{parse_version, ArtifactVersion, ParsedVersion};
///
/// assert_eq!(
///     parse_version("1.2.10"),
///     ParsedVersion::Parsed(ArtifactVersion::new(1, 2, 10))
/// );
/// assert_eq!(
///     parse_version("2.0.0-rc1"),
///     ParsedVersion::Parsed(ArtifactVersion::with_suffix(2, 0, 0, "rc1"))
/// );
/// assert_eq!(parse_version("notes"), ParsedVersion::Unparseable);
/// ```
pub fn parse_version(name: &str) -> ParsedVersion {
    if let Some(caps) = plain_pattern().captures(name) {
        let components: Option<Vec<u64>> = (1..=3).map(|i| caps[i].parse().ok()).collect();
        if let Some(c) = components {
            return ParsedVersion::Parsed(ArtifactVersion::new(c[0], c[1], c[2]));
        }
    }

    if let Some(caps) = suffixed_pattern().captures(name) {
        let components: Option<Vec<u64>> = (1..=3).map(|i| caps[i].parse().ok()).collect();
        if let Some(c) = components {
            return ParsedVersion::Parsed(ArtifactVersion::with_suffix(c[0], c[1], c[2], &caps[4]));
        }
    }

    ParsedVersion::Unparseable
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_plain() {
        assert_eq!(
            parse_version("1.2.3"),
            ParsedVersion::Parsed(ArtifactVersion::new(1, 2, 3))
        );
    }

    #[test]
    fn test_parse_suffixed() {
        assert_eq!(
            parse_version("1.2.3-jruby"),
            ParsedVersion::Parsed(ArtifactVersion::with_suffix(1, 2, 3, "jruby"))
        );
    }

    #[test]
    fn test_parse_suffix_with_dots_and_dashes() {
        // Everything after the first dash is the suffix.
        assert_eq!(
            parse_version("9.0.4-p123"),
            ParsedVersion::Parsed(ArtifactVersion::with_suffix(9, 0, 4, "p123"))
        );
        assert_eq!(
            parse_version("1.0.0-pre-2"),
            ParsedVersion::Parsed(ArtifactVersion::with_suffix(1, 0, 0, "pre-2"))
        );
    }

    #[test]
    fn test_parse_rejects_partial_shapes() {
        assert_eq!(parse_version("1.2"), ParsedVersion::Unparseable);
        assert_eq!(parse_version("1.2.3.4"), ParsedVersion::Unparseable);
        assert_eq!(parse_version("v1.2.3"), ParsedVersion::Unparseable);
        assert_eq!(parse_version("1.2.3-"), ParsedVersion::Unparseable);
        assert_eq!(parse_version(""), ParsedVersion::Unparseable);
        assert_eq!(parse_version("notes"), ParsedVersion::Unparseable);
    }

    #[test]
    fn test_parse_oversized_component() {
        // Wider than u64: excluded, not a panic.
        assert_eq!(
            parse_version("99999999999999999999999.0.0"),
            ParsedVersion::Unparseable
        );
    }

    #[test]
    fn test_numeric_ordering() {
        // 10 > 3 numerically, which lexical string comparison would get wrong.
        let a = parse_version("1.2.3").into_parsed().unwrap();
        let b = parse_version("1.2.10").into_parsed().unwrap();
        assert!(b > a);
    }

    #[test]
    fn test_ordering_major_minor_patch_precedence() {
        let v1_9_9 = ArtifactVersion::new(1, 9, 9);
        let v2_0_0 = ArtifactVersion::new(2, 0, 0);
        let v1_10_0 = ArtifactVersion::new(1, 10, 0);
        assert!(v2_0_0 > v1_10_0);
        assert!(v1_10_0 > v1_9_9);
    }

    #[test]
    fn test_suffix_lexical_ordering() {
        let a = ArtifactVersion::with_suffix(1, 0, 0, "alpha");
        let b = ArtifactVersion::with_suffix(1, 0, 0, "beta");
        assert!(b > a);

        // Lexical means "10" sorts below "9".
        let ten = ArtifactVersion::with_suffix(1, 0, 0, "10");
        let nine = ArtifactVersion::with_suffix(1, 0, 0, "9");
        assert!(nine > ten);
    }

    #[test]
    fn test_plain_outranks_suffixed_at_same_prefix() {
        let plain = ArtifactVersion::new(1, 0, 0);
        let suffixed = ArtifactVersion::with_suffix(1, 0, 0, "rc1");
        assert!(plain > suffixed);
    }

    #[test]
    fn test_numeric_prefix_still_dominates_across_arity() {
        let newer_suffixed = ArtifactVersion::with_suffix(1, 0, 1, "rc1");
        let older_plain = ArtifactVersion::new(1, 0, 0);
        assert!(newer_suffixed > older_plain);
    }

    #[test]
    fn test_major_minor_family_key() {
        assert_eq!(ArtifactVersion::new(1, 2, 3).major_minor(), "1.2");
        assert_eq!(
            ArtifactVersion::with_suffix(10, 0, 1, "rc1").major_minor(),
            "10.0"
        );
    }

    #[test]
    fn test_same_arity() {
        let plain = ArtifactVersion::new(1, 0, 0);
        let suffixed = ArtifactVersion::with_suffix(1, 0, 0, "rc1");
        assert!(plain.same_arity(&ArtifactVersion::new(2, 0, 0)));
        assert!(suffixed.same_arity(&ArtifactVersion::with_suffix(2, 0, 0, "x")));
        assert!(!plain.same_arity(&suffixed));
    }

    #[test]
    fn test_display_round_trip() {
        for name in ["1.2.3", "0.0.1", "2.0.0-rc1", "9.0.4-p123"] {
            let version = parse_version(name).into_parsed().unwrap();
            assert_eq!(version.to_string(), name);
        }
    }

    #[test]
    fn test_parsed_version_accessors() {
        let parsed = parse_version("1.0.0");
        assert!(parsed.is_parsed());
        assert_eq!(parsed.parsed().unwrap().major, 1);

        let unparseable = parse_version("junk");
        assert!(!unparseable.is_parsed());
        assert!(unparseable.parsed().is_none());
        assert!(unparseable.into_parsed().is_none());
    }
}
