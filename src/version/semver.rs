use std::cmp::Ordering;
use std::sync::LazyLock;

use regex::Regex;
use semver::Version;

use crate::version::error::VersionError;

/// Leading `major.minor.patch`; anything after the patch number is ignored.
static VERSION_PREFIX_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d+)\.(\d+)\.(\d+)").expect("version regex is valid"));

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompareResult {
    Less,
    Equal,
    Greater,
}

impl From<Ordering> for CompareResult {
    fn from(ordering: Ordering) -> Self {
        match ordering {
            Ordering::Less => CompareResult::Less,
            Ordering::Equal => CompareResult::Equal,
            Ordering::Greater => CompareResult::Greater,
        }
    }
}

/// Parse the leading version triple of a file/product version string.
///
/// Only the first three dotted numbers are kept, so a four-part file version
/// or a suffixed build string still yields a triple.
///
/// Examples:
/// - "1.2.3" -> Version(1, 2, 3)
/// - "4.5.6.0" -> Version(4, 5, 6)
/// - "1.2.3-beta+7" -> Version(1, 2, 3)
/// - "1.2", "x.y.z", "" -> None
pub fn parse_version(version: &str) -> Option<Version> {
    let captures = VERSION_PREFIX_RE.captures(version)?;
    let major = captures[1].parse::<u64>().ok()?;
    let minor = captures[2].parse::<u64>().ok()?;
    let patch = captures[3].parse::<u64>().ok()?;
    Some(Version::new(major, minor, patch))
}

/// Compare two parsed triples by major, then minor, then patch.
pub fn compare_parsed(left: &Version, right: &Version) -> CompareResult {
    left.major
        .cmp(&right.major)
        .then(left.minor.cmp(&right.minor))
        .then(left.patch.cmp(&right.patch))
        .into()
}

/// Compare two version strings.
///
/// Both sides must be non-empty and start with a `major.minor.patch` triple;
/// the error names the offending side.
pub fn compare_versions(left: &str, right: &str) -> Result<CompareResult, VersionError> {
    let left = parse_required(left, "left")?;
    let right = parse_required(right, "right")?;
    Ok(compare_parsed(&left, &right))
}

pub(crate) fn parse_required(version: &str, name: &'static str) -> Result<Version, VersionError> {
    if version.is_empty() {
        return Err(VersionError::invalid(name, "version string is empty"));
    }
    parse_version(version)
        .ok_or_else(|| VersionError::invalid(name, format!("'{}' is not a version", version)))
}
