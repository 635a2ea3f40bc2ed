//! Classification of which single version component changed between releases

use semver::Version;

use crate::version::error::VersionError;
use crate::version::semver::parse_version;
use crate::version::source::VersionSource;

/// Which component, if exactly one, differs between two versions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeResult {
    /// Versions are equal, or more than one component changed
    None,
    Major,
    Minor,
    Patch,
}

/// Classify the change from `older` to `newer`.
///
/// `newer` must be greater than or equal to `older` in every component; a
/// lower component on the newer side is a caller error, not an ordering result.
pub fn only_changed(
    newer: Option<&Version>,
    older: Option<&Version>,
) -> Result<ChangeResult, VersionError> {
    let newer = newer.ok_or_else(|| VersionError::invalid("newer", "version is absent"))?;
    let older = older.ok_or_else(|| VersionError::invalid("older", "version is absent"))?;

    if newer.major < older.major || newer.minor < older.minor || newer.patch < older.patch {
        return Err(VersionError::PreconditionViolated(format!(
            "{} must be greater than or equal to {} in every component",
            newer, older
        )));
    }

    let major = newer.major != older.major;
    let minor = newer.minor != older.minor;
    let patch = newer.patch != older.patch;

    Ok(match (major, minor, patch) {
        (true, false, false) => ChangeResult::Major,
        (false, true, false) => ChangeResult::Minor,
        (false, false, true) => ChangeResult::Patch,
        _ => ChangeResult::None,
    })
}

/// Classify the change from the version reported by `source` to `app_version`.
pub fn only_changed_from_source<S: VersionSource + ?Sized>(
    app_version: &str,
    source: &S,
) -> Result<ChangeResult, VersionError> {
    if app_version.is_empty() {
        return Err(VersionError::invalid("app_version", "version string is empty"));
    }

    let current = source.resolve_version()?;

    let next = parse_version(app_version).ok_or_else(|| {
        VersionError::invalid("app_version", format!("'{}' is not a version", app_version))
    })?;
    let current = parse_version(&current).ok_or_else(|| {
        VersionError::invalid("current_version", format!("'{}' is not a version", current))
    })?;

    only_changed(Some(&next), Some(&current))
}
