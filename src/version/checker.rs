//! Boolean version checks used by update decisions

use crate::version::change::{ChangeResult, only_changed_from_source};
use crate::version::error::VersionError;
use crate::version::semver::{CompareResult, compare_versions};
use crate::version::source::VersionSource;

/// Check whether `version` is one of `candidates` (exact string match)
pub fn in_range<T: AsRef<str>>(version: &str, candidates: &[T]) -> Result<bool, VersionError> {
    if version.is_empty() {
        return Err(VersionError::invalid("version", "version string is empty"));
    }
    Ok(candidates.iter().any(|candidate| candidate.as_ref() == version))
}

pub fn is_less(left: &str, right: &str) -> Result<bool, VersionError> {
    Ok(compare_versions(left, right)? == CompareResult::Less)
}

pub fn is_greater(left: &str, right: &str) -> Result<bool, VersionError> {
    Ok(compare_versions(left, right)? == CompareResult::Greater)
}

pub fn is_less_or_equal(left: &str, right: &str) -> Result<bool, VersionError> {
    Ok(compare_versions(left, right)? != CompareResult::Greater)
}

pub fn is_greater_or_equal(left: &str, right: &str) -> Result<bool, VersionError> {
    Ok(compare_versions(left, right)? != CompareResult::Less)
}

pub fn is_equal(left: &str, right: &str) -> Result<bool, VersionError> {
    Ok(compare_versions(left, right)? == CompareResult::Equal)
}

/// Same triple, regardless of any suffix after the patch number
pub fn is_same_version(left: &str, right: &str) -> Result<bool, VersionError> {
    is_equal(left, right)
}

/// Check whether `app_version` matches the version reported by `source`
pub fn is_same_version_as<S: VersionSource + ?Sized>(
    app_version: &str,
    source: &S,
) -> Result<bool, VersionError> {
    is_equal(app_version, &source.resolve_version()?)
}

/// Check whether `app_version` is an upgrade over the version reported by `source`
pub fn is_version_valid<S: VersionSource + ?Sized>(
    app_version: &str,
    source: &S,
) -> Result<bool, VersionError> {
    is_greater(app_version, &source.resolve_version()?)
}

pub fn is_major_only_changed<S: VersionSource + ?Sized>(
    app_version: &str,
    source: &S,
) -> Result<bool, VersionError> {
    Ok(only_changed_from_source(app_version, source)? == ChangeResult::Major)
}

pub fn is_minor_only_changed<S: VersionSource + ?Sized>(
    app_version: &str,
    source: &S,
) -> Result<bool, VersionError> {
    Ok(only_changed_from_source(app_version, source)? == ChangeResult::Minor)
}

pub fn is_patch_only_changed<S: VersionSource + ?Sized>(
    app_version: &str,
    source: &S,
) -> Result<bool, VersionError> {
    Ok(only_changed_from_source(app_version, source)? == ChangeResult::Patch)
}
