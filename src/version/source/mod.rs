//! Adapters that resolve the currently installed version string
//!
//! The comparison core never touches the filesystem or the key/value store
//! itself; it asks a [`VersionSource`] and parses whatever string comes back.

mod binary;
mod key_value;

pub use binary::{BinaryMetadataSource, read_file_version};
pub use key_value::KeyValueSource;

#[cfg(test)]
use mockall::automock;

use crate::version::error::VersionError;

/// Trait for resolving a version string from some external location
#[cfg_attr(test, automock)]
pub trait VersionSource: Send + Sync {
    /// Returns the raw version string, e.g. "4.5.6.0"
    ///
    /// # Returns
    /// * `Err(VersionError::InvalidArgument)` - the locator itself is unusable
    /// * `Err(VersionError::NotFound)` - the locator is fine but holds no version
    fn resolve_version(&self) -> Result<String, VersionError>;
}

/// Source returning a fixed version, typically `env!("CARGO_PKG_VERSION")`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaticSource {
    version: String,
}

impl StaticSource {
    pub fn new(version: impl Into<String>) -> Self {
        Self {
            version: version.into(),
        }
    }
}

impl VersionSource for StaticSource {
    fn resolve_version(&self) -> Result<String, VersionError> {
        if self.version.trim().is_empty() {
            return Err(VersionError::invalid("version", "static version is empty"));
        }
        Ok(self.version.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn static_source_returns_configured_version() {
        let source = StaticSource::new(env!("CARGO_PKG_VERSION"));
        assert_eq!(source.resolve_version().unwrap(), env!("CARGO_PKG_VERSION"));
    }

    #[test]
    fn static_source_rejects_blank_version() {
        let err = StaticSource::new("  ").resolve_version().unwrap_err();
        assert!(matches!(err, VersionError::InvalidArgument { name: "version", .. }));
    }
}
