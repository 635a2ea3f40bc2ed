use tracing::debug;

use crate::registry::{KeyValueStore, RegistryHive, RegistryValue};
use crate::version::error::VersionError;
use crate::version::source::VersionSource;

/// Source reading a string value from a registry-like key/value store
pub struct KeyValueSource<'a, S: KeyValueStore + ?Sized> {
    store: &'a S,
    hive: RegistryHive,
    path: String,
    key: String,
}

impl<'a, S: KeyValueStore + ?Sized> KeyValueSource<'a, S> {
    pub fn new(
        store: &'a S,
        hive: RegistryHive,
        path: impl Into<String>,
        key: impl Into<String>,
    ) -> Self {
        Self {
            store,
            hive,
            path: path.into(),
            key: key.into(),
        }
    }
}

impl<S: KeyValueStore + ?Sized> VersionSource for KeyValueSource<'_, S> {
    fn resolve_version(&self) -> Result<String, VersionError> {
        if self.path.trim().is_empty() {
            return Err(VersionError::invalid("path", "subkey path is empty"));
        }
        if self.key.trim().is_empty() {
            return Err(VersionError::invalid("key", "value name is empty"));
        }

        match self.store.get_value(self.hive, &self.path, &self.key)? {
            Some(RegistryValue::String(version)) => Ok(version),
            Some(RegistryValue::Int(value)) => Err(VersionError::invalid(
                "key",
                format!("{} holds integer {}, not a version string", self.key, value),
            )),
            None => {
                debug!(
                    "No value {} under {}\\{}",
                    self.key,
                    self.hive.as_str(),
                    self.path
                );
                Err(VersionError::NotFound(format!(
                    "{}\\{}\\{}",
                    self.hive.as_str(),
                    self.path,
                    self.key
                )))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::{MemoryStore, MockKeyValueStore, RegistryError};
    use rstest::rstest;

    const ROOT: &str = "Software\\AppRefoveoVersionTest";

    fn store() -> MemoryStore {
        let store = MemoryStore::new();
        store.create_subkey(RegistryHive::CurrentUser, ROOT).unwrap();
        store
            .set_value(RegistryHive::CurrentUser, ROOT, "KeyValid", "1.3.10".into())
            .unwrap();
        store
            .set_value(RegistryHive::CurrentUser, ROOT, "KeyNumber", 1000.into())
            .unwrap();
        store
    }

    #[test]
    fn resolve_version_reads_string_value() {
        let store = store();
        let source = KeyValueSource::new(&store, RegistryHive::CurrentUser, ROOT, "KeyValid");
        assert_eq!(source.resolve_version().unwrap(), "1.3.10");
    }

    #[rstest]
    #[case("", "KeyValid", "path")]
    #[case(ROOT, "", "key")]
    #[case(ROOT, "KeyNumber", "key")]
    fn resolve_version_rejects_invalid_arguments(
        #[case] path: &str,
        #[case] key: &str,
        #[case] expected_name: &str,
    ) {
        let store = store();
        let source = KeyValueSource::new(&store, RegistryHive::CurrentUser, path, key);

        let err = source.resolve_version().unwrap_err();
        assert!(
            matches!(err, VersionError::InvalidArgument { name, .. } if name == expected_name),
            "unexpected error: {err:?}"
        );
    }

    #[rstest]
    #[case(RegistryHive::CurrentUser, ROOT, "KeyMissing")]
    #[case(RegistryHive::CurrentUser, "Software\\NotExistingSubKey", "KeyValid")]
    #[case(RegistryHive::LocalMachine, ROOT, "KeyValid")]
    fn resolve_version_reports_not_found(
        #[case] hive: RegistryHive,
        #[case] path: &str,
        #[case] key: &str,
    ) {
        let store = store();
        let source = KeyValueSource::new(&store, hive, path, key);

        let err = source.resolve_version().unwrap_err();
        assert!(matches!(err, VersionError::NotFound(_)));
    }

    #[test]
    fn resolve_version_propagates_store_failures() {
        let mut store = MockKeyValueStore::new();
        store
            .expect_get_value()
            .returning(|_, _, _| Err(RegistryError::LockPoisoned));

        let source = KeyValueSource::new(&store, RegistryHive::CurrentUser, ROOT, "KeyValid");

        let err = source.resolve_version().unwrap_err();
        assert!(matches!(err, VersionError::Store(RegistryError::LockPoisoned)));
    }
}
