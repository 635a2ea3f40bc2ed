//! Storage trait behind the registry helper

#[cfg(test)]
use mockall::automock;

use crate::registry::error::RegistryError;
use crate::registry::types::{RegistryHive, RegistryValue};

/// Hierarchical key/value storage addressed by hive and `\`-separated path.
///
/// Implementations resolve `hive` through [`RegistryHive::root`] and treat the
/// empty path as the always-present hive root.
#[cfg_attr(test, automock)]
pub trait KeyValueStore: Send + Sync {
    /// Check whether the subkey exists
    fn subkey_exists(&self, hive: RegistryHive, path: &str) -> Result<bool, RegistryError>;

    /// Names of the direct child subkeys, or None if the subkey is missing
    fn subkey_names(
        &self,
        hive: RegistryHive,
        path: &str,
    ) -> Result<Option<Vec<String>>, RegistryError>;

    /// Names of the values stored directly under the subkey, or None if it is missing
    fn value_names(
        &self,
        hive: RegistryHive,
        path: &str,
    ) -> Result<Option<Vec<String>>, RegistryError>;

    /// Read a value; None if either the subkey or the value is missing
    fn get_value(
        &self,
        hive: RegistryHive,
        path: &str,
        name: &str,
    ) -> Result<Option<RegistryValue>, RegistryError>;

    /// Create the subkey along with any missing ancestors
    fn create_subkey(&self, hive: RegistryHive, path: &str) -> Result<(), RegistryError>;

    /// Delete a subkey and its values
    ///
    /// # Returns
    /// * `Err(RegistryError::SubKeyNotFound)` - the subkey does not exist
    /// * `Err(RegistryError::SubKeyHasChildren)` - the subkey still has child subkeys
    fn delete_subkey(&self, hive: RegistryHive, path: &str) -> Result<(), RegistryError>;

    /// Insert or overwrite a value under an existing subkey
    fn set_value(
        &self,
        hive: RegistryHive,
        path: &str,
        name: &str,
        value: RegistryValue,
    ) -> Result<(), RegistryError>;

    /// Remove a value; returns whether anything was removed
    fn delete_value(
        &self,
        hive: RegistryHive,
        path: &str,
        name: &str,
    ) -> Result<bool, RegistryError>;
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for Box<T> {
    fn subkey_exists(&self, hive: RegistryHive, path: &str) -> Result<bool, RegistryError> {
        (**self).subkey_exists(hive, path)
    }

    fn subkey_names(
        &self,
        hive: RegistryHive,
        path: &str,
    ) -> Result<Option<Vec<String>>, RegistryError> {
        (**self).subkey_names(hive, path)
    }

    fn value_names(
        &self,
        hive: RegistryHive,
        path: &str,
    ) -> Result<Option<Vec<String>>, RegistryError> {
        (**self).value_names(hive, path)
    }

    fn get_value(
        &self,
        hive: RegistryHive,
        path: &str,
        name: &str,
    ) -> Result<Option<RegistryValue>, RegistryError> {
        (**self).get_value(hive, path, name)
    }

    fn create_subkey(&self, hive: RegistryHive, path: &str) -> Result<(), RegistryError> {
        (**self).create_subkey(hive, path)
    }

    fn delete_subkey(&self, hive: RegistryHive, path: &str) -> Result<(), RegistryError> {
        (**self).delete_subkey(hive, path)
    }

    fn set_value(
        &self,
        hive: RegistryHive,
        path: &str,
        name: &str,
        value: RegistryValue,
    ) -> Result<(), RegistryError> {
        (**self).set_value(hive, path, name, value)
    }

    fn delete_value(
        &self,
        hive: RegistryHive,
        path: &str,
        name: &str,
    ) -> Result<bool, RegistryError> {
        (**self).delete_value(hive, path, name)
    }
}
