//! Registry-style queries and mutations on top of a [`KeyValueStore`]

use crate::registry::error::RegistryError;
use crate::registry::store::KeyValueStore;
use crate::registry::types::{RegistryHive, RegistryValue, normalize_path};

pub struct RegistryHelper<S: KeyValueStore> {
    store: S,
}

impl<S: KeyValueStore> RegistryHelper<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Check whether the subkey exists and has at least one child subkey
    pub fn sub_key_tree_exists(
        &self,
        hive: RegistryHive,
        sub_key_tree: &str,
    ) -> Result<bool, RegistryError> {
        Ok(self
            .store
            .subkey_names(hive, sub_key_tree)?
            .is_some_and(|names| !names.is_empty()))
    }

    pub fn sub_key_exists(&self, hive: RegistryHive, sub_key: &str) -> Result<bool, RegistryError> {
        self.store.subkey_exists(hive, sub_key)
    }

    /// Check whether a value named `key` is stored under the subkey
    pub fn key_exists(
        &self,
        hive: RegistryHive,
        sub_key: &str,
        key: &str,
    ) -> Result<bool, RegistryError> {
        Ok(self
            .store
            .value_names(hive, sub_key)?
            .is_some_and(|names| names.iter().any(|name| name == key)))
    }

    /// Check whether the stored value equals `value`; missing subkeys or values never match
    pub fn value_equal_to(
        &self,
        hive: RegistryHive,
        sub_key: &str,
        key: &str,
        value: &RegistryValue,
    ) -> Result<bool, RegistryError> {
        Ok(self.store.get_value(hive, sub_key, key)?.as_ref() == Some(value))
    }

    /// Number of direct child subkeys
    pub fn count_key_children(
        &self,
        hive: RegistryHive,
        sub_key_tree: &str,
    ) -> Result<usize, RegistryError> {
        self.store
            .subkey_names(hive, sub_key_tree)?
            .map(|names| names.len())
            .ok_or_else(|| RegistryError::SubKeyNotFound(normalize_path(sub_key_tree)))
    }

    /// Number of values stored directly under the subkey
    pub fn count_value_children(
        &self,
        hive: RegistryHive,
        sub_key: &str,
    ) -> Result<usize, RegistryError> {
        self.store
            .value_names(hive, sub_key)?
            .map(|names| names.len())
            .ok_or_else(|| RegistryError::SubKeyNotFound(normalize_path(sub_key)))
    }

    pub fn create_sub_key(&self, hive: RegistryHive, sub_key: &str) -> Result<(), RegistryError> {
        self.store.create_subkey(hive, sub_key)
    }

    pub fn delete_sub_key(&self, hive: RegistryHive, sub_key: &str) -> Result<(), RegistryError> {
        self.store.delete_subkey(hive, sub_key)
    }

    /// Store a new value under an existing subkey
    pub fn create_key(
        &self,
        hive: RegistryHive,
        sub_key: &str,
        key: &str,
        value: impl Into<RegistryValue>,
    ) -> Result<(), RegistryError> {
        if !self.store.subkey_exists(hive, sub_key)? {
            return Err(RegistryError::SubKeyNotFound(normalize_path(sub_key)));
        }
        self.store.set_value(hive, sub_key, key, value.into())
    }

    pub fn read_key_value(
        &self,
        hive: RegistryHive,
        sub_key: &str,
        key: &str,
    ) -> Result<RegistryValue, RegistryError> {
        self.store
            .get_value(hive, sub_key, key)?
            .ok_or_else(|| RegistryError::ValueNotFound {
                path: normalize_path(sub_key),
                name: key.to_string(),
            })
    }

    /// Remove a value if present; missing subkeys and values are not an error
    pub fn delete_key_value(
        &self,
        hive: RegistryHive,
        sub_key: &str,
        key: &str,
    ) -> Result<bool, RegistryError> {
        self.store.delete_value(hive, sub_key, key)
    }

    /// Overwrite a value that must already exist
    pub fn update_key_value(
        &self,
        hive: RegistryHive,
        sub_key: &str,
        key: &str,
        value: impl Into<RegistryValue>,
    ) -> Result<(), RegistryError> {
        if !self.key_exists(hive, sub_key, key)? {
            return Err(RegistryError::ValueNotFound {
                path: normalize_path(sub_key),
                name: key.to_string(),
            });
        }
        self.store.set_value(hive, sub_key, key, value.into())
    }
}
