//! In-process key/value store
//!
//! Keeps insertion order for subkeys and values so enumeration is stable,
//! which makes it the store of choice for tests and for applications that
//! only need the registry shape without persistence.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use indexmap::IndexMap;

use crate::registry::error::RegistryError;
use crate::registry::store::KeyValueStore;
use crate::registry::types::{RegistryHive, RegistryValue, normalize_path, path_segments};

#[derive(Debug, Default)]
struct Node {
    subkeys: IndexMap<String, Node>,
    values: IndexMap<String, RegistryValue>,
}

impl Node {
    fn find(&self, segments: &[&str]) -> Option<&Node> {
        segments
            .iter()
            .try_fold(self, |node, segment| node.subkeys.get(*segment))
    }

    fn find_mut(&mut self, segments: &[&str]) -> Option<&mut Node> {
        segments
            .iter()
            .try_fold(self, |node, segment| node.subkeys.get_mut(*segment))
    }
}

#[derive(Debug, Default)]
pub struct MemoryStore {
    hives: Mutex<HashMap<RegistryHive, Node>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock_hives(&self) -> Result<MutexGuard<'_, HashMap<RegistryHive, Node>>, RegistryError> {
        self.hives.lock().map_err(|_| RegistryError::LockPoisoned)
    }

    /// Run `f` against the node at `path`, or return None if it does not exist
    fn with_node<T>(
        &self,
        hive: RegistryHive,
        path: &str,
        f: impl FnOnce(&Node) -> T,
    ) -> Result<Option<T>, RegistryError> {
        let hives = self.lock_hives()?;
        let segments = path_segments(path);
        match hives.get(&hive.root()) {
            Some(root) => Ok(root.find(&segments).map(f)),
            // A hive root always exists even before anything is written to it
            None if segments.is_empty() => Ok(Some(f(&Node::default()))),
            None => Ok(None),
        }
    }
}

impl KeyValueStore for MemoryStore {
    fn subkey_exists(&self, hive: RegistryHive, path: &str) -> Result<bool, RegistryError> {
        Ok(self.with_node(hive, path, |_| ())?.is_some())
    }

    fn subkey_names(
        &self,
        hive: RegistryHive,
        path: &str,
    ) -> Result<Option<Vec<String>>, RegistryError> {
        self.with_node(hive, path, |node| node.subkeys.keys().cloned().collect())
    }

    fn value_names(
        &self,
        hive: RegistryHive,
        path: &str,
    ) -> Result<Option<Vec<String>>, RegistryError> {
        self.with_node(hive, path, |node| node.values.keys().cloned().collect())
    }

    fn get_value(
        &self,
        hive: RegistryHive,
        path: &str,
        name: &str,
    ) -> Result<Option<RegistryValue>, RegistryError> {
        Ok(self
            .with_node(hive, path, |node| node.values.get(name).cloned())?
            .flatten())
    }

    fn create_subkey(&self, hive: RegistryHive, path: &str) -> Result<(), RegistryError> {
        let mut hives = self.lock_hives()?;
        let root = hives.entry(hive.root()).or_default();
        path_segments(path).into_iter().fold(root, |node, segment| {
            node.subkeys.entry(segment.to_string()).or_default()
        });
        Ok(())
    }

    fn delete_subkey(&self, hive: RegistryHive, path: &str) -> Result<(), RegistryError> {
        let segments = path_segments(path);
        let Some((name, parent_segments)) = segments.split_last() else {
            return Err(RegistryError::InvalidPath(path.to_string()));
        };

        let mut hives = self.lock_hives()?;
        let parent = hives
            .get_mut(&hive.root())
            .and_then(|root| root.find_mut(parent_segments))
            .ok_or_else(|| RegistryError::SubKeyNotFound(normalize_path(path)))?;

        match parent.subkeys.get(*name) {
            None => return Err(RegistryError::SubKeyNotFound(normalize_path(path))),
            Some(node) if !node.subkeys.is_empty() => {
                return Err(RegistryError::SubKeyHasChildren(normalize_path(path)));
            }
            Some(_) => {}
        }

        parent.subkeys.shift_remove(*name);
        Ok(())
    }

    fn set_value(
        &self,
        hive: RegistryHive,
        path: &str,
        name: &str,
        value: RegistryValue,
    ) -> Result<(), RegistryError> {
        let mut hives = self.lock_hives()?;
        let segments = path_segments(path);
        let root = if segments.is_empty() {
            hives.entry(hive.root()).or_default()
        } else {
            hives
                .get_mut(&hive.root())
                .ok_or_else(|| RegistryError::SubKeyNotFound(normalize_path(path)))?
        };

        let node = root
            .find_mut(&segments)
            .ok_or_else(|| RegistryError::SubKeyNotFound(normalize_path(path)))?;
        node.values.insert(name.to_string(), value);
        Ok(())
    }

    fn delete_value(
        &self,
        hive: RegistryHive,
        path: &str,
        name: &str,
    ) -> Result<bool, RegistryError> {
        let mut hives = self.lock_hives()?;
        let removed = hives
            .get_mut(&hive.root())
            .and_then(|root| root.find_mut(&path_segments(path)))
            .and_then(|node| node.values.shift_remove(name))
            .is_some();
        Ok(removed)
    }
}
