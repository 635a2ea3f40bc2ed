//! Shared integration test utilities

#![allow(dead_code)]

use std::path::{Path, PathBuf};

use tempfile::TempDir;

use refoveo::registry::{KeyValueStore, RegistryHive, SqliteStore};

pub const APP_KEY: &str = "Software\\Refoveo\\App";

/// Path of a file under `tests/fixtures`
pub fn fixture(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(name)
}

/// Copy fixtures into a fresh temporary directory
pub fn fixture_dir(names: &[&str]) -> TempDir {
    let dir = TempDir::new().unwrap();
    for name in names {
        std::fs::copy(fixture(name), dir.path().join(name)).unwrap();
    }
    dir
}

/// File-backed store with the installed version recorded under `APP_KEY`
pub fn create_test_store(installed_version: &str) -> (TempDir, SqliteStore) {
    let temp_dir = TempDir::new().unwrap();
    let store = SqliteStore::new(&temp_dir.path().join("registry.db")).unwrap();
    store
        .create_subkey(RegistryHive::CurrentUser, APP_KEY)
        .unwrap();
    store
        .set_value(
            RegistryHive::CurrentUser,
            APP_KEY,
            "Version",
            installed_version.into(),
        )
        .unwrap();
    (temp_dir, store)
}
