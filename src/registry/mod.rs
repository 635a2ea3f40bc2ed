//! Registry-style hierarchical key/value storage
//!
//! Subkeys are addressed by a [`RegistryHive`] and a `\`-separated path. The
//! [`KeyValueStore`] trait holds the storage primitives and
//! [`RegistryHelper`] layers the query and mutation operations on top.
//!
//! Two backends are provided:
//! - [`MemoryStore`]: process-local, insertion ordered
//! - [`SqliteStore`]: persisted to a SQLite database file

pub mod error;
pub mod helper;
pub mod memory;
pub mod sqlite;
pub mod store;
pub mod types;

pub use error::RegistryError;
pub use helper::RegistryHelper;
pub use memory::MemoryStore;
pub use sqlite::SqliteStore;
#[cfg(test)]
pub use store::MockKeyValueStore;
pub use store::KeyValueStore;
pub use types::{RegistryHive, RegistryValue};
