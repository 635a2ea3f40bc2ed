//! SQLite-backed key/value store
//!
//! Persists the registry shape on platforms without a native registry. Each
//! subkey is a row keyed by `(hive, path)` with its parent path alongside, and
//! values hang off their subkey row.

use std::path::Path;
use std::sync::{Mutex, MutexGuard};

use rusqlite::{Connection, OptionalExtension, Transaction};
use tracing::{debug, info};

use crate::registry::error::RegistryError;
use crate::registry::store::KeyValueStore;
use crate::registry::types::{RegistryHive, RegistryValue, normalize_path};

pub struct SqliteStore {
    conn: Mutex<Connection>,
}

impl SqliteStore {
    pub fn new(db_path: &Path) -> Result<Self, RegistryError> {
        info!("Initializing key/value store at {:?}", db_path);

        let conn = Connection::open(db_path)?;

        // Enable WAL mode for better concurrency
        conn.pragma_update(None, "journal_mode", "WAL")?;
        conn.pragma_update(None, "synchronous", "NORMAL")?;

        Self::from_connection(conn)
    }

    /// Store living only as long as the returned value
    pub fn in_memory() -> Result<Self, RegistryError> {
        Self::from_connection(Connection::open_in_memory()?)
    }

    fn from_connection(conn: Connection) -> Result<Self, RegistryError> {
        debug!("Database connection established");

        let store = Self {
            conn: Mutex::new(conn),
        };
        store.create_schema()?;
        Ok(store)
    }

    /// Acquire database connection lock with proper error handling
    fn lock_conn(&self) -> Result<MutexGuard<'_, Connection>, RegistryError> {
        self.conn.lock().map_err(|_| RegistryError::LockPoisoned)
    }

    fn current_timestamp_ms() -> i64 {
        chrono::Utc::now().timestamp_millis()
    }

    fn create_schema(&self) -> Result<(), RegistryError> {
        debug!("Creating key/value store schema");

        let conn = self.lock_conn()?;

        conn.execute(
            r#"
            CREATE TABLE IF NOT EXISTS subkeys (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                hive TEXT NOT NULL,
                path TEXT NOT NULL,
                parent_path TEXT,
                updated_at INTEGER NOT NULL,
                UNIQUE(hive, path)
            )
            "#,
            [],
        )?;

        conn.execute(
            "CREATE INDEX IF NOT EXISTS idx_subkeys_parent ON subkeys(hive, parent_path)",
            [],
        )?;

        conn.execute(
            r#"
            CREATE TABLE IF NOT EXISTS key_values (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                subkey_id INTEGER NOT NULL,
                name TEXT NOT NULL,
                string_value TEXT,
                int_value INTEGER,
                updated_at INTEGER NOT NULL,
                FOREIGN KEY (subkey_id) REFERENCES subkeys(id) ON DELETE CASCADE,
                UNIQUE(subkey_id, name)
            )
            "#,
            [],
        )?;

        conn.execute(
            "CREATE INDEX IF NOT EXISTS idx_key_values_subkey_id ON key_values(subkey_id)",
            [],
        )?;

        debug!("Key/value store schema created successfully");
        Ok(())
    }

    fn subkey_id(
        conn: &Connection,
        hive: RegistryHive,
        path: &str,
    ) -> Result<Option<i64>, RegistryError> {
        let id = conn
            .query_row(
                "SELECT id FROM subkeys WHERE hive = ?1 AND path = ?2",
                (hive.root().as_str(), path),
                |row| row.get(0),
            )
            .optional()?;
        Ok(id)
    }

    fn exists(conn: &Connection, hive: RegistryHive, path: &str) -> Result<bool, RegistryError> {
        Ok(path.is_empty() || Self::subkey_id(conn, hive, path)?.is_some())
    }

    /// Insert the subkey row unless it is already there
    fn insert_subkey(
        tx: &Transaction<'_>,
        hive: RegistryHive,
        path: &str,
        parent_path: Option<&str>,
    ) -> Result<(), RegistryError> {
        tx.execute(
            r#"
            INSERT INTO subkeys (hive, path, parent_path, updated_at)
            VALUES (?1, ?2, ?3, ?4)
            ON CONFLICT(hive, path) DO NOTHING
            "#,
            (
                hive.root().as_str(),
                path,
                parent_path,
                Self::current_timestamp_ms(),
            ),
        )?;
        Ok(())
    }
}

impl KeyValueStore for SqliteStore {
    fn subkey_exists(&self, hive: RegistryHive, path: &str) -> Result<bool, RegistryError> {
        let conn = self.lock_conn()?;
        Self::exists(&conn, hive, &normalize_path(path))
    }

    fn subkey_names(
        &self,
        hive: RegistryHive,
        path: &str,
    ) -> Result<Option<Vec<String>>, RegistryError> {
        let path = normalize_path(path);
        let conn = self.lock_conn()?;
        if !Self::exists(&conn, hive, &path)? {
            return Ok(None);
        }

        let mut stmt = conn.prepare(
            "SELECT path FROM subkeys WHERE hive = ?1 AND parent_path = ?2 ORDER BY id",
        )?;
        let names = stmt
            .query_map((hive.root().as_str(), &path), |row| row.get::<_, String>(0))?
            .map(|child| {
                child.map(|child| {
                    child
                        .rsplit('\\')
                        .next()
                        .unwrap_or(child.as_str())
                        .to_string()
                })
            })
            .collect::<Result<Vec<String>, _>>()?;

        Ok(Some(names))
    }

    fn value_names(
        &self,
        hive: RegistryHive,
        path: &str,
    ) -> Result<Option<Vec<String>>, RegistryError> {
        let path = normalize_path(path);
        let conn = self.lock_conn()?;
        if !Self::exists(&conn, hive, &path)? {
            return Ok(None);
        }

        let mut stmt = conn.prepare(
            r#"
            SELECT kv.name FROM key_values kv
            JOIN subkeys s ON kv.subkey_id = s.id
            WHERE s.hive = ?1 AND s.path = ?2
            ORDER BY kv.id
            "#,
        )?;
        let names = stmt
            .query_map((hive.root().as_str(), &path), |row| row.get(0))?
            .collect::<Result<Vec<String>, _>>()?;

        Ok(Some(names))
    }

    fn get_value(
        &self,
        hive: RegistryHive,
        path: &str,
        name: &str,
    ) -> Result<Option<RegistryValue>, RegistryError> {
        let conn = self.lock_conn()?;
        let row = conn
            .query_row(
                r#"
                SELECT kv.string_value, kv.int_value FROM key_values kv
                JOIN subkeys s ON kv.subkey_id = s.id
                WHERE s.hive = ?1 AND s.path = ?2 AND kv.name = ?3
                "#,
                (hive.root().as_str(), normalize_path(path), name),
                |row| Ok((row.get::<_, Option<String>>(0)?, row.get::<_, Option<i32>>(1)?)),
            )
            .optional()?;

        Ok(match row {
            Some((Some(text), _)) => Some(RegistryValue::String(text)),
            Some((None, Some(number))) => Some(RegistryValue::Int(number)),
            _ => None,
        })
    }

    fn create_subkey(&self, hive: RegistryHive, path: &str) -> Result<(), RegistryError> {
        let path = normalize_path(path);
        if path.is_empty() {
            return Ok(());
        }

        let mut conn = self.lock_conn()?;
        let tx = conn.transaction()?;

        let mut current = String::new();
        for segment in path.split('\\') {
            let parent = current.clone();
            if !current.is_empty() {
                current.push('\\');
            }
            current.push_str(segment);
            Self::insert_subkey(&tx, hive, &current, Some(&parent))?;
        }

        tx.commit()?;
        debug!("Created subkey {}\\{}", hive.as_str(), path);
        Ok(())
    }

    fn delete_subkey(&self, hive: RegistryHive, path: &str) -> Result<(), RegistryError> {
        let path = normalize_path(path);
        if path.is_empty() {
            return Err(RegistryError::InvalidPath(path));
        }

        let mut conn = self.lock_conn()?;
        let tx = conn.transaction()?;

        let Some(id) = Self::subkey_id(&tx, hive, &path)? else {
            return Err(RegistryError::SubKeyNotFound(path));
        };

        let children: i64 = tx.query_row(
            "SELECT COUNT(*) FROM subkeys WHERE hive = ?1 AND parent_path = ?2",
            (hive.root().as_str(), &path),
            |row| row.get(0),
        )?;
        if children > 0 {
            return Err(RegistryError::SubKeyHasChildren(path));
        }

        tx.execute("DELETE FROM key_values WHERE subkey_id = ?1", [id])?;
        tx.execute("DELETE FROM subkeys WHERE id = ?1", [id])?;
        tx.commit()?;
        Ok(())
    }

    fn set_value(
        &self,
        hive: RegistryHive,
        path: &str,
        name: &str,
        value: RegistryValue,
    ) -> Result<(), RegistryError> {
        let path = normalize_path(path);
        let mut conn = self.lock_conn()?;
        let tx = conn.transaction()?;

        // The hive root has no row until a value is stored on it
        if path.is_empty() {
            Self::insert_subkey(&tx, hive, &path, None)?;
        }

        let Some(id) = Self::subkey_id(&tx, hive, &path)? else {
            return Err(RegistryError::SubKeyNotFound(path));
        };

        let (string_value, int_value) = match value {
            RegistryValue::String(text) => (Some(text), None),
            RegistryValue::Int(number) => (None, Some(number)),
        };

        tx.execute(
            r#"
            INSERT INTO key_values (subkey_id, name, string_value, int_value, updated_at)
            VALUES (?1, ?2, ?3, ?4, ?5)
            ON CONFLICT(subkey_id, name) DO UPDATE SET
                string_value = excluded.string_value,
                int_value = excluded.int_value,
                updated_at = excluded.updated_at
            "#,
            (
                id,
                name,
                string_value,
                int_value,
                Self::current_timestamp_ms(),
            ),
        )?;

        tx.commit()?;
        Ok(())
    }

    fn delete_value(
        &self,
        hive: RegistryHive,
        path: &str,
        name: &str,
    ) -> Result<bool, RegistryError> {
        let conn = self.lock_conn()?;
        let deleted = conn.execute(
            r#"
            DELETE FROM key_values
            WHERE name = ?3 AND subkey_id IN (
                SELECT id FROM subkeys WHERE hive = ?1 AND path = ?2
            )
            "#,
            (hive.root().as_str(), normalize_path(path), name),
        )?;
        Ok(deleted > 0)
    }
}
