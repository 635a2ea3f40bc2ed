use thiserror::Error;

#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("Subkey not found: {0}")]
    SubKeyNotFound(String),

    #[error("Value {name} not found under {path}")]
    ValueNotFound { path: String, name: String },

    #[error("Subkey {0} still has child subkeys")]
    SubKeyHasChildren(String),

    #[error("Invalid subkey path: {0:?}")]
    InvalidPath(String),

    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Store lock poisoned")]
    LockPoisoned,
}
