use thiserror::Error;

use crate::registry::RegistryError;

#[derive(Debug, Error)]
pub enum VersionError {
    #[error("Invalid argument '{name}': {reason}")]
    InvalidArgument { name: &'static str, reason: String },

    #[error("Precondition violated: {0}")]
    PreconditionViolated(String),

    #[error("Version not found: {0}")]
    NotFound(String),

    #[error("Key/value store error: {0}")]
    Store(#[from] RegistryError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl VersionError {
    pub(crate) fn invalid(name: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidArgument {
            name,
            reason: reason.into(),
        }
    }
}
