use thiserror::Error;

use crate::text::DecodeError;
use crate::xml::{XmlError, XmlIssue};

#[derive(Debug, Error)]
pub enum FeedError {
    #[error("{0} is not implemented for this feed source")]
    NotImplemented(&'static str),

    #[error("No {0} is configured")]
    NotConfigured(&'static str),

    #[error("File not found: {0}")]
    MissingFile(String),

    #[error("{path} is {size} bytes, over the {limit} byte limit")]
    TooLarge { path: String, size: u64, limit: u64 },

    #[error("Manifest failed validation at {0}")]
    Invalid(XmlIssue),

    #[error("XML error: {0}")]
    Xml(#[from] XmlError),

    #[error("Failed to decode {path}: {source}")]
    Decode {
        path: String,
        #[source]
        source: DecodeError,
    },

    #[error("Failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}
