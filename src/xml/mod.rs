//! XML document, schema and appcast verification
//!
//! Every check answers a [`Validation`]: either `Valid` or the first
//! [`XmlIssue`] found, with its position. Blank content or paths are caller
//! errors and fail with [`XmlError::InvalidArgument`].

pub mod appcast;
pub mod document;
pub mod error;
pub mod issue;
pub mod schema;

pub use document::Document;
pub use error::XmlError;
pub use issue::{Severity, Validation, XmlInput, XmlIssue};
pub use schema::Schema;
