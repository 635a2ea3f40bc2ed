//! Validation helpers for self-updating applications
//!
//! - [`version`]: version parsing, comparison and change classification
//! - [`registry`]: registry-style key/value storage and queries
//! - [`verify`]: string, file and directory checks
//! - [`xml`]: document, schema and appcast verification
//! - [`feed`]: sources for update manifests

pub mod config;
pub mod feed;
pub mod logging;
pub mod registry;
pub mod text;
pub mod verify;
pub mod version;
pub mod xml;
