//! Update feed sources
//!
//! A feed publishes two manifests, the appcast (release list) and the
//! appversion descriptor. Sources implement [`FeedSource`]:
//!
//! - [`LocalSource`]: files on disk, size-limited and schema-checked
//! - [`InMemorySource`]: manifests supplied by the application
//! - [`HttpSource`]: remote feeds; fetching is not implemented yet

pub mod error;
pub mod http;
pub mod in_memory;
pub mod local;
pub mod source;

pub use error::FeedError;
pub use http::HttpSource;
pub use in_memory::InMemorySource;
pub use local::LocalSource;
#[cfg(test)]
pub use source::MockFeedSource;
pub use source::{FeedSource, FeedSourceType, Manifest};
