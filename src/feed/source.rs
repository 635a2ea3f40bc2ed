//! Feed source trait

#[cfg(test)]
use mockall::automock;
use serde::{Deserialize, Serialize};

use crate::feed::error::FeedError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FeedSourceType {
    Http,
    Local,
    InMemory,
}

/// The two manifests an update feed publishes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Manifest {
    /// Release list
    Appcast,
    /// Latest version descriptor
    Appversion,
}

impl Manifest {
    pub fn as_str(&self) -> &'static str {
        match self {
            Manifest::Appcast => "appcast",
            Manifest::Appversion => "appversion",
        }
    }
}

/// Where update manifests are fetched from
///
/// Every fetch validates the manifest before handing it out; a manifest that
/// fails validation is an error, never an empty result.
#[cfg_attr(test, automock)]
#[async_trait::async_trait]
pub trait FeedSource: Send + Sync {
    fn source_type(&self) -> FeedSourceType;

    /// Decoded appcast text
    async fn appcast_as_string(&self) -> Result<String, FeedError>;

    /// Appcast exactly as stored
    async fn appcast_as_bytes(&self) -> Result<Vec<u8>, FeedError>;

    /// Decoded appversion text
    async fn appversion_as_string(&self) -> Result<String, FeedError>;

    /// Appversion exactly as stored
    async fn appversion_as_bytes(&self) -> Result<Vec<u8>, FeedError>;

    /// Select compressed transfer per manifest
    ///
    /// # Returns
    /// * `Err(FeedError::NotImplemented)` - compression was requested but the
    ///   source cannot provide it
    fn set_compression(&mut self, for_appcast: bool, for_appversion: bool)
    -> Result<(), FeedError>;
}

/// Shared handling for sources that only serve uncompressed manifests
pub(crate) fn uncompressed_only(for_appcast: bool, for_appversion: bool) -> Result<(), FeedError> {
    if for_appcast || for_appversion {
        return Err(FeedError::NotImplemented("compression"));
    }
    Ok(())
}
