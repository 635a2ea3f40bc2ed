//! HTTP feed source
//!
//! Only the configuration surface exists; every fetch reports
//! `NotImplemented`.

use url::Url;

use crate::feed::error::FeedError;
use crate::feed::source::{FeedSource, FeedSourceType};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpSource {
    base_url: Url,
}

impl HttpSource {
    pub fn new(base_url: Url) -> Self {
        Self { base_url }
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }
}

#[async_trait::async_trait]
impl FeedSource for HttpSource {
    fn source_type(&self) -> FeedSourceType {
        FeedSourceType::Http
    }

    async fn appcast_as_string(&self) -> Result<String, FeedError> {
        Err(FeedError::NotImplemented("appcast_as_string"))
    }

    async fn appcast_as_bytes(&self) -> Result<Vec<u8>, FeedError> {
        Err(FeedError::NotImplemented("appcast_as_bytes"))
    }

    async fn appversion_as_string(&self) -> Result<String, FeedError> {
        Err(FeedError::NotImplemented("appversion_as_string"))
    }

    async fn appversion_as_bytes(&self) -> Result<Vec<u8>, FeedError> {
        Err(FeedError::NotImplemented("appversion_as_bytes"))
    }

    fn set_compression(&mut self, _for_appcast: bool, _for_appversion: bool) -> Result<(), FeedError> {
        Err(FeedError::NotImplemented("set_compression"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn source() -> HttpSource {
        HttpSource::new(Url::parse("https://updates.example.com/feed/").unwrap())
    }

    #[tokio::test]
    async fn every_fetch_is_not_implemented() {
        let source = source();

        assert_eq!(source.source_type(), FeedSourceType::Http);
        assert!(matches!(
            source.appcast_as_string().await,
            Err(FeedError::NotImplemented("appcast_as_string"))
        ));
        assert!(matches!(
            source.appcast_as_bytes().await,
            Err(FeedError::NotImplemented(_))
        ));
        assert!(matches!(
            source.appversion_as_string().await,
            Err(FeedError::NotImplemented(_))
        ));
        assert!(matches!(
            source.appversion_as_bytes().await,
            Err(FeedError::NotImplemented(_))
        ));
    }

    #[test]
    fn compression_is_not_implemented_even_when_disabled() {
        let mut source = source();
        assert!(matches!(
            source.set_compression(false, false),
            Err(FeedError::NotImplemented("set_compression"))
        ));
        assert_eq!(source.base_url().host_str(), Some("updates.example.com"));
    }
}
