//! Feed source serving manifests held in memory

use tracing::debug;

use crate::feed::error::FeedError;
use crate::feed::source::{FeedSource, FeedSourceType, Manifest, uncompressed_only};
use crate::xml::appcast;
use crate::xml::{Validation, XmlInput};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InMemorySource {
    appcast: Option<String>,
    appcast_schema: Option<String>,
    appversion: Option<String>,
    appversion_schema: Option<String>,
}

impl InMemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_appcast(mut self, content: impl Into<String>) -> Self {
        self.appcast = Some(content.into());
        self
    }

    pub fn with_appcast_schema(mut self, schema: impl Into<String>) -> Self {
        self.appcast_schema = Some(schema.into());
        self
    }

    pub fn with_appversion(mut self, content: impl Into<String>) -> Self {
        self.appversion = Some(content.into());
        self
    }

    pub fn with_appversion_schema(mut self, schema: impl Into<String>) -> Self {
        self.appversion_schema = Some(schema.into());
        self
    }

    fn validated(&self, manifest: Manifest) -> Result<&str, FeedError> {
        let (content, schema) = match manifest {
            Manifest::Appcast => (&self.appcast, &self.appcast_schema),
            Manifest::Appversion => (&self.appversion, &self.appversion_schema),
        };
        let content = content
            .as_deref()
            .ok_or(FeedError::NotConfigured(manifest.as_str()))?;

        let schema = schema.as_deref().map(XmlInput::Memory);
        match appcast::verify(XmlInput::Memory(content), schema)? {
            Validation::Valid => Ok(content),
            Validation::Invalid(issue) => {
                debug!("In-memory {} rejected: {}", manifest.as_str(), issue);
                Err(FeedError::Invalid(issue))
            }
        }
    }
}

#[async_trait::async_trait]
impl FeedSource for InMemorySource {
    fn source_type(&self) -> FeedSourceType {
        FeedSourceType::InMemory
    }

    async fn appcast_as_string(&self) -> Result<String, FeedError> {
        self.validated(Manifest::Appcast).map(str::to_string)
    }

    async fn appcast_as_bytes(&self) -> Result<Vec<u8>, FeedError> {
        self.validated(Manifest::Appcast).map(|content| content.as_bytes().to_vec())
    }

    async fn appversion_as_string(&self) -> Result<String, FeedError> {
        self.validated(Manifest::Appversion).map(str::to_string)
    }

    async fn appversion_as_bytes(&self) -> Result<Vec<u8>, FeedError> {
        self.validated(Manifest::Appversion)
            .map(|content| content.as_bytes().to_vec())
    }

    fn set_compression(&mut self, for_appcast: bool, for_appversion: bool) -> Result<(), FeedError> {
        uncompressed_only(for_appcast, for_appversion)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::xml::XmlError;

    const APPCAST_XML: &str = include_str!("../../tests/fixtures/appcast.xml");
    const APPCAST_XSD: &str = include_str!("../../tests/fixtures/appcast.xsd");
    const APPVERSION_XML: &str = include_str!("../../tests/fixtures/appversion.xml");

    #[tokio::test]
    async fn serves_well_formed_manifests() {
        let source = InMemorySource::new()
            .with_appcast(APPCAST_XML)
            .with_appversion(APPVERSION_XML);

        assert_eq!(source.source_type(), FeedSourceType::InMemory);
        assert_eq!(source.appcast_as_string().await.unwrap(), APPCAST_XML);
        assert_eq!(
            source.appversion_as_bytes().await.unwrap(),
            APPVERSION_XML.as_bytes()
        );
    }

    #[tokio::test]
    async fn validates_against_schema_when_set() {
        let valid = InMemorySource::new()
            .with_appcast(APPCAST_XML)
            .with_appcast_schema(APPCAST_XSD);
        assert!(valid.appcast_as_bytes().await.is_ok());

        let invalid = InMemorySource::new()
            .with_appcast("<appcast xmlns=\"http://refoveo.app/appcast\"><item/></appcast>")
            .with_appcast_schema(APPCAST_XSD);
        let err = invalid.appcast_as_string().await.unwrap_err();
        assert!(matches!(err, FeedError::Invalid(issue) if issue.message.contains("'version'")));
    }

    #[tokio::test]
    async fn reports_missing_and_malformed_manifests() {
        let source = InMemorySource::new().with_appcast("<appcast>");

        assert!(matches!(
            source.appcast_as_string().await,
            Err(FeedError::Invalid(_))
        ));
        assert!(matches!(
            source.appversion_as_string().await,
            Err(FeedError::NotConfigured("appversion"))
        ));

        let blank = InMemorySource::new().with_appversion("   ");
        assert!(matches!(
            blank.appversion_as_bytes().await,
            Err(FeedError::Xml(XmlError::InvalidArgument { .. }))
        ));
    }

    #[test]
    fn only_uncompressed_transfer_is_supported() {
        let mut source = InMemorySource::new();
        assert!(source.set_compression(false, false).is_ok());
        assert!(matches!(
            source.set_compression(true, false),
            Err(FeedError::NotImplemented("compression"))
        ));
    }
}
