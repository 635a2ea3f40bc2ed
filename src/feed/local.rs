//! Feed source reading manifests from the local filesystem
//!
//! A fetch checks, in order: the manifest path is configured, the manifest
//! and its schema are within their size limits, and the manifest passes the
//! schema (or is at least well-formed when no schema is set). Only then is
//! the manifest handed out.

use std::path::{Path, PathBuf};

use tokio::fs::File;
use tokio::io::{AsyncRead, AsyncReadExt};
use tracing::{debug, warn};

use crate::config::LocalFeedConfig;
use crate::feed::error::FeedError;
use crate::feed::source::{FeedSource, FeedSourceType, Manifest, uncompressed_only};
use crate::text::decode;
use crate::xml::appcast;
use crate::xml::{Validation, XmlInput};

/// Manifest bytes together with their decoded text
struct Fetched {
    bytes: Vec<u8>,
    text: String,
}

struct ManifestFiles<'a> {
    file: Option<&'a Path>,
    file_size_limit: u64,
    schema: Option<&'a Path>,
    schema_size_limit: u64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LocalSource {
    config: LocalFeedConfig,
}

/// Treat an empty or whitespace-only path as unset
fn configured(path: &Option<PathBuf>) -> Option<&Path> {
    path.as_deref()
        .filter(|path| !path.to_string_lossy().trim().is_empty())
}

fn io_error(path: &Path) -> impl FnOnce(std::io::Error) -> FeedError + '_ {
    move |source| FeedError::Io {
        path: path.display().to_string(),
        source,
    }
}

fn too_large(path: &Path, size: u64, limit: u64) -> FeedError {
    warn!("{} is {} bytes, over the {} byte limit", path.display(), size, limit);
    FeedError::TooLarge {
        path: path.display().to_string(),
        size,
        limit,
    }
}

/// Read at most `limit` bytes; anything past the limit is an error even if
/// the file grew after its size was checked
async fn read_limited<R: AsyncRead + Unpin>(
    reader: R,
    path: &Path,
    limit: u64,
) -> Result<Vec<u8>, FeedError> {
    let mut bytes = Vec::new();
    reader
        .take(limit.saturating_add(1))
        .read_to_end(&mut bytes)
        .await
        .map_err(io_error(path))?;

    if bytes.len() as u64 > limit {
        return Err(too_large(path, bytes.len() as u64, limit));
    }
    Ok(bytes)
}

async fn read_within_limit(path: &Path, limit: u64) -> Result<Vec<u8>, FeedError> {
    let metadata = match tokio::fs::metadata(path).await {
        Ok(metadata) if metadata.is_file() => metadata,
        Ok(_) => return Err(FeedError::MissingFile(path.display().to_string())),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(FeedError::MissingFile(path.display().to_string()));
        }
        Err(e) => return Err(io_error(path)(e)),
    };

    if metadata.len() > limit {
        return Err(too_large(path, metadata.len(), limit));
    }

    let file = File::open(path).await.map_err(io_error(path))?;
    read_limited(file, path, limit).await
}

fn decode_file(path: &Path, bytes: &[u8]) -> Result<String, FeedError> {
    decode(bytes).map_err(|source| FeedError::Decode {
        path: path.display().to_string(),
        source,
    })
}

impl LocalSource {
    pub fn new(config: LocalFeedConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &LocalFeedConfig {
        &self.config
    }

    fn files(&self, manifest: Manifest) -> ManifestFiles<'_> {
        let config = &self.config;
        match manifest {
            Manifest::Appcast => ManifestFiles {
                file: configured(&config.appcast_file),
                file_size_limit: config.appcast_file_size_limit,
                schema: configured(&config.appcast_schema),
                schema_size_limit: config.appcast_schema_size_limit,
            },
            Manifest::Appversion => ManifestFiles {
                file: configured(&config.appversion_file),
                file_size_limit: config.appversion_file_size_limit,
                schema: configured(&config.appversion_schema),
                schema_size_limit: config.appversion_schema_size_limit,
            },
        }
    }

    async fn fetch(&self, manifest: Manifest) -> Result<Fetched, FeedError> {
        let files = self.files(manifest);
        let file = files
            .file
            .ok_or(FeedError::NotConfigured(manifest.as_str()))?;

        let bytes = read_within_limit(file, files.file_size_limit).await?;
        let schema = match files.schema {
            Some(schema) => {
                let schema_bytes = read_within_limit(schema, files.schema_size_limit).await?;
                Some(decode_file(schema, &schema_bytes)?)
            }
            None => None,
        };

        let text = decode_file(file, &bytes)?;
        let validation = appcast::verify(
            XmlInput::Memory(&text),
            schema.as_deref().map(XmlInput::Memory),
        )?;

        match validation {
            Validation::Valid => {
                debug!("Loaded {} from {}", manifest.as_str(), file.display());
                Ok(Fetched { bytes, text })
            }
            Validation::Invalid(issue) => {
                warn!("{} rejected: {}", file.display(), issue);
                Err(FeedError::Invalid(issue))
            }
        }
    }
}

#[async_trait::async_trait]
impl FeedSource for LocalSource {
    fn source_type(&self) -> FeedSourceType {
        FeedSourceType::Local
    }

    async fn appcast_as_string(&self) -> Result<String, FeedError> {
        Ok(self.fetch(Manifest::Appcast).await?.text)
    }

    async fn appcast_as_bytes(&self) -> Result<Vec<u8>, FeedError> {
        Ok(self.fetch(Manifest::Appcast).await?.bytes)
    }

    async fn appversion_as_string(&self) -> Result<String, FeedError> {
        Ok(self.fetch(Manifest::Appversion).await?.text)
    }

    async fn appversion_as_bytes(&self) -> Result<Vec<u8>, FeedError> {
        Ok(self.fetch(Manifest::Appversion).await?.bytes)
    }

    fn set_compression(&mut self, for_appcast: bool, for_appversion: bool) -> Result<(), FeedError> {
        uncompressed_only(for_appcast, for_appversion)
    }
}
