//! Version lookup in the `VS_VERSION_INFO` resource of a PE binary
//!
//! The `StringFileInfo` table stores each entry as a UTF-16LE key, a NUL
//! terminator, zero padding up to a 32-bit boundary and then the UTF-16LE
//! value. Only the `FileVersion` entry is read.

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::verify::file_exists;
use crate::version::error::VersionError;
use crate::version::source::VersionSource;

const FILE_VERSION_KEY: &str = "FileVersion";

/// Source reading the `FileVersion` string embedded in a binary on disk
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BinaryMetadataSource {
    path: PathBuf,
}

impl BinaryMetadataSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Source for the binary of the running process
    pub fn current_exe() -> Result<Self, VersionError> {
        Ok(Self::new(std::env::current_exe()?))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl VersionSource for BinaryMetadataSource {
    fn resolve_version(&self) -> Result<String, VersionError> {
        if !file_exists(&self.path) {
            return Err(VersionError::invalid(
                "path",
                format!("{} is not an existing file", self.path.display()),
            ));
        }

        let bytes = std::fs::read(&self.path)?;

        read_file_version(&bytes).ok_or_else(|| {
            debug!("No FileVersion resource in {}", self.path.display());
            VersionError::NotFound(format!(
                "{} has no FileVersion resource",
                self.path.display()
            ))
        })
    }
}

/// Extract the `FileVersion` value from raw binary contents.
///
/// Returns None when the key is missing or its value is empty.
pub fn read_file_version(bytes: &[u8]) -> Option<String> {
    let key: Vec<u8> = FILE_VERSION_KEY
        .encode_utf16()
        .chain(std::iter::once(0))
        .flat_map(u16::to_le_bytes)
        .collect();

    // UTF-16 strings in a resource start on an even offset
    let start = bytes
        .windows(key.len())
        .enumerate()
        .step_by(2)
        .find(|(_, window)| *window == key.as_slice())
        .map(|(start, _)| start)?;
    let mut units = bytes[start + key.len()..]
        .chunks_exact(2)
        .map(|pair| u16::from_le_bytes([pair[0], pair[1]]))
        .skip_while(|&unit| unit == 0);

    let mut value = Vec::new();
    for unit in units.by_ref() {
        if unit == 0 {
            break;
        }
        value.push(unit);
    }

    let value = String::from_utf16(&value).ok()?;
    let value = value.trim();
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn utf16le(text: &str) -> Vec<u8> {
        text.encode_utf16().flat_map(u16::to_le_bytes).collect()
    }

    /// Mimics a StringFileInfo table with a couple of entries
    fn version_resource(file_version: &str) -> Vec<u8> {
        let mut bytes = b"MZ\x90\x00 some header bytes".to_vec();
        bytes.extend(utf16le("CompanyName\0"));
        bytes.extend(utf16le("Refoveo\0"));
        bytes.extend(utf16le("FileVersion\0"));
        bytes.extend([0, 0]); // padding to a 32-bit boundary
        bytes.extend(utf16le(file_version));
        bytes.extend([0, 0]);
        bytes.extend(utf16le("ProductVersion\0"));
        bytes.extend(utf16le("9.9.9\0"));
        bytes
    }

    #[test]
    fn read_file_version_finds_value_after_padding() {
        assert_eq!(
            read_file_version(&version_resource("4.5.6.0")),
            Some("4.5.6.0".to_string())
        );
    }

    #[test]
    fn read_file_version_ignores_key_at_odd_offset() {
        let mut misaligned = vec![0x41];
        misaligned.extend(utf16le("FileVersion\0"));
        misaligned.extend(utf16le("junk\0"));
        assert_eq!(read_file_version(&misaligned), None);

        misaligned.push(0);
        misaligned.extend(utf16le("FileVersion\0"));
        misaligned.extend(utf16le("1.2.3.4\0"));
        assert_eq!(read_file_version(&misaligned), Some("1.2.3.4".to_string()));
    }

    #[test]
    fn read_file_version_returns_none_without_resource() {
        assert_eq!(read_file_version(b"\x7fELF plain binary"), None);
        assert_eq!(read_file_version(&[]), None);
    }

    #[test]
    fn read_file_version_returns_none_for_empty_value() {
        let mut bytes = utf16le("FileVersion\0");
        bytes.extend([0, 0, 0, 0]);
        assert_eq!(read_file_version(&bytes), None);
    }

    #[test]
    fn resolve_version_reads_binary_on_disk() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("DummyAssembly.dll");
        fs::write(&path, version_resource("4.5.6.0")).unwrap();

        let source = BinaryMetadataSource::new(&path);
        assert_eq!(source.resolve_version().unwrap(), "4.5.6.0");
    }

    #[test]
    fn resolve_version_rejects_missing_file() {
        let temp_dir = TempDir::new().unwrap();
        let source = BinaryMetadataSource::new(temp_dir.path().join("missing.dll"));

        let err = source.resolve_version().unwrap_err();
        assert!(matches!(err, VersionError::InvalidArgument { name: "path", .. }));
    }

    #[test]
    fn resolve_version_reports_not_found_without_resource() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("plain.bin");
        fs::write(&path, b"no version here").unwrap();

        let err = BinaryMetadataSource::new(&path).resolve_version().unwrap_err();
        assert!(matches!(err, VersionError::NotFound(_)));
    }
}
