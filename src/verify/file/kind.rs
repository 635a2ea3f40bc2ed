//! File attribute checks
//!
//! Each check first requires a valid path naming an existing file; anything
//! else answers `false`. Hidden and system flags come from the file attributes
//! on Windows. Elsewhere a file is hidden when its name starts with a dot and
//! is never a system file.

use std::fs::Metadata;

use crate::verify::error::VerifyError;
use crate::verify::file::{file_exists, is_file_path_valid};

#[cfg(windows)]
const FILE_ATTRIBUTE_HIDDEN: u32 = 0x2;
#[cfg(windows)]
const FILE_ATTRIBUTE_SYSTEM: u32 = 0x4;

fn with_metadata(
    path: &str,
    check: impl FnOnce(&Metadata) -> bool,
) -> Result<bool, VerifyError> {
    if !is_file_path_valid(path)? || !file_exists(path) {
        return Ok(false);
    }
    let metadata = std::fs::metadata(path).map_err(|e| VerifyError::io(path, e))?;
    Ok(check(&metadata))
}

pub fn is_file(path: &str) -> Result<bool, VerifyError> {
    with_metadata(path, Metadata::is_file)
}

pub fn is_read_only(path: &str) -> Result<bool, VerifyError> {
    with_metadata(path, |metadata| metadata.permissions().readonly())
}

#[cfg(windows)]
pub fn is_hidden(path: &str) -> Result<bool, VerifyError> {
    use std::os::windows::fs::MetadataExt;
    with_metadata(path, |metadata| {
        metadata.file_attributes() & FILE_ATTRIBUTE_HIDDEN != 0
    })
}

#[cfg(not(windows))]
pub fn is_hidden(path: &str) -> Result<bool, VerifyError> {
    with_metadata(path, |_| {
        std::path::Path::new(path)
            .file_name()
            .and_then(|name| name.to_str())
            .is_some_and(|name| name.starts_with('.'))
    })
}

#[cfg(windows)]
pub fn is_system(path: &str) -> Result<bool, VerifyError> {
    use std::os::windows::fs::MetadataExt;
    with_metadata(path, |metadata| {
        metadata.file_attributes() & FILE_ATTRIBUTE_SYSTEM != 0
    })
}

#[cfg(not(windows))]
pub fn is_system(path: &str) -> Result<bool, VerifyError> {
    with_metadata(path, |_| false)
}
