//! File name, path and existence checks
//!
//! Name and path validity follow the Windows rules so manifests written on
//! one platform are accepted everywhere: control characters and `"<>|` are
//! never allowed, and names additionally reject `:*?\/`.

pub mod kind;
pub mod size;

use std::path::{Path, PathBuf};

use url::Url;

use crate::verify::error::VerifyError;
use crate::verify::string::ensure_not_blank;

const INVALID_PATH_CHARS: &[char] = &['"', '<', '>', '|'];
const INVALID_NAME_CHARS: &[char] = &['"', '<', '>', '|', ':', '*', '?', '\\', '/'];

fn contains_invalid(value: &str, invalid: &[char]) -> bool {
    value.chars().any(|c| c < ' ' || invalid.contains(&c))
}

/// Check a bare file name for characters that cannot appear in one
pub fn is_file_name_valid(file_name: &str) -> Result<bool, VerifyError> {
    ensure_not_blank(file_name, "file_name")?;
    Ok(!contains_invalid(file_name, INVALID_NAME_CHARS))
}

/// Check a full path for characters that cannot appear in one
pub fn is_file_path_valid(path: &str) -> Result<bool, VerifyError> {
    ensure_not_blank(path, "path")?;
    Ok(!contains_invalid(path, INVALID_PATH_CHARS))
}

/// Check that the path names an existing regular file
pub fn file_exists(path: impl AsRef<Path>) -> bool {
    path.as_ref().is_file()
}

/// Check that a `file://` URI names an existing regular file
///
/// Blank input is reported as missing; anything that is not a local file URI
/// fails with `InvalidArgument`.
pub fn unc_file_exists(uri: &str) -> Result<bool, VerifyError> {
    if uri.trim().is_empty() {
        return Ok(false);
    }
    Ok(file_exists(local_path(uri, "uri")?))
}

/// Convert a `file://` URI into a local path
pub(crate) fn local_path(uri: &str, name: &'static str) -> Result<PathBuf, VerifyError> {
    let url = Url::parse(uri).map_err(|e| VerifyError::invalid(name, e.to_string()))?;
    url.to_file_path()
        .map_err(|()| VerifyError::invalid(name, format!("{} is not a local file URI", uri)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use tempfile::TempDir;

    #[rstest]
    #[case("Valid_Name_For 1_File.ext", true)]
    #[case("Invalid < Name_For_File.ext", false)]
    #[case("dir/file.txt", false)]
    #[case("dir\\file.txt", false)]
    #[case("what?.txt", false)]
    #[case("C:file.txt", false)]
    #[case("tab\there.txt", false)]
    fn is_file_name_valid_rejects_reserved_characters(
        #[case] name: &str,
        #[case] expected: bool,
    ) {
        assert_eq!(is_file_name_valid(name).unwrap(), expected);
    }

    #[rstest]
    #[case("C:\\Program Files\\Some Directory\\", true)]
    #[case("/usr/local/share/app/config.xml", true)]
    #[case("C:\\Program Files\\Some | Directory\\", false)]
    #[case("C:\\\"quoted\"", false)]
    fn is_file_path_valid_rejects_reserved_characters(
        #[case] path: &str,
        #[case] expected: bool,
    ) {
        assert_eq!(is_file_path_valid(path).unwrap(), expected);
    }

    #[rstest]
    #[case("")]
    #[case("  ")]
    fn blank_names_and_paths_are_invalid_arguments(#[case] value: &str) {
        assert!(matches!(
            is_file_name_valid(value),
            Err(VerifyError::InvalidArgument { name: "file_name", .. })
        ));
        assert!(matches!(
            is_file_path_valid(value),
            Err(VerifyError::InvalidArgument { name: "path", .. })
        ));
    }

    #[test]
    fn file_exists_only_for_regular_files() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("TestFile.txt");
        std::fs::write(&file, "content").unwrap();

        assert!(file_exists(&file));
        assert!(!file_exists(dir.path().join("FileNotExist.txt")));
        assert!(!file_exists(dir.path()));
        assert!(!file_exists(""));
    }

    #[test]
    fn unc_file_exists_resolves_file_uris() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("TestFile.txt");
        std::fs::write(&file, "content").unwrap();

        let existing = Url::from_file_path(&file).unwrap();
        let missing = Url::from_file_path(dir.path().join("FileNotExist.txt")).unwrap();

        assert!(unc_file_exists(existing.as_str()).unwrap());
        assert!(!unc_file_exists(missing.as_str()).unwrap());
        assert!(!unc_file_exists("").unwrap());
    }

    #[test]
    fn unc_file_exists_rejects_non_file_uris() {
        assert!(matches!(
            unc_file_exists("not a uri"),
            Err(VerifyError::InvalidArgument { name: "uri", .. })
        ));
        assert!(matches!(
            unc_file_exists("https://example.com/file.txt"),
            Err(VerifyError::InvalidArgument { name: "uri", .. })
        ));
    }
}
