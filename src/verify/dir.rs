//! Directory checks

use std::path::Path;

use crate::verify::error::VerifyError;
use crate::verify::file::local_path;
use crate::verify::string::ensure_not_blank;

/// Check that the path names an existing directory
pub fn dir_exists(path: &str) -> Result<bool, VerifyError> {
    ensure_not_blank(path, "path")?;
    Ok(Path::new(path).is_dir())
}

/// Check that the path is a directory; missing paths answer `false`
pub fn is_dir(path: &str) -> Result<bool, VerifyError> {
    if !dir_exists(path)? {
        return Ok(false);
    }
    let metadata = std::fs::metadata(path).map_err(|e| VerifyError::io(path, e))?;
    Ok(metadata.is_dir())
}

/// Check that a `file://` URI names an existing directory
pub fn unc_dir_exists(uri: &str) -> Result<bool, VerifyError> {
    ensure_not_blank(uri, "uri")?;
    Ok(local_path(uri, "uri")?.is_dir())
}

/// Check that a directory holds no files; subdirectories are not counted
pub fn is_empty_dir(path: &str) -> Result<bool, VerifyError> {
    Ok(file_names(path)?.is_empty())
}

/// Check that a directory directly holds a file called `file_name`
pub fn contains_file(path: &str, file_name: &str) -> Result<bool, VerifyError> {
    ensure_not_blank(file_name, "file_name")?;
    Ok(file_names(path)?.iter().any(|name| name == file_name))
}

fn file_names(path: &str) -> Result<Vec<String>, VerifyError> {
    if !is_dir(path)? {
        return Err(VerifyError::invalid(
            "path",
            format!("{} is not a directory", path),
        ));
    }

    let entries = std::fs::read_dir(path).map_err(|e| VerifyError::io(path, e))?;
    let mut names = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| VerifyError::io(path, e))?;
        let file_type = entry.file_type().map_err(|e| VerifyError::io(path, e))?;
        if file_type.is_file() {
            names.push(entry.file_name().to_string_lossy().into_owned());
        }
    }
    Ok(names)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;
    use url::Url;

    struct TestData {
        root: TempDir,
    }

    impl TestData {
        /// `NonEmptyDir/TestFile.txt`, an empty `DeleteMeDir` and a loose `TestFile.txt`
        fn new() -> Self {
            let root = TempDir::new().unwrap();
            std::fs::create_dir(root.path().join("DeleteMeDir")).unwrap();
            std::fs::create_dir(root.path().join("NonEmptyDir")).unwrap();
            std::fs::write(root.path().join("NonEmptyDir/TestFile.txt"), "content").unwrap();
            std::fs::write(root.path().join("TestFile.txt"), "content").unwrap();
            Self { root }
        }

        fn path(&self, relative: &str) -> String {
            self.root.path().join(relative).to_string_lossy().into_owned()
        }
    }

    #[test]
    fn dir_exists_checks_directories() {
        let data = TestData::new();

        assert!(dir_exists(&data.path("DeleteMeDir")).unwrap());
        assert!(!dir_exists(&data.path("NotExistingDir")).unwrap());
        assert!(!dir_exists(&data.path("TestFile.txt")).unwrap());
        assert!(matches!(
            dir_exists(""),
            Err(VerifyError::InvalidArgument { name: "path", .. })
        ));
    }

    #[test]
    fn unc_dir_exists_resolves_file_uris() {
        let data = TestData::new();
        let existing = Url::from_directory_path(data.path("DeleteMeDir")).unwrap();
        let missing = Url::from_directory_path(data.path("NotExistingDir")).unwrap();

        assert!(unc_dir_exists(existing.as_str()).unwrap());
        assert!(!unc_dir_exists(missing.as_str()).unwrap());
        assert!(matches!(
            unc_dir_exists("  "),
            Err(VerifyError::InvalidArgument { name: "uri", .. })
        ));
    }

    #[test]
    fn is_dir_is_false_for_files() {
        let data = TestData::new();

        assert!(is_dir(&data.path("")).unwrap());
        assert!(!is_dir(&data.path("TestFile.txt")).unwrap());
    }

    #[test]
    fn is_empty_dir_counts_only_files() {
        let data = TestData::new();

        assert!(is_empty_dir(&data.path("DeleteMeDir")).unwrap());
        assert!(!is_empty_dir(&data.path("NonEmptyDir")).unwrap());
        // Subdirectories alone leave the root without files
        std::fs::remove_file(data.path("TestFile.txt")).unwrap();
        assert!(is_empty_dir(&data.path("")).unwrap());
        assert!(matches!(
            is_empty_dir(&data.path("NonEmptyDir/TestFile.txt")),
            Err(VerifyError::InvalidArgument { name: "path", .. })
        ));
    }

    #[test]
    fn contains_file_matches_direct_children() {
        let data = TestData::new();
        let dir = data.path("NonEmptyDir");

        assert!(contains_file(&dir, "TestFile.txt").unwrap());
        assert!(!contains_file(&dir, "NotExistingFile.txt").unwrap());
        assert!(!contains_file(&data.path(""), "DeleteMeDir").unwrap());
        assert!(matches!(
            contains_file(&dir, "  "),
            Err(VerifyError::InvalidArgument {
                name: "file_name",
                ..
            })
        ));
        assert!(matches!(
            contains_file(&data.path("TestFile.txt"), "TestFile.txt"),
            Err(VerifyError::InvalidArgument { name: "path", .. })
        ));
    }
}
