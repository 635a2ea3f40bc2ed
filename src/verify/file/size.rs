//! File size predicates
//!
//! Sizes are in bytes. Every predicate fails with `InvalidArgument` when the
//! path does not name an existing file.

use std::path::Path;

use crate::verify::error::VerifyError;
use crate::verify::file::file_exists;

fn file_size(path: &Path) -> Result<u64, VerifyError> {
    if !file_exists(path) {
        return Err(VerifyError::invalid(
            "path",
            format!("{} is not an existing file", path.display()),
        ));
    }
    std::fs::metadata(path)
        .map(|metadata| metadata.len())
        .map_err(|e| VerifyError::io(path.display(), e))
}

/// Evaluate an arbitrary predicate against the file size
pub fn custom(
    path: impl AsRef<Path>,
    predicate: impl FnOnce(u64) -> bool,
) -> Result<bool, VerifyError> {
    Ok(predicate(file_size(path.as_ref())?))
}

pub fn less_than(path: impl AsRef<Path>, allowed: u64) -> Result<bool, VerifyError> {
    custom(path, |size| size < allowed)
}

pub fn less_or_equal_to(path: impl AsRef<Path>, allowed: u64) -> Result<bool, VerifyError> {
    custom(path, |size| size <= allowed)
}

pub fn greater_than(path: impl AsRef<Path>, allowed: u64) -> Result<bool, VerifyError> {
    custom(path, |size| size > allowed)
}

pub fn greater_or_equal_to(path: impl AsRef<Path>, allowed: u64) -> Result<bool, VerifyError> {
    custom(path, |size| size >= allowed)
}

/// Check that the file size is within `delta` bytes of `expected`
pub fn equal_to(path: impl AsRef<Path>, expected: u64, delta: u64) -> Result<bool, VerifyError> {
    custom(path, |size| size.abs_diff(expected) <= delta)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};
    use tempfile::TempDir;

    const SIZE_500B: u64 = 512;
    const SIZE_1KB: u64 = 1024;
    const SIZE_5KB: u64 = 5 * 1024;

    struct SizedFile {
        _dir: TempDir,
        path: std::path::PathBuf,
    }

    #[fixture]
    fn file_1kb() -> SizedFile {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("TestSize1Kb.txt");
        std::fs::write(&path, vec![b'x'; SIZE_1KB as usize]).unwrap();
        SizedFile { _dir: dir, path }
    }

    #[rstest]
    fn missing_file_is_an_invalid_argument(file_1kb: SizedFile) {
        let missing = file_1kb.path.with_file_name("NotExisting.txt");
        assert!(matches!(
            equal_to(&missing, SIZE_1KB, 0),
            Err(VerifyError::InvalidArgument { name: "path", .. })
        ));
        assert!(matches!(
            less_than(file_1kb.path.parent().unwrap(), SIZE_1KB),
            Err(VerifyError::InvalidArgument { name: "path", .. })
        ));
    }

    #[rstest]
    fn custom_receives_the_size(file_1kb: SizedFile) {
        assert!(custom(&file_1kb.path, |size| size == SIZE_1KB).unwrap());
    }

    #[rstest]
    #[case(SIZE_5KB, true)]
    #[case(SIZE_1KB, false)]
    #[case(SIZE_500B, false)]
    fn less_than_is_strict(file_1kb: SizedFile, #[case] allowed: u64, #[case] expected: bool) {
        assert_eq!(less_than(&file_1kb.path, allowed).unwrap(), expected);
    }

    #[rstest]
    #[case(SIZE_5KB, true)]
    #[case(SIZE_1KB, true)]
    #[case(SIZE_500B, false)]
    fn less_or_equal_to_includes_bound(
        file_1kb: SizedFile,
        #[case] allowed: u64,
        #[case] expected: bool,
    ) {
        assert_eq!(less_or_equal_to(&file_1kb.path, allowed).unwrap(), expected);
    }

    #[rstest]
    #[case(SIZE_500B, true)]
    #[case(SIZE_1KB, false)]
    #[case(SIZE_5KB, false)]
    fn greater_than_is_strict(file_1kb: SizedFile, #[case] allowed: u64, #[case] expected: bool) {
        assert_eq!(greater_than(&file_1kb.path, allowed).unwrap(), expected);
    }

    #[rstest]
    #[case(SIZE_500B, true)]
    #[case(SIZE_1KB, true)]
    #[case(SIZE_5KB, false)]
    fn greater_or_equal_to_includes_bound(
        file_1kb: SizedFile,
        #[case] allowed: u64,
        #[case] expected: bool,
    ) {
        assert_eq!(greater_or_equal_to(&file_1kb.path, allowed).unwrap(), expected);
    }

    #[rstest]
    #[case(SIZE_1KB, 0, true)]
    #[case(SIZE_500B, SIZE_500B, true)]
    #[case(SIZE_500B, SIZE_500B - 1, false)]
    #[case(SIZE_5KB, SIZE_1KB, false)]
    fn equal_to_allows_delta_either_side(
        file_1kb: SizedFile,
        #[case] expected_size: u64,
        #[case] delta: u64,
        #[case] expected: bool,
    ) {
        assert_eq!(
            equal_to(&file_1kb.path, expected_size, delta).unwrap(),
            expected
        );
    }
}
