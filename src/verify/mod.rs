//! Stateless checks on strings, files and directories
//!
//! Predicates answer `Ok(bool)`. Malformed arguments such as blank paths fail
//! with [`VerifyError::InvalidArgument`] instead of answering `false`.

pub mod dir;
pub mod error;
pub mod file;
pub mod string;

pub use dir::{contains_file, dir_exists, is_dir, is_empty_dir, unc_dir_exists};
pub use error::VerifyError;
pub use file::{file_exists, is_file_name_valid, is_file_path_valid, unc_file_exists};
pub use string::{ensure_not_blank, is_not_blank};
