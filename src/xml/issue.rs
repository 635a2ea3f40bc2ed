//! Validation outcome types shared by the XML checks

use std::borrow::Cow;
use std::fmt;
use std::path::Path;

use crate::text::decode;
use crate::verify::{file_exists, is_not_blank};
use crate::xml::error::XmlError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Error,
    Warning,
}

/// First problem found in a document or schema
///
/// Lines and columns are 1-based; an issue that is not tied to a location,
/// such as a missing file, reports `0:0`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XmlIssue {
    pub severity: Severity,
    pub message: String,
    pub line: usize,
    pub column: usize,
}

impl XmlIssue {
    pub fn error(message: impl Into<String>, line: usize, column: usize) -> Self {
        Self {
            severity: Severity::Error,
            message: message.into(),
            line,
            column,
        }
    }

    pub(crate) fn unlocated(message: impl Into<String>) -> Self {
        Self::error(message, 0, 0)
    }
}

impl fmt::Display for XmlIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}: {}", self.line, self.column, self.message)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Validation {
    Valid,
    Invalid(XmlIssue),
}

impl Validation {
    pub fn is_valid(&self) -> bool {
        matches!(self, Validation::Valid)
    }

    pub fn issue(&self) -> Option<&XmlIssue> {
        match self {
            Validation::Valid => None,
            Validation::Invalid(issue) => Some(issue),
        }
    }
}

impl From<Result<(), XmlIssue>> for Validation {
    fn from(result: Result<(), XmlIssue>) -> Self {
        match result {
            Ok(()) => Validation::Valid,
            Err(issue) => Validation::Invalid(issue),
        }
    }
}

/// Where XML content comes from
#[derive(Debug, Clone, Copy)]
pub enum XmlInput<'a> {
    Memory(&'a str),
    File(&'a Path),
}

impl<'a> XmlInput<'a> {
    /// Load the content.
    ///
    /// Blank content and empty paths fail with `InvalidArgument` naming
    /// `name`. A file that does not exist is not an error: it is reported as
    /// the inner `Err` issue so callers can surface it as a failed validation.
    pub(crate) fn load(
        &self,
        name: &'static str,
    ) -> Result<Result<Cow<'a, str>, XmlIssue>, XmlError> {
        match *self {
            XmlInput::Memory(content) => {
                if !is_not_blank(content) {
                    return Err(XmlError::invalid(name, "content is empty"));
                }
                Ok(Ok(Cow::Borrowed(content)))
            }
            XmlInput::File(path) => {
                if path.as_os_str().is_empty() {
                    return Err(XmlError::invalid(name, "path is empty"));
                }
                if !file_exists(path) {
                    return Ok(Err(XmlIssue::unlocated(format!(
                        "Could not find file '{}'",
                        path.display()
                    ))));
                }
                let bytes = std::fs::read(path).map_err(|source| XmlError::Io {
                    path: path.display().to_string(),
                    source,
                })?;
                let content = decode(&bytes).map_err(|source| XmlError::Decode {
                    path: path.display().to_string(),
                    source,
                })?;
                Ok(Ok(Cow::Owned(content)))
            }
        }
    }
}
