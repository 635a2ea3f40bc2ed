//! Well-formedness checks and a light element tree
//!
//! [`Document::parse`] reads the content with a namespace-aware reader and
//! keeps only what the schema checks need: resolved element names,
//! attributes and source positions. Comments, processing instructions and
//! text are dropped after being checked.

use std::borrow::Cow;
use std::path::Path;

use quick_xml::NsReader;
use quick_xml::events::{BytesStart, Event};
use quick_xml::name::ResolveResult;
use tracing::debug;

use crate::xml::error::XmlError;
use crate::xml::issue::{Validation, XmlInput, XmlIssue};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    /// Local name; namespace declarations are not kept
    pub name: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    pub namespace: Option<String>,
    /// Local name without any prefix
    pub name: String,
    pub attributes: Vec<Attribute>,
    pub children: Vec<Element>,
    pub line: usize,
    pub column: usize,
}

impl Element {
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|attribute| attribute.name == name)
            .map(|attribute| attribute.value.as_str())
    }

    /// This element and everything below it, in document order
    pub fn descendants(&self) -> Descendants<'_> {
        Descendants { stack: vec![self] }
    }

    pub(crate) fn issue(&self, message: impl Into<String>) -> XmlIssue {
        XmlIssue::error(message, self.line, self.column)
    }
}

pub struct Descendants<'a> {
    stack: Vec<&'a Element>,
}

impl<'a> Iterator for Descendants<'a> {
    type Item = &'a Element;

    fn next(&mut self) -> Option<Self::Item> {
        let element = self.stack.pop()?;
        self.stack.extend(element.children.iter().rev());
        Some(element)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    pub root: Element,
}

impl Document {
    /// Parse a complete document, reporting the first well-formedness error
    pub fn parse(content: &str) -> Result<Self, XmlIssue> {
        let mut reader = NsReader::from_str(content);
        let mut open: Vec<Element> = Vec::new();
        let mut root: Option<Element> = None;

        loop {
            let (line, column) = location(content, reader.buffer_position());
            let at = |message: String| XmlIssue::error(message, line, column);

            let (namespace, event) = match reader.read_resolved_event() {
                Ok(resolved) => resolved,
                Err(e) => {
                    let (line, column) = location(content, reader.error_position());
                    return Err(XmlIssue::error(e.to_string(), line, column));
                }
            };

            match event {
                Event::Start(start) | Event::Empty(start)
                    if open.is_empty() && root.is_some() =>
                {
                    return Err(at(format!(
                        "Unexpected element '{}': the document already has a root element",
                        String::from_utf8_lossy(start.local_name().as_ref())
                    )));
                }
                Event::Start(start) => {
                    let element = read_element(namespace, &start, line, column).map_err(at)?;
                    open.push(element);
                }
                Event::Empty(start) => {
                    let element = read_element(namespace, &start, line, column).map_err(at)?;
                    attach(&mut open, &mut root, element);
                }
                Event::End(end) => {
                    let element = open.pop().ok_or_else(|| {
                        at(format!(
                            "Unexpected end tag '{}'",
                            String::from_utf8_lossy(end.local_name().as_ref())
                        ))
                    })?;
                    attach(&mut open, &mut root, element);
                }
                Event::Text(text) if open.is_empty() => {
                    if text.iter().any(|b| !b.is_ascii_whitespace()) {
                        return Err(at("Data at the root level is invalid".to_string()));
                    }
                }
                Event::Text(text) => {
                    text.unescape().map_err(|e| at(e.to_string()))?;
                }
                Event::CData(_) if open.is_empty() => {
                    return Err(at("CDATA is not allowed at the root level".to_string()));
                }
                Event::Eof => break,
                _ => {}
            }
        }

        if let Some(element) = open.last() {
            let (line, column) = location(content, content.len());
            return Err(XmlIssue::error(
                format!(
                    "Unexpected end of file: element '{}' opened at {}:{} is not closed",
                    element.name, element.line, element.column
                ),
                line,
                column,
            ));
        }

        root.map(|root| Document { root })
            .ok_or_else(|| XmlIssue::error("Root element is missing", 1, 1))
    }

    /// Load and parse; missing files and parse failures are reported as the
    /// inner issue
    pub(crate) fn load(
        input: XmlInput<'_>,
        name: &'static str,
    ) -> Result<Result<Document, XmlIssue>, XmlError> {
        Ok(input
            .load(name)?
            .and_then(|content: Cow<'_, str>| Document::parse(&content)))
    }
}

fn read_element(
    namespace: ResolveResult<'_>,
    start: &BytesStart<'_>,
    line: usize,
    column: usize,
) -> Result<Element, String> {
    let name = String::from_utf8_lossy(start.local_name().as_ref()).into_owned();
    let namespace = match namespace {
        ResolveResult::Bound(namespace) => {
            Some(String::from_utf8_lossy(namespace.as_ref()).into_owned())
        }
        ResolveResult::Unbound => None,
        ResolveResult::Unknown(prefix) => {
            return Err(format!(
                "Namespace prefix '{}' on element '{}' is not declared",
                String::from_utf8_lossy(&prefix),
                name
            ));
        }
    };

    let mut attributes = Vec::new();
    for attribute in start.attributes() {
        let attribute = attribute.map_err(|e| e.to_string())?;
        if attribute.key.as_namespace_binding().is_some() {
            continue;
        }
        let value = attribute.unescape_value().map_err(|e| e.to_string())?;
        attributes.push(Attribute {
            name: String::from_utf8_lossy(attribute.key.local_name().as_ref()).into_owned(),
            value: value.into_owned(),
        });
    }

    Ok(Element {
        namespace,
        name,
        attributes,
        children: Vec::new(),
        line,
        column,
    })
}

fn attach(open: &mut [Element], root: &mut Option<Element>, element: Element) {
    match open.last_mut() {
        Some(parent) => parent.children.push(element),
        None => *root = Some(element),
    }
}

/// 1-based line and column of a byte offset, the column counted in characters
fn location(content: &str, offset: impl TryInto<usize>) -> (usize, usize) {
    let offset = offset.try_into().unwrap_or(usize::MAX).min(content.len());
    let before = &content.as_bytes()[..offset];
    let line = before.iter().filter(|&&b| b == b'\n').count() + 1;
    let line_start = before.iter().rposition(|&b| b == b'\n').map_or(0, |newline| newline + 1);
    // UTF-8 continuation bytes do not start a character
    let column = before[line_start..]
        .iter()
        .filter(|&&b| b & 0xC0 != 0x80)
        .count()
        + 1;
    (line, column)
}

/// Check that the input is a well-formed XML document
pub fn verify(input: XmlInput<'_>) -> Result<Validation, XmlError> {
    let validation = Validation::from(Document::load(input, "xml")?.map(|_| ()));
    if let Validation::Invalid(issue) = &validation {
        debug!("XML document rejected: {}", issue);
    }
    Ok(validation)
}

pub fn verify_in_memory(content: &str) -> Result<Validation, XmlError> {
    verify(XmlInput::Memory(content))
}

pub fn verify_file(path: impl AsRef<Path>) -> Result<Validation, XmlError> {
    verify(XmlInput::File(path.as_ref()))
}
