//! Structural XML Schema checks
//!
//! Only the parts of XSD that describe document shape are understood:
//! element declarations (top-level and local, named or by `ref`), named
//! complex types referenced through `type`, child occurrence through
//! `minOccurs`, element namespaces through `elementFormDefault` and `form`,
//! required attributes and the `xs:any` wildcard. Simple type facets,
//! `maxOccurs` and content-model ordering are not checked, and members of an
//! `xs:choice` are never individually required.

use std::collections::{HashMap, HashSet};
use std::path::Path;

use tracing::debug;

use crate::xml::document::{Document, Element};
use crate::xml::error::XmlError;
use crate::xml::issue::{Validation, XmlInput, XmlIssue};

pub const XSD_NAMESPACE: &str = "http://www.w3.org/2001/XMLSchema";

/// Attributes and child elements allowed by a complex type
#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct ComplexRule {
    required_attributes: Vec<String>,
    children: Vec<ChildRule>,
    /// `xs:any` appears in the content model
    wildcard: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Content {
    /// No type at all: any content is accepted
    Any,
    /// A simple or unknown type: no child elements
    Simple,
    Complex(ComplexRule),
    /// A top-level `xs:complexType` by name
    Named(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum ChildDeclaration {
    Local(Content),
    /// A top-level `xs:element` by name
    Ref(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct ChildRule {
    name: String,
    /// Effective minimum, zero when an enclosing compositor is optional
    min_occurs: u64,
    qualified: bool,
    declaration: ChildDeclaration,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schema {
    target_namespace: Option<String>,
    top_level: HashMap<String, Content>,
    complex_types: HashMap<String, ComplexRule>,
}

fn is_xsd(element: &Element, name: &str) -> bool {
    element.namespace.as_deref() == Some(XSD_NAMESPACE) && element.name == name
}

/// Strip an optional `prefix:` from a QName attribute value
fn local_part(qname: &str) -> &str {
    qname.rsplit_once(':').map_or(qname, |(_, local)| local)
}

fn min_occurs(element: &Element) -> Result<u64, XmlIssue> {
    match element.attribute("minOccurs") {
        None => Ok(1),
        Some(value) => value.trim().parse().map_err(|_| {
            element.issue(format!("The minOccurs value '{}' is not a valid count", value))
        }),
    }
}

/// Builds rules from declarations once the named complex types are known
struct Builder<'a> {
    type_names: &'a HashSet<String>,
    qualified_default: bool,
    refs: Vec<&'a Element>,
}

impl<'a> Builder<'a> {
    fn content(&mut self, declaration: &'a Element) -> Result<Content, XmlIssue> {
        if let Some(type_name) = declaration.attribute("type") {
            let type_name = local_part(type_name);
            return Ok(if self.type_names.contains(type_name) {
                Content::Named(type_name.to_string())
            } else {
                Content::Simple
            });
        }
        match declaration.children.iter().find(|child| is_xsd(child, "complexType")) {
            Some(complex_type) => Ok(Content::Complex(self.complex(complex_type)?)),
            None if declaration.children.iter().any(|child| is_xsd(child, "simpleType")) => {
                Ok(Content::Simple)
            }
            None => Ok(Content::Any),
        }
    }

    fn complex(&mut self, complex_type: &'a Element) -> Result<ComplexRule, XmlIssue> {
        let mut rule = ComplexRule::default();
        self.collect(complex_type, true, &mut rule)?;
        rule.required_attributes.sort();
        Ok(rule)
    }

    fn collect(
        &mut self,
        parent: &'a Element,
        required: bool,
        rule: &mut ComplexRule,
    ) -> Result<(), XmlIssue> {
        for node in &parent.children {
            if is_xsd(node, "element") {
                rule.children.push(self.child(node, required)?);
            } else if is_xsd(node, "any") {
                rule.wildcard = true;
            } else if is_xsd(node, "attribute") {
                if node.attribute("use") == Some("required") {
                    if let Some(name) = node.attribute("name").or(node.attribute("ref")) {
                        rule.required_attributes.push(local_part(name).to_string());
                    }
                }
            } else if is_xsd(node, "choice") {
                self.collect(node, false, rule)?;
            } else if is_xsd(node, "sequence") || is_xsd(node, "all") {
                let required = required && min_occurs(node)? > 0;
                self.collect(node, required, rule)?;
            } else {
                self.collect(node, required, rule)?;
            }
        }
        Ok(())
    }

    fn child(&mut self, node: &'a Element, required: bool) -> Result<ChildRule, XmlIssue> {
        let min_occurs = if required { min_occurs(node)? } else { 0 };
        match (node.attribute("name"), node.attribute("ref")) {
            (Some(name), _) => {
                let qualified = match node.attribute("form") {
                    Some(form) => form == "qualified",
                    None => self.qualified_default,
                };
                Ok(ChildRule {
                    name: name.to_string(),
                    min_occurs,
                    qualified,
                    declaration: ChildDeclaration::Local(self.content(node)?),
                })
            }
            (None, Some(reference)) => {
                self.refs.push(node);
                Ok(ChildRule {
                    name: local_part(reference).to_string(),
                    min_occurs,
                    qualified: true,
                    declaration: ChildDeclaration::Ref(local_part(reference).to_string()),
                })
            }
            (None, None) => {
                Err(node.issue("An element declaration must have a 'name' or 'ref' attribute"))
            }
        }
    }
}

impl Schema {
    pub fn parse(content: &str) -> Result<Self, XmlIssue> {
        Self::from_document(&Document::parse(content)?)
    }

    pub(crate) fn load(input: XmlInput<'_>) -> Result<Result<Self, XmlIssue>, XmlError> {
        Ok(Document::load(input, "schema")?.and_then(|document| Self::from_document(&document)))
    }

    fn from_document(document: &Document) -> Result<Self, XmlIssue> {
        let root = &document.root;
        if !is_xsd(root, "schema") {
            return Err(root.issue(format!(
                "Expected root element 'schema' in namespace '{}', found '{}'",
                XSD_NAMESPACE, root.name
            )));
        }

        let type_names: HashSet<String> = root
            .children
            .iter()
            .filter(|child| is_xsd(child, "complexType"))
            .filter_map(|child| child.attribute("name"))
            .map(str::to_string)
            .collect();
        let mut builder = Builder {
            type_names: &type_names,
            qualified_default: root.attribute("elementFormDefault") == Some("qualified"),
            refs: Vec::new(),
        };

        let mut schema = Schema {
            target_namespace: root
                .attribute("targetNamespace")
                .filter(|namespace| !namespace.is_empty())
                .map(str::to_string),
            top_level: HashMap::new(),
            complex_types: HashMap::new(),
        };

        for child in &root.children {
            if is_xsd(child, "element") {
                let name = child
                    .attribute("name")
                    .filter(|name| !name.is_empty())
                    .ok_or_else(|| child.issue("A top-level element declaration must have a name"))?;
                let content = builder.content(child)?;
                schema.top_level.insert(name.to_string(), content);
            } else if is_xsd(child, "complexType") {
                if let Some(name) = child.attribute("name") {
                    let rule = builder.complex(child)?;
                    schema.complex_types.insert(name.to_string(), rule);
                }
            }
        }

        if let Some(unresolved) = builder.refs.iter().find(|node| {
            node.attribute("ref")
                .is_some_and(|reference| !schema.top_level.contains_key(local_part(reference)))
        }) {
            return Err(unresolved.issue(format!(
                "The referenced element '{}' is not declared",
                unresolved.attribute("ref").unwrap_or_default()
            )));
        }

        Ok(schema)
    }

    pub fn target_namespace(&self) -> Option<&str> {
        self.target_namespace.as_deref()
    }

    /// Check a parsed document against the schema, reporting the first issue
    pub fn validate(&self, document: &Document) -> Validation {
        let root = &document.root;
        let Some(content) = self.top_level.get(&root.name) else {
            return Validation::Invalid(
                root.issue(format!("The '{}' element is not declared", root.name)),
            );
        };
        if root.namespace != self.target_namespace {
            return Validation::Invalid(root.issue(format!(
                "The '{}' element is in namespace '{}', expected '{}'",
                root.name,
                root.namespace.as_deref().unwrap_or_default(),
                self.target_namespace.as_deref().unwrap_or_default()
            )));
        }

        self.check_element(root, content).into()
    }

    fn check_element(&self, element: &Element, content: &Content) -> Result<(), XmlIssue> {
        match content {
            Content::Any => Ok(()),
            Content::Simple => match element.children.first() {
                Some(child) => Err(child.issue(format!(
                    "The '{}' element is not expected in '{}'",
                    child.name, element.name
                ))),
                None => Ok(()),
            },
            Content::Complex(rule) => self.check_complex(element, rule),
            Content::Named(name) => match self.complex_types.get(name) {
                Some(rule) => self.check_complex(element, rule),
                None => Ok(()),
            },
        }
    }

    fn expected_namespace(&self, rule: &ChildRule) -> Option<&str> {
        if rule.qualified {
            self.target_namespace.as_deref()
        } else {
            None
        }
    }

    fn matches(&self, rule: &ChildRule, element: &Element) -> bool {
        rule.name == element.name && element.namespace.as_deref() == self.expected_namespace(rule)
    }

    fn check_complex(&self, element: &Element, rule: &ComplexRule) -> Result<(), XmlIssue> {
        if let Some(missing) = rule
            .required_attributes
            .iter()
            .find(|attribute| element.attribute(attribute).is_none())
        {
            return Err(element.issue(format!(
                "The required attribute '{}' is missing on '{}'",
                missing, element.name
            )));
        }

        for child in &element.children {
            let Some(child_rule) = rule.children.iter().find(|r| self.matches(r, child)) else {
                if rule.wildcard {
                    continue;
                }
                if let Some(declared) = rule.children.iter().find(|r| r.name == child.name) {
                    return Err(child.issue(format!(
                        "The '{}' element is in namespace '{}', expected '{}'",
                        child.name,
                        child.namespace.as_deref().unwrap_or_default(),
                        self.expected_namespace(declared).unwrap_or_default()
                    )));
                }
                return Err(child.issue(format!(
                    "The '{}' element is not expected in '{}'",
                    child.name, element.name
                )));
            };
            let content = match &child_rule.declaration {
                ChildDeclaration::Local(content) => Some(content),
                ChildDeclaration::Ref(name) => self.top_level.get(name),
            };
            if let Some(content) = content {
                self.check_element(child, content)?;
            }
        }

        for child_rule in rule.children.iter().filter(|r| r.min_occurs > 0) {
            let found = element
                .children
                .iter()
                .filter(|child| self.matches(child_rule, child))
                .count() as u64;
            if found < child_rule.min_occurs {
                return Err(element.issue(format!(
                    "The '{}' element is missing the required child '{}'",
                    element.name, child_rule.name
                )));
            }
        }

        Ok(())
    }
}

/// Check that the input is a usable schema
pub fn verify(input: XmlInput<'_>) -> Result<Validation, XmlError> {
    let validation = Validation::from(Schema::load(input)?.map(|_| ()));
    if let Validation::Invalid(issue) = &validation {
        debug!("XML schema rejected: {}", issue);
    }
    Ok(validation)
}

pub fn verify_in_memory(content: &str) -> Result<Validation, XmlError> {
    verify(XmlInput::Memory(content))
}

pub fn verify_file(path: impl AsRef<Path>) -> Result<Validation, XmlError> {
    verify(XmlInput::File(path.as_ref()))
}
