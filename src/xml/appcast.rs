//! Appcast verification: well-formedness, optionally followed by a schema check

use tracing::debug;

use crate::xml::document::Document;
use crate::xml::error::XmlError;
use crate::xml::issue::{Validation, XmlInput};
use crate::xml::schema::Schema;

/// Verify an appcast, against `schema` when one is given.
///
/// The document is checked before the schema is loaded, so a malformed
/// document is reported even when the schema is unusable too.
pub fn verify(xml: XmlInput<'_>, schema: Option<XmlInput<'_>>) -> Result<Validation, XmlError> {
    let document = match Document::load(xml, "xml")? {
        Ok(document) => document,
        Err(issue) => {
            debug!("Appcast is not well-formed: {}", issue);
            return Ok(Validation::Invalid(issue));
        }
    };

    let Some(schema) = schema else {
        return Ok(Validation::Valid);
    };

    let schema = match Schema::load(schema)? {
        Ok(schema) => schema,
        Err(issue) => {
            debug!("Appcast schema is unusable: {}", issue);
            return Ok(Validation::Invalid(issue));
        }
    };

    let validation = schema.validate(&document);
    if let Validation::Invalid(issue) = &validation {
        debug!("Appcast does not match its schema: {}", issue);
    }
    Ok(validation)
}
