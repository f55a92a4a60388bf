//! Static validation of executable documents against a
//! [`Schema`](crate::schema::Schema).
//!
//! A document that produces no [`ValidationError`] can be executed; the
//! executor relies on it, e.g. it never meets an undefined field or an
//! unknown fragment.

mod document_validator;
mod overlapping_fields;
mod selection_rules;
mod validation_error;
mod variable_rules;

pub(crate) use document_validator::DocumentValidator;
pub use validation_error::ValidationError;
pub use validation_error::ValidationRule;

use crate::schema::Schema;
use raclette_parser::ast;

/// Checks `document` against every validation rule. An empty result means
/// the document is executable.
pub fn validate(schema: &Schema, document: &ast::Document) -> Vec<ValidationError> {
    DocumentValidator::new(schema, document).validate()
}

#[cfg(test)]
mod tests;
