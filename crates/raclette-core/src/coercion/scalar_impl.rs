use crate::Value;
use raclette_parser::ast;
use thiserror::Error;

/// Why a custom scalar rejected a value.
#[derive(Clone, Debug, Error, PartialEq)]
#[error("{message}")]
pub struct ScalarError {
    message: String,
}
impl ScalarError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

/// The input and output rules of a custom scalar type, registered with
/// [`SchemaBuilder::register_scalar`](crate::schema::SchemaBuilder::register_scalar).
///
/// ```
/// use raclette_core::coercion::{ScalarError, ScalarImpl};
/// use raclette_core::Value;
/// use raclette_parser::ast;
///
/// struct Date;
/// impl ScalarImpl for Date {
///     fn serialize(&self, value: &Value) -> Result<Value, ScalarError> {
///         match value {
///             Value::String(s) => Ok(Value::String(s.clone())),
///             other => Err(ScalarError::new(format!("{other} is not a date"))),
///         }
///     }
///
///     fn parse_value(&self, value: &Value) -> Result<Value, ScalarError> {
///         self.serialize(value)
///     }
///
///     fn parse_literal(&self, literal: &ast::Value) -> Result<Value, ScalarError> {
///         match literal {
///             ast::Value::String(s) => Ok(Value::String(s.clone())),
///             _ => Err(ScalarError::new("Expected a date string")),
///         }
///     }
/// }
/// ```
pub trait ScalarImpl: Send + Sync {
    /// Converts a resolved value into its response representation.
    fn serialize(&self, value: &Value) -> Result<Value, ScalarError>;

    /// Converts an externally supplied variable value into an internal value.
    fn parse_value(&self, value: &Value) -> Result<Value, ScalarError>;

    /// Converts a literal from the document into an internal value. Variables
    /// have already been substituted.
    fn parse_literal(&self, literal: &ast::Value) -> Result<Value, ScalarError>;
}
