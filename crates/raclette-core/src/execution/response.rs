use crate::Value;
use crate::execution::GraphQLError;
use indexmap::IndexMap;
use serde::Serialize;

/// The result of executing a request.
///
/// `data` is `None` only when the request failed before execution started
/// (syntax, validation, variable coercion or operation selection errors);
/// a field error that bubbles up to the root leaves `Some(Value::Null)`.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct Response {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<GraphQLError>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extensions: Option<IndexMap<String, Value>>,
}
impl Response {
    /// A response for a request that never reached execution.
    pub fn from_errors(errors: Vec<GraphQLError>) -> Self {
        Self {
            data: None,
            errors,
            extensions: None,
        }
    }

    pub fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or(serde_json::Value::Null)
    }
}
