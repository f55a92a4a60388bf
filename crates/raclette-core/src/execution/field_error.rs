use crate::Value;
use indexmap::IndexMap;

/// An error returned by a resolver, a directive hook or a subscription
/// source.
///
/// Any [`Display`](std::fmt::Display) error converts into a `FieldError`,
/// so resolvers can use `?` on their own error types:
///
/// ```
/// use raclette_core::execution::FieldError;
///
/// fn parse_servings(raw: &str) -> Result<i64, FieldError> {
///     Ok(raw.parse::<i64>()?)
/// }
/// assert_eq!(parse_servings("x").unwrap_err().message(), "invalid digit found in string");
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct FieldError {
    pub(crate) extensions: Option<IndexMap<String, Value>>,
    pub(crate) message: String,
}
impl FieldError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            extensions: None,
            message: message.into(),
        }
    }

    /// Adds a machine-readable entry to the error's `extensions`.
    pub fn with_extension(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.extensions
            .get_or_insert_with(IndexMap::new)
            .insert(key.into(), value.into());
        self
    }

    pub fn extensions(&self) -> Option<&IndexMap<String, Value>> {
        self.extensions.as_ref()
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}
impl<T: std::fmt::Display> std::convert::From<T> for FieldError {
    fn from(err: T) -> Self {
        Self::new(err.to_string())
    }
}
