use crate::loc;
use crate::types::DirectiveAnnotation;
use raclette_parser::ast;

/// A custom scalar type. Its input and output rules come from the
/// [`ScalarImpl`](crate::coercion::ScalarImpl) registered under its name.
#[derive(Clone, Debug, PartialEq)]
pub struct ScalarType {
    pub(crate) def_location: loc::SchemaDefLocation,
    pub(crate) description: Option<String>,
    pub(crate) directives: Vec<DirectiveAnnotation>,
    pub(crate) name: String,
}
impl ScalarType {
    pub fn def_location(&self) -> &loc::SchemaDefLocation {
        &self.def_location
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn directives(&self) -> &[DirectiveAnnotation] {
        &self.directives
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The `url` of a `@specifiedBy` annotation.
    pub fn specified_by_url(&self) -> Option<&str> {
        let annot = self.directives.iter().find(|d| d.name() == "specifiedBy")?;
        match annot.arguments().get("url") {
            Some(ast::Value::String(url)) => Some(url),
            _ => None,
        }
    }
}
