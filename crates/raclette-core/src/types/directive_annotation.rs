use indexmap::IndexMap;
use raclette_parser::ast;

/// The default `reason` of `@deprecated`.
pub const DEFAULT_DEPRECATION_REASON: &str = "Deprecated";

/// A directive applied to a schema element, e.g. the `@deprecated` on
/// `oldName: String @deprecated(reason: "Use `name`")`.
///
/// Arguments are kept as the literals written in the schema; they are
/// coerced against the directive definition when a hook runs.
#[derive(Clone, Debug, PartialEq)]
pub struct DirectiveAnnotation {
    pub(crate) arguments: IndexMap<String, ast::Value>,
    pub(crate) name: String,
}
impl DirectiveAnnotation {
    pub(crate) fn from_ast(annot: &ast::DirectiveAnnotation) -> Self {
        Self {
            arguments: annot
                .arguments
                .iter()
                .map(|arg| (arg.name.clone(), arg.value.clone()))
                .collect(),
            name: annot.name.clone(),
        }
    }

    pub fn arguments(&self) -> &IndexMap<String, ast::Value> {
        &self.arguments
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

/// The deprecation reason carried by a `@deprecated` annotation in
/// `directives`, if any.
pub(crate) fn deprecation_reason(directives: &[DirectiveAnnotation]) -> Option<&str> {
    let deprecated = directives.iter().find(|d| d.name == "deprecated")?;
    match deprecated.arguments.get("reason") {
        Some(ast::Value::String(reason)) => Some(reason),
        _ => Some(DEFAULT_DEPRECATION_REASON),
    }
}
