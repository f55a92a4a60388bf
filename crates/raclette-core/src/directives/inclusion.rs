use crate::Value;
use indexmap::IndexMap;
use raclette_parser::ast;

/// One `@skip(if:)` or `@include(if:)` guarding a selection.
///
/// The `if` argument is kept as written so the condition can be evaluated
/// against each execution's variables.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct InclusionCondition {
    condition: ast::Value,
    skip: bool,
}
impl InclusionCondition {
    pub(crate) fn from_directives(directives: &[ast::DirectiveAnnotation]) -> impl Iterator<Item = Self> + '_ {
        directives.iter().filter_map(|directive| {
            let skip = match directive.name.as_str() {
                "skip" => true,
                "include" => false,
                _ => return None,
            };
            let condition = directive
                .argument("if")
                .map(|arg| arg.value.clone())
                .unwrap_or(ast::Value::Boolean(false));
            Some(Self { condition, skip })
        })
    }

    /// An `if` that is neither a boolean literal nor a boolean variable
    /// counts as `false`.
    fn is_satisfied(&self, variables: &IndexMap<String, Value>) -> bool {
        let condition = match &self.condition {
            ast::Value::Boolean(b) => *b,
            ast::Value::Variable(name) => variables
                .get(name)
                .and_then(Value::as_bool)
                .unwrap_or(false),
            _ => false,
        };
        condition != self.skip
    }
}

/// Whether a selection guarded by `conditions` is part of the response.
pub(crate) fn is_included(conditions: &[InclusionCondition], variables: &IndexMap<String, Value>) -> bool {
    conditions.iter().all(|condition| condition.is_satisfied(variables))
}
