use raclette_parser::ast::AstPos;
use thiserror::Error;

/// The validation rule a [`ValidationError`] comes from.
///
/// https://spec.graphql.org/October2021/#sec-Validation
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum ValidationRule {
    ExecutableDefinitions,
    FieldsOnCorrectType,
    FragmentsOnCompositeTypes,
    KnownArgumentNames,
    KnownDirectives,
    KnownFragmentNames,
    KnownTypeNames,
    LoneAnonymousOperation,
    NoFragmentCycles,
    NoIntrospection,
    NoUndefinedVariables,
    NoUnusedFragments,
    NoUnusedVariables,
    OverlappingFieldsCanBeMerged,
    PossibleFragmentSpreads,
    ProvidedRequiredArguments,
    ScalarLeafs,
    SingleFieldSubscriptions,
    UniqueArgumentNames,
    UniqueDirectivesPerLocation,
    UniqueFragmentNames,
    UniqueOperationNames,
    UniqueVariableNames,
    ValuesOfCorrectType,
    VariablesAreInputTypes,
    VariablesInAllowedPosition,
}

/// A reason the document cannot be executed.
#[derive(Clone, Debug, Error, PartialEq)]
#[error("{message}")]
pub struct ValidationError {
    pub(crate) locations: Vec<AstPos>,
    pub(crate) message: String,
    pub(crate) rule: ValidationRule,
}
impl ValidationError {
    pub(crate) fn new(rule: ValidationRule, message: impl Into<String>, locations: Vec<AstPos>) -> Self {
        Self {
            locations,
            message: message.into(),
            rule,
        }
    }

    /// Positions of the offending nodes, most relevant first.
    pub fn locations(&self) -> &[AstPos] {
        &self.locations
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn rule(&self) -> ValidationRule {
        self.rule
    }
}
