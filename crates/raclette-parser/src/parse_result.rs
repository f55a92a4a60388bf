//! Result type for parsing operations that may produce partial results.

use crate::GraphQLParseError;

/// The result of a parsing operation.
///
/// Unlike `Result<T, E>`, a `ParseResult` can hold both a (recovered) AST and
/// the errors found while producing it, so that every syntax error in a
/// document can be reported in one pass.
///
/// ```
/// # use raclette_parser::GraphQLParser;
/// let result = GraphQLParser::new("{ a } query { b(: 1) }").parse_executable_document();
/// assert!(result.valid_ast().is_none());
/// assert_eq!(result.errors.len(), 1);
/// // The first operation survived recovery.
/// assert_eq!(result.ast().map(|d| d.definitions.len()), Some(1));
/// ```
#[derive(Debug)]
pub struct ParseResult<TAst> {
    ast: Option<TAst>,

    /// Errors encountered during parsing. Empty on success.
    pub errors: Vec<GraphQLParseError>,
}

impl<TAst> ParseResult<TAst> {
    pub(crate) fn ok(ast: TAst) -> Self {
        Self {
            ast: Some(ast),
            errors: Vec::new(),
        }
    }

    pub(crate) fn recovered(ast: TAst, errors: Vec<GraphQLParseError>) -> Self {
        Self {
            ast: Some(ast),
            errors,
        }
    }

    /// Returns the AST only if parsing was completely successful.
    pub fn valid_ast(&self) -> Option<&TAst> {
        if self.errors.is_empty() {
            self.ast.as_ref()
        } else {
            None
        }
    }

    /// Returns the AST if present, regardless of errors.
    pub fn ast(&self) -> Option<&TAst> {
        self.ast.as_ref()
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Converts into a standard `Result`: the AST when there were no errors,
    /// otherwise every error.
    pub fn into_result(self) -> Result<TAst, Vec<GraphQLParseError>> {
        match (self.ast, self.errors.is_empty()) {
            (Some(ast), true) => Ok(ast),
            (_, _) => Err(self.errors),
        }
    }
}
