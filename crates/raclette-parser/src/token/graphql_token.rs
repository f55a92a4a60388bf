use crate::GraphQLSourceSpan;
use crate::token::GraphQLTokenKind;

/// A GraphQL token with its source span.
///
/// Insignificant tokens (whitespace, commas, comments, a leading BOM) are
/// dropped by the lexer and never reach the parser.
#[derive(Clone, Debug, PartialEq)]
pub struct GraphQLToken<'src> {
    /// The kind of token (including `Error` for lexer errors).
    pub kind: GraphQLTokenKind<'src>,

    pub span: GraphQLSourceSpan,
}

impl<'src> GraphQLToken<'src> {
    pub fn new(kind: GraphQLTokenKind<'src>, span: GraphQLSourceSpan) -> Self {
        Self { kind, span }
    }
}
