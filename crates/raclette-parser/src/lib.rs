//! A GraphQL parsing library for executable documents (operations and
//! fragments) and schema documents (type-system definitions and extensions).
//!
//! The lexer ([`token_source::StrGraphQLTokenSource`]) produces zero-copy
//! tokens borrowed from the source text. The parser ([`GraphQLParser`])
//! consumes them through a lookahead buffer ([`GraphQLTokenStream`]) and
//! produces an owned [`ast::Document`] that can be shared freely across
//! threads once parsed.
//!
//! ```
//! let doc = raclette_parser::parse_query("{ recipe(id: 1) { name } }")
//!     .expect("document is valid");
//! assert_eq!(doc.definitions.len(), 1);
//! ```

pub mod ast;
mod graphql_parse_error;
mod graphql_parse_error_kind;
mod graphql_parser;
mod graphql_source_span;
mod graphql_string_parsing_error;
mod graphql_token_stream;
mod parse_result;
mod printer;
mod source_position;
pub mod token;
pub mod token_source;

pub use graphql_parse_error::GraphQLParseError;
pub use graphql_parse_error_kind::GraphQLParseErrorKind;
pub use graphql_parse_error_kind::InvalidValueReason;
pub use graphql_parser::GraphQLParser;
pub use graphql_source_span::GraphQLSourceSpan;
pub use graphql_string_parsing_error::GraphQLStringParsingError;
pub use graphql_token_stream::GraphQLTokenStream;
pub use parse_result::ParseResult;
pub use printer::GraphQLPrinter;
pub use smallvec::smallvec;
pub use smallvec::SmallVec;
pub use source_position::SourcePosition;

/// Parse an executable document (operations and fragments), returning every
/// syntax error encountered when the document is invalid.
pub fn parse_query(source: &str) -> Result<ast::Document, Vec<GraphQLParseError>> {
    GraphQLParser::new(source)
        .parse_executable_document()
        .into_result()
}

/// Parse a schema document (type-system definitions and extensions),
/// returning every syntax error encountered when the document is invalid.
pub fn parse_schema(source: &str) -> Result<ast::Document, Vec<GraphQLParseError>> {
    GraphQLParser::new(source)
        .parse_schema_document()
        .into_result()
}

#[cfg(test)]
mod tests;
