//! Token types shared by the lexer and the parser.

mod graphql_token;
mod graphql_token_kind;

pub use graphql_token::GraphQLToken;
pub use graphql_token_kind::GraphQLTokenKind;
pub(crate) use graphql_token_kind::quote_graphql_string;
