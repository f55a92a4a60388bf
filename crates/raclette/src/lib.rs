pub use raclette_core::*;

/// The GraphQL lexer, parser and AST the engine is built on (e.g. to
/// pre-parse or print documents).
pub mod parser {
    pub use raclette_parser::*;
}

#[cfg(test)]
mod tests;
