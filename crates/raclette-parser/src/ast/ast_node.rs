use crate::GraphQLPrinter;

/// Trait implemented by all AST node types. Renders a node back into
/// GraphQL text.
///
/// Node types implement this via `#[inherent] impl AstNode`, so
/// `append_graphql()` is callable without importing the trait while generic
/// utilities can still bound on `AstNode`.
///
/// Rendering is normalized rather than lossless: comments, commas and
/// original spacing are dropped, and strings are re-escaped. Parsing the
/// output yields the same AST (modulo positions).
pub trait AstNode {
    fn append_graphql(&self, printer: &mut GraphQLPrinter);

    fn to_graphql_string(&self) -> String {
        let mut printer = GraphQLPrinter::new();
        self.append_graphql(&mut printer);
        printer.finish()
    }
}
