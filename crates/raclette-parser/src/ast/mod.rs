//! Owned AST types for parsed GraphQL documents.
//!
//! Every node owns its strings, so a parsed [`Document`] has no lifetime
//! ties to the source text and can be shared behind an `Arc` across
//! executions. Each node carries the 1-based [`AstPos`] where it starts.
//!
//! Nodes implement [`AstNode`], which renders them back to normalized
//! GraphQL text:
//!
//! ```rust
//! let doc = raclette_parser::parse_query("query Q{recipe(id:1){name}}").unwrap();
//! assert_eq!(
//!     doc.to_graphql_string(),
//!     "query Q {\n  recipe(id: 1) {\n    name\n  }\n}\n",
//! );
//! ```

mod ast_node;
mod directive_location;
mod document;
mod executable;
mod type_annotation;
mod type_system;
mod value;

pub use ast_node::AstNode;
pub use directive_location::DirectiveLocation;
pub use document::Definition;
pub use document::Document;
pub use executable::Argument;
pub use executable::DirectiveAnnotation;
pub use executable::Field;
pub use executable::FragmentDefinition;
pub use executable::FragmentSpread;
pub use executable::InlineFragment;
pub use executable::OperationDefinition;
pub use executable::OperationKind;
pub use executable::Selection;
pub use executable::SelectionSet;
pub use executable::VariableDefinition;
pub use type_annotation::Type;
pub use type_system::DirectiveDefinition;
pub use type_system::EnumTypeDefinition;
pub use type_system::EnumValueDefinition;
pub use type_system::FieldDefinition;
pub use type_system::InputObjectTypeDefinition;
pub use type_system::InputValueDefinition;
pub use type_system::InterfaceTypeDefinition;
pub use type_system::ObjectTypeDefinition;
pub use type_system::ScalarTypeDefinition;
pub use type_system::SchemaDefinition;
pub use type_system::TypeDefinition;
pub use type_system::UnionTypeDefinition;
pub use value::Value;

/// A 1-based line/column position in the source text.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct AstPos {
    pub line: usize,
    pub column: usize,
}

impl std::fmt::Display for AstPos {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

#[cfg(test)]
mod tests;
