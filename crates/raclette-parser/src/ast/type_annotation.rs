use crate::GraphQLPrinter;
use crate::ast::AstNode;
use inherent::inherent;

/// A type reference as written in a document: `Recipe`, `[Recipe!]!`.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub enum Type {
    Named(String),
    List(Box<Type>),
    NonNull(Box<Type>),
}

impl Type {
    /// The innermost named type.
    pub fn innermost_name(&self) -> &str {
        match self {
            Type::Named(name) => name,
            Type::List(inner) | Type::NonNull(inner) => inner.innermost_name(),
        }
    }

    pub fn is_non_null(&self) -> bool {
        matches!(self, Type::NonNull(_))
    }
}

#[inherent]
impl AstNode for Type {
    pub fn append_graphql(&self, printer: &mut GraphQLPrinter) {
        match self {
            Type::Named(name) => printer.write(name),
            Type::List(inner) => {
                printer.write("[");
                inner.append_graphql(printer);
                printer.write("]");
            }
            Type::NonNull(inner) => {
                inner.append_graphql(printer);
                printer.write("!");
            }
        }
    }
}

impl std::fmt::Display for Type {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_graphql_string())
    }
}
