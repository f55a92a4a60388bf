use crate::GraphQLPrinter;
use crate::ast::AstNode;
use crate::ast::AstPos;
use crate::ast::DirectiveDefinition;
use crate::ast::FragmentDefinition;
use crate::ast::OperationDefinition;
use crate::ast::SchemaDefinition;
use crate::ast::TypeDefinition;
use inherent::inherent;

/// A parsed GraphQL document: an ordered list of definitions.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Document {
    pub definitions: Vec<Definition>,
}

impl Document {
    pub fn operations(&self) -> impl Iterator<Item = &OperationDefinition> {
        self.definitions.iter().filter_map(|def| match def {
            Definition::Operation(op) => Some(op),
            _ => None,
        })
    }

    pub fn fragments(&self) -> impl Iterator<Item = &FragmentDefinition> {
        self.definitions.iter().filter_map(|def| match def {
            Definition::Fragment(frag) => Some(frag),
            _ => None,
        })
    }

    /// The first fragment definition named `name`.
    pub fn fragment(&self, name: &str) -> Option<&FragmentDefinition> {
        self.fragments().find(|frag| frag.name == name)
    }
}

#[inherent]
impl AstNode for Document {
    pub fn append_graphql(&self, printer: &mut GraphQLPrinter) {
        for (i, definition) in self.definitions.iter().enumerate() {
            if i > 0 {
                printer.newline();
            }
            definition.append_graphql(printer);
            printer.newline();
        }
    }

    pub fn to_graphql_string(&self) -> String {
        let mut printer = GraphQLPrinter::new();
        self.append_graphql(&mut printer);
        printer.finish()
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Definition {
    Operation(OperationDefinition),
    Fragment(FragmentDefinition),
    Schema(SchemaDefinition),
    SchemaExtension(SchemaDefinition),
    Type(TypeDefinition),
    TypeExtension(TypeDefinition),
    Directive(DirectiveDefinition),
}

impl Definition {
    pub fn position(&self) -> AstPos {
        match self {
            Definition::Operation(op) => op.position,
            Definition::Fragment(frag) => frag.position,
            Definition::Schema(schema) | Definition::SchemaExtension(schema) => schema.position,
            Definition::Type(def) | Definition::TypeExtension(def) => def.position(),
            Definition::Directive(def) => def.position,
        }
    }

    /// Operations and fragments; everything else is a type-system
    /// definition.
    pub fn is_executable(&self) -> bool {
        matches!(self, Definition::Operation(_) | Definition::Fragment(_))
    }

    /// A short human-readable description, e.g. "type definition `Recipe`".
    pub fn describe(&self) -> String {
        match self {
            Definition::Operation(op) => match &op.name {
                Some(name) => format!("operation `{name}`"),
                None => "anonymous operation".to_string(),
            },
            Definition::Fragment(frag) => format!("fragment `{}`", frag.name),
            Definition::Schema(_) => "schema definition".to_string(),
            Definition::SchemaExtension(_) => "schema extension".to_string(),
            Definition::Type(def) => format!("type definition `{}`", def.name()),
            Definition::TypeExtension(def) => format!("type extension `{}`", def.name()),
            Definition::Directive(def) => format!("directive definition `@{}`", def.name),
        }
    }
}

#[inherent]
impl AstNode for Definition {
    pub fn append_graphql(&self, printer: &mut GraphQLPrinter) {
        match self {
            Definition::Operation(op) => op.append_graphql(printer),
            Definition::Fragment(frag) => frag.append_graphql(printer),
            Definition::Schema(schema) => schema.append_graphql(printer),
            Definition::SchemaExtension(schema) => {
                printer.write("extend ");
                schema.append_graphql(printer);
            }
            Definition::Type(def) => def.append_graphql(printer),
            Definition::TypeExtension(def) => {
                printer.write("extend ");
                def.append_graphql(printer);
            }
            Definition::Directive(def) => def.append_graphql(printer),
        }
    }
}
