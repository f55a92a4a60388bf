use crate::GraphQLPrinter;
use crate::ast::AstNode;
use crate::ast::AstPos;
use crate::ast::DirectiveAnnotation;
use crate::ast::DirectiveLocation;
use crate::ast::Type;
use crate::ast::Value;
use crate::ast::executable::append_directives;
use crate::token::quote_graphql_string;
use inherent::inherent;

/// `schema { query: Query ... }` or, as an extension, `extend schema ...`.
#[derive(Clone, Debug, PartialEq)]
pub struct SchemaDefinition {
    pub position: AstPos,
    pub directives: Vec<DirectiveAnnotation>,
    pub query: Option<String>,
    pub mutation: Option<String>,
    pub subscription: Option<String>,
}

#[inherent]
impl AstNode for SchemaDefinition {
    pub fn append_graphql(&self, printer: &mut GraphQLPrinter) {
        printer.write("schema");
        append_directives(&self.directives, printer);
        let roots: Vec<(&str, &String)> = [
            ("query", &self.query),
            ("mutation", &self.mutation),
            ("subscription", &self.subscription),
        ]
        .into_iter()
        .filter_map(|(kind, name)| name.as_ref().map(|name| (kind, name)))
        .collect();
        if !roots.is_empty() {
            printer.block(&roots, |p, (kind, name)| {
                p.write(kind);
                p.write(": ");
                p.write(name);
            });
        }
    }
}

/// A named type definition. The same node shape is used for the matching
/// `extend ...` forms.
#[derive(Clone, Debug, PartialEq)]
pub enum TypeDefinition {
    Scalar(ScalarTypeDefinition),
    Object(ObjectTypeDefinition),
    Interface(InterfaceTypeDefinition),
    Union(UnionTypeDefinition),
    Enum(EnumTypeDefinition),
    InputObject(InputObjectTypeDefinition),
}

impl TypeDefinition {
    pub fn name(&self) -> &str {
        match self {
            TypeDefinition::Scalar(def) => &def.name,
            TypeDefinition::Object(def) => &def.name,
            TypeDefinition::Interface(def) => &def.name,
            TypeDefinition::Union(def) => &def.name,
            TypeDefinition::Enum(def) => &def.name,
            TypeDefinition::InputObject(def) => &def.name,
        }
    }

    pub fn position(&self) -> AstPos {
        match self {
            TypeDefinition::Scalar(def) => def.position,
            TypeDefinition::Object(def) => def.position,
            TypeDefinition::Interface(def) => def.position,
            TypeDefinition::Union(def) => def.position,
            TypeDefinition::Enum(def) => def.position,
            TypeDefinition::InputObject(def) => def.position,
        }
    }

    pub fn description(&self) -> Option<&str> {
        match self {
            TypeDefinition::Scalar(def) => def.description.as_deref(),
            TypeDefinition::Object(def) => def.description.as_deref(),
            TypeDefinition::Interface(def) => def.description.as_deref(),
            TypeDefinition::Union(def) => def.description.as_deref(),
            TypeDefinition::Enum(def) => def.description.as_deref(),
            TypeDefinition::InputObject(def) => def.description.as_deref(),
        }
    }

    pub fn directives(&self) -> &[DirectiveAnnotation] {
        match self {
            TypeDefinition::Scalar(def) => &def.directives,
            TypeDefinition::Object(def) => &def.directives,
            TypeDefinition::Interface(def) => &def.directives,
            TypeDefinition::Union(def) => &def.directives,
            TypeDefinition::Enum(def) => &def.directives,
            TypeDefinition::InputObject(def) => &def.directives,
        }
    }

    /// The SDL keyword introducing this kind of type.
    pub fn keyword(&self) -> &'static str {
        match self {
            TypeDefinition::Scalar(_) => "scalar",
            TypeDefinition::Object(_) => "type",
            TypeDefinition::Interface(_) => "interface",
            TypeDefinition::Union(_) => "union",
            TypeDefinition::Enum(_) => "enum",
            TypeDefinition::InputObject(_) => "input",
        }
    }
}

#[inherent]
impl AstNode for TypeDefinition {
    pub fn append_graphql(&self, printer: &mut GraphQLPrinter) {
        append_description(self.description(), printer);
        printer.write(self.keyword());
        printer.write(" ");
        printer.write(self.name());
        match self {
            TypeDefinition::Scalar(def) => append_directives(&def.directives, printer),
            TypeDefinition::Object(def) => {
                append_implements(&def.implements_interfaces, printer);
                append_directives(&def.directives, printer);
                append_fields(&def.fields, printer);
            }
            TypeDefinition::Interface(def) => {
                append_implements(&def.implements_interfaces, printer);
                append_directives(&def.directives, printer);
                append_fields(&def.fields, printer);
            }
            TypeDefinition::Union(def) => {
                append_directives(&def.directives, printer);
                printer.delimited(" = ", " | ", "", &def.members, |p, member| p.write(member));
            }
            TypeDefinition::Enum(def) => {
                append_directives(&def.directives, printer);
                if !def.values.is_empty() {
                    printer.block(&def.values, |p, value| {
                        append_description(value.description.as_deref(), p);
                        p.write(&value.name);
                        append_directives(&value.directives, p);
                    });
                }
            }
            TypeDefinition::InputObject(def) => {
                append_directives(&def.directives, printer);
                if !def.fields.is_empty() {
                    printer.block(&def.fields, |p, field| field.append_graphql(p));
                }
            }
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ScalarTypeDefinition {
    pub position: AstPos,
    pub description: Option<String>,
    pub name: String,
    pub directives: Vec<DirectiveAnnotation>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ObjectTypeDefinition {
    pub position: AstPos,
    pub description: Option<String>,
    pub name: String,
    pub implements_interfaces: Vec<String>,
    pub directives: Vec<DirectiveAnnotation>,
    pub fields: Vec<FieldDefinition>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct InterfaceTypeDefinition {
    pub position: AstPos,
    pub description: Option<String>,
    pub name: String,
    pub implements_interfaces: Vec<String>,
    pub directives: Vec<DirectiveAnnotation>,
    pub fields: Vec<FieldDefinition>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct UnionTypeDefinition {
    pub position: AstPos,
    pub description: Option<String>,
    pub name: String,
    pub directives: Vec<DirectiveAnnotation>,
    pub members: Vec<String>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct EnumTypeDefinition {
    pub position: AstPos,
    pub description: Option<String>,
    pub name: String,
    pub directives: Vec<DirectiveAnnotation>,
    pub values: Vec<EnumValueDefinition>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct EnumValueDefinition {
    pub position: AstPos,
    pub description: Option<String>,
    pub name: String,
    pub directives: Vec<DirectiveAnnotation>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct InputObjectTypeDefinition {
    pub position: AstPos,
    pub description: Option<String>,
    pub name: String,
    pub directives: Vec<DirectiveAnnotation>,
    pub fields: Vec<InputValueDefinition>,
}

/// A field on an object or interface type.
#[derive(Clone, Debug, PartialEq)]
pub struct FieldDefinition {
    pub position: AstPos,
    pub description: Option<String>,
    pub name: String,
    pub arguments: Vec<InputValueDefinition>,
    pub field_type: Type,
    pub directives: Vec<DirectiveAnnotation>,
}

#[inherent]
impl AstNode for FieldDefinition {
    pub fn append_graphql(&self, printer: &mut GraphQLPrinter) {
        append_description(self.description.as_deref(), printer);
        printer.write(&self.name);
        printer.delimited("(", ", ", ")", &self.arguments, |p, arg| arg.append_graphql(p));
        printer.write(": ");
        self.field_type.append_graphql(printer);
        append_directives(&self.directives, printer);
    }
}

/// An argument definition or an input-object field definition.
#[derive(Clone, Debug, PartialEq)]
pub struct InputValueDefinition {
    pub position: AstPos,
    pub description: Option<String>,
    pub name: String,
    pub value_type: Type,
    pub default_value: Option<Value>,
    pub directives: Vec<DirectiveAnnotation>,
}

#[inherent]
impl AstNode for InputValueDefinition {
    pub fn append_graphql(&self, printer: &mut GraphQLPrinter) {
        if let Some(description) = &self.description {
            printer.write(&quote_graphql_string(description));
            printer.write(" ");
        }
        printer.write(&self.name);
        printer.write(": ");
        self.value_type.append_graphql(printer);
        if let Some(default_value) = &self.default_value {
            printer.write(" = ");
            default_value.append_graphql(printer);
        }
        append_directives(&self.directives, printer);
    }
}

/// `directive @name(args) repeatable on LOCATION | ...`
#[derive(Clone, Debug, PartialEq)]
pub struct DirectiveDefinition {
    pub position: AstPos,
    pub description: Option<String>,
    pub name: String,
    pub arguments: Vec<InputValueDefinition>,
    pub repeatable: bool,
    pub locations: Vec<DirectiveLocation>,
}

#[inherent]
impl AstNode for DirectiveDefinition {
    pub fn append_graphql(&self, printer: &mut GraphQLPrinter) {
        append_description(self.description.as_deref(), printer);
        printer.write("directive @");
        printer.write(&self.name);
        printer.delimited("(", ", ", ")", &self.arguments, |p, arg| arg.append_graphql(p));
        if self.repeatable {
            printer.write(" repeatable");
        }
        printer.delimited(" on ", " | ", "", &self.locations, |p, loc| p.write(loc.as_str()));
    }
}

fn append_description(description: Option<&str>, printer: &mut GraphQLPrinter) {
    if let Some(description) = description {
        printer.write(&quote_graphql_string(description));
        printer.newline();
    }
}

fn append_implements(interfaces: &[String], printer: &mut GraphQLPrinter) {
    printer.delimited(" implements ", " & ", "", interfaces, |p, name| p.write(name));
}

fn append_fields(fields: &[FieldDefinition], printer: &mut GraphQLPrinter) {
    if !fields.is_empty() {
        printer.block(fields, |p, field| field.append_graphql(p));
    }
}
