use crate::GraphQLPrinter;
use crate::ast::AstNode;
use crate::ast::AstPos;
use crate::ast::Type;
use crate::ast::Value;
use inherent::inherent;
use std::fmt;

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum OperationKind {
    Query,
    Mutation,
    Subscription,
}

impl OperationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            OperationKind::Query => "query",
            OperationKind::Mutation => "mutation",
            OperationKind::Subscription => "subscription",
        }
    }
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A `query`, `mutation` or `subscription` operation, or a query shorthand
/// (`{ ... }`).
#[derive(Clone, Debug, PartialEq)]
pub struct OperationDefinition {
    pub position: AstPos,
    pub kind: OperationKind,
    pub name: Option<String>,
    pub variable_definitions: Vec<VariableDefinition>,
    pub directives: Vec<DirectiveAnnotation>,
    pub selection_set: SelectionSet,
}

impl OperationDefinition {
    pub fn is_shorthand(&self) -> bool {
        self.kind == OperationKind::Query
            && self.name.is_none()
            && self.variable_definitions.is_empty()
            && self.directives.is_empty()
    }
}

#[inherent]
impl AstNode for OperationDefinition {
    pub fn append_graphql(&self, printer: &mut GraphQLPrinter) {
        if !self.is_shorthand() {
            printer.write(self.kind.as_str());
            if let Some(name) = &self.name {
                printer.write(" ");
                printer.write(name);
            }
            printer.delimited("(", ", ", ")", &self.variable_definitions, |p, v| {
                v.append_graphql(p)
            });
            append_directives(&self.directives, printer);
        }
        self.selection_set.append_graphql(printer);
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct VariableDefinition {
    pub position: AstPos,
    pub name: String,
    pub var_type: Type,
    pub default_value: Option<Value>,
    pub directives: Vec<DirectiveAnnotation>,
}

#[inherent]
impl AstNode for VariableDefinition {
    pub fn append_graphql(&self, printer: &mut GraphQLPrinter) {
        printer.write(&format!("${}: ", self.name));
        self.var_type.append_graphql(printer);
        if let Some(default_value) = &self.default_value {
            printer.write(" = ");
            default_value.append_graphql(printer);
        }
        append_directives(&self.directives, printer);
    }
}

/// A `{ ... }` block. Selection order is significant: it drives response
/// key order.
#[derive(Clone, Debug, PartialEq)]
pub struct SelectionSet {
    pub position: AstPos,
    pub selections: Vec<Selection>,
}

#[inherent]
impl AstNode for SelectionSet {
    pub fn append_graphql(&self, printer: &mut GraphQLPrinter) {
        printer.block(&self.selections, |p, s| s.append_graphql(p));
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Selection {
    Field(Field),
    FragmentSpread(FragmentSpread),
    InlineFragment(InlineFragment),
}

impl Selection {
    pub fn position(&self) -> AstPos {
        match self {
            Selection::Field(field) => field.position,
            Selection::FragmentSpread(spread) => spread.position,
            Selection::InlineFragment(inline) => inline.position,
        }
    }

    pub fn directives(&self) -> &[DirectiveAnnotation] {
        match self {
            Selection::Field(field) => &field.directives,
            Selection::FragmentSpread(spread) => &spread.directives,
            Selection::InlineFragment(inline) => &inline.directives,
        }
    }
}

#[inherent]
impl AstNode for Selection {
    pub fn append_graphql(&self, printer: &mut GraphQLPrinter) {
        match self {
            Selection::Field(field) => field.append_graphql(printer),
            Selection::FragmentSpread(spread) => spread.append_graphql(printer),
            Selection::InlineFragment(inline) => inline.append_graphql(printer),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Field {
    pub position: AstPos,
    pub alias: Option<String>,
    pub name: String,
    pub arguments: Vec<Argument>,
    pub directives: Vec<DirectiveAnnotation>,
    pub selection_set: Option<SelectionSet>,
}

impl Field {
    /// The key this field's value is written under in the response: the
    /// alias if present, otherwise the field name.
    pub fn response_key(&self) -> &str {
        self.alias.as_deref().unwrap_or(&self.name)
    }

    pub fn argument(&self, name: &str) -> Option<&Argument> {
        self.arguments.iter().find(|arg| arg.name == name)
    }

    /// The nested selections, or an empty slice for leaf fields.
    pub fn selections(&self) -> &[Selection] {
        self.selection_set
            .as_ref()
            .map(|set| set.selections.as_slice())
            .unwrap_or_default()
    }
}

#[inherent]
impl AstNode for Field {
    pub fn append_graphql(&self, printer: &mut GraphQLPrinter) {
        if let Some(alias) = &self.alias {
            printer.write(alias);
            printer.write(": ");
        }
        printer.write(&self.name);
        append_arguments(&self.arguments, printer);
        append_directives(&self.directives, printer);
        if let Some(selection_set) = &self.selection_set {
            selection_set.append_graphql(printer);
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Argument {
    pub position: AstPos,
    pub name: String,
    pub value: Value,
}

#[derive(Clone, Debug, PartialEq)]
pub struct FragmentSpread {
    pub position: AstPos,
    pub fragment_name: String,
    pub directives: Vec<DirectiveAnnotation>,
}

#[inherent]
impl AstNode for FragmentSpread {
    pub fn append_graphql(&self, printer: &mut GraphQLPrinter) {
        printer.write("...");
        printer.write(&self.fragment_name);
        append_directives(&self.directives, printer);
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct InlineFragment {
    pub position: AstPos,
    pub type_condition: Option<String>,
    pub directives: Vec<DirectiveAnnotation>,
    pub selection_set: SelectionSet,
}

#[inherent]
impl AstNode for InlineFragment {
    pub fn append_graphql(&self, printer: &mut GraphQLPrinter) {
        printer.write("...");
        if let Some(type_condition) = &self.type_condition {
            printer.write(" on ");
            printer.write(type_condition);
        }
        append_directives(&self.directives, printer);
        self.selection_set.append_graphql(printer);
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct FragmentDefinition {
    pub position: AstPos,
    pub name: String,
    pub type_condition: String,
    pub directives: Vec<DirectiveAnnotation>,
    pub selection_set: SelectionSet,
}

#[inherent]
impl AstNode for FragmentDefinition {
    pub fn append_graphql(&self, printer: &mut GraphQLPrinter) {
        printer.write("fragment ");
        printer.write(&self.name);
        printer.write(" on ");
        printer.write(&self.type_condition);
        append_directives(&self.directives, printer);
        self.selection_set.append_graphql(printer);
    }
}

/// A directive applied at a location: `@include(if: $withSteps)`.
#[derive(Clone, Debug, PartialEq)]
pub struct DirectiveAnnotation {
    pub position: AstPos,
    pub name: String,
    pub arguments: Vec<Argument>,
}

impl DirectiveAnnotation {
    pub fn argument(&self, name: &str) -> Option<&Argument> {
        self.arguments.iter().find(|arg| arg.name == name)
    }
}

#[inherent]
impl AstNode for DirectiveAnnotation {
    pub fn append_graphql(&self, printer: &mut GraphQLPrinter) {
        printer.write("@");
        printer.write(&self.name);
        append_arguments(&self.arguments, printer);
    }
}

pub(crate) fn append_arguments(arguments: &[Argument], printer: &mut GraphQLPrinter) {
    printer.delimited("(", ", ", ")", arguments, |p, arg| {
        p.write(&arg.name);
        p.write(": ");
        arg.value.append_graphql(p);
    });
}

pub(crate) fn append_directives(directives: &[DirectiveAnnotation], printer: &mut GraphQLPrinter) {
    for directive in directives {
        printer.write(" ");
        directive.append_graphql(printer);
    }
}
