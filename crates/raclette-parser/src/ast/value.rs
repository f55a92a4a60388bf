use crate::GraphQLPrinter;
use crate::ast::AstNode;
use crate::token::quote_graphql_string;
use inherent::inherent;

/// A literal or variable reference as written in a document.
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    Variable(String),
    Int(i64),
    Float(f64),
    String(String),
    Boolean(bool),
    Null,
    Enum(String),
    List(Vec<Value>),
    Object(Vec<(String, Value)>),
}

impl Value {
    /// Returns `true` if this value (or any nested value) references a
    /// variable.
    pub fn contains_variables(&self) -> bool {
        match self {
            Value::Variable(_) => true,
            Value::List(items) => items.iter().any(Value::contains_variables),
            Value::Object(fields) => fields.iter().any(|(_, v)| v.contains_variables()),
            _ => false,
        }
    }

    /// Every variable name referenced by this value, in document order.
    pub fn variable_names(&self) -> Vec<&str> {
        let mut names = vec![];
        self.collect_variable_names(&mut names);
        names
    }

    fn collect_variable_names<'a>(&'a self, names: &mut Vec<&'a str>) {
        match self {
            Value::Variable(name) => names.push(name),
            Value::List(items) => items.iter().for_each(|v| v.collect_variable_names(names)),
            Value::Object(fields) => fields.iter().for_each(|(_, v)| v.collect_variable_names(names)),
            _ => (),
        }
    }
}

#[inherent]
impl AstNode for Value {
    pub fn append_graphql(&self, printer: &mut GraphQLPrinter) {
        match self {
            Value::Variable(name) => printer.write(&format!("${name}")),
            Value::Int(i) => printer.write(&i.to_string()),
            Value::Float(f) => {
                let mut text = format!("{f:?}");
                if !text.contains(['.', 'e', 'E']) {
                    text.push_str(".0");
                }
                printer.write(&text)
            }
            Value::String(s) => printer.write(&quote_graphql_string(s)),
            Value::Boolean(b) => printer.write(if *b { "true" } else { "false" }),
            Value::Null => printer.write("null"),
            Value::Enum(name) => printer.write(name),
            Value::List(items) => {
                printer.write("[");
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        printer.write(", ");
                    }
                    item.append_graphql(printer);
                }
                printer.write("]");
            }
            Value::Object(fields) => {
                printer.write("{");
                for (i, (name, value)) in fields.iter().enumerate() {
                    printer.write(if i > 0 { ", " } else { " " });
                    printer.write(name);
                    printer.write(": ");
                    value.append_graphql(printer);
                }
                printer.write(if fields.is_empty() { "}" } else { " }" });
            }
        }
    }
}

impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.to_graphql_string().trim_end())
    }
}
