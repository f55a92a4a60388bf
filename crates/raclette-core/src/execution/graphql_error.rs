use crate::Value;
use indexmap::IndexMap;
use raclette_parser::ast::AstPos;
use serde::Serialize;

/// A line and column (both 1-based) in the request document.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct Location {
    pub line: usize,
    pub column: usize,
}
impl std::convert::From<AstPos> for Location {
    fn from(pos: AstPos) -> Self {
        Self {
            line: pos.line,
            column: pos.column,
        }
    }
}

/// One step of a response path: a response key or a list index.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum PathSegment {
    Key(String),
    Index(usize),
}
impl std::convert::From<&str> for PathSegment {
    fn from(key: &str) -> Self {
        Self::Key(key.to_string())
    }
}
impl std::convert::From<usize> for PathSegment {
    fn from(idx: usize) -> Self {
        Self::Index(idx)
    }
}

/// An entry of a response's `errors` list.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct GraphQLError {
    pub message: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub locations: Vec<Location>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<Vec<PathSegment>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extensions: Option<IndexMap<String, Value>>,
}
impl GraphQLError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            locations: vec![],
            path: None,
            extensions: None,
        }
    }

    pub fn at(mut self, pos: AstPos) -> Self {
        self.locations.push(pos.into());
        self
    }

    pub fn with_path(mut self, path: Vec<PathSegment>) -> Self {
        self.path = Some(path);
        self
    }
}
impl std::fmt::Display for GraphQLError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)?;
        if let Some(loc) = self.locations.first() {
            write!(f, " ({}:{})", loc.line, loc.column)?;
        }
        Ok(())
    }
}
impl std::error::Error for GraphQLError {}
