use raclette_parser::ast::AstPos;

/// A position within a named schema source.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FilePosition {
    pub col: usize,
    pub line: usize,
    pub source: String,
}
impl FilePosition {
    pub(crate) fn from_pos(source: &str, pos: AstPos) -> Self {
        Self {
            col: pos.column,
            line: pos.line,
            source: source.to_string(),
        }
    }
}
impl std::fmt::Display for FilePosition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}:{}", self.source, self.line, self.col)
    }
}

/// Where a schema element was defined.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SchemaDefLocation {
    /// Built into GraphQL itself (`Int`, `@skip`, `__Type`, ...).
    GraphQLBuiltIn,
    Schema(FilePosition),
}
impl std::convert::From<FilePosition> for SchemaDefLocation {
    fn from(value: FilePosition) -> Self {
        Self::Schema(value)
    }
}
impl std::fmt::Display for SchemaDefLocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::GraphQLBuiltIn => f.write_str("<builtin>"),
            Self::Schema(pos) => pos.fmt(f),
        }
    }
}

/// The location of a node parsed from `source`, or
/// [`SchemaDefLocation::GraphQLBuiltIn`] for the built-in definitions that
/// have no source name.
pub(crate) fn def_location(source: Option<&str>, pos: AstPos) -> SchemaDefLocation {
    match source {
        Some(source) => FilePosition::from_pos(source, pos).into(),
        None => SchemaDefLocation::GraphQLBuiltIn,
    }
}
