use crate::GraphQLStringParsingError;

/// Categorizes parse errors for programmatic handling.
///
/// Each variant carries only the data needed to make a programmatic decision.
/// The full human-readable text lives in [`GraphQLParseError::message()`].
///
/// [`GraphQLParseError::message()`]: crate::GraphQLParseError::message
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GraphQLParseErrorKind {
    /// Expected specific token(s) but found something else.
    ///
    /// ```text
    /// { recipe(id 1) { name } }
    ///             ^ expected `:`, found `1`
    /// ```
    #[error("unexpected token: `{found}`")]
    UnexpectedToken {
        expected: Vec<String>,
        found: String,
    },

    /// The document ended before a complete construct was parsed.
    #[error("unexpected end of input")]
    UnexpectedEof { expected: Vec<String> },

    /// The lexer produced an error token (invalid character, unterminated
    /// string, malformed number).
    #[error("lexer error")]
    LexerError,

    /// A `{`, `[` or `(` was opened and never closed.
    #[error("unclosed delimiter: `{delimiter}`")]
    UnclosedDelimiter { delimiter: String },

    /// A construct that must not be empty was empty (`{ }`, `()`).
    #[error("invalid empty construct: `{construct}`")]
    InvalidEmptyConstruct { construct: String },

    /// Nesting went deeper than the parser allows.
    #[error("recursion limit exceeded")]
    RecursionLimitExceeded,

    /// A literal could not be converted to its value.
    ///
    /// ```text
    /// { recipes(first: 99999999999999999999) { name } }
    ///                  ^^^^^^^^^^^^^^^^^^^^ integer overflow
    /// ```
    #[error("invalid value")]
    InvalidValue(InvalidValueReason),

    /// A variable appeared where only constant values are permitted.
    #[error("variable in const context: `${name}`")]
    VariableInConstContext { name: String },

    /// A definition that is not allowed in the kind of document being
    /// parsed (e.g. a type definition inside an executable document).
    #[error("wrong document kind")]
    WrongDocumentKind { found: String },
}

/// Why a literal could not be turned into a value.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum InvalidValueReason {
    #[error("integer `{0}` does not fit in 64 bits")]
    IntOverflow(String),

    #[error("invalid float `{0}`")]
    InvalidFloat(String),

    #[error(transparent)]
    String(#[from] GraphQLStringParsingError),
}
