use crate::GraphQLParseErrorKind;
use crate::GraphQLSourceSpan;
use crate::ast::AstPos;

/// A parse error with location information and contextual notes.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("{}", self.format_oneline())]
pub struct GraphQLParseError {
    /// Human-readable primary error message, e.g. "Expected `:` after
    /// argument name".
    message: String,

    /// Where the error was detected. For "expected X" errors this is the
    /// token found in place of X.
    span: GraphQLSourceSpan,

    kind: GraphQLParseErrorKind,

    /// Additional context such as "opening `{` here".
    notes: Vec<String>,
}

impl GraphQLParseError {
    pub fn new(
        message: impl Into<String>,
        span: GraphQLSourceSpan,
        kind: GraphQLParseErrorKind,
    ) -> Self {
        Self {
            message: message.into(),
            span,
            kind,
            notes: Vec::new(),
        }
    }

    /// Creates a parse error from a lexer error token.
    pub fn from_lexer_error(message: impl Into<String>, span: GraphQLSourceSpan) -> Self {
        Self::new(message, span, GraphQLParseErrorKind::LexerError)
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn span(&self) -> &GraphQLSourceSpan {
        &self.span
    }

    pub fn kind(&self) -> &GraphQLParseErrorKind {
        &self.kind
    }

    pub fn notes(&self) -> &[String] {
        &self.notes
    }

    pub fn add_note(&mut self, message: impl Into<String>) {
        self.notes.push(message.into());
    }

    /// 1-based line of the error.
    pub fn line(&self) -> usize {
        self.span.start_inclusive.line() + 1
    }

    /// 1-based column of the error.
    pub fn column(&self) -> usize {
        self.span.start_inclusive.col() + 1
    }

    pub fn position(&self) -> AstPos {
        self.span.start_inclusive.to_ast_pos()
    }

    /// Formats this error as a single-line summary:
    ///
    /// ```text
    /// 1:12: error: Expected `:` after argument name
    /// ```
    pub fn format_oneline(&self) -> String {
        format!("{}:{}: error: {}", self.line(), self.column(), self.message)
    }

    /// Formats this error together with the offending source line, a caret
    /// underline and any notes.
    pub fn format_detailed(&self, source: &str) -> String {
        let mut output = format!("error: {}\n  --> {}:{}\n", self.message, self.line(), self.column());
        if let Some(line_content) = source.lines().nth(self.span.start_inclusive.line()) {
            let line_num = self.line().to_string();
            let gutter = " ".repeat(line_num.len());
            let col_start = self.span.start_inclusive.col();
            let underline_len = if self.span.end_exclusive.line() == self.span.start_inclusive.line()
                && self.span.end_exclusive.col() > col_start
            {
                self.span.end_exclusive.col() - col_start
            } else {
                1
            };
            output.push_str(&format!("{gutter} |\n{line_num} | {line_content}\n"));
            output.push_str(&format!(
                "{gutter} | {}{}\n",
                " ".repeat(col_start),
                "^".repeat(underline_len),
            ));
        }
        for note in &self.notes {
            output.push_str(&format!("   = note: {note}\n"));
        }
        output
    }
}
