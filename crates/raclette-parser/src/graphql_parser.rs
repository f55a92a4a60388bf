//! Recursive descent parser for GraphQL documents.
//!
//! [`GraphQLParser`] works with any token source implementing
//! [`GraphQLTokenSource`]. It parses executable documents (operations and
//! fragments) and schema documents (type-system definitions and
//! extensions).
//!
//! # Error Recovery
//!
//! Most grammar rules have a `parse_*` method returning `Result<T, ()>`,
//! where `Err(())` means an error was already recorded via
//! `record_error()`. The document-level loop then skips ahead to the next
//! token that can start a definition and keeps going, so a single pass can
//! report several errors.

use crate::GraphQLParseError;
use crate::GraphQLParseErrorKind;
use crate::GraphQLSourceSpan;
use crate::GraphQLTokenStream;
use crate::InvalidValueReason;
use crate::ParseResult;
use crate::SourcePosition;
use crate::ast;
use crate::ast::AstPos;
use crate::token::GraphQLToken;
use crate::token::GraphQLTokenKind;
use crate::token_source::GraphQLTokenSource;
use crate::token_source::StrGraphQLTokenSource;
use smallvec::SmallVec;
use std::mem::discriminant;

/// Tracks an open `{`, `[` or `(` so that reaching EOF can be reported as an
/// unclosed delimiter pointing back at its opening position.
#[derive(Debug, Clone, Copy)]
struct OpenDelimiter {
    delimiter: &'static str,
    position: SourcePosition,
}

/// Where constant values are required, for error messages. `None` at call
/// sites means variables are allowed.
type ConstContext = Option<&'static str>;

const TYPE_SYSTEM_KEYWORDS: [&str; 9] = [
    "schema",
    "scalar",
    "type",
    "interface",
    "union",
    "enum",
    "input",
    "directive",
    "extend",
];

const OPERATION_KEYWORDS: [&str; 3] = ["query", "mutation", "subscription"];

/// A recursive descent parser for GraphQL documents.
///
/// ```
/// use raclette_parser::ast;
/// use raclette_parser::GraphQLParser;
///
/// let result = GraphQLParser::new("type Query { recipe(id: Int!): Recipe }")
///     .parse_schema_document();
/// let doc = result.valid_ast().expect("valid schema");
/// assert!(matches!(doc.definitions[0], ast::Definition::Type(_)));
/// ```
pub struct GraphQLParser<'src, TTokenSource: GraphQLTokenSource<'src>> {
    token_stream: GraphQLTokenStream<'src, TTokenSource>,

    errors: Vec<GraphQLParseError>,

    /// Stack of open delimiters. Most documents nest fewer than 8 deep.
    delimiter_stack: SmallVec<[OpenDelimiter; 8]>,

    /// Shared nesting counter for values, selection sets and type
    /// annotations.
    recursion_depth: usize,

    /// End of the most recently consumed token; anchors EOF errors.
    last_end_position: Option<SourcePosition>,
}

impl<'src> GraphQLParser<'src, StrGraphQLTokenSource<'src>> {
    pub fn new(source: &'src str) -> Self {
        Self::from_token_source(StrGraphQLTokenSource::new(source))
    }
}

impl<'src, TTokenSource: GraphQLTokenSource<'src>> GraphQLParser<'src, TTokenSource> {
    /// Maximum nesting depth for values, selection sets and type
    /// annotations. Deep enough for any realistic document while keeping
    /// adversarial input like `[[[[...` from overflowing the stack.
    const MAX_RECURSION_DEPTH: usize = 64;

    pub fn from_token_source(token_source: TTokenSource) -> Self {
        Self {
            token_stream: GraphQLTokenStream::new(token_source),
            errors: Vec::new(),
            delimiter_stack: SmallVec::new(),
            recursion_depth: 0,
            last_end_position: None,
        }
    }

    // =========================================================================
    // Document entry points
    // =========================================================================

    /// Parses an executable document (operations and fragments only).
    pub fn parse_executable_document(mut self) -> ParseResult<ast::Document> {
        let mut definitions = Vec::new();
        while !self.token_stream.is_at_end() {
            match self.parse_executable_definition() {
                Ok(def) => definitions.push(def),
                Err(()) => self.recover_to_next_definition(),
            }
        }
        self.finish(ast::Document { definitions })
    }

    /// Parses a schema document (type-system definitions and extensions
    /// only).
    pub fn parse_schema_document(mut self) -> ParseResult<ast::Document> {
        let mut definitions = Vec::new();
        while !self.token_stream.is_at_end() {
            match self.parse_type_system_definition() {
                Ok(def) => definitions.push(def),
                Err(()) => self.recover_to_next_definition(),
            }
        }
        self.finish(ast::Document { definitions })
    }

    fn finish(self, document: ast::Document) -> ParseResult<ast::Document> {
        if self.errors.is_empty() {
            ParseResult::ok(document)
        } else {
            ParseResult::recovered(document, self.errors)
        }
    }

    // =========================================================================
    // Error recording and recovery
    // =========================================================================

    fn record_error(&mut self, error: GraphQLParseError) {
        self.errors.push(error);
    }

    /// Skip tokens until one that can start a new definition: an operation
    /// or type-system keyword followed by something plausible, a `{`, or a
    /// description string preceding a type-system keyword.
    fn recover_to_next_definition(&mut self) {
        loop {
            let at_definition_start = match self.token_stream.peek().map(|t| &t.kind) {
                None | Some(GraphQLTokenKind::Eof) => break,
                Some(GraphQLTokenKind::CurlyBraceOpen) => true,
                Some(GraphQLTokenKind::StringValue(_)) => self.peek_nth_is_keyword_in(1, &TYPE_SYSTEM_KEYWORDS),
                Some(GraphQLTokenKind::Name(name)) => {
                    let name = name.to_string();
                    self.looks_like_definition_start(&name)
                }
                Some(_) => false,
            };
            if at_definition_start {
                break;
            }
            self.consume_token();
        }
        self.delimiter_stack.clear();
        self.recursion_depth = 0;
    }

    /// Peeks past `keyword` so that a field named `type` (as in
    /// `type: String`) is not mistaken for a definition keyword.
    fn looks_like_definition_start(&mut self, keyword: &str) -> bool {
        let next = self.token_stream.peek_nth(1).map(|t| &t.kind);
        match keyword {
            "type" | "interface" | "union" | "enum" | "scalar" | "input" | "fragment" => {
                matches!(next, Some(GraphQLTokenKind::Name(_)))
            }
            "directive" => matches!(next, Some(GraphQLTokenKind::At)),
            "schema" => matches!(
                next,
                Some(GraphQLTokenKind::CurlyBraceOpen | GraphQLTokenKind::At)
            ),
            "extend" => matches!(
                next,
                Some(GraphQLTokenKind::Name(name)) if TYPE_SYSTEM_KEYWORDS.contains(&name.as_ref())
            ),
            "query" | "mutation" | "subscription" => matches!(
                next,
                Some(
                    GraphQLTokenKind::Name(_)
                        | GraphQLTokenKind::CurlyBraceOpen
                        | GraphQLTokenKind::ParenOpen
                        | GraphQLTokenKind::At
                )
            ),
            _ => false,
        }
    }

    /// Records an error describing the token at the cursor, which was not
    /// one of `expected`.
    ///
    /// - An `Error` token becomes a lexer error (and is consumed).
    /// - EOF inside an open delimiter becomes an unclosed-delimiter error.
    /// - Anything else is an unexpected token.
    fn unexpected<T>(&mut self, expected: &[&str]) -> Result<T, ()> {
        let expected_text = expected.join(" or ");
        let expected_list: Vec<String> = expected.iter().map(|s| s.to_string()).collect();
        let (kind, span) = match self.token_stream.peek() {
            Some(token) => (token.kind.clone(), token.span),
            None => (GraphQLTokenKind::Eof, self.eof_span()),
        };

        match kind {
            GraphQLTokenKind::Error { message } => {
                self.consume_token();
                self.record_error(GraphQLParseError::from_lexer_error(message, span));
            }
            GraphQLTokenKind::Eof => {
                let error = match self.delimiter_stack.last().copied() {
                    Some(open) => {
                        let mut error = GraphQLParseError::new(
                            format!("Unclosed `{}`", open.delimiter),
                            self.eof_span(),
                            GraphQLParseErrorKind::UnclosedDelimiter {
                                delimiter: open.delimiter.to_string(),
                            },
                        );
                        error.add_note(format!(
                            "opening `{}` at {}",
                            open.delimiter,
                            open.position.to_ast_pos(),
                        ));
                        error
                    }
                    None => GraphQLParseError::new(
                        format!("Expected {expected_text}, found end of input"),
                        self.eof_span(),
                        GraphQLParseErrorKind::UnexpectedEof {
                            expected: expected_list,
                        },
                    ),
                };
                self.record_error(error);
            }
            other => {
                let found = other.describe();
                self.record_error(GraphQLParseError::new(
                    format!("Expected {expected_text}, found {found}"),
                    span,
                    GraphQLParseErrorKind::UnexpectedToken {
                        expected: expected_list,
                        found,
                    },
                ));
            }
        }
        Err(())
    }

    fn enter_recursion(&mut self) -> Result<(), ()> {
        if self.recursion_depth >= Self::MAX_RECURSION_DEPTH {
            let span = self.peek_span();
            self.record_error(GraphQLParseError::new(
                "Maximum nesting depth exceeded",
                span,
                GraphQLParseErrorKind::RecursionLimitExceeded,
            ));
            return Err(());
        }
        self.recursion_depth += 1;
        Ok(())
    }

    fn exit_recursion(&mut self) {
        self.recursion_depth = self.recursion_depth.saturating_sub(1);
    }

    // =========================================================================
    // Token helpers
    // =========================================================================

    fn consume_token(&mut self) -> Option<GraphQLToken<'src>> {
        let token = self.token_stream.consume();
        if let Some(t) = &token {
            self.last_end_position = Some(t.span.end_exclusive);
        }
        token
    }

    fn eof_span(&self) -> GraphQLSourceSpan {
        GraphQLSourceSpan::empty_at(
            self.last_end_position
                .unwrap_or_else(|| SourcePosition::new(0, 0, 0)),
        )
    }

    fn peek_span(&mut self) -> GraphQLSourceSpan {
        match self.token_stream.peek() {
            Some(token) => token.span,
            None => self.eof_span(),
        }
    }

    fn peek_pos(&mut self) -> AstPos {
        self.peek_span().start_inclusive.to_ast_pos()
    }

    /// Compares variants only, so `Name(_)` matches any name.
    fn peek_is(&mut self, kind: &GraphQLTokenKind<'_>) -> bool {
        self.token_stream
            .peek()
            .is_some_and(|t| discriminant(&t.kind) == discriminant(kind))
    }

    fn peek_is_keyword(&mut self, keyword: &str) -> bool {
        matches!(
            self.token_stream.peek().map(|t| &t.kind),
            Some(GraphQLTokenKind::Name(name)) if name == keyword
        )
    }

    fn peek_nth_is_keyword_in(&mut self, n: usize, keywords: &[&str]) -> bool {
        matches!(
            self.token_stream.peek_nth(n).map(|t| &t.kind),
            Some(GraphQLTokenKind::Name(name)) if keywords.contains(&name.as_ref())
        )
    }

    /// `true`, `false` and `null` are lexed as distinct kinds but are valid
    /// names outside value positions.
    fn peek_is_name(&mut self) -> bool {
        matches!(
            self.token_stream.peek().map(|t| &t.kind),
            Some(
                GraphQLTokenKind::Name(_)
                    | GraphQLTokenKind::True
                    | GraphQLTokenKind::False
                    | GraphQLTokenKind::Null
            )
        )
    }

    /// Consumes the next token if it is of `kind`.
    fn try_consume(&mut self, kind: &GraphQLTokenKind<'_>) -> bool {
        if self.peek_is(kind) {
            self.consume_token();
            true
        } else {
            false
        }
    }

    fn expect(&mut self, kind: &GraphQLTokenKind<'_>) -> Result<GraphQLToken<'src>, ()> {
        if self.peek_is(kind) {
            self.consume_token().ok_or(())
        } else {
            let expected = format!("`{}`", kind.as_punctuator_str().unwrap_or_default());
            self.unexpected(&[&expected])
        }
    }

    fn expect_name(&mut self) -> Result<(String, AstPos), ()> {
        if !self.peek_is_name() {
            return self.unexpected(&["a name"]);
        }
        let token = self.consume_token().ok_or(())?;
        let pos = token.span.start_inclusive.to_ast_pos();
        let name = match token.kind {
            GraphQLTokenKind::Name(name) => name.into_owned(),
            GraphQLTokenKind::True => "true".to_string(),
            GraphQLTokenKind::False => "false".to_string(),
            _ => "null".to_string(),
        };
        Ok((name, pos))
    }

    fn expect_keyword(&mut self, keyword: &str) -> Result<AstPos, ()> {
        if self.peek_is_keyword(keyword) {
            let pos = self.peek_pos();
            self.consume_token();
            Ok(pos)
        } else {
            self.unexpected(&[&format!("`{keyword}`")])
        }
    }

    /// Parses `open item* close`. Records an `InvalidEmptyConstruct` error
    /// (but keeps going) when the list is empty and `allow_empty` is false.
    fn parse_delimited<T>(
        &mut self,
        open: GraphQLTokenKind<'static>,
        close: GraphQLTokenKind<'static>,
        construct: Option<&str>,
        mut parse_item: impl FnMut(&mut Self) -> Result<T, ()>,
    ) -> Result<Vec<T>, ()> {
        let open_token = self.expect(&open)?;
        let delimiter = open.as_punctuator_str().unwrap_or_default();
        let closing = format!("`{}`", close.as_punctuator_str().unwrap_or_default());
        self.delimiter_stack.push(OpenDelimiter {
            delimiter,
            position: open_token.span.start_inclusive,
        });

        if let Some(construct) = construct
            && self.peek_is(&close)
        {
            let span = GraphQLSourceSpan::new(
                open_token.span.start_inclusive,
                self.peek_span().end_exclusive,
            );
            self.record_error(GraphQLParseError::new(
                format!("{construct} cannot be empty"),
                span,
                GraphQLParseErrorKind::InvalidEmptyConstruct {
                    construct: construct.to_string(),
                },
            ));
        }

        let mut items = Vec::new();
        while !self.peek_is(&close) {
            if self.token_stream.is_at_end() {
                return self.unexpected(&[&closing]);
            }
            items.push(parse_item(self)?);
        }
        self.consume_token();
        self.delimiter_stack.pop();
        Ok(items)
    }

    // =========================================================================
    // Values
    // =========================================================================

    fn parse_value(&mut self, const_context: ConstContext) -> Result<ast::Value, ()> {
        self.enter_recursion()?;
        let result = self.parse_value_impl(const_context);
        self.exit_recursion();
        result
    }

    fn parse_value_impl(&mut self, const_context: ConstContext) -> Result<ast::Value, ()> {
        let span = self.peek_span();
        let kind = match self.token_stream.peek() {
            Some(token) => token.kind.clone(),
            None => return self.unexpected(&["a value"]),
        };

        match kind {
            GraphQLTokenKind::Dollar => {
                self.consume_token();
                let (name, _) = self.expect_name()?;
                if let Some(context) = const_context {
                    self.record_error(GraphQLParseError::new(
                        format!("Variable `${name}` is not allowed in {context}"),
                        span,
                        GraphQLParseErrorKind::VariableInConstContext { name: name.clone() },
                    ));
                }
                Ok(ast::Value::Variable(name))
            }
            GraphQLTokenKind::IntValue(_) => {
                self.consume_token();
                match kind.parse_int_value() {
                    Some(Ok(i)) => Ok(ast::Value::Int(i)),
                    _ => self.invalid_value(span, InvalidValueReason::IntOverflow(raw_text(&kind))),
                }
            }
            GraphQLTokenKind::FloatValue(_) => {
                self.consume_token();
                match kind.parse_float_value() {
                    Some(Ok(f)) if f.is_finite() => Ok(ast::Value::Float(f)),
                    _ => self.invalid_value(span, InvalidValueReason::InvalidFloat(raw_text(&kind))),
                }
            }
            GraphQLTokenKind::StringValue(_) => {
                self.consume_token();
                match kind.parse_string_value() {
                    Some(Ok(s)) => Ok(ast::Value::String(s)),
                    Some(Err(err)) => self.invalid_value(span, err.into()),
                    None => Err(()),
                }
            }
            GraphQLTokenKind::True => {
                self.consume_token();
                Ok(ast::Value::Boolean(true))
            }
            GraphQLTokenKind::False => {
                self.consume_token();
                Ok(ast::Value::Boolean(false))
            }
            GraphQLTokenKind::Null => {
                self.consume_token();
                Ok(ast::Value::Null)
            }
            GraphQLTokenKind::Name(name) => {
                self.consume_token();
                Ok(ast::Value::Enum(name.into_owned()))
            }
            GraphQLTokenKind::SquareBracketOpen => {
                let items = self.parse_delimited(
                    GraphQLTokenKind::SquareBracketOpen,
                    GraphQLTokenKind::SquareBracketClose,
                    None,
                    |p| p.parse_value(const_context),
                )?;
                Ok(ast::Value::List(items))
            }
            GraphQLTokenKind::CurlyBraceOpen => {
                let fields = self.parse_delimited(
                    GraphQLTokenKind::CurlyBraceOpen,
                    GraphQLTokenKind::CurlyBraceClose,
                    None,
                    |p| {
                        let (name, _) = p.expect_name()?;
                        p.expect(&GraphQLTokenKind::Colon)?;
                        Ok((name, p.parse_value(const_context)?))
                    },
                )?;
                Ok(ast::Value::Object(fields))
            }
            _ => self.unexpected(&["a value"]),
        }
    }

    fn invalid_value<T>(&mut self, span: GraphQLSourceSpan, reason: InvalidValueReason) -> Result<T, ()> {
        self.record_error(GraphQLParseError::new(
            reason.to_string(),
            span,
            GraphQLParseErrorKind::InvalidValue(reason),
        ));
        Err(())
    }

    // =========================================================================
    // Type annotations, arguments and directives
    // =========================================================================

    fn parse_type(&mut self) -> Result<ast::Type, ()> {
        self.enter_recursion()?;
        let result = self.parse_type_impl();
        self.exit_recursion();
        result
    }

    fn parse_type_impl(&mut self) -> Result<ast::Type, ()> {
        let base = if self.peek_is(&GraphQLTokenKind::SquareBracketOpen) {
            let open = self.consume_token().ok_or(())?;
            self.delimiter_stack.push(OpenDelimiter {
                delimiter: "[",
                position: open.span.start_inclusive,
            });
            let inner = self.parse_type()?;
            self.expect(&GraphQLTokenKind::SquareBracketClose)?;
            self.delimiter_stack.pop();
            ast::Type::List(Box::new(inner))
        } else {
            ast::Type::Named(self.expect_name()?.0)
        };
        if self.try_consume(&GraphQLTokenKind::Bang) {
            Ok(ast::Type::NonNull(Box::new(base)))
        } else {
            Ok(base)
        }
    }

    fn parse_arguments(&mut self, const_context: ConstContext) -> Result<Vec<ast::Argument>, ()> {
        if !self.peek_is(&GraphQLTokenKind::ParenOpen) {
            return Ok(vec![]);
        }
        self.parse_delimited(
            GraphQLTokenKind::ParenOpen,
            GraphQLTokenKind::ParenClose,
            Some("argument list"),
            |p| {
                let (name, position) = p.expect_name()?;
                p.expect(&GraphQLTokenKind::Colon)?;
                let value = p.parse_value(const_context)?;
                Ok(ast::Argument {
                    position,
                    name,
                    value,
                })
            },
        )
    }

    fn parse_directives(
        &mut self,
        const_context: ConstContext,
    ) -> Result<Vec<ast::DirectiveAnnotation>, ()> {
        let mut directives = vec![];
        while self.peek_is(&GraphQLTokenKind::At) {
            let position = self.peek_pos();
            self.consume_token();
            let (name, _) = self.expect_name()?;
            let arguments = self.parse_arguments(const_context)?;
            directives.push(ast::DirectiveAnnotation {
                position,
                name,
                arguments,
            });
        }
        Ok(directives)
    }

    // =========================================================================
    // Executable definitions
    // =========================================================================

    fn parse_executable_definition(&mut self) -> Result<ast::Definition, ()> {
        if self.peek_is(&GraphQLTokenKind::CurlyBraceOpen)
            || OPERATION_KEYWORDS.iter().any(|kw| self.peek_is_keyword(kw))
        {
            return Ok(ast::Definition::Operation(self.parse_operation_definition()?));
        }
        if self.peek_is_keyword("fragment") {
            return Ok(ast::Definition::Fragment(self.parse_fragment_definition()?));
        }

        let is_type_system = TYPE_SYSTEM_KEYWORDS.iter().any(|kw| self.peek_is_keyword(kw))
            || (self.peek_is(&GraphQLTokenKind::StringValue("".into()))
                && self.peek_nth_is_keyword_in(1, &TYPE_SYSTEM_KEYWORDS));
        if is_type_system {
            let span = self.peek_span();
            self.consume_token();
            self.record_error(GraphQLParseError::new(
                "Type-system definitions are not allowed in an executable document",
                span,
                GraphQLParseErrorKind::WrongDocumentKind {
                    found: "type-system definition".to_string(),
                },
            ));
            return Err(());
        }
        self.unexpected(&["`query`", "`mutation`", "`subscription`", "`fragment`", "`{`"])
    }

    fn parse_operation_definition(&mut self) -> Result<ast::OperationDefinition, ()> {
        let position = self.peek_pos();
        if self.peek_is(&GraphQLTokenKind::CurlyBraceOpen) {
            return Ok(ast::OperationDefinition {
                position,
                kind: ast::OperationKind::Query,
                name: None,
                variable_definitions: vec![],
                directives: vec![],
                selection_set: self.parse_selection_set()?,
            });
        }

        let kind = if self.peek_is_keyword("mutation") {
            ast::OperationKind::Mutation
        } else if self.peek_is_keyword("subscription") {
            ast::OperationKind::Subscription
        } else {
            ast::OperationKind::Query
        };
        self.consume_token();

        let name = if self.peek_is_name() {
            Some(self.expect_name()?.0)
        } else {
            None
        };
        let variable_definitions = if self.peek_is(&GraphQLTokenKind::ParenOpen) {
            self.parse_delimited(
                GraphQLTokenKind::ParenOpen,
                GraphQLTokenKind::ParenClose,
                Some("variable definition list"),
                Self::parse_variable_definition,
            )?
        } else {
            vec![]
        };
        let directives = self.parse_directives(None)?;
        let selection_set = self.parse_selection_set()?;

        Ok(ast::OperationDefinition {
            position,
            kind,
            name,
            variable_definitions,
            directives,
            selection_set,
        })
    }

    fn parse_variable_definition(&mut self) -> Result<ast::VariableDefinition, ()> {
        let position = self.peek_pos();
        self.expect(&GraphQLTokenKind::Dollar)?;
        let (name, _) = self.expect_name()?;
        self.expect(&GraphQLTokenKind::Colon)?;
        let var_type = self.parse_type()?;
        let default_value = if self.try_consume(&GraphQLTokenKind::Equals) {
            Some(self.parse_value(Some("variable default values"))?)
        } else {
            None
        };
        let directives = self.parse_directives(Some("variable definition directives"))?;
        Ok(ast::VariableDefinition {
            position,
            name,
            var_type,
            default_value,
            directives,
        })
    }

    fn parse_fragment_definition(&mut self) -> Result<ast::FragmentDefinition, ()> {
        let position = self.expect_keyword("fragment")?;
        if self.peek_is_keyword("on") {
            let span = self.peek_span();
            self.record_error(GraphQLParseError::new(
                "A fragment cannot be named `on`",
                span,
                GraphQLParseErrorKind::UnexpectedToken {
                    expected: vec!["a fragment name".to_string()],
                    found: "`on`".to_string(),
                },
            ));
            return Err(());
        }
        let (name, _) = self.expect_name()?;
        self.expect_keyword("on")?;
        let (type_condition, _) = self.expect_name()?;
        let directives = self.parse_directives(None)?;
        let selection_set = self.parse_selection_set()?;
        Ok(ast::FragmentDefinition {
            position,
            name,
            type_condition,
            directives,
            selection_set,
        })
    }

    fn parse_selection_set(&mut self) -> Result<ast::SelectionSet, ()> {
        self.enter_recursion()?;
        let position = self.peek_pos();
        let result = self.parse_delimited(
            GraphQLTokenKind::CurlyBraceOpen,
            GraphQLTokenKind::CurlyBraceClose,
            Some("selection set"),
            Self::parse_selection,
        );
        self.exit_recursion();
        Ok(ast::SelectionSet {
            position,
            selections: result?,
        })
    }

    fn parse_selection(&mut self) -> Result<ast::Selection, ()> {
        if !self.peek_is(&GraphQLTokenKind::Ellipsis) {
            return self.parse_field().map(ast::Selection::Field);
        }

        let position = self.peek_pos();
        self.consume_token();
        let is_inline = self.peek_is_keyword("on")
            || self.peek_is(&GraphQLTokenKind::At)
            || self.peek_is(&GraphQLTokenKind::CurlyBraceOpen);

        if is_inline {
            let type_condition = if self.peek_is_keyword("on") {
                self.consume_token();
                Some(self.expect_name()?.0)
            } else {
                None
            };
            let directives = self.parse_directives(None)?;
            let selection_set = self.parse_selection_set()?;
            Ok(ast::Selection::InlineFragment(ast::InlineFragment {
                position,
                type_condition,
                directives,
                selection_set,
            }))
        } else {
            let (fragment_name, _) = self.expect_name()?;
            let directives = self.parse_directives(None)?;
            Ok(ast::Selection::FragmentSpread(ast::FragmentSpread {
                position,
                fragment_name,
                directives,
            }))
        }
    }

    fn parse_field(&mut self) -> Result<ast::Field, ()> {
        let (first_name, position) = self.expect_name()?;
        let (alias, name) = if self.try_consume(&GraphQLTokenKind::Colon) {
            (Some(first_name), self.expect_name()?.0)
        } else {
            (None, first_name)
        };
        let arguments = self.parse_arguments(None)?;
        let directives = self.parse_directives(None)?;
        let selection_set = if self.peek_is(&GraphQLTokenKind::CurlyBraceOpen) {
            Some(self.parse_selection_set()?)
        } else {
            None
        };
        Ok(ast::Field {
            position,
            alias,
            name,
            arguments,
            directives,
            selection_set,
        })
    }

    // =========================================================================
    // Type-system definitions
    // =========================================================================

    fn parse_type_system_definition(&mut self) -> Result<ast::Definition, ()> {
        let position = self.peek_pos();
        let description = self.parse_description()?;

        if self.peek_is_keyword("extend") {
            if description.is_some() {
                let span = self.peek_span();
                self.record_error(GraphQLParseError::new(
                    "Extensions cannot have a description",
                    span,
                    GraphQLParseErrorKind::UnexpectedToken {
                        expected: vec!["a type-system definition".to_string()],
                        found: "`extend`".to_string(),
                    },
                ));
                return Err(());
            }
            self.consume_token();
            let position = self.peek_pos();
            if self.peek_is_keyword("schema") {
                return Ok(ast::Definition::SchemaExtension(
                    self.parse_schema_definition(position, true)?,
                ));
            }
            return Ok(ast::Definition::TypeExtension(
                self.parse_type_definition(None, position)?,
            ));
        }

        if self.peek_is_keyword("schema") {
            return Ok(ast::Definition::Schema(
                self.parse_schema_definition(position, false)?,
            ));
        }
        if self.peek_is_keyword("directive") {
            return Ok(ast::Definition::Directive(
                self.parse_directive_definition(description, position)?,
            ));
        }
        if ["scalar", "type", "interface", "union", "enum", "input"]
            .iter()
            .any(|kw| self.peek_is_keyword(kw))
        {
            return Ok(ast::Definition::Type(
                self.parse_type_definition(description, position)?,
            ));
        }

        if self.peek_is(&GraphQLTokenKind::CurlyBraceOpen)
            || self.peek_is_keyword("fragment")
            || OPERATION_KEYWORDS.iter().any(|kw| self.peek_is_keyword(kw))
        {
            let span = self.peek_span();
            self.consume_token();
            self.record_error(GraphQLParseError::new(
                "Operations and fragments are not allowed in a schema document",
                span,
                GraphQLParseErrorKind::WrongDocumentKind {
                    found: "executable definition".to_string(),
                },
            ));
            return Err(());
        }
        self.unexpected(&["a type-system definition"])
    }

    fn parse_description(&mut self) -> Result<Option<String>, ()> {
        if !self.peek_is(&GraphQLTokenKind::StringValue("".into())) {
            return Ok(None);
        }
        match self.parse_value(Some("descriptions"))? {
            ast::Value::String(s) => Ok(Some(s)),
            _ => Err(()),
        }
    }

    fn parse_schema_definition(
        &mut self,
        position: AstPos,
        is_extension: bool,
    ) -> Result<ast::SchemaDefinition, ()> {
        self.expect_keyword("schema")?;
        let directives = self.parse_directives(Some("schema directives"))?;
        let mut schema = ast::SchemaDefinition {
            position,
            directives,
            query: None,
            mutation: None,
            subscription: None,
        };
        if is_extension && !self.peek_is(&GraphQLTokenKind::CurlyBraceOpen) {
            return Ok(schema);
        }

        let roots = self.parse_delimited(
            GraphQLTokenKind::CurlyBraceOpen,
            GraphQLTokenKind::CurlyBraceClose,
            Some("root operation type list"),
            |p| {
                let kind = if p.peek_is_keyword("query") {
                    ast::OperationKind::Query
                } else if p.peek_is_keyword("mutation") {
                    ast::OperationKind::Mutation
                } else if p.peek_is_keyword("subscription") {
                    ast::OperationKind::Subscription
                } else {
                    return p.unexpected(&["`query`", "`mutation`", "`subscription`"]);
                };
                p.consume_token();
                p.expect(&GraphQLTokenKind::Colon)?;
                Ok((kind, p.expect_name()?.0))
            },
        )?;
        for (kind, type_name) in roots {
            let slot = match kind {
                ast::OperationKind::Query => &mut schema.query,
                ast::OperationKind::Mutation => &mut schema.mutation,
                ast::OperationKind::Subscription => &mut schema.subscription,
            };
            *slot = Some(type_name);
        }
        Ok(schema)
    }

    fn parse_type_definition(
        &mut self,
        description: Option<String>,
        position: AstPos,
    ) -> Result<ast::TypeDefinition, ()> {
        const KEYWORDS: [&str; 6] = ["scalar", "type", "interface", "union", "enum", "input"];
        let keyword = match self.token_stream.peek().map(|t| &t.kind) {
            Some(GraphQLTokenKind::Name(kw)) if KEYWORDS.contains(&kw.as_ref()) => kw.to_string(),
            _ => {
                return self.unexpected(&[
                    "`scalar`",
                    "`type`",
                    "`interface`",
                    "`union`",
                    "`enum`",
                    "`input`",
                ]);
            }
        };
        self.consume_token();
        let (name, _) = self.expect_name()?;

        Ok(match keyword.as_str() {
            "scalar" => ast::TypeDefinition::Scalar(ast::ScalarTypeDefinition {
                position,
                description,
                name,
                directives: self.parse_directives(Some("type-system directives"))?,
            }),
            "type" => {
                let implements_interfaces = self.parse_implements_interfaces()?;
                let directives = self.parse_directives(Some("type-system directives"))?;
                let fields = self.parse_fields_definition()?;
                ast::TypeDefinition::Object(ast::ObjectTypeDefinition {
                    position,
                    description,
                    name,
                    implements_interfaces,
                    directives,
                    fields,
                })
            }
            "interface" => {
                let implements_interfaces = self.parse_implements_interfaces()?;
                let directives = self.parse_directives(Some("type-system directives"))?;
                let fields = self.parse_fields_definition()?;
                ast::TypeDefinition::Interface(ast::InterfaceTypeDefinition {
                    position,
                    description,
                    name,
                    implements_interfaces,
                    directives,
                    fields,
                })
            }
            "union" => {
                let directives = self.parse_directives(Some("type-system directives"))?;
                let mut members = vec![];
                if self.try_consume(&GraphQLTokenKind::Equals) {
                    self.try_consume(&GraphQLTokenKind::Pipe);
                    members.push(self.expect_name()?.0);
                    while self.try_consume(&GraphQLTokenKind::Pipe) {
                        members.push(self.expect_name()?.0);
                    }
                }
                ast::TypeDefinition::Union(ast::UnionTypeDefinition {
                    position,
                    description,
                    name,
                    directives,
                    members,
                })
            }
            "enum" => {
                let directives = self.parse_directives(Some("type-system directives"))?;
                let values = if self.peek_is(&GraphQLTokenKind::CurlyBraceOpen) {
                    self.parse_delimited(
                        GraphQLTokenKind::CurlyBraceOpen,
                        GraphQLTokenKind::CurlyBraceClose,
                        Some("enum value list"),
                        Self::parse_enum_value_definition,
                    )?
                } else {
                    vec![]
                };
                ast::TypeDefinition::Enum(ast::EnumTypeDefinition {
                    position,
                    description,
                    name,
                    directives,
                    values,
                })
            }
            _ => {
                let directives = self.parse_directives(Some("type-system directives"))?;
                let fields = if self.peek_is(&GraphQLTokenKind::CurlyBraceOpen) {
                    self.parse_delimited(
                        GraphQLTokenKind::CurlyBraceOpen,
                        GraphQLTokenKind::CurlyBraceClose,
                        Some("input field list"),
                        Self::parse_input_value_definition,
                    )?
                } else {
                    vec![]
                };
                ast::TypeDefinition::InputObject(ast::InputObjectTypeDefinition {
                    position,
                    description,
                    name,
                    directives,
                    fields,
                })
            }
        })
    }

    fn parse_implements_interfaces(&mut self) -> Result<Vec<String>, ()> {
        let mut interfaces = vec![];
        if self.peek_is_keyword("implements") {
            self.consume_token();
            self.try_consume(&GraphQLTokenKind::Ampersand);
            interfaces.push(self.expect_name()?.0);
            while self.try_consume(&GraphQLTokenKind::Ampersand) {
                interfaces.push(self.expect_name()?.0);
            }
        }
        Ok(interfaces)
    }

    fn parse_fields_definition(&mut self) -> Result<Vec<ast::FieldDefinition>, ()> {
        if !self.peek_is(&GraphQLTokenKind::CurlyBraceOpen) {
            return Ok(vec![]);
        }
        self.parse_delimited(
            GraphQLTokenKind::CurlyBraceOpen,
            GraphQLTokenKind::CurlyBraceClose,
            Some("field list"),
            |p| {
                let position = p.peek_pos();
                let description = p.parse_description()?;
                let (name, _) = p.expect_name()?;
                let arguments = p.parse_arguments_definition()?;
                p.expect(&GraphQLTokenKind::Colon)?;
                let field_type = p.parse_type()?;
                let directives = p.parse_directives(Some("type-system directives"))?;
                Ok(ast::FieldDefinition {
                    position,
                    description,
                    name,
                    arguments,
                    field_type,
                    directives,
                })
            },
        )
    }

    fn parse_arguments_definition(&mut self) -> Result<Vec<ast::InputValueDefinition>, ()> {
        if !self.peek_is(&GraphQLTokenKind::ParenOpen) {
            return Ok(vec![]);
        }
        self.parse_delimited(
            GraphQLTokenKind::ParenOpen,
            GraphQLTokenKind::ParenClose,
            Some("argument definition list"),
            Self::parse_input_value_definition,
        )
    }

    fn parse_input_value_definition(&mut self) -> Result<ast::InputValueDefinition, ()> {
        let position = self.peek_pos();
        let description = self.parse_description()?;
        let (name, _) = self.expect_name()?;
        self.expect(&GraphQLTokenKind::Colon)?;
        let value_type = self.parse_type()?;
        let default_value = if self.try_consume(&GraphQLTokenKind::Equals) {
            Some(self.parse_value(Some("default values"))?)
        } else {
            None
        };
        let directives = self.parse_directives(Some("type-system directives"))?;
        Ok(ast::InputValueDefinition {
            position,
            description,
            name,
            value_type,
            default_value,
            directives,
        })
    }

    fn parse_enum_value_definition(&mut self) -> Result<ast::EnumValueDefinition, ()> {
        let position = self.peek_pos();
        let description = self.parse_description()?;
        if matches!(
            self.token_stream.peek().map(|t| &t.kind),
            Some(GraphQLTokenKind::True | GraphQLTokenKind::False | GraphQLTokenKind::Null)
        ) {
            return self.unexpected(&["an enum value name other than `true`, `false` or `null`"]);
        }
        let (name, _) = self.expect_name()?;
        let directives = self.parse_directives(Some("type-system directives"))?;
        Ok(ast::EnumValueDefinition {
            position,
            description,
            name,
            directives,
        })
    }

    fn parse_directive_definition(
        &mut self,
        description: Option<String>,
        position: AstPos,
    ) -> Result<ast::DirectiveDefinition, ()> {
        self.expect_keyword("directive")?;
        self.expect(&GraphQLTokenKind::At)?;
        let (name, _) = self.expect_name()?;
        let arguments = self.parse_arguments_definition()?;
        let repeatable = self.peek_is_keyword("repeatable");
        if repeatable {
            self.consume_token();
        }
        self.expect_keyword("on")?;
        self.try_consume(&GraphQLTokenKind::Pipe);
        let mut locations = vec![self.parse_directive_location()?];
        while self.try_consume(&GraphQLTokenKind::Pipe) {
            locations.push(self.parse_directive_location()?);
        }
        Ok(ast::DirectiveDefinition {
            position,
            description,
            name,
            arguments,
            repeatable,
            locations,
        })
    }

    fn parse_directive_location(&mut self) -> Result<ast::DirectiveLocation, ()> {
        let span = self.peek_span();
        let (name, _) = self.expect_name()?;
        match ast::DirectiveLocation::from_name(&name) {
            Some(location) => Ok(location),
            None => {
                self.record_error(GraphQLParseError::new(
                    format!("Unknown directive location `{name}`"),
                    span,
                    GraphQLParseErrorKind::UnexpectedToken {
                        expected: vec!["a directive location".to_string()],
                        found: format!("`{name}`"),
                    },
                ));
                Err(())
            }
        }
    }
}

fn raw_text(kind: &GraphQLTokenKind<'_>) -> String {
    match kind {
        GraphQLTokenKind::IntValue(raw) | GraphQLTokenKind::FloatValue(raw) => raw.to_string(),
        other => other.describe(),
    }
}
