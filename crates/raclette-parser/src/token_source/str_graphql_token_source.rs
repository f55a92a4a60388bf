//! A [`GraphQLTokenSource`](super::GraphQLTokenSource) that lexes from a
//! `&str` input.
//!
//! Token values borrow directly from the source string using
//! `Cow::Borrowed`, so names, numbers and strings are never copied while
//! lexing.
//!
//! ```rust
//! use raclette_parser::token::GraphQLTokenKind;
//! use raclette_parser::token_source::StrGraphQLTokenSource;
//!
//! let kinds: Vec<_> = StrGraphQLTokenSource::new("{ name }")
//!     .map(|token| token.kind)
//!     .collect();
//! assert_eq!(kinds, vec![
//!     GraphQLTokenKind::CurlyBraceOpen,
//!     GraphQLTokenKind::name_borrowed("name"),
//!     GraphQLTokenKind::CurlyBraceClose,
//!     GraphQLTokenKind::Eof,
//! ]);
//! ```

use crate::GraphQLSourceSpan;
use crate::SourcePosition;
use crate::token::GraphQLToken;
use crate::token::GraphQLTokenKind;

pub struct StrGraphQLTokenSource<'src> {
    source: &'src str,

    /// The remaining text to lex is `&source[curr_byte_offset..]`.
    curr_byte_offset: usize,

    curr_line: usize,

    /// Character (not byte) column within the current line.
    curr_col: usize,

    /// Set after a `\r` so that a following `\n` is not counted as a second
    /// line break.
    last_char_was_cr: bool,

    finished: bool,
}

impl<'src> StrGraphQLTokenSource<'src> {
    pub fn new(source: &'src str) -> Self {
        Self {
            source,
            curr_byte_offset: 0,
            curr_line: 0,
            curr_col: 0,
            last_char_was_cr: false,
            finished: false,
        }
    }

    // =========================================================================
    // Position and scanning helpers
    // =========================================================================

    fn remaining(&self) -> &'src str {
        &self.source[self.curr_byte_offset..]
    }

    fn curr_position(&self) -> SourcePosition {
        SourcePosition::new(self.curr_line, self.curr_col, self.curr_byte_offset)
    }

    fn peek_char(&self) -> Option<char> {
        self.remaining().chars().next()
    }

    fn peek_char_nth(&self, n: usize) -> Option<char> {
        self.remaining().chars().nth(n)
    }

    /// Consumes the next character, tracking `\n`, `\r` and `\r\n` line
    /// terminators.
    fn consume(&mut self) -> Option<char> {
        let ch = self.peek_char()?;
        match ch {
            '\n' if self.last_char_was_cr => {
                self.last_char_was_cr = false;
            }
            '\n' | '\r' => {
                self.curr_line += 1;
                self.curr_col = 0;
                self.last_char_was_cr = ch == '\r';
            }
            _ => {
                self.curr_col += 1;
                self.last_char_was_cr = false;
            }
        }
        self.curr_byte_offset += ch.len_utf8();
        Some(ch)
    }

    fn consume_while(&mut self, pred: impl Fn(char) -> bool) {
        while self.peek_char().is_some_and(&pred) {
            self.consume();
        }
    }

    fn make_token(&self, kind: GraphQLTokenKind<'src>, start: SourcePosition) -> GraphQLToken<'src> {
        GraphQLToken::new(kind, GraphQLSourceSpan::new(start, self.curr_position()))
    }

    fn single_char(&mut self, kind: GraphQLTokenKind<'src>, start: SourcePosition) -> GraphQLToken<'src> {
        self.consume();
        self.make_token(kind, start)
    }

    // =========================================================================
    // Lexer main loop
    // =========================================================================

    fn next_token(&mut self) -> GraphQLToken<'src> {
        loop {
            self.consume_while(|ch| matches!(ch, ' ' | '\t' | '\n' | '\r' | ',' | '\u{FEFF}'));
            let start = self.curr_position();

            let Some(ch) = self.peek_char() else {
                return self.make_token(GraphQLTokenKind::Eof, start);
            };

            return match ch {
                '#' => {
                    self.skip_comment();
                    continue;
                }
                '!' => self.single_char(GraphQLTokenKind::Bang, start),
                '$' => self.single_char(GraphQLTokenKind::Dollar, start),
                '&' => self.single_char(GraphQLTokenKind::Ampersand, start),
                '(' => self.single_char(GraphQLTokenKind::ParenOpen, start),
                ')' => self.single_char(GraphQLTokenKind::ParenClose, start),
                ':' => self.single_char(GraphQLTokenKind::Colon, start),
                '=' => self.single_char(GraphQLTokenKind::Equals, start),
                '@' => self.single_char(GraphQLTokenKind::At, start),
                '[' => self.single_char(GraphQLTokenKind::SquareBracketOpen, start),
                ']' => self.single_char(GraphQLTokenKind::SquareBracketClose, start),
                '{' => self.single_char(GraphQLTokenKind::CurlyBraceOpen, start),
                '}' => self.single_char(GraphQLTokenKind::CurlyBraceClose, start),
                '|' => self.single_char(GraphQLTokenKind::Pipe, start),
                '.' => self.lex_ellipsis(start),
                '"' => self.lex_string(start),
                '-' | '0'..='9' => self.lex_number(start),
                ch if is_name_start(ch) => self.lex_name(start),
                _ => self.lex_invalid_character(start),
            };
        }
    }

    /// A comment runs from `#` to the end of the line.
    fn skip_comment(&mut self) {
        let rest = self.remaining().as_bytes();
        let len = memchr::memchr2(b'\n', b'\r', rest).unwrap_or(rest.len());
        let comment = &self.remaining()[..len];
        self.curr_col += comment.chars().count();
        self.curr_byte_offset += len;
        self.last_char_was_cr = false;
    }

    fn lex_ellipsis(&mut self, start: SourcePosition) -> GraphQLToken<'src> {
        if self.remaining().starts_with("...") {
            self.consume();
            self.consume();
            self.consume();
            return self.make_token(GraphQLTokenKind::Ellipsis, start);
        }
        self.consume_while(|ch| ch == '.');
        let dots = &self.source[start.byte_offset()..self.curr_byte_offset];
        self.make_token(
            GraphQLTokenKind::error(format!("Unexpected `{dots}` (use `...` for spread operator)")),
            start,
        )
    }

    /// Names match `/[_A-Za-z][_0-9A-Za-z]*/`. `true`, `false` and `null`
    /// are emitted as distinct token kinds.
    fn lex_name(&mut self, start: SourcePosition) -> GraphQLToken<'src> {
        self.consume_while(is_name_continue);
        let name = &self.source[start.byte_offset()..self.curr_byte_offset];
        let kind = match name {
            "true" => GraphQLTokenKind::True,
            "false" => GraphQLTokenKind::False,
            "null" => GraphQLTokenKind::Null,
            _ => GraphQLTokenKind::name_borrowed(name),
        };
        self.make_token(kind, start)
    }

    /// Lexes `-?(0|[1-9][0-9]*)(\.[0-9]+)?([eE][+-]?[0-9]+)?`.
    fn lex_number(&mut self, start: SourcePosition) -> GraphQLToken<'src> {
        let mut is_float = false;

        if self.peek_char() == Some('-') {
            self.consume();
        }

        match self.peek_char() {
            Some('0') => {
                self.consume();
                if self.peek_char().is_some_and(|ch| ch.is_ascii_digit()) {
                    return self.lex_number_error(start, "Invalid number: leading zeros are not allowed");
                }
            }
            Some(ch) if ch.is_ascii_digit() => self.consume_while(|ch| ch.is_ascii_digit()),
            _ => {
                return self.make_token(GraphQLTokenKind::error("Unexpected `-`"), start);
            }
        }

        if self.peek_char() == Some('.') {
            if !self.peek_char_nth(1).is_some_and(|ch| ch.is_ascii_digit()) {
                return self.lex_number_error(start, "Invalid number: expected digit after `.`");
            }
            is_float = true;
            self.consume();
            self.consume_while(|ch| ch.is_ascii_digit());
        }

        if matches!(self.peek_char(), Some('e' | 'E')) {
            is_float = true;
            self.consume();
            if matches!(self.peek_char(), Some('+' | '-')) {
                self.consume();
            }
            if !self.peek_char().is_some_and(|ch| ch.is_ascii_digit()) {
                return self.lex_number_error(
                    start,
                    "Invalid number: exponent must have at least one digit",
                );
            }
            self.consume_while(|ch| ch.is_ascii_digit());
        }

        // `123abc` and `1.5.` are single malformed tokens, not two tokens.
        if self.peek_char().is_some_and(|ch| is_name_start(ch) || ch == '.') {
            return self.lex_number_error(start, "Invalid number");
        }

        let num_text = &self.source[start.byte_offset()..self.curr_byte_offset];
        let kind = if is_float {
            GraphQLTokenKind::float_value_borrowed(num_text)
        } else {
            GraphQLTokenKind::int_value_borrowed(num_text)
        };
        self.make_token(kind, start)
    }

    fn lex_number_error(&mut self, start: SourcePosition, message: &str) -> GraphQLToken<'src> {
        self.consume_while(|ch| ch.is_ascii_alphanumeric() || matches!(ch, '.' | '+' | '-' | '_'));
        let invalid_text = &self.source[start.byte_offset()..self.curr_byte_offset];
        self.make_token(GraphQLTokenKind::error(format!("{message}: `{invalid_text}`")), start)
    }

    fn lex_string(&mut self, start: SourcePosition) -> GraphQLToken<'src> {
        if self.remaining().starts_with("\"\"\"") {
            return self.lex_block_string(start);
        }

        self.consume();
        loop {
            match self.peek_char() {
                None | Some('\n') | Some('\r') => {
                    return self.make_token(
                        GraphQLTokenKind::error("Unterminated string literal"),
                        start,
                    );
                }
                Some('"') => {
                    self.consume();
                    break;
                }
                Some('\\') => {
                    self.consume();
                    if self.peek_char().is_some_and(|ch| ch != '\n' && ch != '\r') {
                        self.consume();
                    }
                }
                Some(_) => {
                    self.consume();
                }
            }
        }

        let text = &self.source[start.byte_offset()..self.curr_byte_offset];
        let token = self.make_token(GraphQLTokenKind::string_value_borrowed(text), start);
        // Surface bad escapes as lexer errors at the literal.
        match token.kind.parse_string_value() {
            Some(Err(err)) => GraphQLToken::new(GraphQLTokenKind::error(err.to_string()), token.span),
            _ => token,
        }
    }

    fn lex_block_string(&mut self, start: SourcePosition) -> GraphQLToken<'src> {
        for _ in 0..3 {
            self.consume();
        }
        loop {
            let rest = self.remaining();
            if rest.is_empty() {
                return self.make_token(GraphQLTokenKind::error("Unterminated block string"), start);
            }
            if rest.starts_with("\\\"\"\"") {
                for _ in 0..4 {
                    self.consume();
                }
            } else if rest.starts_with("\"\"\"") {
                for _ in 0..3 {
                    self.consume();
                }
                break;
            } else {
                self.consume();
            }
        }
        let text = &self.source[start.byte_offset()..self.curr_byte_offset];
        self.make_token(GraphQLTokenKind::string_value_borrowed(text), start)
    }

    fn lex_invalid_character(&mut self, start: SourcePosition) -> GraphQLToken<'src> {
        let message = match self.consume() {
            Some(ch) if ch.is_control() => format!("Unexpected character U+{:04X}", ch as u32),
            Some(ch) => format!("Unexpected character `{ch}`"),
            None => "Unexpected end of input".to_string(),
        };
        self.make_token(GraphQLTokenKind::error(message), start)
    }
}

impl<'src> Iterator for StrGraphQLTokenSource<'src> {
    type Item = GraphQLToken<'src>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        let token = self.next_token();
        if matches!(token.kind, GraphQLTokenKind::Eof) {
            self.finished = true;
        }
        Some(token)
    }
}

fn is_name_start(ch: char) -> bool {
    ch == '_' || ch.is_ascii_alphabetic()
}

fn is_name_continue(ch: char) -> bool {
    ch == '_' || ch.is_ascii_alphanumeric()
}
