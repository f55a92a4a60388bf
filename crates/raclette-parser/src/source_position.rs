use crate::ast::AstPos;

/// Source position information produced by the lexer.
///
/// This is a pure data struct with no mutation methods. Lexers are responsible
/// for computing position values as they scan input.
///
/// # Indexing Convention
///
/// **All position values are 0-based:**
/// - `line`: 0 = first line of the document
/// - `col`: character count within the current line
/// - `byte_offset`: byte offset within the whole document
///
/// Use [`SourcePosition::to_ast_pos()`] to obtain the 1-based
/// [`AstPos`] that is stored on AST nodes and shown to users.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct SourcePosition {
    line: usize,
    col: usize,
    byte_offset: usize,
}

impl SourcePosition {
    /// Create a new SourcePosition from 0-based values.
    pub fn new(line: usize, col: usize, byte_offset: usize) -> Self {
        Self {
            line,
            col,
            byte_offset,
        }
    }

    /// Returns the 0-based line number.
    pub fn line(&self) -> usize {
        self.line
    }

    /// Returns the 0-based character column within the line.
    pub fn col(&self) -> usize {
        self.col
    }

    /// Returns the 0-based byte offset from the start of the document.
    pub fn byte_offset(&self) -> usize {
        self.byte_offset
    }

    /// Convert to the 1-based position stored on AST nodes.
    pub fn to_ast_pos(&self) -> AstPos {
        AstPos {
            line: self.line + 1,
            column: self.col + 1,
        }
    }
}
