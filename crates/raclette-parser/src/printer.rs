//! Normalized GraphQL text output for AST nodes.

/// An indentation-aware string sink used by
/// [`AstNode::append_graphql()`](crate::ast::AstNode::append_graphql).
///
/// Block constructs (selection sets, field lists, enum values) are printed
/// one item per line, indented by two spaces per level.
#[derive(Debug, Default)]
pub struct GraphQLPrinter {
    out: String,
    indent: usize,
    at_line_start: bool,
}

impl GraphQLPrinter {
    pub fn new() -> Self {
        Self {
            out: String::new(),
            indent: 0,
            at_line_start: true,
        }
    }

    /// Appends `text` on the current line.
    pub fn write(&mut self, text: &str) {
        if text.is_empty() {
            return;
        }
        if self.at_line_start {
            for _ in 0..self.indent {
                self.out.push_str("  ");
            }
            self.at_line_start = false;
        }
        self.out.push_str(text);
    }

    pub fn newline(&mut self) {
        self.out.push('\n');
        self.at_line_start = true;
    }

    /// Writes `{`, then each item of `items` on its own indented line via
    /// `print_item`, then the closing `}`. The brace is separated from
    /// preceding text on the same line by a space.
    pub fn block<T>(&mut self, items: &[T], mut print_item: impl FnMut(&mut Self, &T)) {
        self.write(if self.at_line_start { "{" } else { " {" });
        self.newline();
        self.indent += 1;
        for item in items {
            print_item(self, item);
            self.newline();
        }
        self.indent -= 1;
        self.write("}");
    }

    /// Writes `open`, the items separated by `separator`, then `close`.
    /// Writes nothing at all when `items` is empty.
    pub fn delimited<T>(
        &mut self,
        open: &str,
        separator: &str,
        close: &str,
        items: &[T],
        mut print_item: impl FnMut(&mut Self, &T),
    ) {
        if items.is_empty() {
            return;
        }
        self.write(open);
        for (i, item) in items.iter().enumerate() {
            if i > 0 {
                self.write(separator);
            }
            print_item(self, item);
        }
        self.write(close);
    }

    pub fn finish(self) -> String {
        self.out
    }
}
