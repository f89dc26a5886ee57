/// What a header line opens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderKeyword {
    /// `def` or `async def`.
    Def,
    Class,
    /// Any other block opener: `if`, `else`, `for`, `try`, `with`, `match`, ...
    Block,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    /// Blank, whitespace-only or comment-only physical line.
    Trivia,
    /// A logical line of simple statements.
    Statement,
    /// An `@decorator` line.
    Decorator,
    /// A compound statement header. `colon` is the byte offset of the header
    /// colon inside the token text.
    Header { keyword: HeaderKeyword, colon: usize },
}

/// One line of source as produced by the lexer.
///
/// For code tokens `text` is the whole logical line after its indentation,
/// which may span several physical lines (brackets, backslash continuations,
/// triple-quoted strings). `newline` is the terminator, empty at end of file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub indent: String,
    pub text: String,
    pub newline: String,
    pub position: usize,
}

impl Token {
    pub fn new(
        kind: TokenKind,
        indent: impl Into<String>,
        text: impl Into<String>,
        newline: impl Into<String>,
        position: usize,
    ) -> Self {
        Self {
            kind,
            indent: indent.into(),
            text: text.into(),
            newline: newline.into(),
            position,
        }
    }

    pub fn is_trivia(&self) -> bool {
        self.kind == TokenKind::Trivia
    }

    /// Byte offset of the first non-indentation character.
    pub fn content_position(&self) -> usize {
        self.position + self.indent.len()
    }
}
