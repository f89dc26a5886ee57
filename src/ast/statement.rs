use super::{Codegen, Header, Line};
use crate::lexer::scan_string;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Statement {
    /// A logical line of simple statements.
    Simple(Line),
    /// `if`, `for`, `while`, `try`, `with`, `match` and their clauses.
    Compound(Compound),
    /// A class or function definition.
    Definition(Definition),
}

impl Statement {
    pub fn indent(&self) -> &str {
        match self {
            Statement::Simple(line) => &line.indent,
            Statement::Compound(compound) => &compound.header.indent,
            Statement::Definition(definition) => definition.indent(),
        }
    }

    /// A bare string literal expression statement.
    pub fn is_docstring(&self) -> bool {
        match self {
            Statement::Simple(line) => is_docstring_expr(&line.text),
            _ => false,
        }
    }
}

impl Codegen for Statement {
    fn codegen(&self, out: &mut String) {
        match self {
            Statement::Simple(line) => line.codegen(out),
            Statement::Compound(compound) => compound.codegen(out),
            Statement::Definition(definition) => definition.codegen(out),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Compound {
    pub header: Header,
    pub suite: Suite,
}

impl Codegen for Compound {
    fn codegen(&self, out: &mut String) {
        self.header.codegen(out);
        self.suite.codegen(out);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DefinitionKind {
    Class,
    Function,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Definition {
    pub kind: DefinitionKind,
    pub name: String,
    pub decorators: Vec<Line>,
    pub header: Header,
    pub suite: Suite,
}

impl Definition {
    pub fn indent(&self) -> &str {
        self.decorators
            .first()
            .map_or(&self.header.indent, |decorator| &decorator.indent)
    }

    pub fn has_docstring(&self) -> bool {
        self.suite.has_docstring()
    }

    /// Renders the definition itself: decorators, signature and body, but
    /// not the trivia lines in front of it. Lines carrying the definition's
    /// own indentation are shifted to column 0.
    pub fn source_text(&self) -> String {
        let mut out = String::new();
        let mut decorators = self.decorators.iter();
        match decorators.next() {
            Some(first) => {
                first.codegen_bare(&mut out);
                for decorator in decorators {
                    decorator.codegen(&mut out);
                }
                self.header.codegen(&mut out);
            }
            None => self.header.codegen_bare(&mut out),
        }
        self.suite.codegen(&mut out);

        let indent = self.indent();
        if indent.is_empty() {
            return out;
        }
        out.split_inclusive('\n')
            .map(|line| line.strip_prefix(indent).unwrap_or(line))
            .collect()
    }
}

impl Codegen for Definition {
    fn codegen(&self, out: &mut String) {
        for decorator in &self.decorators {
            decorator.codegen(out);
        }
        self.header.codegen(out);
        self.suite.codegen(out);
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Suite {
    Indented(IndentedBlock),
    /// Statements written on the header line itself, as in `def f(): pass`.
    Inline(SimpleSuite),
}

impl Suite {
    pub fn has_docstring(&self) -> bool {
        match self {
            Suite::Indented(block) => block.body.first().map_or(false, Statement::is_docstring),
            Suite::Inline(suite) => is_docstring_expr(suite.text.trim_start()),
        }
    }
}

impl Codegen for Suite {
    fn codegen(&self, out: &mut String) {
        match self {
            Suite::Indented(block) => block.codegen(out),
            Suite::Inline(suite) => {
                out.push_str(&suite.text);
                out.push_str(&suite.newline);
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndentedBlock {
    /// Whatever follows the header colon on its line: spaces and a comment.
    pub trailer: String,
    pub newline: String,
    pub body: Vec<Statement>,
}

impl IndentedBlock {
    pub fn indent(&self) -> Option<&str> {
        self.body.first().map(Statement::indent)
    }
}

impl Codegen for IndentedBlock {
    fn codegen(&self, out: &mut String) {
        out.push_str(&self.trailer);
        out.push_str(&self.newline);
        for statement in &self.body {
            statement.codegen(out);
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimpleSuite {
    pub text: String,
    pub newline: String,
}

/// Checks whether `text` is an expression made only of string literals,
/// optionally parenthesized and implicitly concatenated. Bytes and f-strings
/// never count.
pub fn is_docstring_expr(text: &str) -> bool {
    let bytes = text.as_bytes();
    let mut pos = 0;
    let mut parens = 0usize;
    let mut strings = 0usize;

    loop {
        pos = skip_blanks(bytes, pos, parens > 0);
        match bytes.get(pos) {
            None | Some(b';') | Some(b'#') => return strings > 0 && parens == 0,
            Some(b'(') if strings == 0 => {
                parens += 1;
                pos += 1;
            }
            Some(b')') if parens > 0 && strings > 0 => {
                parens -= 1;
                pos += 1;
            }
            Some(byte) if *byte == b'"' || *byte == b'\'' || byte.is_ascii_alphabetic() => {
                let prefix_len = bytes[pos..]
                    .iter()
                    .take_while(|b| b.is_ascii_alphabetic())
                    .count();
                if !matches!(
                    text[pos..pos + prefix_len].to_ascii_lowercase().as_str(),
                    "" | "r" | "u"
                ) {
                    return false;
                }
                let quote_pos = pos + prefix_len;
                if !matches!(bytes.get(quote_pos), Some(b'"' | b'\'')) {
                    return false;
                }
                match scan_string(bytes, quote_pos, false) {
                    Some(end) => {
                        pos = end;
                        strings += 1;
                    }
                    None => return false,
                }
            }
            _ => return false,
        }
    }
}

fn skip_blanks(bytes: &[u8], mut pos: usize, in_parens: bool) -> usize {
    while let Some(&byte) = bytes.get(pos) {
        match byte {
            b' ' | b'\t' | b'\x0c' => pos += 1,
            b'\r' | b'\n' if in_parens => pos += 1,
            b'\\' if bytes[pos + 1..].starts_with(b"\r\n") => pos += 3,
            b'\\' if bytes.get(pos + 1) == Some(&b'\n') => pos += 2,
            _ => break,
        }
    }
    pos
}
