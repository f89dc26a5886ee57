//! Lossless concrete syntax tree for Python source.
//!
//! The tree only resolves as much structure as docstring insertion needs:
//! logical lines, indented blocks and class/function definitions. Everything
//! else is kept as the exact text it was parsed from, so serializing an
//! untouched tree reproduces the input byte for byte.

mod module;
mod statement;

pub use module::{Module, BOM};
pub use statement::{
    is_docstring_expr, Compound, Definition, DefinitionKind, IndentedBlock, SimpleSuite,
    Statement, Suite,
};

/// Writes a node back out as source text.
pub trait Codegen {
    fn codegen(&self, out: &mut String);

    fn code(&self) -> String {
        let mut out = String::new();
        self.codegen(&mut out);
        out
    }
}

/// A physical line holding no code: blank, whitespace only, or a comment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmptyLine {
    pub indent: String,
    pub text: String,
    pub newline: String,
}

impl Codegen for EmptyLine {
    fn codegen(&self, out: &mut String) {
        out.push_str(&self.indent);
        out.push_str(&self.text);
        out.push_str(&self.newline);
    }
}

/// One logical line of code with the trivia lines preceding it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    pub leading_lines: Vec<EmptyLine>,
    pub indent: String,
    pub text: String,
    pub newline: String,
}

impl Line {
    pub fn new(indent: impl Into<String>, text: impl Into<String>, newline: impl Into<String>) -> Self {
        Self {
            leading_lines: Vec::new(),
            indent: indent.into(),
            text: text.into(),
            newline: newline.into(),
        }
    }

    /// Writes the line without its leading trivia.
    pub fn codegen_bare(&self, out: &mut String) {
        out.push_str(&self.indent);
        out.push_str(&self.text);
        out.push_str(&self.newline);
    }
}

impl Codegen for Line {
    fn codegen(&self, out: &mut String) {
        for line in &self.leading_lines {
            line.codegen(out);
        }
        self.codegen_bare(out);
    }
}

/// The opening line of a compound statement, up to and including its colon.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Header {
    pub leading_lines: Vec<EmptyLine>,
    pub indent: String,
    pub text: String,
}

impl Header {
    pub fn codegen_bare(&self, out: &mut String) {
        out.push_str(&self.indent);
        out.push_str(&self.text);
    }
}

impl Codegen for Header {
    fn codegen(&self, out: &mut String) {
        for line in &self.leading_lines {
            line.codegen(out);
        }
        self.codegen_bare(out);
    }
}
