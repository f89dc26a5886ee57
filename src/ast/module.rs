use super::{Codegen, EmptyLine, Statement};

/// UTF-8 byte order mark, kept outside the parsed text.
pub const BOM: char = '\u{feff}';

/// A parsed Python file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Module {
    /// The file started with a [`BOM`].
    pub bom: bool,
    /// Blank and comment lines before the first statement.
    pub header: Vec<EmptyLine>,
    pub body: Vec<Statement>,
    /// Blank and comment lines after the last statement.
    pub footer: Vec<EmptyLine>,
    /// Newline sequence used by the file, applied to inserted lines.
    pub newline: String,
}

impl Module {
    pub fn has_docstring(&self) -> bool {
        self.body.first().map_or(false, Statement::is_docstring)
    }

    /// Renders the module without its byte order mark.
    pub fn source_text(&self) -> String {
        let mut out = String::new();
        self.codegen_text(&mut out);
        out
    }

    fn codegen_text(&self, out: &mut String) {
        for line in &self.header {
            line.codegen(out);
        }
        for statement in &self.body {
            statement.codegen(out);
        }
        for line in &self.footer {
            line.codegen(out);
        }
    }
}

impl Codegen for Module {
    fn codegen(&self, out: &mut String) {
        if self.bom {
            out.push(BOM);
        }
        self.codegen_text(out);
    }
}
