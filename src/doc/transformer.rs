//! Inserts generated docstrings into undocumented modules, classes and
//! functions.
//!
//! Units are visited in post-order: members are documented before the class
//! that holds them and the module comes last, so the source sent for an
//! enclosing unit already carries the docstrings written for its members.
//! A unit that fails is logged, counted and left as it was.

use crate::ast::{Definition, Line, Module, Statement, Suite};
use crate::doc::{polish_with_indent, DocGenerator, UnitKind, UnitKinds, INDENT_UNIT};
use crate::error::{DocError, Result};
use crate::visitor::{Transformable, Transformer};
use log::{debug, error};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TransformStats {
    pub documented: usize,
    pub failed: usize,
}

#[derive(Debug)]
pub struct TransformOutcome {
    pub module: Module,
    pub stats: TransformStats,
}

/// A node that can receive a docstring as the first statement of its body.
trait Documentable {
    fn kind(&self) -> UnitKind;
    fn describe(&self) -> String;
    fn has_docstring(&self) -> bool;
    fn source_text(&self) -> String;
    /// Checks that the body is indented by `indent` and returns the newline
    /// sequence the inserted line should end with.
    fn insertion_newline(&self, indent: &str) -> Result<String>;
    fn with_docstring(self, docstring: Line) -> Self;
}

impl Documentable for Module {
    fn kind(&self) -> UnitKind {
        UnitKind::Module
    }

    fn describe(&self) -> String {
        UnitKind::Module.to_string()
    }

    fn has_docstring(&self) -> bool {
        Module::has_docstring(self)
    }

    fn source_text(&self) -> String {
        Module::source_text(self)
    }

    fn insertion_newline(&self, _indent: &str) -> Result<String> {
        Ok(self.newline.clone())
    }

    fn with_docstring(mut self, docstring: Line) -> Self {
        self.body.insert(0, Statement::Simple(docstring));
        self
    }
}

impl Documentable for Definition {
    fn kind(&self) -> UnitKind {
        self.kind.into()
    }

    fn describe(&self) -> String {
        format!("{} `{}`", self.kind(), self.name)
    }

    fn has_docstring(&self) -> bool {
        Definition::has_docstring(self)
    }

    fn source_text(&self) -> String {
        Definition::source_text(self)
    }

    fn insertion_newline(&self, indent: &str) -> Result<String> {
        match &self.suite {
            Suite::Inline(_) => Err(DocError::unsupported_suite(self.kind(), &self.name)),
            Suite::Indented(block) => match block.indent() {
                Some(actual) if actual == indent => Ok(block.newline.clone()),
                actual => Err(DocError::render_error(format!(
                    "body of {} is indented by {:?}, expected {:?}",
                    self.describe(),
                    actual.unwrap_or_default(),
                    indent
                ))),
            },
        }
    }

    fn with_docstring(mut self, docstring: Line) -> Self {
        if let Suite::Indented(block) = &mut self.suite {
            block.body.insert(0, Statement::Simple(docstring));
        }
        self
    }
}

pub struct DocstringTransformer<'g, G: DocGenerator + ?Sized> {
    generator: &'g G,
    kinds: UnitKinds,
    indent_unit: String,
    stats: TransformStats,
}

impl<'g, G: DocGenerator + ?Sized> DocstringTransformer<'g, G> {
    pub fn new(generator: &'g G, kinds: UnitKinds) -> Self {
        Self {
            generator,
            kinds,
            indent_unit: INDENT_UNIT.to_string(),
            stats: TransformStats::default(),
        }
    }

    pub fn with_indent_unit(mut self, indent_unit: impl Into<String>) -> Self {
        self.indent_unit = indent_unit.into();
        self
    }

    /// Documents every active, undocumented unit of `module`.
    pub fn transform(&mut self, module: Module) -> TransformOutcome {
        self.stats = TransformStats::default();
        let module = module.transform(self);
        TransformOutcome {
            module,
            stats: std::mem::take(&mut self.stats),
        }
    }

    /// `depth` is the depth the unit itself sits at.
    fn leave<U: Documentable>(&mut self, unit: U, depth: usize) -> U {
        let kind = unit.kind();
        if !self.kinds.is_active(kind) {
            return unit;
        }
        if unit.has_docstring() {
            debug!("{} is already documented", unit.describe());
            return unit;
        }

        let body_depth = match kind {
            UnitKind::Module => depth,
            UnitKind::Class | UnitKind::Function => depth + 1,
        };

        match self.docstring_for(&unit, body_depth) {
            Ok(docstring) => {
                debug!("Inserted docstring into {}", unit.describe());
                self.stats.documented += 1;
                unit.with_docstring(docstring)
            }
            Err(err) => {
                error!("Failed to document {}: {}", unit.describe(), err);
                self.stats.failed += 1;
                unit
            }
        }
    }

    fn docstring_for<U: Documentable>(&self, unit: &U, depth: usize) -> Result<Line> {
        let indent = self.indent_unit.repeat(depth);
        let newline = unit.insertion_newline(&indent)?;
        let raw = self.generator.generate(&unit.source_text(), unit.kind())?;
        let polished = polish_with_indent(&raw, depth, &self.indent_unit)?;

        let text = polished
            .strip_prefix(indent.as_str())
            .unwrap_or(&polished)
            .replace('\n', &newline);
        Ok(Line::new(indent, text, newline))
    }
}

impl<'g, G: DocGenerator + ?Sized> Transformer for DocstringTransformer<'g, G> {
    fn leave_module(&mut self, module: Module) -> Module {
        self.leave(module, 0)
    }

    fn leave_definition(&mut self, definition: Definition, depth: usize) -> Definition {
        self.leave(definition, depth)
    }
}

/// Runs a [`DocstringTransformer`] with the default indent unit over `module`.
pub fn document_module<G: DocGenerator + ?Sized>(
    module: Module,
    generator: &G,
    kinds: UnitKinds,
) -> TransformOutcome {
    DocstringTransformer::new(generator, kinds).transform(module)
}
