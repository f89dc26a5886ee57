//! Post-order rebuilding traversal over a [`Module`].
//!
//! Every hook takes a node by value and returns the node that replaces it.
//! Children are rebuilt before their parent's hook runs, so a hook always
//! sees the already transformed body. The nesting depth is passed down as an
//! argument: it counts the indented blocks enclosing the node.

use crate::ast::{Compound, Definition, IndentedBlock, Module, Statement, Suite};

pub trait Transformer {
    fn leave_module(&mut self, module: Module) -> Module {
        module
    }

    /// `depth` is the depth of the scope the definition appears in, not of
    /// its body.
    fn leave_definition(&mut self, definition: Definition, _depth: usize) -> Definition {
        definition
    }

    fn leave_compound(&mut self, compound: Compound, _depth: usize) -> Compound {
        compound
    }
}

pub trait Transformable: Sized {
    fn transform<T: Transformer + ?Sized>(self, transformer: &mut T) -> Self;
}

impl Transformable for Module {
    fn transform<T: Transformer + ?Sized>(self, transformer: &mut T) -> Self {
        let body = walk_statements(self.body, transformer, 0);
        transformer.leave_module(Module { body, ..self })
    }
}

fn walk_statements<T: Transformer + ?Sized>(
    statements: Vec<Statement>,
    transformer: &mut T,
    depth: usize,
) -> Vec<Statement> {
    statements
        .into_iter()
        .map(|statement| walk_statement(statement, transformer, depth))
        .collect()
}

fn walk_statement<T: Transformer + ?Sized>(
    statement: Statement,
    transformer: &mut T,
    depth: usize,
) -> Statement {
    match statement {
        Statement::Simple(line) => Statement::Simple(line),
        Statement::Compound(compound) => {
            let suite = walk_suite(compound.suite, transformer, depth);
            let compound = Compound { suite, ..compound };
            Statement::Compound(transformer.leave_compound(compound, depth))
        }
        Statement::Definition(definition) => {
            let suite = walk_suite(definition.suite, transformer, depth);
            let definition = Definition { suite, ..definition };
            Statement::Definition(transformer.leave_definition(definition, depth))
        }
    }
}

fn walk_suite<T: Transformer + ?Sized>(suite: Suite, transformer: &mut T, depth: usize) -> Suite {
    match suite {
        Suite::Indented(block) => {
            let body = walk_statements(block.body, transformer, depth + 1);
            Suite::Indented(IndentedBlock { body, ..block })
        }
        Suite::Inline(suite) => Suite::Inline(suite),
    }
}
