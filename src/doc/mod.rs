//! Docstring generation: unit kinds, the generation backend, text polishing
//! and the tree transformer that ties them together.

mod generator;
mod kind;
mod polish;
mod transformer;

pub use generator::{ChatCompletionsGenerator, DocGenerator};
pub use kind::{UnitKind, UnitKinds};
pub use polish::{polish, polish_with_indent, INDENT_UNIT};
pub use transformer::{document_module, DocstringTransformer, TransformOutcome, TransformStats};
