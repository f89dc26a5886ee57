pub use crate::ast::{Codegen, Definition, DefinitionKind, Module, Statement, Suite};
pub use crate::parser::parse_module;
pub use crate::config::{Args, Config, Prompts};
pub use crate::doc::{
    document_module, polish, ChatCompletionsGenerator, DocGenerator, DocstringTransformer,
    TransformOutcome, TransformStats, UnitKind, UnitKinds,
};
pub use crate::driver::{collect_files, Driver, FileReport, RunSummary};
pub use crate::error::{DocError, Result};
pub use crate::visitor::{Transformable, Transformer};
