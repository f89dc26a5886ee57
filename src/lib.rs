pub mod ast;
pub mod config;
pub mod doc;
pub mod driver;
pub mod error;
pub mod lexer;
pub mod parser;
pub mod prelude;
pub mod source_location;
pub mod token;
pub mod visitor;

pub use ast::{Codegen, Module};
pub use config::{Args, Config};
pub use doc::{DocGenerator, UnitKind, UnitKinds};
pub use error::{DocError, Result};
pub use parser::parse_module;

/// Installs the `env_logger` backend. `RUST_LOG` overrides the default
/// `info` filter. Later calls are ignored.
pub fn init_logging() {
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp(None)
        .try_init();
}
