//! Run configuration, read once at startup from the command line and the
//! environment.

use crate::doc::{UnitKind, UnitKinds};
use crate::error::{DocError, Result};
use clap::Parser;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const DEFAULT_MODEL: &str = "gpt-3.5-turbo-0125";
pub const DEFAULT_API_BASE: &str = "https://api.openai.com/v1";

const FUNCTION_PROMPT: &str = r#"
Generate a descriptive docstring for this Python {code_entity}, including details about any parameters, return values, and exceptions raised. Follow PEP 257. Describe what the {code_entity} does rather than how it does it.
Only include sections that apply. If nothing is raised, leave out the exceptions section.
Answer with the docstring only.

Example:

Code:
def check_password(self, password):
    return bcrypt.checkpw(password.encode(), self.password.encode())

Docstring:
"""Check whether the given password matches the stored hash.

Args:
    password (str): The password to check.

Returns:
    bool: True if the password matches, False otherwise.
"""
"#;

const CLASS_PROMPT: &str = r#"
Generate a descriptive docstring for this Python {code_entity}, including details about its attributes and methods. Follow PEP 257. Describe what the {code_entity} does rather than how it does it.
Only include sections that apply. If the {code_entity} has no methods, leave out the methods section.
Answer with the docstring only.

Example:

Code:
class User:
    def __init__(self, username, password):
        self.username = username
        self.password = bcrypt.hashpw(password.encode(), bcrypt.gensalt()).decode()

    def check_password(self, password):
        return bcrypt.checkpw(password.encode(), self.password.encode())

Docstring:
"""An application user with a username and a hashed password.

Attributes:
    username (str): The user's name.
    password (str): The bcrypt hash of the user's password.

Methods:
    check_password: Check whether a password matches the stored hash.
"""
"#;

const MODULE_PROMPT: &str = r#"
Generate a descriptive docstring for this Python {code_entity}, summarizing its contents. Follow PEP 257.
Only include sections that apply. If the {code_entity} defines no classes, leave out the classes section.
Answer with the docstring only.

Example:

Code:
class Calculator:
    def add(self, x, y):
        return x + y

    def divide(self, x, y):
        if y == 0:
            raise ZeroDivisionError("Division by zero is not allowed.")
        return x / y

Docstring:
"""A small calculator.

Classes:
    Calculator: Performs basic arithmetic.

Exceptions:
    ZeroDivisionError: Raised when dividing by zero.
"""
"#;

/// Instruction templates sent ahead of the unit source, one per unit kind.
/// `{code_entity}` is replaced with the kind's name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prompts {
    pub function: String,
    pub class: String,
    pub module: String,
}

impl Prompts {
    pub fn for_kind(&self, kind: UnitKind) -> String {
        let template = match kind {
            UnitKind::Function => &self.function,
            UnitKind::Class => &self.class,
            UnitKind::Module => &self.module,
        };
        template.replace("{code_entity}", kind.as_str())
    }
}

impl Default for Prompts {
    fn default() -> Self {
        Self {
            function: FUNCTION_PROMPT.to_string(),
            class: CLASS_PROMPT.to_string(),
            module: MODULE_PROMPT.to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub input_paths: Vec<PathBuf>,
    pub kinds: UnitKinds,
    pub model: String,
    pub api_base: String,
    pub api_key: String,
    pub timeout: Duration,
    pub indent_width: usize,
    pub prompts: Prompts,
    pub check: bool,
}

impl Config {
    pub fn validate(&self) -> Result<()> {
        if self.input_paths.is_empty() {
            return Err(DocError::config_error("no input paths given"));
        }
        if self.input_paths.iter().any(|path| path == Path::new("/")) {
            return Err(DocError::config_error("refusing to rewrite files under `/`"));
        }
        if self.api_key.trim().is_empty() {
            return Err(DocError::config_error(
                "an API key is required (set OPENAI_API_KEY or pass --api-key)",
            ));
        }
        if self.model.trim().is_empty() {
            return Err(DocError::config_error("model name is empty"));
        }
        if self.indent_width == 0 {
            return Err(DocError::config_error("indent width must be at least 1"));
        }
        Ok(())
    }

    /// Whitespace inserted per nesting level in generated docstrings.
    pub fn indent_unit(&self) -> String {
        " ".repeat(self.indent_width)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            input_paths: vec![PathBuf::from(".")],
            kinds: UnitKinds::default(),
            model: DEFAULT_MODEL.to_string(),
            api_base: DEFAULT_API_BASE.to_string(),
            api_key: String::new(),
            timeout: Duration::from_secs(60),
            indent_width: 4,
            prompts: Prompts::default(),
            check: false,
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "zero-docs")]
#[command(about = "Generate missing docstrings for Python modules, classes and functions")]
pub struct Args {
    /// Files and directories to document.
    #[arg(env = "ZERO_DOCS_INPUT_PATHS", value_delimiter = ' ', default_value = ".")]
    pub paths: Vec<PathBuf>,

    /// Comma separated unit kinds to document: module, class, function.
    #[arg(
        long,
        env = "ZERO_DOCS_CODE_ENTITIES",
        default_value = "module,class,function"
    )]
    pub entities: String,

    #[arg(long, env = "MODEL", default_value = DEFAULT_MODEL)]
    pub model: String,

    /// Base URL of an OpenAI-compatible API.
    #[arg(long, env = "OPENAI_BASE_URL", default_value = DEFAULT_API_BASE)]
    pub api_base: String,

    #[arg(long, env = "OPENAI_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Seconds to wait for each generation request.
    #[arg(long, env = "ZERO_DOCS_TIMEOUT_SECS", default_value_t = 60)]
    pub timeout_secs: u64,

    /// Spaces per indentation level of the files being documented.
    #[arg(long, env = "ZERO_DOCS_INDENT_WIDTH", default_value_t = 4)]
    pub indent_width: usize,

    #[arg(long, env = "ZERO_DOCS_FUNCTION_PROMPT", hide = true)]
    pub function_prompt: Option<String>,

    #[arg(long, env = "ZERO_DOCS_CLASS_PROMPT", hide = true)]
    pub class_prompt: Option<String>,

    #[arg(long, env = "ZERO_DOCS_MODULE_PROMPT", hide = true)]
    pub module_prompt: Option<String>,

    /// Report files that would change without writing them.
    #[arg(long)]
    pub check: bool,
}

impl Args {
    pub fn into_config(self) -> Result<Config> {
        let defaults = Prompts::default();
        let prompts = Prompts {
            function: non_empty(self.function_prompt).unwrap_or(defaults.function),
            class: non_empty(self.class_prompt).unwrap_or(defaults.class),
            module: non_empty(self.module_prompt).unwrap_or(defaults.module),
        };

        Ok(Config {
            input_paths: self.paths,
            kinds: self.entities.parse()?,
            model: self.model,
            api_base: self.api_base.trim_end_matches('/').to_string(),
            api_key: self.api_key.unwrap_or_default(),
            timeout: Duration::from_secs(self.timeout_secs),
            indent_width: self.indent_width,
            prompts,
            check: self.check,
        })
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|value| !value.trim().is_empty())
}
