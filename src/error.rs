use crate::doc::UnitKind;
use std::io;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, DocError>;

#[derive(Debug, Error)]
pub enum DocError {
    #[error("Parse error at line {line}, column {column}: {message}")]
    Parse {
        line: u32,
        column: u32,
        message: String,
    },

    #[error("Generation failed: {0}")]
    Generation(String),

    #[error("Render failed: {0}")]
    Render(String),

    #[error("Cannot insert a docstring into the inline body of {0}")]
    UnsupportedSuite(String),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

impl DocError {
    pub fn parse_error(line: u32, column: u32, message: impl Into<String>) -> Self {
        Self::Parse {
            line,
            column,
            message: message.into(),
        }
    }

    pub fn generation_error(message: impl Into<String>) -> Self {
        Self::Generation(message.into())
    }

    pub fn render_error(message: impl Into<String>) -> Self {
        Self::Render(message.into())
    }

    pub fn config_error(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    pub fn unsupported_suite(kind: UnitKind, name: &str) -> Self {
        Self::UnsupportedSuite(format!("{} `{}`", kind, name))
    }
}
