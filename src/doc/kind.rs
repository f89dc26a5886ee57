use crate::ast::DefinitionKind;
use crate::error::{DocError, Result};
use std::fmt;
use std::str::FromStr;

/// The kinds of code unit that can carry a docstring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnitKind {
    Module,
    Class,
    Function,
}

impl UnitKind {
    pub const ALL: [UnitKind; 3] = [UnitKind::Module, UnitKind::Class, UnitKind::Function];

    pub fn as_str(self) -> &'static str {
        match self {
            UnitKind::Module => "module",
            UnitKind::Class => "class",
            UnitKind::Function => "function",
        }
    }
}

impl From<DefinitionKind> for UnitKind {
    fn from(kind: DefinitionKind) -> Self {
        match kind {
            DefinitionKind::Class => UnitKind::Class,
            DefinitionKind::Function => UnitKind::Function,
        }
    }
}

impl fmt::Display for UnitKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UnitKind {
    type Err = DocError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "module" => Ok(UnitKind::Module),
            "class" => Ok(UnitKind::Class),
            "function" => Ok(UnitKind::Function),
            other => Err(DocError::config_error(format!(
                "unknown code entity `{}` (expected module, class or function)",
                other
            ))),
        }
    }
}

/// The set of unit kinds docstrings are generated for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnitKinds {
    module: bool,
    class: bool,
    function: bool,
}

impl UnitKinds {
    pub fn none() -> Self {
        Self {
            module: false,
            class: false,
            function: false,
        }
    }

    pub fn only(kinds: &[UnitKind]) -> Self {
        kinds
            .iter()
            .fold(Self::none(), |set, &kind| set.with(kind))
    }

    pub fn with(mut self, kind: UnitKind) -> Self {
        match kind {
            UnitKind::Module => self.module = true,
            UnitKind::Class => self.class = true,
            UnitKind::Function => self.function = true,
        }
        self
    }

    pub fn is_active(&self, kind: UnitKind) -> bool {
        match kind {
            UnitKind::Module => self.module,
            UnitKind::Class => self.class,
            UnitKind::Function => self.function,
        }
    }
}

impl Default for UnitKinds {
    fn default() -> Self {
        Self::only(&UnitKind::ALL)
    }
}

impl FromStr for UnitKinds {
    type Err = DocError;

    /// Parses a comma separated list such as `module,class,function`.
    fn from_str(s: &str) -> Result<Self> {
        s.split(',')
            .filter(|name| !name.trim().is_empty())
            .try_fold(Self::none(), |set, name| Ok(set.with(name.parse()?)))
    }
}

impl fmt::Display for UnitKinds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = UnitKind::ALL
            .iter()
            .filter(|kind| self.is_active(**kind))
            .map(|kind| kind.as_str())
            .collect();
        f.write_str(&names.join(","))
    }
}
