//! Builder modes and dialects

use serde::{Deserialize, Serialize};
use std::fmt;

/// The builder's grammatical context: which keyword was seen last
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub enum Mode {
    #[default]
    Top,
    Import,
    Route,
    Include,
    Using,
    Does,
    From,
}

impl Mode {
    /// True once a `ROUTE` has been seen
    pub fn in_route(self) -> bool {
        !matches!(self, Mode::Top | Mode::Import)
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Mode::Top => "top level",
            Mode::Import => "IMPORT",
            Mode::Route => "ROUTE",
            Mode::Include => "INCLUDES",
            Mode::Using => "USING",
            Mode::Does => "DOES",
            Mode::From => "FROM",
        };
        f.write_str(name)
    }
}

/// Grammar generation to accept
///
/// Permissive accepts a bare string as a `DOES` handler and `INCLUDE` as a spelling of
/// `INCLUDES`. Strict requires a literal handler and reads `INCLUDE` as a plain string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dialect {
    Strict,
    #[default]
    Permissive,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ParseOptions {
    pub dialect: Dialect,
}

impl ParseOptions {
    pub fn strict() -> Self {
        Self {
            dialect: Dialect::Strict,
        }
    }

    pub fn with_dialect(mut self, dialect: Dialect) -> Self {
        self.dialect = dialect;
        self
    }
}
