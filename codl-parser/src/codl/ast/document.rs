//! Document, routes, commands and params

use super::value::Value;
use serde::Serialize;

/// A parsed CODL document
///
/// The namespace is supplied by the caller (usually derived from the file name) and is
/// not part of the CODL text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Document {
    pub(crate) namespace: String,
    pub(crate) imports: Vec<Value>,
    pub(crate) routes: Vec<Route>,
}

impl Document {
    pub(crate) fn new(namespace: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            imports: Vec::new(),
            routes: Vec::new(),
        }
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    pub fn imports(&self) -> &[Value] {
        &self.imports
    }

    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    pub fn is_empty(&self) -> bool {
        self.imports.is_empty() && self.routes.is_empty()
    }
}

/// A named group of commands, one registration entry in generated code
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Route {
    pub(crate) name: Option<Value>,
    pub(crate) description: Option<Value>,
    pub(crate) commands: Vec<Command>,
}

impl Route {
    pub fn name(&self) -> Option<&Value> {
        self.name.as_ref()
    }

    pub fn description(&self) -> Option<&Value> {
        self.description.as_ref()
    }

    pub fn commands(&self) -> &[Command] {
        &self.commands
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Command {
    /// `INCLUDES`: delegate to another route
    Include(Include),
    /// `DOES`: run a handler
    Invoke(Invoke),
}

impl Command {
    pub fn keyword(&self) -> &'static str {
        match self {
            Command::Include(_) => "INCLUDES",
            Command::Invoke(_) => "DOES",
        }
    }

    pub fn as_include(&self) -> Option<&Include> {
        match self {
            Command::Include(include) => Some(include),
            Command::Invoke(_) => None,
        }
    }

    pub fn as_invoke(&self) -> Option<&Invoke> {
        match self {
            Command::Invoke(invoke) => Some(invoke),
            Command::Include(_) => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Include {
    pub(crate) name: Value,
}

impl Include {
    pub fn name(&self) -> &Value {
        &self.name
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Invoke {
    pub(crate) handler: Value,
    pub(crate) name: Option<Value>,
    pub(crate) params: Vec<Param>,
}

impl Invoke {
    /// The handler reference, always a verbatim code fragment
    pub fn handler(&self) -> &Value {
        &self.handler
    }

    /// Optional display name
    pub fn name(&self) -> Option<&Value> {
        self.name.as_ref()
    }

    pub fn params(&self) -> &[Param] {
        &self.params
    }
}

/// A `USING` binding
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Param {
    pub(crate) name: Value,
    pub(crate) default: Option<Value>,
    pub(crate) sources: Vec<Value>,
}

impl Param {
    pub fn name(&self) -> &Value {
        &self.name
    }

    pub fn default_value(&self) -> Option<&Value> {
        self.default.as_ref()
    }

    /// `FROM` sources, in declaration order
    pub fn sources(&self) -> &[Value] {
        &self.sources
    }
}
