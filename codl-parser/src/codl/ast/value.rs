//! Values
//!
//! CODL has two kinds of values. Literals are code fragments, written between backticks
//! or guillemets, and are emitted exactly as written. Strings are human text, quoted or
//! bare, and are emitted as escaped string literals.

use serde::Serialize;
use std::borrow::Cow;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "kind", content = "text", rename_all = "lowercase")]
pub enum Value {
    Literal(String),
    String(String),
}

impl Value {
    pub fn literal(text: impl Into<String>) -> Self {
        Value::Literal(text.into())
    }

    pub fn string(text: impl Into<String>) -> Self {
        Value::String(text.into())
    }

    /// The text as it appeared in the source, without delimiters or escapes
    pub fn text(&self) -> &str {
        match self {
            Value::Literal(text) | Value::String(text) => text,
        }
    }

    pub fn is_literal(&self) -> bool {
        matches!(self, Value::Literal(_))
    }

    /// The value as it must appear in generated code.
    ///
    /// Literals are verbatim. Strings are wrapped in double quotes with quotes,
    /// backslashes and control characters escaped.
    pub fn to_code(&self) -> Cow<'_, str> {
        match self {
            Value::Literal(text) => Cow::Borrowed(text),
            Value::String(text) => Cow::Owned(format!("{:?}", text)),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_code())
    }
}
