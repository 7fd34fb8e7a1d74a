//! Error types for scanning and parsing
//!
//!     Both stages fail fast: the first scan or grammar error ends the document and no
//!     partial model is returned. Clean end-of-input is not an error.

use crate::codl::ast::Position;
use crate::codl::parsing::Mode;
use std::fmt;
use std::io;
use thiserror::Error;

/// Errors raised while turning characters into tokens
#[derive(Debug, Error)]
pub enum ScanError {
    #[error("{position}: unterminated literal")]
    UnterminatedLiteral { position: Position },
    #[error("{position}: unterminated string")]
    UnterminatedString { position: Position },
    #[error("{position}: unrecognized input {text:?}")]
    Unrecognized { text: String, position: Position },
    #[error("failed to read CODL source: {0}")]
    Read(#[from] io::Error),
}

impl ScanError {
    pub fn position(&self) -> Option<Position> {
        match self {
            ScanError::UnterminatedLiteral { position }
            | ScanError::UnterminatedString { position }
            | ScanError::Unrecognized { position, .. } => Some(*position),
            ScanError::Read(_) => None,
        }
    }
}

/// What grammar rule a token broke
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GrammarErrorKind {
    /// `IMPORT` after the first `ROUTE`
    ImportAfterRoute,
    /// `INCLUDES` or `DOES` before any `ROUTE`
    OutsideRoute,
    /// `USING` anywhere but after `DOES`, `USING` or `FROM`
    UsingOutsideDoes,
    /// `FROM` anywhere but after `USING`
    FromOutsideUsing,
    /// A value before any keyword
    ValueAtTop,
    /// A literal where only strings are accepted
    LiteralNotAllowed,
    /// More values than the construct takes
    ExtraValue,
    /// A second literal handler for the same `DOES`
    DuplicateHandler,
    /// A string handler under the strict dialect
    HandlerNotLiteral,
    /// A literal as the name of a `USING`
    LiteralName,
    /// A `DOES` that was closed without a handler
    MissingHandler,
    /// An `INCLUDES` or `USING` that was closed without a name
    MissingName,
}

impl fmt::Display for GrammarErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let message = match self {
            GrammarErrorKind::ImportAfterRoute => "IMPORT must come before the first ROUTE",
            GrammarErrorKind::OutsideRoute => "INCLUDES and DOES are only allowed inside of a ROUTE",
            GrammarErrorKind::UsingOutsideDoes => "USING is only allowed inside of a DOES",
            GrammarErrorKind::FromOutsideUsing => "FROM can only appear inside of a USING",
            GrammarErrorKind::ValueAtTop => "values must be inside of an IMPORT or ROUTE",
            GrammarErrorKind::LiteralNotAllowed => "literals are only allowed in DOES and USING",
            GrammarErrorKind::ExtraValue => "no place for another value",
            GrammarErrorKind::DuplicateHandler => "DOES already has a handler",
            GrammarErrorKind::HandlerNotLiteral => "DOES requires a `literal` handler, not a string",
            GrammarErrorKind::LiteralName => "USING requires a name that is not a literal",
            GrammarErrorKind::MissingHandler => "DOES requires a handler",
            GrammarErrorKind::MissingName => "a name is required",
        };
        f.write_str(message)
    }
}

/// A grammar rule violation, with the mode the builder was in and the offending token
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{position}: {kind} (in {mode}, at {token})")]
pub struct GrammarError {
    pub kind: GrammarErrorKind,
    pub mode: Mode,
    pub token: String,
    pub position: Position,
}

impl GrammarError {
    pub fn new(
        kind: GrammarErrorKind,
        mode: Mode,
        token: impl Into<String>,
        position: Position,
    ) -> Self {
        Self {
            kind,
            mode,
            token: token.into(),
            position,
        }
    }
}

/// The first failure met while parsing a document
#[derive(Debug, Error)]
pub enum ParseError {
    #[error(transparent)]
    Scan(#[from] ScanError),
    #[error(transparent)]
    Grammar(#[from] GrammarError),
}

impl ParseError {
    pub fn position(&self) -> Option<Position> {
        match self {
            ParseError::Scan(err) => err.position(),
            ParseError::Grammar(err) => Some(err.position),
        }
    }

    pub fn grammar_kind(&self) -> Option<GrammarErrorKind> {
        match self {
            ParseError::Grammar(err) => Some(err.kind),
            ParseError::Scan(_) => None,
        }
    }
}

/// Format source context around an error position
///
/// Shows 2 lines before the error, the error line with >> marker, and 2 lines after.
/// All lines are numbered for easy reference.
pub fn format_source_context(source: &str, position: Position) -> String {
    let lines: Vec<&str> = source.lines().collect();
    let error_line = position.line;

    let start_line = error_line.saturating_sub(2);
    let end_line = (error_line + 3).min(lines.len());

    let mut context = String::new();

    for (line_num, line) in lines.iter().enumerate().take(end_line).skip(start_line) {
        let marker = if line_num == error_line { ">>" } else { "  " };
        context.push_str(&format!("{} {:3} | {}\n", marker, line_num + 1, line));
    }

    context
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_source_context() {
        let source = "line 1\nline 2\nline 3\nerror line\nline 5\nline 6\nline 7";

        let context = format_source_context(source, Position::new(3, 0));

        assert!(context.contains("line 2"));
        assert!(context.contains(">>   4 | error line"));
        assert!(context.contains("line 5"));
        assert!(!context.contains("line 1"));
        assert!(!context.contains("line 7"));
    }

    #[test]
    fn test_grammar_error_display() {
        let err = GrammarError::new(
            GrammarErrorKind::UsingOutsideDoes,
            Mode::Route,
            "USING",
            Position::new(2, 4),
        );

        assert_eq!(
            err.to_string(),
            "3:5: USING is only allowed inside of a DOES (in ROUTE, at USING)"
        );
    }

    #[test]
    fn test_scan_error_position() {
        let err = ScanError::UnterminatedString {
            position: Position::new(0, 7),
        };
        assert_eq!(err.position(), Some(Position::new(0, 7)));
        assert_eq!(err.to_string(), "1:8: unterminated string");

        let read = ScanError::from(io::Error::new(io::ErrorKind::InvalidData, "bad utf-8"));
        assert_eq!(read.position(), None);
    }
}
