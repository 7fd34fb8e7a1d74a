//! Token definitions for CODL
//!
//!     Tokens are produced by a logos lexer. Keywords, barewords and comments are plain
//!     patterns; delimited tokens (literals and quoted strings) open on their delimiter
//!     and a callback consumes the rest, so that unterminated input can be reported
//!     precisely instead of falling back to a bareword.
//!
//! Keyword Boundaries
//!
//!     A keyword only counts when the next character is whitespace or the input ends.
//!     logos picks the longest match, and the bareword pattern matches any run of
//!     non-whitespace, so `ROUTER` or `IMPORTs` are longer barewords and win over the
//!     keyword. When both match the same text, the keyword has the higher priority.
//!
//! Comments
//!
//!     `//` runs to the end of the line, but only where a token would start. Inside a
//!     bareword (`http://foo`) the bareword is the longer match.

use logos::{Lexer, Logos};
use serde::Serialize;
use std::fmt;

/// Why logos could not produce a token
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LexFailure {
    #[default]
    Unrecognized,
    UnterminatedLiteral,
    UnterminatedString,
}

#[derive(Logos, Debug, Clone, PartialEq, Eq, Serialize)]
#[logos(error = LexFailure)]
#[logos(skip r"\s+")]
#[logos(skip r"//[^\n]*")]
pub enum Token {
    #[token("IMPORT")]
    Import,
    #[token("INCLUDES")]
    Includes,
    /// Older spelling of `INCLUDES`; the builder decides what it means
    #[token("INCLUDE")]
    Include,
    #[token("ROUTE")]
    Route,
    #[token("USING")]
    Using,
    #[token("DOES")]
    Does,
    #[token("FROM")]
    From,

    #[token("`", |lex| delimited(lex, '`'))]
    #[token("«", |lex| delimited(lex, '»'))]
    Literal(String),

    #[token("\"", |lex| quoted(lex, '"'))]
    #[token("'", |lex| quoted(lex, '\''))]
    #[regex(r#"[^\s"'`«][^\s]*"#, |lex| lex.slice().to_owned())]
    Str(String),
}

impl Token {
    pub fn keyword(&self) -> Option<&'static str> {
        match self {
            Token::Import => Some("IMPORT"),
            Token::Includes => Some("INCLUDES"),
            Token::Include => Some("INCLUDE"),
            Token::Route => Some("ROUTE"),
            Token::Using => Some("USING"),
            Token::Does => Some("DOES"),
            Token::From => Some("FROM"),
            Token::Literal(_) | Token::Str(_) => None,
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Literal(text) => write!(f, "«{}»", text),
            Token::Str(text) => write!(f, "{:?}", text),
            keyword => f.write_str(keyword.keyword().unwrap_or_default()),
        }
    }
}

/// Consume everything up to `close`; no escapes
fn delimited(lex: &mut Lexer<'_, Token>, close: char) -> Result<String, LexFailure> {
    let rest = lex.remainder();
    match rest.find(close) {
        Some(end) => {
            let content = rest[..end].to_owned();
            lex.bump(end + close.len_utf8());
            Ok(content)
        }
        None => {
            lex.bump(rest.len());
            Err(LexFailure::UnterminatedLiteral)
        }
    }
}

/// Consume a quoted string; a backslash makes the next character literal
fn quoted(lex: &mut Lexer<'_, Token>, quote: char) -> Result<String, LexFailure> {
    let rest = lex.remainder();
    let mut value = String::new();
    let mut chars = rest.char_indices();

    while let Some((index, ch)) = chars.next() {
        if ch == '\\' {
            match chars.next() {
                Some((_, escaped)) => value.push(escaped),
                None => break,
            }
        } else if ch == quote {
            lex.bump(index + ch.len_utf8());
            return Ok(value);
        } else {
            value.push(ch);
        }
    }

    lex.bump(rest.len());
    Err(LexFailure::UnterminatedString)
}
