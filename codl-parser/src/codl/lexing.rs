//! Scanner
//!
//!     The scanner turns CODL source into a lazy sequence of tokens: keywords, literals
//!     and strings, each paired with its byte span. Whitespace and `//` comments between
//!     tokens are skipped, in any interleaving.
//!
//!     Tokenization itself is a logos lexer (see [token]). The [Scanner] wraps it to
//!     attach line/column positions to failures and to stop after the first one: an
//!     unterminated literal or string ends the document, there is nothing sensible to
//!     resume from.
//!
//!     Input arriving through `io::Read` is read in full first; non UTF-8 input is a
//!     read failure.

pub mod token;

pub use token::{LexFailure, Token};

use crate::codl::ast::{Position, SourceLocation};
use crate::codl::error::ScanError;
use logos::Logos;
use std::io::Read;
use std::iter::FusedIterator;
use std::ops::Range;
use tracing::trace;

pub type Spanned = (Token, Range<usize>);

pub struct Scanner<'src> {
    lexer: logos::Lexer<'src, Token>,
    location: SourceLocation,
    finished: bool,
}

impl<'src> Scanner<'src> {
    pub fn new(source: &'src str) -> Self {
        Self {
            lexer: Token::lexer(source),
            location: SourceLocation::new(source),
            finished: false,
        }
    }

    /// Line/column position of a byte offset in the scanned source
    pub fn position(&self, offset: usize) -> Position {
        self.location.byte_to_position(offset)
    }

    fn failure(&self, failure: LexFailure) -> ScanError {
        let span = self.lexer.span();
        let position = self.position(span.start);
        match failure {
            LexFailure::UnterminatedLiteral => ScanError::UnterminatedLiteral { position },
            LexFailure::UnterminatedString => ScanError::UnterminatedString { position },
            LexFailure::Unrecognized => ScanError::Unrecognized {
                text: self.lexer.slice().to_owned(),
                position,
            },
        }
    }
}

impl Iterator for Scanner<'_> {
    type Item = Result<Spanned, ScanError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        match self.lexer.next() {
            Some(Ok(token)) => {
                let span = self.lexer.span();
                trace!(?token, ?span, "scanned");
                Some(Ok((token, span)))
            }
            Some(Err(failure)) => {
                self.finished = true;
                Some(Err(self.failure(failure)))
            }
            None => {
                self.finished = true;
                None
            }
        }
    }
}

impl FusedIterator for Scanner<'_> {}

/// Tokenize a whole source, stopping at the first failure
pub fn tokenize(source: &str) -> Result<Vec<Spanned>, ScanError> {
    Scanner::new(source).collect()
}

/// Read a CODL source to the end
pub fn read_source<R: Read>(mut reader: R) -> Result<String, ScanError> {
    let mut source = String::new();
    reader.read_to_string(&mut source)?;
    Ok(source)
}
