//! Parser
//!
//!     The parser is a mode-based builder: a finite-state machine fed one token at a time
//!     by the [Scanner](crate::codl::lexing::Scanner).
//!
//! Modes
//!
//!     Keywords switch the mode and open new entities; values are interpreted according
//!     to the current mode and never switch it.
//!
//!         IMPORT      from top level or IMPORT      each string is an import
//!         ROUTE       anywhere                      name, then description
//!         INCLUDES    inside a ROUTE                one name
//!         DOES        inside a ROUTE                handler, then display name
//!         USING       after DOES, USING or FROM     name, then default
//!         FROM        after USING                   each string is a source
//!
//!     Literals are only accepted in DOES and USING, and a USING name cannot be a literal.
//!
//! Failure
//!
//!     The first violation ends the parse. There is no resynchronization and no partial
//!     document: callers get a [Document] or the first [ParseError].
//!
//! Dialects
//!
//!     Two grammar generations exist in the wild. See [Dialect].

mod frames;
pub mod mode;

pub use mode::{Dialect, Mode, ParseOptions};

use crate::codl::ast::{Document, Position, Value};
use crate::codl::error::{GrammarError, GrammarErrorKind, ParseError};
use crate::codl::lexing::{read_source, Scanner, Token};
use frames::{
    CommandFrame, FrameStack, IncludeFrame, InvokeFrame, ParamFrame, RouteFrame, Unfinished,
};
use std::io::Read;
use tracing::{debug, trace};

/// Parse a CODL document from a reader
pub fn parse<R: Read>(
    reader: R,
    namespace: &str,
    options: ParseOptions,
) -> Result<Document, ParseError> {
    let source = read_source(reader)?;
    parse_str(&source, namespace, options)
}

/// Parse a CODL document held in memory
pub fn parse_str(
    source: &str,
    namespace: &str,
    options: ParseOptions,
) -> Result<Document, ParseError> {
    let mut scanner = Scanner::new(source);
    let mut builder = DocumentBuilder::new(namespace, options);

    while let Some(scanned) = scanner.next() {
        let (token, span) = scanned?;
        builder.feed(token, scanner.position(span.start))?;
    }

    let doc = builder.finish()?;
    debug!(
        namespace,
        imports = doc.imports().len(),
        routes = doc.routes().len(),
        "parsed document"
    );
    Ok(doc)
}

/// Why a single token was refused
enum Rejection {
    Token(GrammarErrorKind),
    Unfinished(Unfinished),
}

impl From<GrammarErrorKind> for Rejection {
    fn from(kind: GrammarErrorKind) -> Self {
        Rejection::Token(kind)
    }
}

impl From<Unfinished> for Rejection {
    fn from(unfinished: Unfinished) -> Self {
        Rejection::Unfinished(unfinished)
    }
}

/// The mode-based state machine that builds a [Document]
pub struct DocumentBuilder {
    mode: Mode,
    dialect: Dialect,
    frames: FrameStack,
}

impl DocumentBuilder {
    pub fn new(namespace: &str, options: ParseOptions) -> Self {
        Self {
            mode: Mode::Top,
            dialect: options.dialect,
            frames: FrameStack::new(namespace),
        }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Apply one token. On error the builder must not be fed again.
    pub fn feed(&mut self, token: Token, position: Position) -> Result<(), GrammarError> {
        trace!(mode = %self.mode, %token, "feed");

        let result = match &token {
            Token::Import => self.import(),
            Token::Route => self.route(),
            Token::Includes => self.includes(position),
            Token::Include => match self.dialect {
                Dialect::Permissive => self.includes(position),
                Dialect::Strict => self.string("INCLUDE"),
            },
            Token::Does => self.does(position),
            Token::Using => self.using(position),
            Token::From => self.from(),
            Token::Literal(text) => self.literal(text),
            Token::Str(text) => self.string(text),
        };

        result.map_err(|rejection| match rejection {
            Rejection::Token(kind) => {
                GrammarError::new(kind, self.mode, token.to_string(), position)
            }
            Rejection::Unfinished(unfinished) => GrammarError::new(
                unfinished.kind,
                self.mode,
                unfinished.keyword,
                unfinished.position,
            ),
        })
    }

    /// Close every open frame and hand out the document
    pub fn finish(self) -> Result<Document, GrammarError> {
        let mode = self.mode;
        self.frames.finish().map_err(|unfinished| {
            GrammarError::new(unfinished.kind, mode, unfinished.keyword, unfinished.position)
        })
    }

    fn enter(&mut self, mode: Mode) -> Result<(), Rejection> {
        trace!(from = %self.mode, to = %mode, "mode");
        self.mode = mode;
        Ok(())
    }

    fn import(&mut self) -> Result<(), Rejection> {
        match self.mode {
            Mode::Top | Mode::Import => self.enter(Mode::Import),
            _ => Err(GrammarErrorKind::ImportAfterRoute.into()),
        }
    }

    fn route(&mut self) -> Result<(), Rejection> {
        self.frames.open_route()?;
        self.enter(Mode::Route)
    }

    fn includes(&mut self, position: Position) -> Result<(), Rejection> {
        if !self.mode.in_route() {
            return Err(GrammarErrorKind::OutsideRoute.into());
        }
        self.current_route()?
            .open_command(CommandFrame::include(position))?;
        self.enter(Mode::Include)
    }

    fn does(&mut self, position: Position) -> Result<(), Rejection> {
        if !self.mode.in_route() {
            return Err(GrammarErrorKind::OutsideRoute.into());
        }
        self.current_route()?
            .open_command(CommandFrame::invoke(position))?;
        self.enter(Mode::Does)
    }

    fn using(&mut self, position: Position) -> Result<(), Rejection> {
        match self.mode {
            Mode::Does | Mode::Using | Mode::From => {
                self.current_invoke()?.open_param(position)?;
                self.enter(Mode::Using)
            }
            _ => Err(GrammarErrorKind::UsingOutsideDoes.into()),
        }
    }

    fn from(&mut self) -> Result<(), Rejection> {
        match self.mode {
            Mode::Using => self.enter(Mode::From),
            _ => Err(GrammarErrorKind::FromOutsideUsing.into()),
        }
    }

    fn literal(&mut self, text: &str) -> Result<(), Rejection> {
        match self.mode {
            Mode::Top => Err(GrammarErrorKind::ValueAtTop.into()),
            Mode::Does => {
                let invoke = self.current_invoke()?;
                if invoke.handler.is_some() {
                    return Err(GrammarErrorKind::DuplicateHandler.into());
                }
                invoke.handler = Some(Value::literal(text));
                Ok(())
            }
            Mode::Using => {
                let param = self.current_param()?;
                if param.name.is_none() {
                    return Err(GrammarErrorKind::LiteralName.into());
                }
                if param.default.is_some() {
                    return Err(GrammarErrorKind::ExtraValue.into());
                }
                param.default = Some(Value::literal(text));
                Ok(())
            }
            Mode::Import | Mode::Route | Mode::Include | Mode::From => {
                Err(GrammarErrorKind::LiteralNotAllowed.into())
            }
        }
    }

    fn string(&mut self, text: &str) -> Result<(), Rejection> {
        let dialect = self.dialect;
        match self.mode {
            Mode::Top => Err(GrammarErrorKind::ValueAtTop.into()),
            Mode::Import => {
                self.frames.push_import(Value::string(text));
                Ok(())
            }
            Mode::Route => Ok(self
                .current_route()?
                .set_name_or_description(Value::string(text))?),
            Mode::Include => Ok(self.current_include()?.set_name(Value::string(text))?),
            Mode::Does => {
                let invoke = self.current_invoke()?;
                if invoke.handler.is_none() {
                    // A bare identifier may stand in for the handler literal
                    return match dialect {
                        Dialect::Permissive => {
                            invoke.handler = Some(Value::literal(text));
                            Ok(())
                        }
                        Dialect::Strict => Err(GrammarErrorKind::HandlerNotLiteral.into()),
                    };
                }
                if invoke.name.is_some() {
                    return Err(GrammarErrorKind::ExtraValue.into());
                }
                invoke.name = Some(Value::string(text));
                Ok(())
            }
            Mode::Using => {
                let param = self.current_param()?;
                if param.name.is_none() {
                    param.name = Some(Value::string(text));
                } else if param.default.is_none() {
                    param.default = Some(Value::string(text));
                } else {
                    return Err(GrammarErrorKind::ExtraValue.into());
                }
                Ok(())
            }
            Mode::From => {
                self.current_param()?.push_source(Value::string(text));
                Ok(())
            }
        }
    }

    fn current_route(&mut self) -> Result<&mut RouteFrame, Rejection> {
        self.frames
            .route()
            .ok_or(Rejection::Token(GrammarErrorKind::OutsideRoute))
    }

    fn current_include(&mut self) -> Result<&mut IncludeFrame, Rejection> {
        self.current_route()?
            .include()
            .ok_or(Rejection::Token(GrammarErrorKind::OutsideRoute))
    }

    fn current_invoke(&mut self) -> Result<&mut InvokeFrame, Rejection> {
        self.current_route()?
            .invoke()
            .ok_or(Rejection::Token(GrammarErrorKind::UsingOutsideDoes))
    }

    fn current_param(&mut self) -> Result<&mut ParamFrame, Rejection> {
        self.current_invoke()?
            .param()
            .ok_or(Rejection::Token(GrammarErrorKind::FromOutsideUsing))
    }
}
