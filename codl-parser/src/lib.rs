//! # codl-parser
//!
//! Scanner, mode-based parser and document model for CODL, a small declarative
//! language describing request routes.
//!
//! File Layout
//!
//!     The pipeline is split the same way the data flows:
//!
//!     src/codl
//!       ├── lexing     Scanner: characters to tokens (keywords, literals, strings)
//!       ├── parsing    Builder: a state machine folding tokens into a Document
//!       ├── ast        The Document model handed to renderers
//!       ├── error      Scan and grammar errors, source context for diagnostics
//!       └── testing    Fluent assertions over parsed documents
//!
//!     Code generation lives in the codl-render crate; this crate knows nothing about
//!     target languages beyond how a string value is escaped for embedding.
//!
//! For testing guidelines, see the [testing module](codl::testing).

pub mod codl;

pub use codl::ast::{Command, Document, Include, Invoke, Param, Position, Route, Value};
pub use codl::error::{GrammarError, GrammarErrorKind, ParseError, ScanError};
pub use codl::parsing::{parse, parse_str, Dialect, Mode, ParseOptions};
