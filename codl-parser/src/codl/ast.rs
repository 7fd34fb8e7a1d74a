//! Document model
//!
//!     The tree produced by the builder: a Document owns its imports and routes, a Route
//!     owns its commands, an Invoke command owns its params. Every collection keeps
//!     insertion order, which is also the order renderers emit.
//!
//!     The model is read-only from outside this crate. Entities are only created and
//!     mutated by the builder in [parsing](crate::codl::parsing), and a model handed out
//!     by the builder has already been checked for the values a renderer relies on (an
//!     invoke always has a handler, includes and params always have a name).

pub mod document;
pub mod range;
pub mod value;

pub use document::{Command, Document, Include, Invoke, Param, Route};
pub use range::{Position, SourceLocation};
pub use value::Value;
