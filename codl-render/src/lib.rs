//! Rendering for CODL documents
//!
//!     This crate turns a parsed [Document](codl_parser::Document) into output text. It is
//!     a pure library: nothing here reads files, prints or looks at the environment. The
//!     codl binary decides where output goes.
//!
//!     The file structure :
//!     .
//!     ├── error.rs
//!     ├── format.rs               # Format trait definition
//!     ├── registry.rs             # FormatRegistry for discovery and selection
//!     ├── formats
//!     │   ├── rust                # Route registration function (the default target)
//!     │   │   ├── serializer.rs
//!     │   │   └── mod.rs
//!     │   └── json                # The document model as JSON
//!     └── lib.rs
//!
//! Testing
//!
//!     tests
//!     ├── rust_output.rs          # Exact output and syn checks over fixtures
//!     └── fixtures
//!
//!     Generated Rust is only required to be syntactically valid. It references handler
//!     paths from the CODL source, so it cannot be type checked in isolation; the tests
//!     parse it with syn instead.

pub mod error;
pub mod format;
pub mod formats;
pub mod registry;

pub use error::RenderError;
pub use format::Format;
pub use formats::json::JsonFormat;
pub use formats::rust::{function_name, RustFormat, DEFAULT_REGISTRY_PATH};
pub use registry::FormatRegistry;
