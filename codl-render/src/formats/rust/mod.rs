//! Rust route registration
//!
//! Renders a document as one Rust function that registers every route on a registry
//! passed in by the caller:
//!
//! ```text
//! // This file is auto-generated by codl. Do not edit.
//!
//! use cookoo::Registry;
//! use app::handlers;
//!
//! pub fn admin_routes(reg: &mut Registry) {
//!     reg.route("/admin/users", "List users")
//!         .includes("@auth")
//!         .does(handlers::list_users, "")
//!             .using("page").with_default(1).from("query:page");
//! }
//! ```
//!
//! Literals are pasted verbatim, strings become escaped string literals. Imports that
//! are Rust paths are emitted as `use` items. Any other import is kept as an escaped
//! string in `pub const IMPORTS: &[&str]`, so the output stays valid whatever the import
//! says. The registry type is configurable; when it is a path, it is imported and its
//! last segment names the parameter type.

mod serializer;

use crate::error::RenderError;
use crate::format::Format;
use codl_parser::Document;
use serializer::RustSerializer;

pub const DEFAULT_REGISTRY_PATH: &str = "cookoo::Registry";

/// Format implementation for generated Rust
#[derive(Debug, Clone)]
pub struct RustFormat {
    registry_path: String,
}

impl RustFormat {
    pub fn new(registry_path: impl Into<String>) -> Self {
        Self {
            registry_path: registry_path.into(),
        }
    }

    pub fn registry_path(&self) -> &str {
        &self.registry_path
    }
}

impl Default for RustFormat {
    fn default() -> Self {
        Self::new(DEFAULT_REGISTRY_PATH)
    }
}

impl Format for RustFormat {
    fn name(&self) -> &str {
        "rust"
    }

    fn description(&self) -> &str {
        "Rust function registering every route"
    }

    fn file_extension(&self) -> &str {
        "rs"
    }

    fn serialize(&self, doc: &Document) -> Result<String, RenderError> {
        Ok(RustSerializer::new(&self.registry_path).render(doc))
    }
}

/// Name of the generated function for a namespace
///
/// Anything that isn't an ASCII alphanumeric becomes an underscore, so `admin-api`
/// gives `admin_api_routes`.
pub fn function_name(namespace: &str) -> String {
    let mut name: String = namespace
        .chars()
        .map(|ch| {
            if ch.is_ascii_alphanumeric() {
                ch.to_ascii_lowercase()
            } else {
                '_'
            }
        })
        .collect();

    if name.is_empty() {
        name.push_str("codl");
    } else if name.starts_with(|ch: char| ch.is_ascii_digit()) {
        name.insert(0, '_');
    }
    name.push_str("_routes");
    name
}
