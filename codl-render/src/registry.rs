//! Format registry for format discovery and selection

use crate::error::RenderError;
use crate::format::Format;
use codl_parser::Document;
use std::collections::HashMap;

/// Registry of render formats, keyed by name
///
/// # Examples
///
/// ```ignore
/// let registry = FormatRegistry::with_defaults();
/// let code = registry.serialize(&doc, "rust")?;
/// ```
pub struct FormatRegistry {
    formats: HashMap<String, Box<dyn Format>>,
}

impl FormatRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        FormatRegistry {
            formats: HashMap::new(),
        }
    }

    /// Register a format
    ///
    /// If a format with the same name already exists, it will be replaced.
    pub fn register<F: Format + 'static>(&mut self, format: F) {
        self.formats
            .insert(format.name().to_string(), Box::new(format));
    }

    /// Get a format by name
    pub fn get(&self, name: &str) -> Result<&dyn Format, RenderError> {
        self.formats
            .get(name)
            .map(|f| f.as_ref())
            .ok_or_else(|| RenderError::FormatNotFound(name.to_string()))
    }

    pub fn has(&self, name: &str) -> bool {
        self.formats.contains_key(name)
    }

    /// List all available format names (sorted)
    pub fn list_formats(&self) -> Vec<String> {
        let mut names: Vec<_> = self.formats.keys().cloned().collect();
        names.sort();
        names
    }

    /// Render a document with the named format
    pub fn serialize(&self, doc: &Document, format: &str) -> Result<String, RenderError> {
        self.get(format)?.serialize(doc)
    }

    /// Create a registry with the built-in formats
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();

        registry.register(crate::formats::rust::RustFormat::default());
        registry.register(crate::formats::json::JsonFormat);

        registry
    }
}

impl Default for FormatRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formats::rust::RustFormat;
    use codl_parser::{parse_str, ParseOptions};

    struct CountFormat;
    impl Format for CountFormat {
        fn name(&self) -> &str {
            "count"
        }
        fn description(&self) -> &str {
            "Route count"
        }
        fn file_extension(&self) -> &str {
            "txt"
        }
        fn serialize(&self, doc: &Document) -> Result<String, RenderError> {
            Ok(doc.routes().len().to_string())
        }
    }

    fn sample() -> Document {
        parse_str("ROUTE a ROUTE b", "ns", ParseOptions::default()).expect("parse failed")
    }

    #[test]
    fn test_registry_creation() {
        let registry = FormatRegistry::new();
        assert_eq!(registry.formats.len(), 0);
    }

    #[test]
    fn test_registry_register() {
        let mut registry = FormatRegistry::new();
        registry.register(CountFormat);

        assert!(registry.has("count"));
        assert_eq!(registry.get("count").unwrap().description(), "Route count");
        assert_eq!(registry.serialize(&sample(), "count").unwrap(), "2");
    }

    #[test]
    fn test_registry_unknown_format() {
        let registry = FormatRegistry::with_defaults();
        match registry.serialize(&sample(), "go") {
            Err(RenderError::FormatNotFound(name)) => assert_eq!(name, "go"),
            other => panic!("Expected FormatNotFound, got {:?}", other),
        }
    }

    #[test]
    fn test_registry_defaults() {
        let registry = FormatRegistry::default();
        assert_eq!(registry.list_formats(), vec!["json", "rust"]);
        assert_eq!(registry.get("rust").unwrap().file_extension(), "rs");
        assert_eq!(registry.get("json").unwrap().file_extension(), "json");
    }

    #[test]
    fn test_registry_replace() {
        let mut registry = FormatRegistry::with_defaults();
        registry.register(RustFormat::new("crate::web::Router"));

        let code = registry.serialize(&sample(), "rust").unwrap();
        assert!(code.contains("use crate::web::Router;"));
        assert!(code.contains("pub fn ns_routes(reg: &mut Router) {"));
    }
}
