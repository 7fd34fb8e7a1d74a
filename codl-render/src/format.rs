//! Format trait definition
//!
//! Every output a CODL document can be rendered to implements [Format]. Rendering never
//! validates: the parser already guarantees a well-formed document.

use crate::error::RenderError;
use codl_parser::Document;
use std::io;

/// Trait for render targets
///
/// # Examples
///
/// ```ignore
/// struct Listing;
///
/// impl Format for Listing {
///     fn name(&self) -> &str {
///         "listing"
///     }
///
///     fn file_extension(&self) -> &str {
///         "txt"
///     }
///
///     fn serialize(&self, doc: &Document) -> Result<String, RenderError> {
///         Ok(format!("{} routes\n", doc.routes().len()))
///     }
/// }
/// ```
pub trait Format: Send + Sync {
    /// The name of this format (e.g., "rust", "json")
    fn name(&self) -> &str;

    /// Optional description of this format
    fn description(&self) -> &str {
        ""
    }

    /// Extension of generated files, without the dot
    fn file_extension(&self) -> &str;

    /// Render a document to text
    fn serialize(&self, doc: &Document) -> Result<String, RenderError>;

    /// Render a document into a writer
    fn write_to(&self, doc: &Document, out: &mut dyn io::Write) -> Result<(), RenderError> {
        let rendered = self.serialize(doc)?;
        out.write_all(rendered.as_bytes())?;
        out.flush()?;
        Ok(())
    }
}
