//! JSON dump of the document model
//!
//! Mostly useful for inspecting what the parser built. Values keep their kind, so a
//! literal and a string with the same text stay distinguishable:
//!
//! ```text
//! { "kind": "literal", "text": "foo.Bar" }
//! ```

use crate::error::RenderError;
use crate::format::Format;
use codl_parser::Document;

pub struct JsonFormat;

impl Format for JsonFormat {
    fn name(&self) -> &str {
        "json"
    }

    fn description(&self) -> &str {
        "Document model as pretty-printed JSON"
    }

    fn file_extension(&self) -> &str {
        "json"
    }

    fn serialize(&self, doc: &Document) -> Result<String, RenderError> {
        let mut json = serde_json::to_string_pretty(doc)?;
        json.push('\n');
        Ok(json)
    }
}
