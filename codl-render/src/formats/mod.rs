//! Built-in render formats

pub mod json;
pub mod rust;
