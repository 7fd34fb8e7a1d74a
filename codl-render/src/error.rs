//! Errors raised while rendering a document

use std::io;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("format '{0}' not found")]
    FormatNotFound(String),
    #[error("failed to write rendered output: {0}")]
    Io(#[from] io::Error),
    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),
}
