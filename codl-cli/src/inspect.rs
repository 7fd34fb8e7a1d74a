//! Print what the scanner or a renderer makes of one file

use crate::translate::Translator;
use anyhow::{Context, Result};
use codl_parser::codl::lexing::Scanner;
use std::fmt::Write;
use std::fs;
use std::path::Path;

pub const TOKENS: &str = "tokens";

/// One line per token: position, then the token as it would appear in an error
pub fn tokens(path: &Path) -> Result<String> {
    let source =
        fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;
    let mut scanner = Scanner::new(&source);
    let mut listing = String::new();

    while let Some(scanned) = scanner.next() {
        let (token, span) = scanned.with_context(|| format!("failed to scan {}", path.display()))?;
        writeln!(listing, "{}\t{}", scanner.position(span.start), token)?;
    }
    Ok(listing)
}

pub fn inspect(path: &Path, format: &str, translator: &Translator) -> Result<String> {
    match format {
        TOKENS => tokens(path),
        _ => translator.render_file(path),
    }
}
