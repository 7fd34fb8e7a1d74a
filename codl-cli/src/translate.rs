//! One CODL file in, one generated file out

use anyhow::{anyhow, Context, Result};
use codl_parser::codl::error::format_source_context;
use codl_parser::{parse_str, Document, ParseError, ParseOptions};
use codl_render::{Format, FormatRegistry};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Parses sources and renders them with one selected format
pub struct Translator {
    registry: FormatRegistry,
    format: String,
    options: ParseOptions,
}

impl Translator {
    /// Fails if `format` is not registered
    pub fn new(registry: FormatRegistry, format: &str, options: ParseOptions) -> Result<Self> {
        registry.get(format)?;
        Ok(Self {
            registry,
            format: format.to_string(),
            options,
        })
    }

    fn format(&self) -> Result<&dyn Format> {
        Ok(self.registry.get(&self.format)?)
    }

    /// Where the output for `source` is written: same directory, format's extension
    pub fn output_path(&self, source: &Path) -> Result<PathBuf> {
        Ok(source.with_extension(self.format()?.file_extension()))
    }

    pub fn parse_file(&self, path: &Path) -> Result<Document> {
        let source = fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        parse_source(&source, &namespace_of(path), self.options)
            .map_err(|err| describe_parse_error(path, &source, err))
    }

    pub fn render_file(&self, path: &Path) -> Result<String> {
        let doc = self.parse_file(path)?;
        Ok(self.format()?.serialize(&doc)?)
    }

    /// Translate one file, returning the path written
    pub fn translate_file(&self, path: &Path) -> Result<PathBuf> {
        let rendered = self.render_file(path)?;
        let output = self.output_path(path)?;
        fs::write(&output, rendered)
            .with_context(|| format!("failed to write {}", output.display()))?;
        info!("translated {} -> {}", path.display(), output.display());
        Ok(output)
    }

    /// Translate every file in order, stopping at the first failure
    pub fn translate_all(&self, paths: &[PathBuf]) -> Result<Vec<PathBuf>> {
        paths.iter().map(|path| self.translate_file(path)).collect()
    }
}

fn parse_source(source: &str, namespace: &str, options: ParseOptions) -> Result<Document, ParseError> {
    debug!(namespace, dialect = ?options.dialect, "parsing");
    parse_str(source, namespace, options)
}

/// The namespace of a document is its file stem
pub fn namespace_of(path: &Path) -> String {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default()
}

fn describe_parse_error(path: &Path, source: &str, err: ParseError) -> anyhow::Error {
    match err.position() {
        Some(position) => anyhow!(
            "{}:{}\n{}",
            path.display(),
            err,
            format_source_context(source, position)
        ),
        None => anyhow!(err).context(format!("failed to parse {}", path.display())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use codl_render::RustFormat;

    fn translator(format: &str) -> Translator {
        Translator::new(FormatRegistry::with_defaults(), format, ParseOptions::default()).unwrap()
    }

    #[test]
    fn unknown_format_is_rejected_up_front() {
        let result = Translator::new(
            FormatRegistry::with_defaults(),
            "go",
            ParseOptions::default(),
        );
        assert!(result.is_err());
    }

    #[test]
    fn output_extension_follows_format() {
        let path = Path::new("/srv/routes/admin.codl");
        assert_eq!(
            translator("rust").output_path(path).unwrap(),
            PathBuf::from("/srv/routes/admin.rs")
        );
        assert_eq!(
            translator("json").output_path(path).unwrap(),
            PathBuf::from("/srv/routes/admin.json")
        );
    }

    #[test]
    fn namespace_is_file_stem() {
        assert_eq!(namespace_of(Path::new("dir/admin-api.codl")), "admin-api");
        assert_eq!(namespace_of(Path::new("dir/")), "dir");
    }

    #[test]
    fn translates_to_sibling_file() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("shop.codl");
        fs::write(&source, "ROUTE cart DOES «cart::show»\n").unwrap();

        let mut registry = FormatRegistry::with_defaults();
        registry.register(RustFormat::new("Registry"));
        let translator = Translator::new(registry, "rust", ParseOptions::default()).unwrap();

        let output = translator.translate_file(&source).unwrap();
        assert_eq!(output, dir.path().join("shop.rs"));
        let code = fs::read_to_string(output).unwrap();
        assert!(code.contains("pub fn shop_routes(reg: &mut Registry) {"));
        assert!(code.contains("    reg.route(\"cart\", \"\")\n        .does(cart::show, \"\");\n"));
    }

    #[test]
    fn parse_errors_carry_file_position_and_context() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("bad.codl");
        fs::write(&source, "ROUTE a\n  USING x\n").unwrap();

        let err = translator("rust").translate_file(&source).unwrap_err();
        let message = err.to_string();
        assert!(message.contains("bad.codl:2:3: USING is only allowed inside of a DOES"));
        assert!(message.contains(">>   2 |   USING x"));
        assert!(!dir.path().join("bad.rs").exists());
    }

    #[test]
    fn batch_stops_at_first_failure() {
        let dir = tempfile::tempdir().unwrap();
        let good = dir.path().join("a.codl");
        let bad = dir.path().join("b.codl");
        let never = dir.path().join("c.codl");
        fs::write(&good, "ROUTE a").unwrap();
        fs::write(&bad, "DOES").unwrap();
        fs::write(&never, "ROUTE c").unwrap();

        let result = translator("rust").translate_all(&[good, bad, never]);
        assert!(result.is_err());
        assert!(dir.path().join("a.rs").exists());
        assert!(!dir.path().join("c.rs").exists());
    }
}
