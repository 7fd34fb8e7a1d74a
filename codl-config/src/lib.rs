//! Configuration loader for the codl toolchain.
//!
//! `defaults/codl.default.toml` is embedded into the binary so that the documented
//! defaults and runtime behavior stay in sync. Applications layer user files and
//! command-line overrides on top via [`Loader`] before deserializing into [`CodlConfig`].

use codl_parser::Dialect;
use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, File, FileFormat, ValueKind};
use serde::Deserialize;
use std::path::{Path, PathBuf};

const DEFAULT_TOML: &str = include_str!("../defaults/codl.default.toml");

/// Name of the per-project file picked up from the working directory
pub const PROJECT_FILE: &str = "codl.toml";

/// Top-level configuration consumed by codl applications.
#[derive(Debug, Clone, Deserialize)]
pub struct CodlConfig {
    pub parser: ParserConfig,
    pub build: BuildConfig,
    pub render: RenderConfig,
    pub watch: WatchConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ParserConfig {
    pub dialect: Dialect,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BuildConfig {
    pub source_extension: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RenderConfig {
    pub format: String,
    pub registry_path: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WatchConfig {
    pub period_ms: u64,
}

/// Layers `codl.toml` files and flag overrides over the embedded defaults
///
/// Later layers win: defaults, then the project file, then `--config`, then flags.
#[derive(Debug, Clone)]
pub struct Loader {
    builder: ConfigBuilder<DefaultState>,
}

impl Loader {
    pub fn new() -> Self {
        Self {
            builder: Config::builder()
                .add_source(File::from_str(DEFAULT_TOML, FileFormat::Toml)),
        }
    }

    /// `<dir>/codl.toml`, skipped when the project has none
    pub fn with_project_file(self, dir: impl AsRef<Path>) -> Self {
        self.layer(dir.as_ref().join(PROJECT_FILE), false)
    }

    /// A file named with `--config`; it is an error for it to be missing
    pub fn with_file(self, path: impl AsRef<Path>) -> Self {
        self.layer(path.as_ref().to_path_buf(), true)
    }

    /// Override one dotted key, e.g. `parser.dialect`
    pub fn set_override<I>(mut self, key: &str, value: I) -> Result<Self, ConfigError>
    where
        I: Into<ValueKind>,
    {
        self.builder = self.builder.set_override(key, value)?;
        Ok(self)
    }

    pub fn build(self) -> Result<CodlConfig, ConfigError> {
        let config: CodlConfig = self.builder.build()?.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    fn layer(mut self, path: PathBuf, required: bool) -> Self {
        let source = File::from(path).format(FileFormat::Toml).required(required);
        self.builder = self.builder.add_source(source);
        self
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

impl CodlConfig {
    /// The embedded defaults with nothing layered on top
    pub fn defaults() -> Result<Self, ConfigError> {
        Loader::new().build()
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let extension = &self.build.source_extension;
        if extension.is_empty() || extension.contains(['/', '\\', '*']) {
            return Err(ConfigError::Message(format!(
                "build.source_extension must be a plain extension, got {:?}",
                extension
            )));
        }
        if self.render.registry_path.trim().is_empty() {
            return Err(ConfigError::Message(
                "render.registry_path must not be empty".to_string(),
            ));
        }
        if self.watch.period_ms == 0 {
            return Err(ConfigError::Message(
                "watch.period_ms must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn loads_default_config() {
        let config = CodlConfig::defaults().expect("defaults to deserialize");
        assert_eq!(config.parser.dialect, Dialect::Permissive);
        assert_eq!(config.build.source_extension, "codl");
        assert_eq!(config.render.format, "rust");
        assert_eq!(config.render.registry_path, "cookoo::Registry");
        assert_eq!(config.watch.period_ms, 1000);
    }

    #[test]
    fn supports_overrides() {
        let config = Loader::new()
            .set_override("parser.dialect", "strict")
            .expect("override to apply")
            .set_override("watch.period_ms", 250)
            .expect("override to apply")
            .build()
            .expect("config to build");
        assert_eq!(config.parser.dialect, Dialect::Strict);
        assert_eq!(config.watch.period_ms, 250);
    }

    #[test]
    fn layers_user_file_over_defaults() {
        let mut file = tempfile::Builder::new()
            .suffix(".toml")
            .tempfile()
            .expect("temp file");
        writeln!(file, "[render]\nregistry_path = \"web::Router\"").expect("write");

        let config = Loader::new()
            .with_file(file.path())
            .build()
            .expect("config to build");
        assert_eq!(config.render.registry_path, "web::Router");
        assert_eq!(config.render.format, "rust");
    }

    #[test]
    fn missing_project_file_is_ignored() {
        let config = Loader::new()
            .with_project_file("/nonexistent")
            .build()
            .expect("config to build");
        assert_eq!(config.build.source_extension, "codl");
    }

    #[test]
    fn missing_required_file_fails() {
        assert!(Loader::new()
            .with_file("/nonexistent/codl.toml")
            .build()
            .is_err());
    }

    #[test]
    fn project_file_is_read_from_dir() {
        let dir = tempfile::tempdir().expect("temp dir");
        std::fs::write(dir.path().join(PROJECT_FILE), "[parser]\ndialect = \"strict\"\n")
            .expect("write");

        let config = Loader::new()
            .with_project_file(dir.path())
            .build()
            .expect("config to build");
        assert_eq!(config.parser.dialect, Dialect::Strict);
    }

    #[test]
    fn rejects_unusable_values() {
        for (key, value) in [
            ("build.source_extension", ""),
            ("build.source_extension", "*.codl"),
            ("render.registry_path", " "),
        ] {
            let result = Loader::new()
                .set_override(key, value)
                .expect("override to apply")
                .build();
            assert!(result.is_err(), "{key} = {value:?} was accepted");
        }

        let result = Loader::new()
            .set_override("watch.period_ms", 0)
            .expect("override to apply")
            .build();
        assert!(result.unwrap_err().to_string().contains("watch.period_ms"));
    }

    #[test]
    fn rejects_unknown_dialect() {
        let result = Loader::new()
            .set_override("parser.dialect", "loose")
            .expect("override to apply")
            .build();
        assert!(result.is_err());
    }
}
