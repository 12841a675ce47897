//! Configuration loading for the buildfile tools.
//!
//! `defaults/buildfile.default.toml` is embedded into the library so that the
//! documented defaults and runtime behavior stay in sync. Callers layer a user
//! file and single-key overrides on top with [`Loader`] before deserializing
//! into [`BuildfileConfig`].

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, File, FileFormat, ValueKind};
use serde::Deserialize;
use std::path::Path;

use crate::buildfile::parser::ParseOptions;
use crate::buildfile::printer::{PrintOptions, PrintScope};

const DEFAULT_TOML: &str = include_str!("../../defaults/buildfile.default.toml");

/// Top-level configuration
#[derive(Debug, Clone, Deserialize)]
pub struct BuildfileConfig {
    pub parser: ParserConfig,
    pub printer: PrinterConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ParserConfig {
    pub recovery: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PrinterConfig {
    pub scope: PrintScope,
    pub indent: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// `env_logger` filter used when `RUST_LOG` is unset
    pub level: String,
}

impl From<&ParserConfig> for ParseOptions {
    fn from(config: &ParserConfig) -> Self {
        ParseOptions {
            recovery: config.recovery,
        }
    }
}

impl From<&PrinterConfig> for PrintOptions {
    fn from(config: &PrinterConfig) -> Self {
        PrintOptions {
            scope: config.scope,
            indent: config.indent.clone(),
        }
    }
}

/// Builds a [`BuildfileConfig`] from the defaults plus any user layers.
#[derive(Debug, Clone)]
pub struct Loader {
    builder: ConfigBuilder<DefaultState>,
}

impl Loader {
    /// A loader holding only the embedded defaults.
    pub fn new() -> Self {
        let builder =
            Config::builder().add_source(File::from_str(DEFAULT_TOML, FileFormat::Toml));
        Self { builder }
    }

    /// Layer a configuration file. A missing file fails the build.
    pub fn with_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(true);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Apply a single key/value override, e.g. `parser.recovery`.
    pub fn set_override<I>(mut self, key: &str, value: I) -> Result<Self, ConfigError>
    where
        I: Into<ValueKind>,
    {
        self.builder = self.builder.set_override(key, value)?;
        Ok(self)
    }

    pub fn build(self) -> Result<BuildfileConfig, ConfigError> {
        self.builder.build()?.try_deserialize()
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

/// The embedded defaults, with nothing layered on top
pub fn load_defaults() -> Result<BuildfileConfig, ConfigError> {
    Loader::new().build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn loads_default_config() {
        let config = load_defaults().expect("embedded defaults deserialize");
        assert!(config.parser.recovery);
        assert_eq!(config.printer.scope, PrintScope::All);
        assert_eq!(config.printer.indent, "    ");
        assert_eq!(config.logging.level, "warn");
    }

    #[test]
    fn defaults_match_option_defaults() {
        let config = load_defaults().unwrap();
        assert_eq!(ParseOptions::from(&config.parser), ParseOptions::default());
        assert_eq!(PrintOptions::from(&config.printer), PrintOptions::default());
    }

    #[test]
    fn supports_overrides() {
        let config = Loader::new()
            .set_override("printer.scope", "loads")
            .expect("override to apply")
            .set_override("parser.recovery", false)
            .expect("override to apply")
            .build()
            .expect("config to build");
        assert_eq!(config.printer.scope, PrintScope::Loads);
        assert_eq!(ParseOptions::from(&config.parser), ParseOptions::fail_fast());
    }

    #[test]
    fn layers_user_file() {
        let path = std::env::temp_dir().join(format!(
            "buildfile-config-test-{}.toml",
            std::process::id()
        ));
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(file, "[printer]\nindent = \"  \"").unwrap();

        let config = Loader::new().with_file(&path).build().unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(config.printer.indent, "  ");
        assert_eq!(config.printer.scope, PrintScope::All);
    }

    #[test]
    fn missing_required_file_fails() {
        let result = Loader::new()
            .with_file("/nonexistent/buildfile.toml")
            .build();
        assert!(result.is_err());
    }
}
