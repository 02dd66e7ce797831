//! Layered configuration for the yinl toolchain.
//!
//! `defaults/yinl.default.toml` is embedded into the crate so that docs and runtime behavior stay
//! in sync. Callers layer user files and overrides on top of those defaults via [`Loader`] before
//! deserializing into [`YinlConfig`].

use crate::yinl::formats::markdown::RenderOptions;
use crate::yinl::parsing::ParseOptions;
use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, File, FileFormat, ValueKind};
use serde::Deserialize;
use std::path::Path;

const DEFAULT_TOML: &str = include_str!("../../defaults/yinl.default.toml");

/// Top-level configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct YinlConfig {
    pub parsing: ParsingConfig,
    pub render: RenderConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ParsingConfig {
    pub default_indent_unit: usize,
    pub tab_width: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RenderConfig {
    pub heading_base_level: usize,
    pub rule_marker: String,
    pub references_heading: String,
    pub strict_macros: bool,
}

/// Helper for layering user overrides over the built-in defaults.
#[derive(Debug, Clone)]
pub struct Loader {
    builder: ConfigBuilder<DefaultState>,
}

impl Loader {
    /// Start a loader seeded with the embedded defaults.
    pub fn new() -> Self {
        let builder = Config::builder().add_source(File::from_str(DEFAULT_TOML, FileFormat::Toml));
        Self { builder }
    }

    /// Layer a configuration file. Missing files trigger an error.
    pub fn with_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(true);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Apply a single key/value override (used for CLI flags).
    pub fn set_override<I>(mut self, key: &str, value: I) -> Result<Self, ConfigError>
    where
        I: Into<ValueKind>,
    {
        self.builder = self.builder.set_override(key, value)?;
        Ok(self)
    }

    pub fn build(self) -> Result<YinlConfig, ConfigError> {
        self.builder.build()?.try_deserialize()
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenience helper for callers that only need the defaults.
pub fn load_defaults() -> Result<YinlConfig, ConfigError> {
    Loader::new().build()
}

impl From<&YinlConfig> for ParseOptions {
    fn from(config: &YinlConfig) -> Self {
        ParseOptions {
            default_indent_unit: config.parsing.default_indent_unit.max(1),
            tab_width: config.parsing.tab_width,
        }
    }
}

impl From<&YinlConfig> for RenderOptions {
    fn from(config: &YinlConfig) -> Self {
        RenderOptions {
            heading_base_level: config.render.heading_base_level.max(1),
            rule_marker: config.render.rule_marker.clone(),
            references_heading: config.render.references_heading.clone(),
            strict_macros: config.render.strict_macros,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loads_default_config() {
        let config = load_defaults().expect("defaults to deserialize");
        assert_eq!(config.parsing.default_indent_unit, 4);
        assert_eq!(config.parsing.tab_width, 4);
        assert_eq!(config.render.heading_base_level, 2);
        assert_eq!(config.render.rule_marker, "---");
        assert!(!config.render.strict_macros);
    }

    #[test]
    fn defaults_match_option_defaults() {
        let config = load_defaults().expect("defaults to deserialize");
        assert_eq!(ParseOptions::from(&config), ParseOptions::default());
        assert_eq!(RenderOptions::from(&config), RenderOptions::default());
    }

    #[test]
    fn supports_overrides() {
        let config = Loader::new()
            .set_override("render.strict_macros", true)
            .expect("override to apply")
            .set_override("parsing.default_indent_unit", 2i64)
            .expect("override to apply")
            .build()
            .expect("config to build");
        assert!(config.render.strict_macros);
        assert_eq!(ParseOptions::from(&config).default_indent_unit, 2);
    }

    #[test]
    fn missing_config_file_is_an_error() {
        assert!(Loader::new()
            .with_file("/nonexistent/yinl.toml")
            .build()
            .is_err());
    }

    #[test]
    fn layers_user_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("yinl.toml");
        std::fs::write(&path, "[render]\nrule_marker = \"***\"\n").expect("write config");

        let config = Loader::new().with_file(&path).build().expect("config");
        assert_eq!(config.render.rule_marker, "***");
        assert_eq!(config.render.heading_base_level, 2);
    }
}
