//! Configuration loader
//!
//!     `defaults/movetext.default.toml` is embedded into the binary so that the documented
//!     defaults and runtime behavior stay in sync. Callers layer user files and single-key
//!     overrides on top via [Loader] before deserializing into [MovetextConfig].

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, File, FileFormat, ValueKind};
use serde::Deserialize;
use std::path::Path;

const DEFAULT_TOML: &str = include_str!("../../defaults/movetext.default.toml");

#[derive(Debug, Clone, Deserialize)]
pub struct MovetextConfig {
    pub export: ExportConfig,
    pub logging: LoggingConfig,
}

/// Mirrors [crate::pgn::formats::ExportOptions]. A `max_line_length` of 0 disables wrapping.
#[derive(Debug, Clone, Deserialize)]
pub struct ExportConfig {
    pub include_headers: bool,
    pub include_comments: bool,
    pub include_variations: bool,
    pub include_annotations: bool,
    pub max_line_length: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// `tracing_subscriber::EnvFilter` directive used when `RUST_LOG` is unset
    pub filter: String,
}

/// Layers user overrides over the built-in defaults.
#[derive(Debug, Clone)]
pub struct Loader {
    builder: ConfigBuilder<DefaultState>,
}

impl Loader {
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

    /// Layer a configuration file that may be absent.
    pub fn with_optional_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(false);
        self.builder = self.builder.add_source(source);
        self
    }

    pub fn set_override<I>(mut self, key: &str, value: I) -> Result<Self, ConfigError>
    where
        I: Into<ValueKind>,
    {
        self.builder = self.builder.set_override(key, value)?;
        Ok(self)
    }

    pub fn build(self) -> Result<MovetextConfig, ConfigError> {
        self.builder.build()?.try_deserialize()
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

pub fn load_defaults() -> Result<MovetextConfig, ConfigError> {
    Loader::new().build()
}
