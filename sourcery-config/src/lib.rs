//! Shared configuration loader for the sourcery toolchain.
//!
//! `defaults/sourcery.default.toml` is embedded into every binary so that docs
//! and runtime behavior stay in sync. Applications layer user-specific files
//! on top of those defaults via [`Loader`] before deserializing into
//! [`SourceryConfig`].

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, File, FileFormat, ValueKind};
pub use config::ConfigError;
use once_cell::sync::Lazy;
use serde::Deserialize;
use sourcery_core::LineEnding;
use std::path::Path;

const DEFAULT_TOML: &str = include_str!("../defaults/sourcery.default.toml");

/// Parsed embedded defaults, for callers that never layer anything on top.
pub static DEFAULTS: Lazy<SourceryConfig> =
    Lazy::new(|| load_defaults().expect("embedded defaults must deserialize"));

/// Top-level configuration consumed by sourcery applications.
#[derive(Debug, Clone, Deserialize)]
pub struct SourceryConfig {
    pub processing: ProcessingConfig,
    pub report: ReportConfig,
}

/// Knobs for the per-file pipeline.
#[derive(Debug, Clone, Deserialize)]
pub struct ProcessingConfig {
    pub line_ending: LineEndingSetting,
    pub arena_capacity: usize,
}

/// Line-ending policy as configured; `auto` resolves per input buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LineEndingSetting {
    Lf,
    Crlf,
    Auto,
}

impl LineEndingSetting {
    /// The fixed convention, or `None` for per-input detection.
    pub fn fixed(self) -> Option<LineEnding> {
        match self {
            LineEndingSetting::Lf => Some(LineEnding::Lf),
            LineEndingSetting::Crlf => Some(LineEnding::Crlf),
            LineEndingSetting::Auto => None,
        }
    }
}

/// Controls report rendering.
#[derive(Debug, Clone, Deserialize)]
pub struct ReportConfig {
    pub format: ReportFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ReportFormat {
    Text,
    Json,
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

    /// Layer an optional configuration file (ignored if the file is absent).
    pub fn with_optional_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(false);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Apply a single key/value override (useful for CLI settings).
    pub fn set_override<I>(mut self, key: &str, value: I) -> Result<Self, ConfigError>
    where
        I: Into<ValueKind>,
    {
        self.builder = self.builder.set_override(key, value)?;
        Ok(self)
    }

    /// Finalize the builder and deserialize the resulting configuration.
    pub fn build(self) -> Result<SourceryConfig, ConfigError> {
        self.builder.build()?.try_deserialize()
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenience helper for callers that only need the defaults.
pub fn load_defaults() -> Result<SourceryConfig, ConfigError> {
    Loader::new().build()
}
