//! Shared configuration loader for the layout translation engine.
//!
//! `defaults/layout.default.toml` is embedded into the crate so that the documented
//! defaults and runtime behavior stay in sync. Applications layer user-specific files on top
//! of those defaults via [`Loader`] before deserializing into [`LayoutConfig`], then hand
//! [`LayoutConfig::engine_options`] to `DialectRegistry::with_options`.

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, File, FileFormat, ValueKind};
use layout_babel::{ConfidenceSettings, ConvertOptions, EngineOptions};
use serde::Deserialize;
use std::path::Path;

const DEFAULT_TOML: &str = include_str!("../defaults/layout.default.toml");

/// Top-level configuration consumed by applications embedding the engine.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct LayoutConfig {
    pub convert: ConvertOptions,
    pub confidence: ConfidenceSettings,
}

impl LayoutConfig {
    pub fn engine_options(&self) -> EngineOptions {
        EngineOptions {
            convert: self.convert,
            confidence: self.confidence,
        }
    }

    /// Every score must lie in [0, 1].
    fn validate(self) -> Result<Self, ConfigError> {
        let c = &self.confidence;
        let f = &c.fallback;
        let scores = [
            ("confidence.base", c.base),
            ("confidence.same_dialect", c.same_dialect),
            ("confidence.nesting_penalty", c.nesting_penalty),
            ("confidence.fallback.layout", f.layout),
            ("confidence.fallback.content", f.content),
            ("confidence.fallback.media", f.media),
            ("confidence.fallback.interactive", f.interactive),
            ("confidence.fallback.form", f.form),
            ("confidence.fallback.data", f.data),
            ("confidence.fallback.social", f.social),
            ("confidence.fallback.navigation", f.navigation),
            ("confidence.fallback.general", f.general),
        ];
        for (key, value) in scores {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::Message(format!(
                    "{} must be between 0 and 1, got {}",
                    key, value
                )));
            }
        }
        Ok(self)
    }
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

    /// Apply a single key/value override (e.g. `confidence.base`).
    pub fn set_override<I>(mut self, key: &str, value: I) -> Result<Self, ConfigError>
    where
        I: Into<ValueKind>,
    {
        self.builder = self.builder.set_override(key, value)?;
        Ok(self)
    }

    /// Finalize the builder, deserialize and check the resulting configuration.
    pub fn build(self) -> Result<LayoutConfig, ConfigError> {
        let config: LayoutConfig = self.builder.build()?.try_deserialize()?;
        config.validate()
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenience helper for callers that only need the defaults.
pub fn load_defaults() -> Result<LayoutConfig, ConfigError> {
    Loader::new().build()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loads_default_config() {
        let config = load_defaults().expect("defaults to deserialize");
        assert!(config.convert.emit_ids);
        assert!(!config.convert.pretty_json);
        assert_eq!(config.confidence.child_threshold, 5);
        assert_eq!(config.confidence.fallback.form, 0.2);
    }

    #[test]
    fn defaults_match_engine_defaults() {
        let config = load_defaults().expect("defaults to deserialize");
        assert_eq!(config.engine_options(), EngineOptions::default());
    }

    #[test]
    fn supports_overrides() {
        let config = Loader::new()
            .set_override("convert.pretty_json", true)
            .expect("override to apply")
            .set_override("confidence.base", 0.5)
            .expect("override to apply")
            .build()
            .expect("config to build");
        assert!(config.convert.pretty_json);
        assert_eq!(config.confidence.base, 0.5);
    }

    #[test]
    fn rejects_scores_out_of_range() {
        let result = Loader::new()
            .set_override("confidence.fallback.media", 2.0)
            .expect("override to apply")
            .build();
        let message = result.unwrap_err().to_string();
        assert!(message.contains("confidence.fallback.media"));
    }
}
