//! Configuration loader for glint.
//!
//! `defaults/glint.default.toml` is embedded into the binary so that docs and
//! runtime behavior stay in sync. Callers layer user-specific files on top of
//! those defaults via [`Loader`] before deserializing into [`HighlightConfig`].

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, File, FileFormat, ValueKind};
use serde::Deserialize;
use std::path::Path;

const DEFAULT_TOML: &str = include_str!("../defaults/glint.default.toml");

/// Top-level configuration consumed by the driver.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct HighlightConfig {
    pub marker: MarkerConfig,
    pub vocabulary: VocabularyConfig,
}

/// Which elements of a page are highlightable and where their vocabularies live.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct MarkerConfig {
    pub tag: String,
    pub class: String,
    pub keywords_attribute: String,
    pub types_attribute: String,
}

/// Fallback vocabularies for elements that carry no vocabulary attributes.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct VocabularyConfig {
    pub keywords: Vec<String>,
    pub types: Vec<String>,
}

impl Default for HighlightConfig {
    fn default() -> Self {
        Self {
            marker: MarkerConfig {
                tag: "code".to_string(),
                class: "glint".to_string(),
                keywords_attribute: "data-keywords".to_string(),
                types_attribute: "data-types".to_string(),
            },
            vocabulary: VocabularyConfig {
                keywords: vec!["let".to_string()],
                types: vec!["Int".to_string()],
            },
        }
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

    /// Apply a single key/value override (useful for CLI settings).
    pub fn set_override<I>(mut self, key: &str, value: I) -> Result<Self, ConfigError>
    where
        I: Into<ValueKind>,
    {
        self.builder = self.builder.set_override(key, value)?;
        Ok(self)
    }

    /// Finalize the builder and deserialize the resulting configuration.
    pub fn build(self) -> Result<HighlightConfig, ConfigError> {
        self.builder.build()?.try_deserialize()
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenience helper for callers that only need the defaults.
pub fn load_defaults() -> Result<HighlightConfig, ConfigError> {
    Loader::new().build()
}
