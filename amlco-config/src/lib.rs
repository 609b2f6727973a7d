//! Shared configuration loader for the amlco tools.
//!
//! `defaults/amlco.default.toml` is embedded into every binary so that docs and
//! runtime behavior stay in sync. Applications layer user-specific files on top
//! of those defaults via [`Loader`] before deserializing into [`AmlcoConfig`].

use amlco_content::HtmlOptions;
use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, File, FileFormat, ValueKind};
use serde::Deserialize;
use std::path::{Path, PathBuf};

const DEFAULT_TOML: &str = include_str!("../defaults/amlco.default.toml");

/// Top-level configuration consumed by amlco applications.
#[derive(Debug, Clone, Deserialize)]
pub struct AmlcoConfig {
    pub api: ApiConfig,
    pub store: StoreConfig,
    pub report: ReportConfig,
    pub convert: ConvertConfig,
}

/// Where the backend lives.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    pub base_url: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StoreConfig {
    pub path: String,
}

impl StoreConfig {
    /// Configured state file, or `None` when the platform default should be used.
    pub fn explicit_path(&self) -> Option<PathBuf> {
        let trimmed = self.path.trim();
        (!trimmed.is_empty()).then(|| PathBuf::from(trimmed))
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ReportConfig {
    pub default_title: String,
    pub report_type: String,
}

/// Format-specific conversion knobs.
#[derive(Debug, Clone, Deserialize)]
pub struct ConvertConfig {
    pub html: HtmlConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct HtmlConfig {
    pub escape_text: bool,
}

impl From<&HtmlConfig> for HtmlOptions {
    fn from(config: &HtmlConfig) -> Self {
        HtmlOptions {
            escape_text: config.escape_text,
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
    pub fn build(self) -> Result<AmlcoConfig, ConfigError> {
        self.builder.build()?.try_deserialize()
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenience helper for callers that only need the defaults.
pub fn load_defaults() -> Result<AmlcoConfig, ConfigError> {
    Loader::new().build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn loads_default_config() {
        let config = load_defaults().expect("defaults to deserialize");
        assert_eq!(config.api.base_url, "http://localhost:8000");
        assert_eq!(config.report.default_title, "AMLCO Annual Report");
        assert_eq!(config.report.report_type, "annual");
        assert!(!config.convert.html.escape_text);
        assert_eq!(config.store.explicit_path(), None);
    }

    #[test]
    fn supports_overrides() {
        let config = Loader::new()
            .set_override("api.base_url", "https://reports.example.com")
            .expect("override to apply")
            .set_override("convert.html.escape_text", true)
            .expect("override to apply")
            .build()
            .expect("config to build");
        assert_eq!(config.api.base_url, "https://reports.example.com");
        assert!(HtmlOptions::from(&config.convert.html).escape_text);
    }

    #[test]
    fn user_file_is_layered_over_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("amlco.toml");
        fs::write(
            &path,
            "[store]\npath = \"/var/lib/amlco/state.json\"\n\n[report]\ndefault_title = \"Custom\"\n",
        )
        .unwrap();

        let config = Loader::new().with_file(&path).build().expect("config to build");
        assert_eq!(
            config.store.explicit_path(),
            Some(PathBuf::from("/var/lib/amlco/state.json"))
        );
        assert_eq!(config.report.default_title, "Custom");
        assert_eq!(config.report.report_type, "annual");
    }

    #[test]
    fn missing_required_file_is_an_error() {
        let dir = tempdir().unwrap();
        let result = Loader::new()
            .with_file(dir.path().join("absent.toml"))
            .build();
        assert!(result.is_err());
    }

    #[test]
    fn missing_optional_file_is_ignored() {
        let dir = tempdir().unwrap();
        let config = Loader::new()
            .with_optional_file(dir.path().join("absent.toml"))
            .build()
            .expect("config to build");
        assert_eq!(config.api.base_url, "http://localhost:8000");
    }
}
