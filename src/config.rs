//! Configuration management for field coverage
//!
//! Supports loading configuration from:
//! - Default values
//! - Config file (coverage.toml)
//! - Environment variables (COVERAGE_*)
//!
//! ## Example config file (coverage.toml):
//! ```toml
//! [extract]
//! skip_marker = "-"
//!
//! [report]
//! output_format = "text"
//! show_suggestions = true
//! min_suggestion_score = 50
//! ```

use config_crate::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};

use crate::error::{CoverageError, Result};
use crate::extract::{FieldExtractor, DEFAULT_SKIP_MARKER};
use crate::suggest::DEFAULT_MIN_SCORE;

/// Main configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct CoverageConfig {
    /// Extraction settings
    #[serde(default)]
    pub extract: ExtractConfig,

    /// Report settings
    #[serde(default)]
    pub report: ReportConfig,
}

/// Extraction configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractConfig {
    /// Tag name meaning "never serialize this field"
    #[serde(default = "default_skip_marker")]
    pub skip_marker: String,
}

/// Report configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportConfig {
    /// Output format (text, pretty or compact)
    #[serde(default)]
    pub output_format: OutputFormat,

    /// Propose near-miss candidates for unsupported names
    #[serde(default = "default_true")]
    pub show_suggestions: bool,

    /// Minimum fuzzy score for a suggestion
    #[serde(default = "default_min_suggestion_score")]
    pub min_suggestion_score: i64,
}

/// Output format for reports
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable summary lines
    #[default]
    Text,
    /// Indented JSON
    Pretty,
    /// Single-line JSON
    Compact,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "pretty" | "json" => Ok(OutputFormat::Pretty),
            "compact" => Ok(OutputFormat::Compact),
            other => Err(format!("unknown output format '{}'", other)),
        }
    }
}

// Default value functions
fn default_skip_marker() -> String {
    DEFAULT_SKIP_MARKER.to_string()
}

fn default_true() -> bool {
    true
}

fn default_min_suggestion_score() -> i64 {
    DEFAULT_MIN_SCORE
}

impl Default for ExtractConfig {
    fn default() -> Self {
        Self {
            skip_marker: default_skip_marker(),
        }
    }
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            output_format: OutputFormat::Text,
            show_suggestions: true,
            min_suggestion_score: DEFAULT_MIN_SCORE,
        }
    }
}

impl CoverageConfig {
    /// Load configuration from default locations
    pub fn load() -> std::result::Result<Self, ConfigError> {
        Self::load_from(None)
    }

    /// Load configuration from a specific file
    pub fn load_from(config_path: Option<&str>) -> std::result::Result<Self, ConfigError> {
        let mut builder = Config::builder();

        let config_locations = ["coverage.toml", ".coverage.toml", "config/coverage.toml"];

        for location in config_locations {
            builder = builder.add_source(File::with_name(location).required(false));
        }

        // Load from XDG config directory
        if let Some(config_dir) =
            directories::ProjectDirs::from("dev", "familiar", "field-coverage")
        {
            let xdg_config = config_dir.config_dir().join("coverage.toml");
            if xdg_config.exists() {
                builder = builder.add_source(File::from(xdg_config).required(false));
            }
        }

        if let Some(path) = config_path {
            builder = builder.add_source(File::with_name(path).required(true));
        }

        // Load from environment variables (COVERAGE__*)
        builder = builder.add_source(
            Environment::with_prefix("COVERAGE")
                .separator("__")
                .try_parsing(true),
        );

        let config = builder.build()?;
        config.try_deserialize()
    }

    /// Load configuration and reject invalid settings
    pub fn load_validated(config_path: Option<&str>) -> Result<Self> {
        let config = Self::load_from(config_path)?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to a file
    pub fn save(&self, path: &str) -> Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Check settings the loader cannot check by type alone
    pub fn validate(&self) -> Result<()> {
        let marker = &self.extract.skip_marker;
        if marker.is_empty() {
            return Err(CoverageError::InvalidConfig(
                "extract.skip_marker must not be empty".to_string(),
            ));
        }
        // Markers are bare names; options belong to the tag.
        if marker.contains(',') {
            return Err(CoverageError::InvalidConfig(format!(
                "extract.skip_marker '{}' must not contain ','",
                marker
            )));
        }
        if self.report.min_suggestion_score < 0 {
            return Err(CoverageError::InvalidConfig(
                "report.min_suggestion_score must not be negative".to_string(),
            ));
        }
        Ok(())
    }

    /// Extractor honouring the configured skip marker
    pub fn extractor(&self) -> FieldExtractor {
        FieldExtractor::new().with_skip_marker(&self.extract.skip_marker)
    }

    /// Minimum suggestion score, or `None` when suggestions are off
    pub fn suggestion_threshold(&self) -> Option<i64> {
        self.report
            .show_suggestions
            .then_some(self.report.min_suggestion_score)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = CoverageConfig::default();
        assert_eq!(config.extract.skip_marker, "-");
        assert_eq!(config.report.output_format, OutputFormat::Text);
        assert_eq!(config.suggestion_threshold(), Some(DEFAULT_MIN_SCORE));
    }

    #[test]
    fn test_serialize_config() {
        let config = CoverageConfig::default();
        let toml_str = toml::to_string_pretty(&config).unwrap();
        assert!(toml_str.contains("[extract]"));
        assert!(toml_str.contains("[report]"));
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("custom.toml");
        std::fs::write(
            &path,
            "[extract]\nskip_marker = \"ignore\"\n\n[report]\noutput_format = \"compact\"\nshow_suggestions = false\n",
        )
        .unwrap();

        let config = CoverageConfig::load_from(path.to_str()).unwrap();
        assert_eq!(config.extract.skip_marker, "ignore");
        assert_eq!(config.extractor().skip_marker(), "ignore");
        assert_eq!(config.report.output_format, OutputFormat::Compact);
        assert_eq!(config.suggestion_threshold(), None);
    }

    #[test]
    fn test_save_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("saved.toml");
        let path = path.to_str().unwrap();

        let mut config = CoverageConfig::default();
        config.report.min_suggestion_score = 80;
        config.save(path).unwrap();

        let loaded = CoverageConfig::load_from(Some(path)).unwrap();
        assert_eq!(loaded.report.min_suggestion_score, 80);
    }

    #[test]
    fn test_validate() {
        assert!(CoverageConfig::default().validate().is_ok());

        let mut config = CoverageConfig::default();
        config.extract.skip_marker = "skip,me".to_string();
        assert!(config.validate().is_err());

        let mut config = CoverageConfig::default();
        config.extract.skip_marker.clear();
        assert!(config.validate().is_err());

        let mut config = CoverageConfig::default();
        config.report.min_suggestion_score = -1;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_load_validated_rejects_bad_settings() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.toml");
        std::fs::write(&path, "[report]\nmin_suggestion_score = -5\n").unwrap();

        let err = CoverageConfig::load_validated(path.to_str()).unwrap_err();
        assert!(matches!(err, CoverageError::InvalidConfig(_)));

        std::fs::write(&path, "[extract]\nskip_marker = \"-,omitempty\"\n").unwrap();
        assert!(CoverageConfig::load_validated(path.to_str()).is_err());

        std::fs::write(&path, "[report]\nmin_suggestion_score = 10\n").unwrap();
        let config = CoverageConfig::load_validated(path.to_str()).unwrap();
        assert_eq!(config.report.min_suggestion_score, 10);
    }

    #[test]
    fn test_output_format_from_str() {
        assert_eq!("json".parse::<OutputFormat>().unwrap(), OutputFormat::Pretty);
        assert_eq!("TEXT".parse::<OutputFormat>().unwrap(), OutputFormat::Text);
        assert!("yaml".parse::<OutputFormat>().is_err());
    }
}
