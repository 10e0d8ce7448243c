//! Engine configuration loaded from TOML
//!
//! ```toml
//! [labeling]
//! parallel_threshold = 128
//!
//! [labeling.scheme]
//! thresholds = [8.0, 11.0]
//! class_names = ["Light", "Moderate", "Severe"]
//!
//! [comparison]
//! confidence_level = 0.95
//! variance = "welch"
//! ```
//!
//! Threshold lists are validated while deserializing; `[comparison]` may be
//! omitted entirely and falls back to [`ComparisonConfig::default`].

use crate::comparison::ComparisonConfig;
use crate::severity::SeverityScheme;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Mask count from which labelling runs on the rayon pool
pub const DEFAULT_PARALLEL_THRESHOLD: usize = 256;

fn default_parallel_threshold() -> usize {
    DEFAULT_PARALLEL_THRESHOLD
}

/// Settings for [`crate::labeling::generate_labels`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabelingConfig {
    /// Batches with at least this many masks are labelled in parallel
    #[serde(default = "default_parallel_threshold")]
    pub parallel_threshold: usize,

    pub scheme: SeverityScheme,
}

impl LabelingConfig {
    pub fn new(scheme: SeverityScheme) -> Self {
        Self {
            scheme,
            parallel_threshold: DEFAULT_PARALLEL_THRESHOLD,
        }
    }

    pub fn with_parallel_threshold(mut self, parallel_threshold: usize) -> Self {
        self.parallel_threshold = parallel_threshold;
        self
    }
}

/// Complete configuration of both engines
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    pub labeling: LabelingConfig,

    #[serde(default)]
    pub comparison: ComparisonConfig,
}

impl EngineConfig {
    /// Parse and validate a TOML document
    ///
    /// # Errors
    /// Returns error on invalid TOML, invalid thresholds or class names, or
    /// a confidence level outside (0, 1).
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Self =
            toml::from_str(content).with_context(|| "Failed to parse engine configuration")?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file
    ///
    /// # Example
    /// ```no_run
    /// use corrosion_severity::config::EngineConfig;
    ///
    /// let config = EngineConfig::from_file("severity.toml")?;
    /// println!("{} classes", config.labeling.scheme.thresholds().class_count());
    /// # Ok::<(), anyhow::Error>(())
    /// ```
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref()).with_context(|| {
            format!("Failed to read config file: {}", path.as_ref().display())
        })?;
        Self::from_toml_str(&content)
            .with_context(|| format!("Invalid config file: {}", path.as_ref().display()))
    }

    pub fn validate(&self) -> Result<()> {
        self.comparison
            .validate()
            .with_context(|| "Invalid [comparison] section")?;
        Ok(())
    }

    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string(self).with_context(|| "Failed to serialize engine configuration")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::comparison::VarianceAssumption;
    use crate::severity::SeverityClass;
    use std::io::Write;

    const FULL: &str = r#"
        [labeling]
        parallel_threshold = 128

        [labeling.scheme]
        thresholds = [8.0, 11.0]
        class_names = ["Light", "Moderate", "Severe"]

        [comparison]
        confidence_level = 0.99
        variance = "pooled"
    "#;

    #[test]
    fn test_parse_full_config() {
        let config = EngineConfig::from_toml_str(FULL).unwrap();
        assert_eq!(config.labeling.parallel_threshold, 128);
        assert_eq!(config.labeling.scheme.thresholds().values(), &[8.0, 11.0]);
        assert_eq!(
            config.labeling.scheme.class_name(SeverityClass(2)),
            Some("Severe")
        );
        assert_eq!(config.comparison.confidence_level, 0.99);
        assert_eq!(config.comparison.variance, VarianceAssumption::Pooled);
    }

    #[test]
    fn test_defaults_for_optional_sections() {
        let config = EngineConfig::from_toml_str(
            r#"
            [labeling.scheme]
            thresholds = [33.0, 67.0]
            "#,
        )
        .unwrap();
        assert_eq!(config.labeling.parallel_threshold, DEFAULT_PARALLEL_THRESHOLD);
        assert_eq!(config.comparison, ComparisonConfig::default());
        assert_eq!(config.labeling.scheme.class_name(SeverityClass(0)), None);
    }

    #[test]
    fn test_rejects_unsorted_thresholds() {
        let err = EngineConfig::from_toml_str(
            r#"
            [labeling.scheme]
            thresholds = [11.0, 8.0]
            "#,
        )
        .unwrap_err();
        assert!(format!("{:#}", err).contains("Failed to parse engine configuration"));
    }

    #[test]
    fn test_rejects_invalid_confidence_level() {
        let err = EngineConfig::from_toml_str(
            r#"
            [labeling.scheme]
            thresholds = [8.0, 11.0]

            [comparison]
            confidence_level = 1.5
            "#,
        )
        .unwrap_err();
        assert!(format!("{:#}", err).contains("Confidence level must lie strictly between"));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(FULL.as_bytes()).unwrap();

        let config = EngineConfig::from_file(file.path()).unwrap();
        assert_eq!(config.labeling.parallel_threshold, 128);
    }

    #[test]
    fn test_missing_file() {
        let err = EngineConfig::from_file("/nonexistent/severity.toml").unwrap_err();
        assert!(err.to_string().contains("Failed to read config file"));
    }

    #[test]
    fn test_toml_round_trip() {
        let config = EngineConfig::from_toml_str(FULL).unwrap();
        let reparsed = EngineConfig::from_toml_str(&config.to_toml_string().unwrap()).unwrap();
        assert_eq!(config, reparsed);
    }
}
