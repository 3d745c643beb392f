//! Service configuration

use crate::error::{Result, SdkError};
use cardio_runtime::{RiskThresholds, DEFAULT_HIGH_THRESHOLD, DEFAULT_MEDIUM_THRESHOLD};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Probability cut-points for the risk tiers, as read from configuration
///
/// Checked only when converted with [`ThresholdConfig::to_risk_thresholds`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ThresholdConfig {
    /// Lowest probability classified as medium
    #[serde(default = "default_medium")]
    pub medium: f64,

    /// Lowest probability classified as high
    #[serde(default = "default_high")]
    pub high: f64,
}

fn default_medium() -> f64 {
    DEFAULT_MEDIUM_THRESHOLD
}

fn default_high() -> f64 {
    DEFAULT_HIGH_THRESHOLD
}

impl Default for ThresholdConfig {
    fn default() -> Self {
        Self {
            medium: default_medium(),
            high: default_high(),
        }
    }
}

impl ThresholdConfig {
    /// Validate into thresholds the classifier accepts
    pub fn to_risk_thresholds(&self) -> Result<RiskThresholds> {
        Ok(RiskThresholds::new(self.medium, self.high)?)
    }
}

/// Prediction service configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceConfig {
    /// Model artifact to load at startup
    #[serde(default)]
    pub artifact_path: Option<PathBuf>,

    /// Risk tier cut-points
    #[serde(default)]
    pub thresholds: ThresholdConfig,

    /// Enable metrics
    #[serde(default = "default_enable_metrics")]
    pub enable_metrics: bool,

    /// Log level (`info`, `debug`, ...) or a full `tracing` filter directive
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_enable_metrics() -> bool {
    true
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            artifact_path: None,
            thresholds: ThresholdConfig::default(),
            enable_metrics: default_enable_metrics(),
            log_level: default_log_level(),
        }
    }
}

impl ServiceConfig {
    /// Create a new configuration with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the model artifact path
    pub fn with_artifact_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.artifact_path = Some(path.into());
        self
    }

    /// Set the risk tier cut-points
    pub fn with_thresholds(mut self, medium: f64, high: f64) -> Self {
        self.thresholds = ThresholdConfig { medium, high };
        self
    }

    /// Enable or disable metrics
    pub fn with_metrics(mut self, enable: bool) -> Self {
        self.enable_metrics = enable;
        self
    }

    /// Set the log level or filter directive
    pub fn with_log_level(mut self, level: impl Into<String>) -> Self {
        self.log_level = level.into();
        self
    }

    /// Filter directive for the cardio crates built from `log_level`
    ///
    /// A bare level is scoped to `cardio_sdk` and `cardio_runtime`; anything
    /// containing `=` or `,` is passed through unchanged.
    pub fn log_filter(&self) -> String {
        let level = self.log_level.trim();
        if level.contains('=') || level.contains(',') {
            level.to_string()
        } else {
            format!("cardio_sdk={level},cardio_runtime={level}")
        }
    }

    /// Load configuration from `.env`, an optional `config/cardio` file and
    /// `CARDIO__*` environment variables, in increasing precedence
    ///
    /// Nested keys use a double underscore, e.g. `CARDIO__THRESHOLDS__HIGH=0.7`.
    /// A missing file falls back to defaults; a file that exists but does not
    /// parse is an error.
    pub fn load() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::load_in(".")
    }

    /// Same as [`ServiceConfig::load`] without `.env`, looking for
    /// `config/cardio.*` under `base_dir`
    pub fn load_in(base_dir: impl AsRef<Path>) -> Result<Self> {
        let file = base_dir.as_ref().join("config").join("cardio");

        config::Config::builder()
            .add_source(config::File::with_name(&file.to_string_lossy()).required(false))
            .add_source(
                config::Environment::with_prefix("CARDIO")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| SdkError::Config(format!("Failed to read config: {}", e)))?
            .try_deserialize()
            .map_err(|e| SdkError::Config(format!("Failed to deserialize config: {}", e)))
    }

    /// Load configuration from one explicit file, format taken from its extension
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        config::Config::builder()
            .add_source(config::File::from(path))
            .build()
            .and_then(|cfg| cfg.try_deserialize())
            .map_err(|e| SdkError::Config(format!("{}: {}", path.display(), e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_service_config_default() {
        let config = ServiceConfig::default();

        assert!(config.artifact_path.is_none());
        assert_eq!(config.thresholds.medium, 0.33);
        assert_eq!(config.thresholds.high, 0.66);
        assert!(config.enable_metrics);
        assert_eq!(config.log_level, "info");
    }

    #[test]
    fn test_service_config_builder_methods() {
        let config = ServiceConfig::new()
            .with_artifact_path("models/cardio.json")
            .with_thresholds(0.2, 0.5)
            .with_metrics(false);

        assert_eq!(
            config.artifact_path.as_deref(),
            Some(Path::new("models/cardio.json"))
        );
        assert_eq!(config.thresholds, ThresholdConfig { medium: 0.2, high: 0.5 });
        assert!(!config.enable_metrics);
    }

    #[test]
    fn test_log_filter_from_level() {
        assert_eq!(
            ServiceConfig::default().log_filter(),
            "cardio_sdk=info,cardio_runtime=info"
        );
        assert_eq!(
            ServiceConfig::new().with_log_level(" debug ").log_filter(),
            "cardio_sdk=debug,cardio_runtime=debug"
        );

        let directive = "cardio_runtime=trace,warn";
        assert_eq!(
            ServiceConfig::new().with_log_level(directive).log_filter(),
            directive
        );
    }

    #[test]
    fn test_threshold_config_validation() {
        let thresholds = ThresholdConfig::default().to_risk_thresholds().unwrap();
        assert_eq!(thresholds.medium(), 0.33);
        assert_eq!(thresholds.high(), 0.66);

        let inverted = ThresholdConfig { medium: 0.7, high: 0.3 };
        let err = inverted.to_risk_thresholds().unwrap_err();
        assert_eq!(err.kind(), "invalid_thresholds");
    }

    #[test]
    fn test_load_from_yaml_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("cardio.yaml");
        fs::write(
            &path,
            "artifact_path: models/cardio.json\nthresholds:\n  high: 0.75\nenable_metrics: false\n",
        )
        .unwrap();

        let config = ServiceConfig::load_from(&path).unwrap();
        assert_eq!(
            config.artifact_path.as_deref(),
            Some(Path::new("models/cardio.json"))
        );
        // Omitted keys fall back to their defaults
        assert_eq!(config.thresholds.medium, 0.33);
        assert_eq!(config.thresholds.high, 0.75);
        assert!(!config.enable_metrics);
        assert_eq!(config.log_level, "info");
    }

    #[test]
    fn test_load_in_reads_log_level() {
        let dir = TempDir::new().unwrap();
        fs::create_dir(dir.path().join("config")).unwrap();
        fs::write(dir.path().join("config").join("cardio.yaml"), "log_level: warn\n").unwrap();

        let config = ServiceConfig::load_in(dir.path()).unwrap();
        assert_eq!(config.log_filter(), "cardio_sdk=warn,cardio_runtime=warn");
    }

    #[test]
    fn test_load_in_without_file_uses_defaults() {
        let dir = TempDir::new().unwrap();
        let config = ServiceConfig::load_in(dir.path()).unwrap();
        assert_eq!(config.thresholds, ThresholdConfig::default());
    }

    #[test]
    fn test_load_in_reads_config_file() {
        let dir = TempDir::new().unwrap();
        fs::create_dir(dir.path().join("config")).unwrap();
        fs::write(
            dir.path().join("config").join("cardio.toml"),
            "[thresholds]\nmedium = 0.2\nhigh = 0.4\n",
        )
        .unwrap();

        let config = ServiceConfig::load_in(dir.path()).unwrap();
        assert_eq!(config.thresholds, ThresholdConfig { medium: 0.2, high: 0.4 });
    }

    #[test]
    fn test_load_in_rejects_malformed_config_file() {
        let dir = TempDir::new().unwrap();
        fs::create_dir(dir.path().join("config")).unwrap();
        fs::write(
            dir.path().join("config").join("cardio.toml"),
            "[thresholds\nmedium = 0.2\nhigh = 0.4",
        )
        .unwrap();

        let err = ServiceConfig::load_in(dir.path()).unwrap_err();
        assert!(matches!(err, SdkError::Config(_)));
        assert!(err.to_string().contains("Failed to read config"));
    }

    #[test]
    fn test_load_from_missing_file() {
        let dir = TempDir::new().unwrap();
        let err = ServiceConfig::load_from(dir.path().join("absent.toml")).unwrap_err();
        assert!(matches!(err, SdkError::Config(_)));
        assert!(err.to_string().contains("absent.toml"));
    }
}
