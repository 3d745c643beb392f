//! Builder pattern for PredictionService

use crate::config::ServiceConfig;
use crate::error::{Result, SdkError};
use crate::prediction_service::PredictionService;
use cardio_runtime::{MetricsCollector, ModelAdapter, ModelArtifact, RiskClassifier};
use std::path::PathBuf;
use std::sync::Arc;

/// Builder for PredictionService
///
/// The model comes from, in order of preference: a shared adapter, a parsed
/// artifact, or an artifact path.
///
/// # Example
///
/// ```rust,ignore
/// use cardio_sdk::PredictionServiceBuilder;
///
/// let service = PredictionServiceBuilder::new()
///     .with_artifact_path("models/cardio-lr.json")
///     .with_thresholds(0.3, 0.7)
///     .enable_metrics(true)
///     .build()?;
/// ```
pub struct PredictionServiceBuilder {
    config: ServiceConfig,
    artifact: Option<ModelArtifact>,
    adapter: Option<Arc<ModelAdapter>>,
    metrics: Option<Arc<MetricsCollector>>,
}

impl PredictionServiceBuilder {
    /// Create a new builder
    pub fn new() -> Self {
        Self::from_config(ServiceConfig::default())
    }

    /// Start from a loaded configuration
    pub fn from_config(config: ServiceConfig) -> Self {
        Self {
            config,
            artifact: None,
            adapter: None,
            metrics: None,
        }
    }

    /// Load the model from an artifact file
    pub fn with_artifact_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.artifact_path = Some(path.into());
        self
    }

    /// Use an already parsed artifact
    pub fn with_artifact(mut self, artifact: ModelArtifact) -> Self {
        self.artifact = Some(artifact);
        self
    }

    /// Share an adapter that is already loaded, e.g. with another service
    pub fn with_model_adapter(mut self, adapter: Arc<ModelAdapter>) -> Self {
        self.adapter = Some(adapter);
        self
    }

    /// Set the medium and high tier cut-points
    pub fn with_thresholds(mut self, medium: f64, high: f64) -> Self {
        self.config = self.config.with_thresholds(medium, high);
        self
    }

    /// Enable metrics
    pub fn enable_metrics(mut self, enable: bool) -> Self {
        self.config.enable_metrics = enable;
        self
    }

    /// Record into an existing collector; implies metrics are enabled
    pub fn with_metrics_collector(mut self, metrics: Arc<MetricsCollector>) -> Self {
        self.config.enable_metrics = true;
        self.metrics = Some(metrics);
        self
    }

    /// Build the service
    ///
    /// Fails on invalid thresholds, a missing model, or any artifact or
    /// schema error.
    pub fn build(self) -> Result<PredictionService> {
        let thresholds = self.config.thresholds.to_risk_thresholds()?;

        let adapter = match (self.adapter, self.artifact, &self.config.artifact_path) {
            (Some(adapter), _, _) => adapter,
            (None, Some(artifact), _) => Arc::new(ModelAdapter::from_artifact(artifact)?),
            (None, None, Some(path)) => Arc::new(ModelAdapter::load(path)?),
            (None, None, None) => {
                return Err(SdkError::Config(
                    "no model configured: set an artifact path, artifact or adapter".to_string(),
                ))
            }
        };

        tracing::info!(
            model_version = adapter.model_version(),
            schema_version = adapter.schema_version(),
            kind = adapter.kind(),
            medium = thresholds.medium(),
            high = thresholds.high(),
            metrics = self.config.enable_metrics,
            "Prediction service ready"
        );

        let service = PredictionService::new(adapter, RiskClassifier::new(thresholds));
        if !self.config.enable_metrics {
            return Ok(service);
        }

        let metrics = self
            .metrics
            .unwrap_or_else(|| Arc::new(MetricsCollector::new()));
        Ok(service.with_metrics(metrics))
    }
}

impl Default for PredictionServiceBuilder {
    fn default() -> Self {
        Self::new()
    }
}
