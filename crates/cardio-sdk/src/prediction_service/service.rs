//! PredictionService - sequences the pipeline stages for one record

use super::explanation::Explanation;
use super::types::PredictionResult;
use crate::error::Result;
use cardio_core::PatientInput;
use cardio_runtime::observability::Metrics;
use cardio_runtime::{
    build_features, validate, MetricsCollector, ModelAdapter, RiskClassifier, RiskThresholds,
    RuntimeError,
};
use std::sync::Arc;
use std::time::Instant;

/// Prediction service
///
/// Holds no per-request state. One instance can serve any number of threads;
/// the model adapter is shared read-only behind an `Arc`.
pub struct PredictionService {
    adapter: Arc<ModelAdapter>,
    classifier: RiskClassifier,
    metrics: Option<Arc<MetricsCollector>>,
}

impl PredictionService {
    /// Create a service without metrics
    pub fn new(adapter: Arc<ModelAdapter>, classifier: RiskClassifier) -> Self {
        Self {
            adapter,
            classifier,
            metrics: None,
        }
    }

    pub(crate) fn with_metrics(mut self, metrics: Arc<MetricsCollector>) -> Self {
        self.metrics = Some(metrics);
        self
    }

    /// Run validation, feature engineering, inference and classification
    ///
    /// The first failing stage's error is returned unchanged.
    pub fn predict(&self, raw: &PatientInput) -> Result<PredictionResult> {
        let start = Instant::now();
        let outcome = self.run(raw);
        let duration = start.elapsed();

        match &outcome {
            Ok(result) => {
                tracing::debug!(
                    probability = result.probability,
                    tier = %result.risk_tier,
                    model_version = %result.model_version,
                    duration_us = duration.as_micros() as u64,
                    "Prediction completed"
                );
            }
            Err(e) if e.is_input_error() => {
                tracing::warn!(kind = e.kind(), error = %e, "Prediction rejected");
            }
            Err(e) => {
                tracing::error!(kind = e.kind(), error = %e, "Prediction failed");
            }
        }

        if let Some(metrics) = &self.metrics {
            metrics.record_execution_time("predict", duration);
            match &outcome {
                Ok(result) => {
                    metrics.counter("predictions_total").inc();
                    metrics
                        .counter(&format!("predictions_{}", result.risk_tier))
                        .inc();
                }
                Err(e) => metrics.record_error(e.kind()),
            }
        }

        outcome.map_err(Into::into)
    }

    /// Predict every record independently; one failure does not affect the others
    pub fn predict_batch(&self, inputs: &[PatientInput]) -> Vec<Result<PredictionResult>> {
        inputs.iter().map(|raw| self.predict(raw)).collect()
    }

    fn run(&self, raw: &PatientInput) -> std::result::Result<PredictionResult, RuntimeError> {
        let patient = validate(raw)?;
        let features = build_features(&patient)?;
        let probability = self.adapter.predict_probability(&features)?;
        let risk_tier = self.classifier.classify(probability);
        let contributions = self.adapter.feature_contributions(&features)?;

        Ok(PredictionResult {
            probability,
            risk_tier,
            explanation: Explanation::new(risk_tier, &patient, contributions.as_deref()),
            feature_snapshot: features,
            model_version: self.adapter.model_version().to_string(),
        })
    }

    pub fn model_version(&self) -> &str {
        self.adapter.model_version()
    }

    pub fn model_adapter(&self) -> &Arc<ModelAdapter> {
        &self.adapter
    }

    pub fn thresholds(&self) -> RiskThresholds {
        self.classifier.thresholds()
    }

    /// Metrics collector, when metrics are enabled
    pub fn metrics(&self) -> Option<&Arc<MetricsCollector>> {
        self.metrics.as_ref()
    }
}

impl std::fmt::Debug for PredictionService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PredictionService")
            .field("adapter", &self.adapter)
            .field("thresholds", &self.classifier.thresholds())
            .field("metrics_enabled", &self.metrics.is_some())
            .finish()
    }
}
