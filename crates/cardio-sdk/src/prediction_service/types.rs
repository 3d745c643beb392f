//! Prediction service result types

use super::explanation::Explanation;
use cardio_core::{FeatureVector, RiskTier};
use serde::Serialize;

/// Outcome of one prediction
///
/// Contains no timestamps or generated ids: the same input against the same
/// model always yields an equal value.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PredictionResult {
    /// Probability of cardiovascular disease, in [0, 1]
    pub probability: f64,

    /// Tier derived from `probability`
    pub risk_tier: RiskTier,

    /// Features the model was evaluated on
    pub feature_snapshot: FeatureVector,

    /// Version of the model artifact that produced this result
    pub model_version: String,

    pub explanation: Explanation,
}

impl PredictionResult {
    /// Probability as a percentage rounded to one decimal, for display
    pub fn percentage(&self) -> f64 {
        (self.probability * 1000.0).round() / 10.0
    }

    pub fn is_high_risk(&self) -> bool {
        self.risk_tier == RiskTier::High
    }
}
