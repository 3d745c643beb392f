//! Cardio SDK - Cardiovascular risk prediction
//!
//! High-level API that turns a raw patient record into a probability, a risk
//! tier and an explanation.

pub mod builder;
pub mod config;
pub mod error;
pub mod prediction_service;

// Re-export main types
pub use builder::PredictionServiceBuilder;
pub use config::{ServiceConfig, ThresholdConfig};
pub use error::{Result, SdkError};
pub use prediction_service::{
    ClinicalInsight, Explanation, PredictionResult, PredictionService, RiskFactor,
};

// Re-export commonly used types from dependencies
pub use cardio_core::{CoreError, FeatureVector, PatientInput, RiskTier};
pub use cardio_runtime::{MetricsCollector, ModelAdapter, ModelArtifact, RuntimeError};
