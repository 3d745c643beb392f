//! Cardio Runtime - Inference pipeline stages for cardiovascular risk
//!
//! This crate provides every stage between a raw patient record and a risk
//! tier: validation, feature engineering, model inference and
//! classification.

pub mod classifier;
pub mod error;
pub mod feature;
pub mod model;
pub mod observability;
pub mod validation;

// Re-export main types
pub use classifier::{RiskClassifier, RiskThresholds, DEFAULT_HIGH_THRESHOLD, DEFAULT_MEDIUM_THRESHOLD};
pub use error::{Result, RuntimeError};
pub use feature::build_features;
pub use model::{Classifier, ModelAdapter, ModelArtifact};
pub use observability::{Metrics, MetricsCollector, MetricsSnapshot};
pub use validation::validate;
