//! Prediction service module
//!
//! - `service`: pipeline sequencing, logging and metrics
//! - `types`: the prediction result
//! - `explanation`: result card headline, clinical insights and top factors

pub mod explanation;
pub mod service;
pub mod types;

pub use explanation::{ClinicalInsight, Explanation, RiskFactor};
pub use service::PredictionService;
pub use types::PredictionResult;
