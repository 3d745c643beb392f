//! Common test utilities for SDK integration tests

#![allow(dead_code)]

use cardio_sdk::{PatientInput, PredictionService, PredictionServiceBuilder};
use std::path::PathBuf;

/// Path of a file under `tests/fixtures`
pub fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

/// Service over the reference logistic model with default thresholds
pub fn logistic_service() -> PredictionService {
    PredictionServiceBuilder::new()
        .with_artifact_path(fixture("logistic_v1.json"))
        .build()
        .expect("reference artifact should load")
}

/// 55-year-old male smoker with stage 2 readings and above-normal cholesterol
pub fn hypertensive_smoker() -> PatientInput {
    PatientInput::new(55, "male", 175.0, 85.0, 150, 95)
        .with_cholesterol("above_normal")
        .with_glucose("normal")
        .with_lifestyle(true, false, false)
}

/// 50-year-old active female with normal readings
pub fn healthy_adult() -> PatientInput {
    PatientInput::new(50, "female", 170.0, 70.0, 120, 80).with_lifestyle(false, false, true)
}

pub fn sigmoid(z: f64) -> f64 {
    1.0 / (1.0 + (-z).exp())
}
