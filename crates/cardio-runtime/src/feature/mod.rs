//! Feature Engineering Module
//!
//! Derives computed features from a validated patient record and lays them
//! out in the versioned schema order expected by model artifacts.

pub mod engineer;

pub use engineer::{bmi, bp_difference, build_features, age_systolic_interaction};
