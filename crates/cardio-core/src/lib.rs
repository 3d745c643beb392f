//! Cardio Core - Core types and definitions for cardiovascular risk inference
//!
//! This crate provides the fundamental types shared across the pipeline:
//! - Raw and validated patient records
//! - The versioned feature schema and feature vectors
//! - Risk tiers
//! - Error types for input data

pub mod error;
pub mod types;

// Re-export commonly used types
pub use error::{Bound, CoreError, Result};
pub use types::{
    FeatureSchema, FeatureVector, Gender, LengthUnit, Level, MassUnit, PatientInput, RiskTier,
    ValidatedPatient, FEATURE_COUNT, FEATURE_NAMES, SCHEMA_VERSION,
};
