//! Type definitions shared by every stage of the pipeline

pub mod feature;
pub mod patient;
pub mod risk;

pub use feature::{index, FeatureSchema, FeatureVector, FEATURE_COUNT, FEATURE_NAMES, SCHEMA_VERSION};
pub use patient::{Gender, LengthUnit, Level, MassUnit, PatientInput, ValidatedPatient};
pub use risk::RiskTier;
