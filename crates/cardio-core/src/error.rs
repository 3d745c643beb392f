//! Error types for Cardio Core

use std::fmt;
use thiserror::Error;

/// The bound of a declared range that a value violated
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Bound {
    /// Value was below the inclusive minimum
    Min(f64),
    /// Value was above the inclusive maximum
    Max(f64),
}

impl fmt::Display for Bound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Bound::Min(min) => write!(f, "minimum {}", min),
            Bound::Max(max) => write!(f, "maximum {}", max),
        }
    }
}

/// Core error type
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CoreError {
    /// A field is outside its declared range
    #[error("Field '{field}' is out of range: {value} violates {bound}")]
    OutOfRange {
        field: &'static str,
        value: f64,
        bound: Bound,
    },

    /// Diastolic pressure exceeds systolic pressure
    #[error("Inconsistent vitals: diastolic {diastolic} exceeds systolic {systolic}")]
    InconsistentVitals { systolic: i64, diastolic: i64 },

    /// A categorical field holds a value outside its vocabulary
    #[error("Unknown category for '{field}': '{value}'")]
    UnknownCategory { field: &'static str, value: String },

    /// Arithmetic on validated input would produce a non-finite value
    #[error("Degenerate input: {0}")]
    DegenerateInput(String),

    /// Risk thresholds are not ordered inside (0, 1]
    #[error("Invalid risk thresholds: medium={medium}, high={high}")]
    InvalidThresholds { medium: f64, high: f64 },

    /// A feature vector could not be reconstructed
    #[error("Invalid feature vector: {0}")]
    InvalidFeatureVector(String),
}

impl CoreError {
    /// Name of the offending input field, when the error is tied to one
    pub fn field(&self) -> Option<&'static str> {
        match self {
            CoreError::OutOfRange { field, .. } | CoreError::UnknownCategory { field, .. } => {
                Some(*field)
            }
            CoreError::InconsistentVitals { .. } => Some("diastolic_bp"),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, CoreError>;
