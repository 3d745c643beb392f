//! Runtime error types

use cardio_core::CoreError;
use std::path::PathBuf;
use thiserror::Error;

/// Runtime error
#[derive(Error, Debug)]
pub enum RuntimeError {
    /// Input validation or feature construction failure
    #[error(transparent)]
    Core(#[from] CoreError),

    /// Model artifact missing, unreadable, unparseable or malformed
    #[error("Failed to load model artifact {}: {reason}", .path.display())]
    ModelLoad { path: PathBuf, reason: String },

    /// Artifact and feature engineer disagree on the feature layout
    #[error("Feature schema mismatch: expected '{expected}', found '{found}'")]
    SchemaMismatch { expected: String, found: String },
}

impl RuntimeError {
    /// Shorthand for a load failure
    pub fn model_load(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        RuntimeError::ModelLoad {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Whether the caller can recover by correcting the submitted record
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            RuntimeError::Core(
                CoreError::OutOfRange { .. }
                    | CoreError::InconsistentVitals { .. }
                    | CoreError::UnknownCategory { .. }
            )
        )
    }

    /// Stable snake_case label, used for metrics and logs
    pub fn kind(&self) -> &'static str {
        match self {
            RuntimeError::Core(core) => match core {
                CoreError::OutOfRange { .. } => "out_of_range",
                CoreError::InconsistentVitals { .. } => "inconsistent_vitals",
                CoreError::UnknownCategory { .. } => "unknown_category",
                CoreError::DegenerateInput(_) => "degenerate_input",
                CoreError::InvalidThresholds { .. } => "invalid_thresholds",
                CoreError::InvalidFeatureVector(_) => "invalid_feature_vector",
            },
            RuntimeError::ModelLoad { .. } => "model_load",
            RuntimeError::SchemaMismatch { .. } => "schema_mismatch",
        }
    }
}

/// Result type for runtime operations
pub type Result<T> = std::result::Result<T, RuntimeError>;

#[cfg(test)]
mod tests {
    use super::*;
    use cardio_core::Bound;

    #[test]
    fn test_core_error_is_transparent() {
        let error: RuntimeError = CoreError::UnknownCategory {
            field: "gender",
            value: "x".to_string(),
        }
        .into();
        assert_eq!(error.to_string(), "Unknown category for 'gender': 'x'");
        assert!(error.is_input_error());
        assert_eq!(error.kind(), "unknown_category");
    }

    #[test]
    fn test_model_load_message() {
        let error = RuntimeError::model_load("/models/missing.json", "file not found");
        assert!(error.to_string().contains("/models/missing.json"));
        assert!(error.to_string().contains("file not found"));
        assert!(!error.is_input_error());
        assert_eq!(error.kind(), "model_load");
    }

    #[test]
    fn test_schema_mismatch_message() {
        let error = RuntimeError::SchemaMismatch {
            expected: "cardio-features/1".to_string(),
            found: "cardio-features/0".to_string(),
        };
        assert!(error.to_string().contains("cardio-features/0"));
        assert_eq!(error.kind(), "schema_mismatch");
    }

    #[test]
    fn test_degenerate_is_not_input_error() {
        let error: RuntimeError = CoreError::DegenerateInput("zero height".to_string()).into();
        assert!(!error.is_input_error());

        let error: RuntimeError = CoreError::OutOfRange {
            field: "age",
            value: 0.0,
            bound: Bound::Min(1.0),
        }
        .into();
        assert!(error.is_input_error());
    }
}
