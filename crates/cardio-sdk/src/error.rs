//! SDK error types

use cardio_core::CoreError;
use cardio_runtime::RuntimeError;
use thiserror::Error;

/// SDK error type
#[derive(Error, Debug)]
pub enum SdkError {
    /// Pipeline error, passed through unchanged
    #[error(transparent)]
    Runtime(#[from] RuntimeError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<CoreError> for SdkError {
    fn from(error: CoreError) -> Self {
        SdkError::Runtime(RuntimeError::Core(error))
    }
}

impl SdkError {
    /// The underlying pipeline error, if any
    pub fn runtime(&self) -> Option<&RuntimeError> {
        match self {
            SdkError::Runtime(e) => Some(e),
            SdkError::Config(_) => None,
        }
    }

    /// The underlying input or feature error, if any
    pub fn core(&self) -> Option<&CoreError> {
        match self.runtime() {
            Some(RuntimeError::Core(e)) => Some(e),
            _ => None,
        }
    }

    /// Whether the caller can recover by correcting the submitted record
    pub fn is_input_error(&self) -> bool {
        self.runtime().is_some_and(RuntimeError::is_input_error)
    }

    /// Stable snake_case label
    pub fn kind(&self) -> &'static str {
        match self {
            SdkError::Runtime(e) => e.kind(),
            SdkError::Config(_) => "config",
        }
    }
}

/// Result type for SDK operations
pub type Result<T> = std::result::Result<T, SdkError>;

#[cfg(test)]
mod tests {
    use super::*;
    use cardio_core::Bound;

    #[test]
    fn test_config_error() {
        let error = SdkError::Config("missing artifact_path".to_string());
        assert!(error.to_string().contains("Configuration error"));
        assert!(error.to_string().contains("missing artifact_path"));
        assert_eq!(error.kind(), "config");
        assert!(error.runtime().is_none());
    }

    #[test]
    fn test_runtime_error_passes_through() {
        let runtime = RuntimeError::SchemaMismatch {
            expected: "cardio-features/1".to_string(),
            found: "cardio-features/0".to_string(),
        };
        let message = runtime.to_string();
        let error: SdkError = runtime.into();
        assert_eq!(error.to_string(), message);
        assert!(matches!(
            error.runtime(),
            Some(RuntimeError::SchemaMismatch { .. })
        ));
        assert!(!error.is_input_error());
    }

    #[test]
    fn test_core_error_conversion() {
        let error: SdkError = CoreError::OutOfRange {
            field: "weight_kg",
            value: 400.0,
            bound: Bound::Max(300.0),
        }
        .into();
        assert!(error.is_input_error());
        assert_eq!(error.kind(), "out_of_range");
        assert_eq!(error.core().and_then(CoreError::field), Some("weight_kg"));
    }
}
