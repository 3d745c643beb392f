//! Model adapter
//!
//! Owns a loaded artifact for the lifetime of the process. Construction is
//! the only fallible step that touches the artifact; once built, the adapter
//! is immutable and can be shared across threads behind an `Arc`.

use super::artifact::{ModelArtifact, Standardization};
use super::Classifier;
use crate::error::{Result, RuntimeError};
use cardio_core::{CoreError, FeatureSchema, FeatureVector, FEATURE_NAMES};
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Serves probabilities from a schema-checked classifier
pub struct ModelAdapter {
    model_version: String,
    schema: FeatureSchema,
    preprocessing: Option<Standardization>,
    classifier: Box<dyn Classifier>,
    source: Option<PathBuf>,
}

impl ModelAdapter {
    /// Load an artifact file
    ///
    /// # Errors
    /// * `RuntimeError::ModelLoad` if the file is missing, unreadable,
    ///   unparseable or has malformed parameters
    /// * `RuntimeError::SchemaMismatch` if the artifact targets another
    ///   feature schema
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let artifact = ModelArtifact::from_path(path).map_err(|e| {
            warn!(path = %path.display(), error = %e, "Failed to read model artifact");
            e
        })?;

        let mut adapter = Self::build(artifact, path)?;
        adapter.source = Some(path.to_path_buf());
        Ok(adapter)
    }

    /// Build an adapter from an already parsed artifact
    pub fn from_artifact(artifact: ModelArtifact) -> Result<Self> {
        Self::build(artifact, Path::new("<inline>"))
    }

    /// Wrap a custom classifier trained against `schema_version`
    pub fn with_classifier(
        model_version: impl Into<String>,
        schema_version: &str,
        classifier: Box<dyn Classifier>,
    ) -> Result<Self> {
        let schema = FeatureSchema::current();
        if schema_version != schema.version {
            return Err(RuntimeError::SchemaMismatch {
                expected: schema.version.to_string(),
                found: schema_version.to_string(),
            });
        }

        Ok(Self {
            model_version: model_version.into(),
            schema,
            preprocessing: None,
            classifier,
            source: None,
        })
    }

    fn build(artifact: ModelArtifact, origin: &Path) -> Result<Self> {
        let schema = FeatureSchema::current();

        if let Err(e) = artifact.check_schema(&schema) {
            warn!(
                artifact = %origin.display(),
                model_version = %artifact.model_version,
                error = %e,
                "Rejected model artifact"
            );
            return Err(e);
        }

        artifact.check_parameters(schema.len()).map_err(|reason| {
            warn!(artifact = %origin.display(), %reason, "Rejected model artifact");
            RuntimeError::model_load(origin, reason)
        })?;

        let ModelArtifact {
            model_version,
            preprocessing,
            model,
            ..
        } = artifact;
        let classifier = model.into_classifier();

        info!(
            model_version = %model_version,
            kind = classifier.kind(),
            schema_version = schema.version,
            "Loaded model artifact"
        );

        Ok(Self {
            model_version,
            schema,
            preprocessing,
            classifier,
            source: None,
        })
    }

    /// Probability of cardiovascular disease for a feature vector, in [0, 1]
    pub fn predict_probability(&self, features: &FeatureVector) -> Result<f64> {
        let x = self.prepare(features)?;
        let probability = self.classifier.predict_proba(&x);

        if !probability.is_finite() {
            return Err(CoreError::DegenerateInput(format!(
                "model {} produced a non-finite probability",
                self.model_version
            ))
            .into());
        }

        Ok(probability.clamp(0.0, 1.0))
    }

    /// Per-feature log-odds contributions, for additive models only
    pub fn feature_contributions(
        &self,
        features: &FeatureVector,
    ) -> Result<Option<Vec<(&'static str, f64)>>> {
        let x = self.prepare(features)?;
        Ok(self
            .classifier
            .contributions(&x)
            .map(|values| FEATURE_NAMES.iter().copied().zip(values).collect()))
    }

    fn prepare(&self, features: &FeatureVector) -> Result<Vec<f64>> {
        if features.schema_version() != self.schema.version {
            return Err(RuntimeError::SchemaMismatch {
                expected: self.schema.version.to_string(),
                found: features.schema_version().to_string(),
            });
        }

        Ok(match &self.preprocessing {
            Some(scaler) => scaler.apply(features.values()),
            None => features.values().to_vec(),
        })
    }

    pub fn model_version(&self) -> &str {
        &self.model_version
    }

    pub fn schema_version(&self) -> &'static str {
        self.schema.version
    }

    /// Model family of the wrapped classifier
    pub fn kind(&self) -> &'static str {
        self.classifier.kind()
    }

    /// Artifact file the adapter was loaded from, if any
    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }
}

impl fmt::Debug for ModelAdapter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModelAdapter")
            .field("model_version", &self.model_version)
            .field("schema_version", &self.schema.version)
            .field("kind", &self.classifier.kind())
            .field("source", &self.source)
            .finish()
    }
}
