//! Serialized model artifact format
//!
//! Artifacts are produced offline by the training process. They are JSON or
//! YAML documents (chosen by file extension):
//!
//! ```json
//! {
//!   "model_version": "2024.06-logreg",
//!   "schema_version": "cardio-features/1",
//!   "feature_names": ["age", "gender_code", "..."],
//!   "preprocessing": { "center": [...], "scale": [...] },
//!   "model": { "kind": "logistic_regression", "intercept": -7.5, "coefficients": [...] }
//! }
//! ```
//!
//! `feature_names` and `preprocessing` are optional. When present, the names
//! must equal the current schema exactly and the preprocessing vectors must
//! have one entry per feature.

use super::linear::LogisticRegression;
use super::tree::{GradientBoosting, RandomForest};
use super::Classifier;
use crate::error::{Result, RuntimeError};
use cardio_core::FeatureSchema;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// On-disk encoding of an artifact
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArtifactFormat {
    Json,
    Yaml,
}

impl ArtifactFormat {
    /// Pick the format from a file extension; anything but `.yaml`/`.yml` is JSON
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml") => {
                ArtifactFormat::Yaml
            }
            _ => ArtifactFormat::Json,
        }
    }
}

/// Per-feature standardization applied before the classifier:
/// `x' = (x - center) / scale`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Standardization {
    pub center: Vec<f64>,
    pub scale: Vec<f64>,
}

impl Standardization {
    pub fn validate(&self, n_features: usize) -> std::result::Result<(), String> {
        if self.center.len() != n_features || self.scale.len() != n_features {
            return Err(format!(
                "preprocessing expects {} center and scale values, got {} and {}",
                n_features,
                self.center.len(),
                self.scale.len()
            ));
        }
        if self.center.iter().any(|c| !c.is_finite()) {
            return Err("preprocessing center contains non-finite values".to_string());
        }
        if let Some(pos) = self
            .scale
            .iter()
            .position(|s| !s.is_finite() || *s == 0.0)
        {
            return Err(format!("preprocessing scale {} is zero or non-finite", pos));
        }
        Ok(())
    }

    pub fn apply(&self, values: &[f64]) -> Vec<f64> {
        values
            .iter()
            .zip(self.center.iter().zip(&self.scale))
            .map(|(x, (c, s))| (x - c) / s)
            .collect()
    }
}

/// Classifier parameters, tagged by model family
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ModelSpec {
    LogisticRegression(LogisticRegression),
    GradientBoosting(GradientBoosting),
    RandomForest(RandomForest),
}

impl ModelSpec {
    pub fn validate(&self, n_features: usize) -> std::result::Result<(), String> {
        match self {
            ModelSpec::LogisticRegression(model) => model.validate(n_features),
            ModelSpec::GradientBoosting(model) => model.validate(n_features),
            ModelSpec::RandomForest(model) => model.validate(n_features),
        }
    }

    /// Move the parameters into a boxed classifier
    pub fn into_classifier(self) -> Box<dyn Classifier> {
        match self {
            ModelSpec::LogisticRegression(model) => Box::new(model),
            ModelSpec::GradientBoosting(model) => Box::new(model),
            ModelSpec::RandomForest(model) => Box::new(model),
        }
    }
}

/// A trained model artifact
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelArtifact {
    /// Version of the trained model (free-form)
    pub model_version: String,

    /// Feature schema the model was trained against
    pub schema_version: String,

    /// Human-readable description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Declared feature names, in training column order
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub feature_names: Option<Vec<String>>,

    /// Optional standardization
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preprocessing: Option<Standardization>,

    /// Classifier parameters
    pub model: ModelSpec,
}

impl ModelArtifact {
    /// Read and parse an artifact file
    ///
    /// The file is read in one pass and closed before parsing.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| RuntimeError::model_load(path, e.to_string()))?;
        Self::parse(&content, ArtifactFormat::from_path(path))
            .map_err(|reason| RuntimeError::model_load(path, reason))
    }

    /// Parse an artifact from JSON text
    pub fn from_json_str(content: &str) -> Result<Self> {
        Self::parse(content, ArtifactFormat::Json)
            .map_err(|reason| RuntimeError::model_load("<inline>", reason))
    }

    /// Parse an artifact from YAML text
    pub fn from_yaml_str(content: &str) -> Result<Self> {
        Self::parse(content, ArtifactFormat::Yaml)
            .map_err(|reason| RuntimeError::model_load("<inline>", reason))
    }

    fn parse(content: &str, format: ArtifactFormat) -> std::result::Result<Self, String> {
        match format {
            ArtifactFormat::Json => serde_json::from_str(content).map_err(|e| e.to_string()),
            ArtifactFormat::Yaml => serde_yaml::from_str(content).map_err(|e| e.to_string()),
        }
    }

    /// Serialize as pretty JSON
    pub fn to_json_string(&self) -> Result<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| RuntimeError::model_load("<inline>", e.to_string()))
    }

    /// Check that the artifact was trained against `schema`
    pub fn check_schema(&self, schema: &FeatureSchema) -> Result<()> {
        if self.schema_version != schema.version {
            return Err(RuntimeError::SchemaMismatch {
                expected: schema.version.to_string(),
                found: self.schema_version.clone(),
            });
        }

        if let Some(names) = &self.feature_names {
            if !schema.matches_names(names) {
                return Err(RuntimeError::SchemaMismatch {
                    expected: schema.names.join(","),
                    found: names.join(","),
                });
            }
        }

        Ok(())
    }

    /// Check parameter shapes against the feature count
    pub fn check_parameters(&self, n_features: usize) -> std::result::Result<(), String> {
        if let Some(preprocessing) = &self.preprocessing {
            preprocessing.validate(n_features)?;
        }
        self.model.validate(n_features)
    }
}
