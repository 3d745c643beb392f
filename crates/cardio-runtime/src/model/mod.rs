//! Model Adapter Module
//!
//! Wraps a pre-trained classifier artifact behind a pure
//! `predict_probability(features) -> [0, 1]` contract.
//!
//! This module includes:
//! - The serialized artifact format (`artifact`)
//! - Linear and tree-ensemble classifiers (`linear`, `tree`)
//! - The adapter that loads, checks and serves an artifact (`adapter`)

pub mod adapter;
pub mod artifact;
pub mod linear;
pub mod tree;

pub use adapter::ModelAdapter;
pub use artifact::{ArtifactFormat, ModelArtifact, ModelSpec, Standardization};
pub use linear::LogisticRegression;
pub use tree::{DecisionTree, GradientBoosting, RandomForest, TreeNode};

/// A trained binary classifier over preprocessed features
///
/// Implementations must be pure: the same input always yields the same
/// output, and no call mutates the model.
pub trait Classifier: Send + Sync {
    /// Model family label, e.g. `logistic_regression`
    fn kind(&self) -> &'static str;

    /// Probability of the positive (disease) class
    fn predict_proba(&self, x: &[f64]) -> f64;

    /// Per-feature contributions to the log-odds, when the model is additive
    fn contributions(&self, _x: &[f64]) -> Option<Vec<f64>> {
        None
    }
}

/// Numerically stable logistic function
pub fn sigmoid(z: f64) -> f64 {
    if z >= 0.0 {
        1.0 / (1.0 + (-z).exp())
    } else {
        let e = z.exp();
        e / (1.0 + e)
    }
}
