//! Logistic regression

use super::{sigmoid, Classifier};
use serde::{Deserialize, Serialize};

/// Binary logistic regression: `p = sigmoid(intercept + Σ coefficient_i · x_i)`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogisticRegression {
    pub intercept: f64,
    pub coefficients: Vec<f64>,
}

impl LogisticRegression {
    pub fn new(intercept: f64, coefficients: Vec<f64>) -> Self {
        Self {
            intercept,
            coefficients,
        }
    }

    /// Check parameter shape and finiteness
    pub fn validate(&self, n_features: usize) -> Result<(), String> {
        if self.coefficients.len() != n_features {
            return Err(format!(
                "expected {} coefficients, got {}",
                n_features,
                self.coefficients.len()
            ));
        }
        if !self.intercept.is_finite() {
            return Err("intercept is not finite".to_string());
        }
        if let Some(pos) = self.coefficients.iter().position(|c| !c.is_finite()) {
            return Err(format!("coefficient {} is not finite", pos));
        }
        Ok(())
    }

    /// Log-odds for a feature row
    pub fn logit(&self, x: &[f64]) -> f64 {
        self.coefficients
            .iter()
            .zip(x)
            .fold(self.intercept, |acc, (c, v)| acc + c * v)
    }
}

impl Classifier for LogisticRegression {
    fn kind(&self) -> &'static str {
        "logistic_regression"
    }

    fn predict_proba(&self, x: &[f64]) -> f64 {
        sigmoid(self.logit(x))
    }

    fn contributions(&self, x: &[f64]) -> Option<Vec<f64>> {
        Some(self.coefficients.iter().zip(x).map(|(c, v)| c * v).collect())
    }
}
