//! Tree ensembles
//!
//! Trees are stored as flat node arrays rooted at index 0. A split sends a
//! row to `left` when `x[feature] <= threshold`, otherwise to `right`. Child
//! indices must point forward, which guarantees evaluation terminates.

use super::{sigmoid, Classifier};
use serde::{Deserialize, Serialize};

/// A single tree node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TreeNode {
    Split {
        feature: usize,
        threshold: f64,
        left: usize,
        right: usize,
    },
    Leaf {
        value: f64,
    },
}

/// A binary decision tree
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecisionTree {
    pub nodes: Vec<TreeNode>,
}

impl DecisionTree {
    pub fn new(nodes: Vec<TreeNode>) -> Self {
        Self { nodes }
    }

    /// Check node links, feature indices and parameter finiteness
    pub fn validate(&self, n_features: usize) -> Result<(), String> {
        if self.nodes.is_empty() {
            return Err("tree has no nodes".to_string());
        }

        for (idx, node) in self.nodes.iter().enumerate() {
            match node {
                TreeNode::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    if *feature >= n_features {
                        return Err(format!(
                            "node {} splits on feature {} but only {} features exist",
                            idx, feature, n_features
                        ));
                    }
                    if !threshold.is_finite() {
                        return Err(format!("node {} has a non-finite threshold", idx));
                    }
                    for child in [left, right] {
                        if *child <= idx || *child >= self.nodes.len() {
                            return Err(format!(
                                "node {} links to invalid child {}",
                                idx, child
                            ));
                        }
                    }
                }
                TreeNode::Leaf { value } => {
                    if !value.is_finite() {
                        return Err(format!("leaf {} has a non-finite value", idx));
                    }
                }
            }
        }

        Ok(())
    }

    /// Value of the leaf reached by `x`
    pub fn evaluate(&self, x: &[f64]) -> f64 {
        let mut idx = 0;
        loop {
            match &self.nodes[idx] {
                TreeNode::Leaf { value } => return *value,
                TreeNode::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    idx = if x[*feature] <= *threshold {
                        *left
                    } else {
                        *right
                    };
                }
            }
        }
    }

    fn leaves(&self) -> impl Iterator<Item = f64> + '_ {
        self.nodes.iter().filter_map(|node| match node {
            TreeNode::Leaf { value } => Some(*value),
            TreeNode::Split { .. } => None,
        })
    }
}

/// Gradient boosted trees with a logistic link
///
/// `p = sigmoid(base_score + learning_rate · Σ tree(x))`, where leaves hold
/// log-odds increments.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GradientBoosting {
    #[serde(default)]
    pub base_score: f64,
    #[serde(default = "default_learning_rate")]
    pub learning_rate: f64,
    pub trees: Vec<DecisionTree>,
}

fn default_learning_rate() -> f64 {
    1.0
}

impl GradientBoosting {
    pub fn validate(&self, n_features: usize) -> Result<(), String> {
        if self.trees.is_empty() {
            return Err("gradient boosting ensemble has no trees".to_string());
        }
        if !self.base_score.is_finite() || !self.learning_rate.is_finite() {
            return Err("base_score and learning_rate must be finite".to_string());
        }
        for (i, tree) in self.trees.iter().enumerate() {
            tree.validate(n_features)
                .map_err(|e| format!("tree {}: {}", i, e))?;
        }
        Ok(())
    }

    pub fn raw_score(&self, x: &[f64]) -> f64 {
        let sum: f64 = self.trees.iter().map(|tree| tree.evaluate(x)).sum();
        self.base_score + self.learning_rate * sum
    }
}

impl Classifier for GradientBoosting {
    fn kind(&self) -> &'static str {
        "gradient_boosting"
    }

    fn predict_proba(&self, x: &[f64]) -> f64 {
        sigmoid(self.raw_score(x))
    }
}

/// Random forest whose leaves hold positive-class probabilities
///
/// `p` is the mean of the leaf values reached in each tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RandomForest {
    pub trees: Vec<DecisionTree>,
}

impl RandomForest {
    pub fn validate(&self, n_features: usize) -> Result<(), String> {
        if self.trees.is_empty() {
            return Err("random forest has no trees".to_string());
        }
        for (i, tree) in self.trees.iter().enumerate() {
            tree.validate(n_features)
                .map_err(|e| format!("tree {}: {}", i, e))?;
            if tree.leaves().any(|v| !(0.0..=1.0).contains(&v)) {
                return Err(format!("tree {}: leaf probability outside [0, 1]", i));
            }
        }
        Ok(())
    }
}

impl Classifier for RandomForest {
    fn kind(&self) -> &'static str {
        "random_forest"
    }

    fn predict_proba(&self, x: &[f64]) -> f64 {
        let sum: f64 = self.trees.iter().map(|tree| tree.evaluate(x)).sum();
        sum / self.trees.len() as f64
    }
}
