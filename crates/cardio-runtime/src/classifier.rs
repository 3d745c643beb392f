//! Risk tier classification
//!
//! Maps a model probability to a coarse risk tier:
//!
//! | probability           | tier   |
//! |-----------------------|--------|
//! | `p < medium`          | low    |
//! | `medium <= p < high`  | medium |
//! | `p >= high`           | high   |
//!
//! A probability exactly on a threshold belongs to the higher tier.

use cardio_core::{CoreError, RiskTier};
use serde::Serialize;

/// Default lower bound of the medium tier
pub const DEFAULT_MEDIUM_THRESHOLD: f64 = 0.33;

/// Default lower bound of the high tier
pub const DEFAULT_HIGH_THRESHOLD: f64 = 0.66;

/// Lower bounds of the medium and high tiers
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RiskThresholds {
    medium: f64,
    high: f64,
}

impl RiskThresholds {
    /// Create thresholds, requiring `0 < medium < high <= 1`
    pub fn new(medium: f64, high: f64) -> cardio_core::Result<Self> {
        let ordered = medium > 0.0 && medium < high && high <= 1.0;
        if !ordered {
            return Err(CoreError::InvalidThresholds { medium, high });
        }
        Ok(Self { medium, high })
    }

    pub fn medium(&self) -> f64 {
        self.medium
    }

    pub fn high(&self) -> f64 {
        self.high
    }
}

impl Default for RiskThresholds {
    fn default() -> Self {
        Self {
            medium: DEFAULT_MEDIUM_THRESHOLD,
            high: DEFAULT_HIGH_THRESHOLD,
        }
    }
}

/// Total mapping from probability to risk tier
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RiskClassifier {
    thresholds: RiskThresholds,
}

impl RiskClassifier {
    pub fn new(thresholds: RiskThresholds) -> Self {
        Self { thresholds }
    }

    pub fn thresholds(&self) -> RiskThresholds {
        self.thresholds
    }

    /// Classify a probability
    ///
    /// Values outside [0, 1] are clamped first; NaN is treated as low.
    pub fn classify(&self, probability: f64) -> RiskTier {
        if probability.is_nan() {
            return RiskTier::Low;
        }

        let p = probability.clamp(0.0, 1.0);
        if p >= self.thresholds.high {
            RiskTier::High
        } else if p >= self.thresholds.medium {
            RiskTier::Medium
        } else {
            RiskTier::Low
        }
    }
}
