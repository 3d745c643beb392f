//! Human-readable explanation attached to every prediction

use cardio_core::{Level, RiskTier, ValidatedPatient};
use serde::Serialize;

/// Systolic reading above which hypertension is flagged (mmHg)
pub const HYPERTENSION_SYSTOLIC: u32 = 140;
/// Diastolic reading above which hypertension is flagged (mmHg)
pub const HYPERTENSION_DIASTOLIC: u32 = 90;
/// Maximum number of entries in [`Explanation::top_factors`]
pub const MAX_TOP_FACTORS: usize = 3;

/// Observation derived directly from the validated record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ClinicalInsight {
    /// Cholesterol or glucose above normal
    ElevatedLabs { cholesterol: Level, glucose: Level },
    /// Systolic above 140 or diastolic above 90
    Hypertension { systolic_bp: u32, diastolic_bp: u32 },
}

impl ClinicalInsight {
    pub fn message(&self) -> &'static str {
        match self {
            ClinicalInsight::ElevatedLabs { .. } => {
                "Elevated labs: consider monitoring cholesterol and glucose levels."
            }
            ClinicalInsight::Hypertension { .. } => {
                "Hypertension: blood pressure readings are above the normal range."
            }
        }
    }

    /// Insights that apply to a patient, labs first
    pub fn detect(patient: &ValidatedPatient) -> Vec<ClinicalInsight> {
        let mut insights = Vec::new();

        if patient.cholesterol.is_elevated() || patient.glucose.is_elevated() {
            insights.push(ClinicalInsight::ElevatedLabs {
                cholesterol: patient.cholesterol,
                glucose: patient.glucose,
            });
        }

        if patient.systolic_bp > HYPERTENSION_SYSTOLIC
            || patient.diastolic_bp > HYPERTENSION_DIASTOLIC
        {
            insights.push(ClinicalInsight::Hypertension {
                systolic_bp: patient.systolic_bp,
                diastolic_bp: patient.diastolic_bp,
            });
        }

        insights
    }
}

/// A feature pushing the log-odds up
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RiskFactor {
    pub feature: &'static str,
    pub contribution: f64,
}

/// Explanation payload
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Explanation {
    pub headline: &'static str,
    pub message: &'static str,
    pub insights: Vec<ClinicalInsight>,
    /// Empty when the model does not expose per-feature contributions
    pub top_factors: Vec<RiskFactor>,
}

impl Explanation {
    pub fn new(
        tier: RiskTier,
        patient: &ValidatedPatient,
        contributions: Option<&[(&'static str, f64)]>,
    ) -> Self {
        Self {
            headline: headline(tier),
            message: message(tier),
            insights: ClinicalInsight::detect(patient),
            top_factors: contributions.map(top_factors).unwrap_or_default(),
        }
    }
}

/// Result card headline for a tier
pub fn headline(tier: RiskTier) -> &'static str {
    match tier {
        RiskTier::High => "HIGH RISK DETECTED",
        RiskTier::Medium => "MODERATE RISK PROFILE",
        RiskTier::Low => "LOW RISK PROFILE",
    }
}

fn message(tier: RiskTier) -> &'static str {
    match tier {
        RiskTier::High => "The model indicates a high probability of cardiovascular disease.",
        RiskTier::Medium => {
            "The model indicates an intermediate probability of cardiovascular disease."
        }
        RiskTier::Low => "The model indicates a low probability of cardiovascular disease.",
    }
}

/// Largest positive contributions; ties keep feature order
fn top_factors(contributions: &[(&'static str, f64)]) -> Vec<RiskFactor> {
    let mut positive: Vec<RiskFactor> = contributions
        .iter()
        .filter(|(_, contribution)| *contribution > 0.0)
        .map(|&(feature, contribution)| RiskFactor {
            feature,
            contribution,
        })
        .collect();

    positive.sort_by(|a, b| b.contribution.total_cmp(&a.contribution));
    positive.truncate(MAX_TOP_FACTORS);
    positive
}

#[cfg(test)]
mod tests {
    use super::*;
    use cardio_core::Gender;

    fn patient(systolic_bp: u32, diastolic_bp: u32) -> ValidatedPatient {
        ValidatedPatient {
            age: 50,
            gender: Gender::Female,
            height_cm: 170.0,
            weight_kg: 70.0,
            systolic_bp,
            diastolic_bp,
            cholesterol: Level::Normal,
            glucose: Level::Normal,
            smoker: false,
            drinks_alcohol: false,
            physically_active: true,
        }
    }

    #[test]
    fn test_headlines() {
        assert_eq!(headline(RiskTier::High), "HIGH RISK DETECTED");
        assert_eq!(headline(RiskTier::Medium), "MODERATE RISK PROFILE");
        assert_eq!(headline(RiskTier::Low), "LOW RISK PROFILE");
    }

    #[test]
    fn test_no_insights_for_healthy_patient() {
        assert!(ClinicalInsight::detect(&patient(120, 80)).is_empty());
    }

    #[test]
    fn test_hypertension_boundaries_are_exclusive() {
        assert!(ClinicalInsight::detect(&patient(140, 90)).is_empty());
        assert_eq!(
            ClinicalInsight::detect(&patient(141, 80)),
            vec![ClinicalInsight::Hypertension {
                systolic_bp: 141,
                diastolic_bp: 80
            }]
        );
        assert_eq!(ClinicalInsight::detect(&patient(130, 91)).len(), 1);
    }

    #[test]
    fn test_elevated_labs() {
        let mut p = patient(120, 80);
        p.glucose = Level::WellAboveNormal;

        let insights = ClinicalInsight::detect(&p);
        assert_eq!(
            insights,
            vec![ClinicalInsight::ElevatedLabs {
                cholesterol: Level::Normal,
                glucose: Level::WellAboveNormal
            }]
        );
        assert!(insights[0].message().starts_with("Elevated labs"));
    }

    #[test]
    fn test_labs_listed_before_hypertension() {
        let mut p = patient(160, 100);
        p.cholesterol = Level::AboveNormal;

        let insights = ClinicalInsight::detect(&p);
        assert!(matches!(insights[0], ClinicalInsight::ElevatedLabs { .. }));
        assert!(matches!(insights[1], ClinicalInsight::Hypertension { .. }));
    }

    #[test]
    fn test_top_factors_ordering() {
        let contributions = [
            ("age", 2.0),
            ("gender_code", 0.0),
            ("systolic_bp", 3.0),
            ("activity_flag", -0.5),
            ("bmi", 1.0),
            ("smoker_flag", 1.0),
        ];

        let factors = top_factors(&contributions);
        let names: Vec<_> = factors.iter().map(|f| f.feature).collect();
        // bmi and smoker_flag tie; the earlier feature wins
        assert_eq!(names, vec!["systolic_bp", "age", "bmi"]);
    }

    #[test]
    fn test_top_factors_skip_non_positive() {
        let contributions = [("age", -1.0), ("bmi", 0.0), ("smoker_flag", 0.4)];
        let factors = top_factors(&contributions);
        assert_eq!(
            factors,
            vec![RiskFactor {
                feature: "smoker_flag",
                contribution: 0.4
            }]
        );
    }

    #[test]
    fn test_explanation_without_contributions() {
        let explanation = Explanation::new(RiskTier::Low, &patient(120, 80), None);
        assert_eq!(explanation.headline, "LOW RISK PROFILE");
        assert!(explanation.insights.is_empty());
        assert!(explanation.top_factors.is_empty());
    }
}
