//! Integration tests for PredictionService
//!
//! Runs the full pipeline against artifacts under `tests/fixtures`.

mod common;

use cardio_sdk::{
    ClinicalInsight, CoreError, PatientInput, PredictionServiceBuilder, RiskTier, RuntimeError,
    SdkError, ServiceConfig,
};
use common::{fixture, healthy_adult, hypertensive_smoker, logistic_service, sigmoid};
use std::sync::Arc;

// ========== End-to-End ==========

#[test]
fn test_end_to_end_hypertensive_smoker() {
    let service = logistic_service();
    let result = service.predict(&hypertensive_smoker()).unwrap();

    let features = &result.feature_snapshot;
    assert!((features.bmi() - 27.76).abs() < 0.01);
    assert_eq!(features.bp_difference(), 55.0);
    assert_eq!(features.age_systolic_interaction(), 8250.0);

    let z = -7.5 + 0.05 * 55.0 + 0.02 * 150.0 + 0.3 * 2.0 + 0.1 * 1.0 + 0.5 * 1.0
        + 0.04 * features.bmi();
    assert!((result.probability - sigmoid(z)).abs() < 1e-9);
    assert_eq!(result.risk_tier, RiskTier::Medium);
    assert_eq!(result.model_version, "cardio-lr-2024.1");
}

#[test]
fn test_explanation_for_hypertensive_smoker() {
    let result = logistic_service().predict(&hypertensive_smoker()).unwrap();
    let explanation = &result.explanation;

    assert_eq!(explanation.headline, "MODERATE RISK PROFILE");
    assert!(matches!(
        explanation.insights[0],
        ClinicalInsight::ElevatedLabs { .. }
    ));
    assert_eq!(
        explanation.insights[1],
        ClinicalInsight::Hypertension {
            systolic_bp: 150,
            diastolic_bp: 95
        }
    );

    let names: Vec<_> = explanation.top_factors.iter().map(|f| f.feature).collect();
    assert_eq!(names, vec!["systolic_bp", "age", "bmi"]);
}

#[test]
fn test_healthy_adult_is_low_risk() {
    let result = logistic_service().predict(&healthy_adult()).unwrap();

    assert_eq!(result.risk_tier, RiskTier::Low);
    assert_eq!(result.explanation.headline, "LOW RISK PROFILE");
    assert!(result.explanation.insights.is_empty());
}

#[test]
fn test_boosted_yaml_artifact() {
    let service = PredictionServiceBuilder::new()
        .with_artifact_path(fixture("boosted_v1.yaml"))
        .build()
        .unwrap();

    let high = service.predict(&hypertensive_smoker()).unwrap();
    assert!((high.probability - sigmoid(1.0)).abs() < 1e-12);
    assert_eq!(high.risk_tier, RiskTier::High);
    assert_eq!(high.explanation.headline, "HIGH RISK DETECTED");
    assert!(high.explanation.top_factors.is_empty());

    let low = service.predict(&healthy_adult()).unwrap();
    assert!((low.probability - sigmoid(-1.5)).abs() < 1e-12);
    assert_eq!(low.risk_tier, RiskTier::Low);
}

#[test]
fn test_custom_thresholds_change_tier() {
    let service = PredictionServiceBuilder::new()
        .with_artifact_path(fixture("logistic_v1.json"))
        .with_thresholds(0.2, 0.5)
        .build()
        .unwrap();

    assert_eq!(
        service.predict(&hypertensive_smoker()).unwrap().risk_tier,
        RiskTier::High
    );
}

// ========== Determinism ==========

#[test]
fn test_identical_input_gives_identical_result() {
    let service = logistic_service();
    let first = service.predict(&hypertensive_smoker()).unwrap();
    let second = service.predict(&hypertensive_smoker()).unwrap();

    assert_eq!(first, second);
    assert_eq!(first.probability.to_bits(), second.probability.to_bits());
    assert_eq!(
        serde_json::to_string(&first).unwrap(),
        serde_json::to_string(&second).unwrap()
    );
}

#[test]
fn test_independent_services_agree() {
    let a = logistic_service().predict(&hypertensive_smoker()).unwrap();
    let b = logistic_service().predict(&hypertensive_smoker()).unwrap();
    assert_eq!(a.probability.to_bits(), b.probability.to_bits());
}

#[test]
fn test_result_serialization_shape() {
    let result = logistic_service().predict(&hypertensive_smoker()).unwrap();
    let json = serde_json::to_value(&result).unwrap();

    assert_eq!(json["risk_tier"], "medium");
    assert_eq!(json["model_version"], "cardio-lr-2024.1");
    assert_eq!(json["feature_snapshot"]["schema_version"], "cardio-features/1");
    assert_eq!(json["feature_snapshot"]["features"]["bp_difference"], 55.0);
    assert_eq!(json["explanation"]["insights"][0]["kind"], "elevated_labs");
}

// ========== Error Propagation ==========

#[test]
fn test_inconsistent_vitals_error() {
    let raw = PatientInput::new(50, "female", 170.0, 70.0, 90, 140);
    let err = logistic_service().predict(&raw).unwrap_err();

    assert!(err.is_input_error());
    assert!(matches!(
        err,
        SdkError::Runtime(RuntimeError::Core(CoreError::InconsistentVitals {
            systolic: 90,
            diastolic: 140
        }))
    ));
}

#[test]
fn test_out_of_range_error_names_field() {
    let raw = PatientInput::new(50, "female", 170.0, 450.0, 120, 80);
    let err = logistic_service().predict(&raw).unwrap_err();
    assert_eq!(err.core().and_then(CoreError::field), Some("weight_kg"));
}

#[test]
fn test_legacy_schema_artifact_fails_build() {
    let err = PredictionServiceBuilder::new()
        .with_artifact_path(fixture("logistic_v0_legacy.json"))
        .build()
        .unwrap_err();

    match err {
        SdkError::Runtime(RuntimeError::SchemaMismatch { expected, found }) => {
            assert_eq!(expected, "cardio-features/1");
            assert_eq!(found, "cardio-features/0");
        }
        other => panic!("expected schema mismatch, got {:?}", other),
    }
}

#[test]
fn test_batch_isolates_failures() {
    let inputs = vec![
        hypertensive_smoker(),
        PatientInput::new(50, "other", 170.0, 70.0, 120, 80),
        healthy_adult(),
    ];
    let results = logistic_service().predict_batch(&inputs);

    assert_eq!(results.len(), 3);
    assert!(results[0].is_ok());
    assert_eq!(results[1].as_ref().unwrap_err().kind(), "unknown_category");
    assert_eq!(results[2].as_ref().unwrap().risk_tier, RiskTier::Low);
}

// ========== Metrics ==========

#[test]
fn test_metrics_per_tier_and_error() {
    let service = logistic_service();
    service.predict(&hypertensive_smoker()).unwrap();
    service.predict(&healthy_adult()).unwrap();
    service.predict(&healthy_adult()).unwrap();
    let _ = service.predict(&PatientInput::new(50, "female", 170.0, 70.0, 90, 140));

    let metrics = service.metrics().unwrap();
    let mut names = metrics.counter_names();
    names.sort();
    assert_eq!(
        names,
        vec![
            "errors_inconsistent_vitals",
            "predictions_low",
            "predictions_medium",
            "predictions_total"
        ]
    );
    assert_eq!(metrics.histogram_names(), vec!["predict_duration"]);
}

// ========== Concurrency ==========

#[test]
fn test_concurrent_predictions_share_adapter() {
    let service = Arc::new(logistic_service());
    let expected = service.predict(&hypertensive_smoker()).unwrap();

    std::thread::scope(|scope| {
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let service = service.clone();
                scope.spawn(move || service.predict(&hypertensive_smoker()).unwrap())
            })
            .collect();

        for handle in handles {
            let result = handle.join().unwrap();
            assert_eq!(result.probability.to_bits(), expected.probability.to_bits());
            assert_eq!(result, expected);
        }
    });
}

// ========== Configuration ==========

#[test]
fn test_build_from_config() {
    let config = ServiceConfig::new()
        .with_artifact_path(fixture("logistic_v1.json"))
        .with_thresholds(0.4, 0.8)
        .with_metrics(false);

    let service = PredictionServiceBuilder::from_config(config).build().unwrap();
    assert_eq!(service.thresholds().medium(), 0.4);
    assert_eq!(service.thresholds().high(), 0.8);
    assert!(service.metrics().is_none());
}
