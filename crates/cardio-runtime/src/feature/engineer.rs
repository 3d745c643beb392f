//! Feature vector construction
//!
//! All derived features are plain arithmetic on validated values. Any scaling
//! a model needs is declared by its artifact and applied by the model adapter,
//! so retraining with different preprocessing never touches this file.

use cardio_core::types::index;
use cardio_core::{CoreError, FeatureVector, ValidatedPatient, FEATURE_COUNT};

/// Body mass index: weight (kg) divided by height (m) squared
///
/// Height is guaranteed positive by validation; a zero or negative height is
/// reported as `DegenerateInput` instead of producing infinity or NaN.
pub fn bmi(weight_kg: f64, height_cm: f64) -> cardio_core::Result<f64> {
    if height_cm.is_nan() || height_cm <= 0.0 {
        return Err(CoreError::DegenerateInput(format!(
            "height must be positive to compute BMI, got {}",
            height_cm
        )));
    }

    let height_m = height_cm / 100.0;
    let value = weight_kg / (height_m * height_m);
    if !value.is_finite() {
        return Err(CoreError::DegenerateInput(format!(
            "BMI is not finite for weight {} kg and height {} cm",
            weight_kg, height_cm
        )));
    }

    Ok(value)
}

/// Pulse pressure: systolic minus diastolic
pub fn bp_difference(systolic_bp: u32, diastolic_bp: u32) -> f64 {
    f64::from(systolic_bp) - f64::from(diastolic_bp)
}

/// Age (years) times systolic pressure, unscaled
pub fn age_systolic_interaction(age: u32, systolic_bp: u32) -> f64 {
    f64::from(age) * f64::from(systolic_bp)
}

/// Build the model input vector for a validated patient
pub fn build_features(patient: &ValidatedPatient) -> cardio_core::Result<FeatureVector> {
    let mut values = [0.0; FEATURE_COUNT];

    values[index::AGE] = f64::from(patient.age);
    values[index::GENDER_CODE] = f64::from(patient.gender.code());
    values[index::HEIGHT] = patient.height_cm;
    values[index::WEIGHT] = patient.weight_kg;
    values[index::SYSTOLIC_BP] = f64::from(patient.systolic_bp);
    values[index::DIASTOLIC_BP] = f64::from(patient.diastolic_bp);
    values[index::CHOLESTEROL_CODE] = f64::from(patient.cholesterol.code());
    values[index::GLUCOSE_CODE] = f64::from(patient.glucose.code());
    values[index::SMOKER_FLAG] = flag(patient.smoker);
    values[index::ALCOHOL_FLAG] = flag(patient.drinks_alcohol);
    values[index::ACTIVITY_FLAG] = flag(patient.physically_active);
    values[index::BMI] = bmi(patient.weight_kg, patient.height_cm)?;
    values[index::BP_DIFFERENCE] = bp_difference(patient.systolic_bp, patient.diastolic_bp);
    values[index::AGE_SYSTOLIC_INTERACTION] =
        age_systolic_interaction(patient.age, patient.systolic_bp);

    FeatureVector::new(values)
}

fn flag(value: bool) -> f64 {
    if value {
        1.0
    } else {
        0.0
    }
}
