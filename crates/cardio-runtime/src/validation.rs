//! Patient input validation and unit conversion
//!
//! Turns a raw `PatientInput` into a canonical `ValidatedPatient`.
//!
//! # Validation Rules
//!
//! ## Units
//!
//! Height is converted to centimeters and weight to kilograms before any range
//! check, so the ranges below always apply to metric values.
//!
//! ## Ranges (inclusive)
//!
//! | field          | min | max |
//! |----------------|-----|-----|
//! | `age`          | 1   | 120 |
//! | `height_cm`    | 50  | 250 |
//! | `weight_kg`    | 2   | 300 |
//! | `systolic_bp`  | 50  | 300 |
//! | `diastolic_bp` | 30  | 200 |
//!
//! Non-finite heights and weights are rejected as out of range.
//!
//! ## Consistency
//!
//! Diastolic pressure must not exceed systolic pressure.
//!
//! ## Categories
//!
//! Categorical text is matched case-insensitively after trimming, with `-` and
//! spaces treated as `_`. Both the descriptive names and the dataset codes are
//! accepted.
//!
//! # Examples
//!
//! ```rust
//! use cardio_core::{Gender, Level, PatientInput};
//! use cardio_runtime::validation::validate;
//!
//! let raw = PatientInput::new(50, "Male", 170.0, 70.0, 140, 90).with_cholesterol("Above Normal");
//! let patient = validate(&raw).unwrap();
//! assert_eq!(patient.gender, Gender::Male);
//! assert_eq!(patient.cholesterol, Level::AboveNormal);
//!
//! let inconsistent = PatientInput::new(50, "male", 170.0, 70.0, 90, 140);
//! assert!(validate(&inconsistent).is_err());
//! ```

use cardio_core::{Bound, CoreError, Gender, Level, PatientInput, ValidatedPatient};

/// Inclusive age range in years
pub const AGE_RANGE: (i64, i64) = (1, 120);

/// Inclusive height range in centimeters
pub const HEIGHT_CM_RANGE: (f64, f64) = (50.0, 250.0);

/// Inclusive weight range in kilograms
pub const WEIGHT_KG_RANGE: (f64, f64) = (2.0, 300.0);

/// Inclusive systolic range in mmHg
pub const SYSTOLIC_RANGE: (i64, i64) = (50, 300);

/// Inclusive diastolic range in mmHg
pub const DIASTOLIC_RANGE: (i64, i64) = (30, 200);

/// Validate and canonicalize a raw patient record
///
/// # Returns
/// * `Ok(ValidatedPatient)` with metric units and ordinal codes
/// * `Err(CoreError::OutOfRange)` naming the first field outside its range
/// * `Err(CoreError::InconsistentVitals)` if diastolic exceeds systolic
/// * `Err(CoreError::UnknownCategory)` for unrecognized categorical text
pub fn validate(raw: &PatientInput) -> cardio_core::Result<ValidatedPatient> {
    let age = check_int("age", raw.age, AGE_RANGE)?;
    let gender = parse_gender(&raw.gender)?;

    let height_cm = raw.height_unit.to_centimeters(raw.height);
    check_float("height_cm", height_cm, HEIGHT_CM_RANGE)?;

    let weight_kg = raw.weight_unit.to_kilograms(raw.weight);
    check_float("weight_kg", weight_kg, WEIGHT_KG_RANGE)?;

    let systolic_bp = check_int("systolic_bp", raw.systolic_bp, SYSTOLIC_RANGE)?;
    let diastolic_bp = check_int("diastolic_bp", raw.diastolic_bp, DIASTOLIC_RANGE)?;
    if diastolic_bp > systolic_bp {
        return Err(CoreError::InconsistentVitals {
            systolic: raw.systolic_bp,
            diastolic: raw.diastolic_bp,
        });
    }

    let cholesterol = parse_level("cholesterol", &raw.cholesterol)?;
    let glucose = parse_level("glucose", &raw.glucose)?;

    Ok(ValidatedPatient {
        age,
        gender,
        height_cm,
        weight_kg,
        systolic_bp,
        diastolic_bp,
        cholesterol,
        glucose,
        smoker: raw.smoker,
        drinks_alcohol: raw.drinks_alcohol,
        physically_active: raw.physically_active,
    })
}

/// Parse gender text into the canonical enum
pub fn parse_gender(value: &str) -> cardio_core::Result<Gender> {
    match canonical_token(value).as_str() {
        "female" | "f" | "woman" | "1" => Ok(Gender::Female),
        "male" | "m" | "man" | "2" => Ok(Gender::Male),
        _ => Err(CoreError::UnknownCategory {
            field: "gender",
            value: value.to_string(),
        }),
    }
}

/// Parse a cholesterol or glucose tier into the canonical ordinal
pub fn parse_level(field: &'static str, value: &str) -> cardio_core::Result<Level> {
    match canonical_token(value).as_str() {
        "normal" | "1" => Ok(Level::Normal),
        "above_normal" | "2" => Ok(Level::AboveNormal),
        "well_above_normal" | "high" | "3" => Ok(Level::WellAboveNormal),
        _ => Err(CoreError::UnknownCategory {
            field,
            value: value.to_string(),
        }),
    }
}

fn canonical_token(value: &str) -> String {
    value
        .trim()
        .chars()
        .map(|c| match c {
            '-' | ' ' => '_',
            other => other.to_ascii_lowercase(),
        })
        .collect()
}

fn check_int(field: &'static str, value: i64, (min, max): (i64, i64)) -> cardio_core::Result<u32> {
    if value < min {
        return Err(CoreError::OutOfRange {
            field,
            value: value as f64,
            bound: Bound::Min(min as f64),
        });
    }
    if value > max {
        return Err(CoreError::OutOfRange {
            field,
            value: value as f64,
            bound: Bound::Max(max as f64),
        });
    }
    // Range bounds are small positive integers, so the cast is lossless
    Ok(value as u32)
}

fn check_float(field: &'static str, value: f64, (min, max): (f64, f64)) -> cardio_core::Result<()> {
    if value.is_nan() || value < min {
        return Err(CoreError::OutOfRange {
            field,
            value,
            bound: Bound::Min(min),
        });
    }
    if value > max {
        return Err(CoreError::OutOfRange {
            field,
            value,
            bound: Bound::Max(max),
        });
    }
    Ok(())
}
