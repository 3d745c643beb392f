//! Patient records
//!
//! `PatientInput` is the raw record as it arrives from a form or API caller:
//! categorical fields are free text and height/weight may use imperial units.
//! `ValidatedPatient` is the canonical record produced by the validator, with
//! metric units and ordinal codes matching the training dataset.

use serde::{Deserialize, Serialize};

/// Unit of a height measurement
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum LengthUnit {
    #[default]
    #[serde(rename = "cm")]
    Centimeters,
    #[serde(rename = "in")]
    Inches,
}

impl LengthUnit {
    /// Convert a value in this unit to centimeters
    pub fn to_centimeters(self, value: f64) -> f64 {
        match self {
            LengthUnit::Centimeters => value,
            LengthUnit::Inches => value * 2.54,
        }
    }
}

/// Unit of a weight measurement
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum MassUnit {
    #[default]
    #[serde(rename = "kg")]
    Kilograms,
    #[serde(rename = "lb")]
    Pounds,
}

impl MassUnit {
    /// Convert a value in this unit to kilograms
    pub fn to_kilograms(self, value: f64) -> f64 {
        match self {
            MassUnit::Kilograms => value,
            MassUnit::Pounds => value * 0.453_592_37,
        }
    }
}

/// Raw patient record as submitted by a caller
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatientInput {
    /// Age in whole years
    pub age: i64,

    /// Gender as free text (`male`, `female`, `m`, `f`, `1`, `2`)
    pub gender: String,

    /// Height in `height_unit`
    #[serde(alias = "height_cm")]
    pub height: f64,

    #[serde(default)]
    pub height_unit: LengthUnit,

    /// Weight in `weight_unit`
    #[serde(alias = "weight_kg")]
    pub weight: f64,

    #[serde(default)]
    pub weight_unit: MassUnit,

    /// Systolic blood pressure (mmHg)
    pub systolic_bp: i64,

    /// Diastolic blood pressure (mmHg)
    pub diastolic_bp: i64,

    /// Cholesterol tier as free text (`normal`, `above_normal`, `well_above_normal`)
    #[serde(alias = "cholesterol_level")]
    pub cholesterol: String,

    /// Glucose tier as free text, same vocabulary as cholesterol
    #[serde(alias = "glucose_level")]
    pub glucose: String,

    pub smoker: bool,

    pub drinks_alcohol: bool,

    pub physically_active: bool,
}

impl PatientInput {
    /// Create a metric-unit record with normal labs and no lifestyle flags set
    pub fn new(
        age: i64,
        gender: impl Into<String>,
        height_cm: f64,
        weight_kg: f64,
        systolic_bp: i64,
        diastolic_bp: i64,
    ) -> Self {
        Self {
            age,
            gender: gender.into(),
            height: height_cm,
            height_unit: LengthUnit::Centimeters,
            weight: weight_kg,
            weight_unit: MassUnit::Kilograms,
            systolic_bp,
            diastolic_bp,
            cholesterol: "normal".to_string(),
            glucose: "normal".to_string(),
            smoker: false,
            drinks_alcohol: false,
            physically_active: false,
        }
    }

    /// Set the cholesterol tier
    pub fn with_cholesterol(mut self, cholesterol: impl Into<String>) -> Self {
        self.cholesterol = cholesterol.into();
        self
    }

    /// Set the glucose tier
    pub fn with_glucose(mut self, glucose: impl Into<String>) -> Self {
        self.glucose = glucose.into();
        self
    }

    /// Set the lifestyle flags
    pub fn with_lifestyle(mut self, smoker: bool, drinks_alcohol: bool, physically_active: bool) -> Self {
        self.smoker = smoker;
        self.drinks_alcohol = drinks_alcohol;
        self.physically_active = physically_active;
        self
    }

    /// Express height in inches and weight in pounds
    pub fn with_imperial_units(mut self, height_in: f64, weight_lb: f64) -> Self {
        self.height = height_in;
        self.height_unit = LengthUnit::Inches;
        self.weight = weight_lb;
        self.weight_unit = MassUnit::Pounds;
        self
    }
}

/// Gender, coded the way the training dataset codes it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Female,
    Male,
}

impl Gender {
    /// Dataset code: 1 = female, 2 = male
    pub fn code(self) -> u8 {
        match self {
            Gender::Female => 1,
            Gender::Male => 2,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Gender::Female => "female",
            Gender::Male => "male",
        }
    }
}

/// Three-tier ordinal used for cholesterol and glucose
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Level {
    Normal,
    AboveNormal,
    WellAboveNormal,
}

impl Level {
    /// Ordinal code: 1, 2 or 3
    pub fn code(self) -> u8 {
        match self {
            Level::Normal => 1,
            Level::AboveNormal => 2,
            Level::WellAboveNormal => 3,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Level::Normal => "normal",
            Level::AboveNormal => "above_normal",
            Level::WellAboveNormal => "well_above_normal",
        }
    }

    /// Whether the tier is above normal
    pub fn is_elevated(self) -> bool {
        self != Level::Normal
    }
}

/// Canonical patient record; every field is in range and consistent
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ValidatedPatient {
    pub age: u32,
    pub gender: Gender,
    pub height_cm: f64,
    pub weight_kg: f64,
    pub systolic_bp: u32,
    pub diastolic_bp: u32,
    pub cholesterol: Level,
    pub glucose: Level,
    pub smoker: bool,
    pub drinks_alcohol: bool,
    pub physically_active: bool,
}
