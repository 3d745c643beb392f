//! Feature schema and feature vectors
//!
//! The schema is the contract between the feature engineer and a trained
//! model artifact. Field order and count are fixed for a schema version;
//! any change to either requires bumping `SCHEMA_VERSION` and training a new
//! artifact against it.

use crate::error::{CoreError, Result};
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

/// Version tag of the current feature layout
pub const SCHEMA_VERSION: &str = "cardio-features/1";

/// Number of features in the current layout
pub const FEATURE_COUNT: usize = 14;

/// Feature names in model input order
pub const FEATURE_NAMES: [&str; FEATURE_COUNT] = [
    "age",
    "gender_code",
    "height",
    "weight",
    "systolic_bp",
    "diastolic_bp",
    "cholesterol_code",
    "glucose_code",
    "smoker_flag",
    "alcohol_flag",
    "activity_flag",
    "bmi",
    "bp_difference",
    "age_systolic_interaction",
];

/// Positions of each feature inside the vector
pub mod index {
    pub const AGE: usize = 0;
    pub const GENDER_CODE: usize = 1;
    pub const HEIGHT: usize = 2;
    pub const WEIGHT: usize = 3;
    pub const SYSTOLIC_BP: usize = 4;
    pub const DIASTOLIC_BP: usize = 5;
    pub const CHOLESTEROL_CODE: usize = 6;
    pub const GLUCOSE_CODE: usize = 7;
    pub const SMOKER_FLAG: usize = 8;
    pub const ALCOHOL_FLAG: usize = 9;
    pub const ACTIVITY_FLAG: usize = 10;
    pub const BMI: usize = 11;
    pub const BP_DIFFERENCE: usize = 12;
    pub const AGE_SYSTOLIC_INTERACTION: usize = 13;
}

/// A named, versioned feature layout
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeatureSchema {
    pub version: &'static str,
    pub names: &'static [&'static str],
}

impl FeatureSchema {
    /// The layout produced by this build of the feature engineer
    pub const fn current() -> Self {
        Self {
            version: SCHEMA_VERSION,
            names: &FEATURE_NAMES,
        }
    }

    /// Number of features
    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Position of a feature by name
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.names.iter().position(|n| *n == name)
    }

    /// Whether a declared list of names matches this layout exactly, in order
    pub fn matches_names<S: AsRef<str>>(&self, names: &[S]) -> bool {
        names.len() == self.names.len()
            && names
                .iter()
                .zip(self.names.iter())
                .all(|(a, b)| a.as_ref() == *b)
    }
}

/// Ordered numeric model input tagged with the schema it was built for
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureVector {
    schema_version: String,
    values: [f64; FEATURE_COUNT],
}

impl FeatureVector {
    /// Wrap values laid out in the current schema order
    ///
    /// Fails with `InvalidFeatureVector` if any value is NaN or infinite.
    pub fn new(values: [f64; FEATURE_COUNT]) -> Result<Self> {
        Self::from_values(SCHEMA_VERSION, &values)
    }

    /// Rebuild a vector from a stored snapshot
    ///
    /// The schema version is kept as given so that a snapshot recorded under
    /// another layout is still detectable downstream.
    pub fn from_values(schema_version: impl Into<String>, values: &[f64]) -> Result<Self> {
        let values: [f64; FEATURE_COUNT] = values.try_into().map_err(|_| {
            CoreError::InvalidFeatureVector(format!(
                "expected {} values, got {}",
                FEATURE_COUNT,
                values.len()
            ))
        })?;

        if let Some(pos) = values.iter().position(|v| !v.is_finite()) {
            return Err(CoreError::InvalidFeatureVector(format!(
                "feature '{}' is not finite",
                FEATURE_NAMES[pos]
            )));
        }

        Ok(Self {
            schema_version: schema_version.into(),
            values,
        })
    }

    pub fn schema_version(&self) -> &str {
        &self.schema_version
    }

    /// Raw values in schema order
    pub fn values(&self) -> &[f64; FEATURE_COUNT] {
        &self.values
    }

    /// Look up a feature by name
    pub fn get(&self, name: &str) -> Option<f64> {
        FeatureSchema::current()
            .index_of(name)
            .map(|idx| self.values[idx])
    }

    /// Iterate over `(name, value)` pairs in schema order
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, f64)> + '_ {
        FEATURE_NAMES.iter().copied().zip(self.values.iter().copied())
    }

    pub fn age(&self) -> f64 {
        self.values[index::AGE]
    }

    pub fn gender_code(&self) -> f64 {
        self.values[index::GENDER_CODE]
    }

    pub fn height(&self) -> f64 {
        self.values[index::HEIGHT]
    }

    pub fn weight(&self) -> f64 {
        self.values[index::WEIGHT]
    }

    pub fn systolic_bp(&self) -> f64 {
        self.values[index::SYSTOLIC_BP]
    }

    pub fn diastolic_bp(&self) -> f64 {
        self.values[index::DIASTOLIC_BP]
    }

    pub fn cholesterol_code(&self) -> f64 {
        self.values[index::CHOLESTEROL_CODE]
    }

    pub fn glucose_code(&self) -> f64 {
        self.values[index::GLUCOSE_CODE]
    }

    pub fn smoker_flag(&self) -> f64 {
        self.values[index::SMOKER_FLAG]
    }

    pub fn alcohol_flag(&self) -> f64 {
        self.values[index::ALCOHOL_FLAG]
    }

    pub fn activity_flag(&self) -> f64 {
        self.values[index::ACTIVITY_FLAG]
    }

    pub fn bmi(&self) -> f64 {
        self.values[index::BMI]
    }

    pub fn bp_difference(&self) -> f64 {
        self.values[index::BP_DIFFERENCE]
    }

    pub fn age_systolic_interaction(&self) -> f64 {
        self.values[index::AGE_SYSTOLIC_INTERACTION]
    }
}

// Serialized as `{ "schema_version": ..., "features": { name: value, ... } }`
// with features in schema order, so audit logs stay readable.
impl Serialize for FeatureVector {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        struct Named<'a>(&'a FeatureVector);

        impl Serialize for Named<'_> {
            fn serialize<S: Serializer>(
                &self,
                serializer: S,
            ) -> std::result::Result<S::Ok, S::Error> {
                let mut map = serializer.serialize_map(Some(FEATURE_COUNT))?;
                for (name, value) in self.0.iter() {
                    map.serialize_entry(name, &value)?;
                }
                map.end()
            }
        }

        let mut map = serializer.serialize_map(Some(2))?;
        map.serialize_entry("schema_version", &self.schema_version)?;
        map.serialize_entry("features", &Named(self))?;
        map.end()
    }
}
