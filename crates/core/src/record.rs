//! Patient record and feature vector types.
//!
//! A patient record arrives as a loosely-typed JSON object; the normalizer
//! turns it into a [`FeatureVector`] whose column order matches the
//! classifier's training schema exactly.

use serde_json::Value;

/// Required input fields, in the fixed iteration order used by the
/// presence check.
pub const REQUIRED_FIELDS: [&str; 11] = [
    "age",
    "sex",
    "chest_pain",
    "resting_bp",
    "cholesterol",
    "fasting_bs",
    "resting_ecg",
    "max_hr",
    "exercise_angina",
    "oldpeak",
    "st_slope",
];

/// Feature columns in the exact order the classifier was trained on.
pub const FEATURE_COLUMNS: [&str; 11] = [
    "Age",
    "Sex",
    "ChestPainType",
    "RestingBP",
    "Cholesterol",
    "FastingBS",
    "RestingECG",
    "MaxHR",
    "ExerciseAngina",
    "Oldpeak",
    "ST_Slope",
];

/// A raw patient record as received from the caller, untyped.
pub type PatientRecord = serde_json::Map<String, Value>;

/// The typed, ordered 11-feature input to the classifier.
///
/// Constructed fresh per record by the normalizer and never mutated
/// afterwards. Categorical fields hold whatever string the caller sent; no
/// enum-membership validation is performed.
#[derive(Clone, Debug, PartialEq)]
pub struct FeatureVector {
    pub age: i64,
    pub sex: String,
    pub chest_pain: String,
    pub resting_bp: i64,
    pub cholesterol: i64,
    pub fasting_bs: i64,
    pub resting_ecg: String,
    pub max_hr: i64,
    pub exercise_angina: String,
    pub oldpeak: f64,
    pub st_slope: String,
}

impl FeatureVector {
    /// Looks up a numeric feature by its training-schema column name.
    ///
    /// Returns `None` for categorical columns and unknown names.
    pub fn numeric(&self, column: &str) -> Option<f64> {
        match column {
            "Age" => Some(self.age as f64),
            "RestingBP" => Some(self.resting_bp as f64),
            "Cholesterol" => Some(self.cholesterol as f64),
            "FastingBS" => Some(self.fasting_bs as f64),
            "MaxHR" => Some(self.max_hr as f64),
            "Oldpeak" => Some(self.oldpeak),
            _ => None,
        }
    }

    /// Looks up a categorical feature by its training-schema column name.
    ///
    /// Returns `None` for numeric columns and unknown names.
    pub fn categorical(&self, column: &str) -> Option<&str> {
        match column {
            "Sex" => Some(&self.sex),
            "ChestPainType" => Some(&self.chest_pain),
            "RestingECG" => Some(&self.resting_ecg),
            "ExerciseAngina" => Some(&self.exercise_angina),
            "ST_Slope" => Some(&self.st_slope),
            _ => None,
        }
    }

    /// Materializes the vector as an ordered row in [`FEATURE_COLUMNS`]
    /// order.
    pub fn as_row(&self) -> Vec<Value> {
        vec![
            Value::from(self.age),
            Value::from(self.sex.clone()),
            Value::from(self.chest_pain.clone()),
            Value::from(self.resting_bp),
            Value::from(self.cholesterol),
            Value::from(self.fasting_bs),
            Value::from(self.resting_ecg.clone()),
            Value::from(self.max_hr),
            Value::from(self.exercise_angina.clone()),
            Value::from(self.oldpeak),
            Value::from(self.st_slope.clone()),
        ]
    }
}
