//! Feature normalization.
//!
//! Validates a loosely-typed patient record and converts it into the typed,
//! ordered [`FeatureVector`] the classifier expects.
//!
//! Presence is checked for all eleven required fields so the full missing set
//! can be reported in the logs, but the first missing field short-circuits
//! coercion and is the one surfaced to the caller. Numeric fields accept JSON
//! numbers (floats truncate) and numeric strings; categorical fields pass
//! through unvalidated against their allowed sets, so any string is accepted
//! and forwarded to the classifier.

use serde_json::Value;

use crate::record::{FeatureVector, PatientRecord, REQUIRED_FIELDS};
use crate::{PredictError, PredictResult};

/// Validates and vectorizes one patient record.
///
/// # Errors
///
/// Returns `PredictError::MissingField` naming the first absent required
/// field, or `PredictError::Conversion` when a field is present but not
/// coercible to its expected numeric type.
pub fn normalize(record: &PatientRecord) -> PredictResult<FeatureVector> {
    let missing: Vec<&'static str> = REQUIRED_FIELDS
        .into_iter()
        .filter(|field| !record.contains_key(*field))
        .collect();

    if let Some(first) = missing.first() {
        tracing::debug!(?missing, "patient record rejected, required fields absent");
        return Err(PredictError::MissingField(*first));
    }

    Ok(FeatureVector {
        age: coerce_int(record, "age")?,
        sex: coerce_category(record, "sex")?,
        chest_pain: coerce_category(record, "chest_pain")?,
        resting_bp: coerce_int(record, "resting_bp")?,
        cholesterol: coerce_int(record, "cholesterol")?,
        fasting_bs: coerce_int(record, "fasting_bs")?,
        resting_ecg: coerce_category(record, "resting_ecg")?,
        max_hr: coerce_int(record, "max_hr")?,
        exercise_angina: coerce_category(record, "exercise_angina")?,
        oldpeak: coerce_float(record, "oldpeak")?,
        st_slope: coerce_category(record, "st_slope")?,
    })
}

/// Coerces a field to an integer.
///
/// JSON integers pass through, floats truncate towards zero, and strings are
/// parsed as base-10 integers. Anything else is a conversion error.
fn coerce_int(record: &PatientRecord, field: &'static str) -> PredictResult<i64> {
    match &record[field] {
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Ok(i)
            } else if let Some(f) = n.as_f64() {
                Ok(f as i64)
            } else {
                Err(conversion(field, format!("{n} is out of integer range")))
            }
        }
        Value::String(s) => s
            .trim()
            .parse::<i64>()
            .map_err(|e| conversion(field, format!("{e}: '{s}'"))),
        other => Err(conversion(field, expected("an integer", other))),
    }
}

/// Coerces a field to a floating point number.
fn coerce_float(record: &PatientRecord, field: &'static str) -> PredictResult<f64> {
    match &record[field] {
        Value::Number(n) => n
            .as_f64()
            .ok_or_else(|| conversion(field, format!("{n} is not representable as a float"))),
        Value::String(s) => s
            .trim()
            .parse::<f64>()
            .map_err(|e| conversion(field, format!("{e}: '{s}'"))),
        other => Err(conversion(field, expected("a number", other))),
    }
}

/// Passes a categorical field through as a string, without checking it
/// against the allowed category set.
///
/// Scalar non-strings are stringified the way the original service fed them
/// straight into the model frame; only structured values are rejected.
fn coerce_category(record: &PatientRecord, field: &'static str) -> PredictResult<String> {
    match &record[field] {
        Value::String(s) => Ok(s.clone()),
        Value::Number(n) => Ok(n.to_string()),
        Value::Bool(b) => Ok(b.to_string()),
        other => Err(conversion(field, expected("a string", other))),
    }
}

fn conversion(field: &'static str, reason: String) -> PredictError {
    PredictError::Conversion { field, reason }
}

fn expected(what: &str, got: &Value) -> String {
    let kind = match got {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    };
    format!("expected {what}, got {kind}")
}
