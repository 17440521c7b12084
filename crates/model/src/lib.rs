//! # HFD Model
//!
//! Artifact-backed heart failure classifier.
//!
//! The trained model ships as a JSON artifact: a logistic regression with
//! standardized numeric terms (column, scaler mean/std, coefficient) and
//! per-category weight maps for the categorical columns, plus an intercept
//! and a decision threshold. The artifact is loaded once at process start and
//! is read-only afterwards.
//!
//! Unknown category values contribute a weight of zero, matching the
//! permissive normalizer: an unexpected string flows through the whole
//! pipeline without erroring.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::Deserialize;

use hfd_core::{ClassifierError, FeatureVector, RiskClassifier, FEATURE_COLUMNS};

/// Numeric columns of the training schema.
const NUMERIC_COLUMNS: [&str; 6] = [
    "Age",
    "RestingBP",
    "Cholesterol",
    "FastingBS",
    "MaxHR",
    "Oldpeak",
];

/// Categorical columns of the training schema.
const CATEGORICAL_COLUMNS: [&str; 5] = [
    "Sex",
    "ChestPainType",
    "RestingECG",
    "ExerciseAngina",
    "ST_Slope",
];

#[derive(Debug, thiserror::Error)]
pub enum ModelError {
    #[error("failed to read model artifact: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse model artifact: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid model artifact: {0}")]
    Schema(String),
}

pub type ModelResult<T> = std::result::Result<T, ModelError>;

/// One standardized numeric term: `coefficient * (x - mean) / std`.
#[derive(Clone, Debug, Deserialize)]
pub struct NumericTerm {
    pub column: String,
    pub mean: f64,
    pub std: f64,
    pub coefficient: f64,
}

/// One categorical term: a weight per known category value.
#[derive(Clone, Debug, Deserialize)]
pub struct CategoricalTerm {
    pub column: String,
    pub weights: BTreeMap<String, f64>,
}

/// The on-disk model artifact.
#[derive(Clone, Debug, Deserialize)]
pub struct ModelArtifact {
    pub version: String,
    pub intercept: f64,
    #[serde(default = "default_threshold")]
    pub threshold: f64,
    pub numeric: Vec<NumericTerm>,
    pub categorical: Vec<CategoricalTerm>,
}

fn default_threshold() -> f64 {
    0.5
}

/// The loaded heart failure classifier.
#[derive(Debug)]
pub struct HeartFailureModel {
    artifact: ModelArtifact,
}

impl HeartFailureModel {
    /// Loads and validates a model artifact from disk.
    ///
    /// # Errors
    ///
    /// Returns a `ModelError` if the file cannot be read, is not valid JSON,
    /// or fails schema validation (unknown columns, non-finite or zero
    /// scaler std, out-of-range threshold).
    pub fn load(path: &Path) -> ModelResult<Self> {
        let contents = fs::read_to_string(path)?;
        let artifact: ModelArtifact = serde_json::from_str(&contents)?;
        let model = Self::from_artifact(artifact)?;
        tracing::info!(
            version = %model.artifact.version,
            path = %path.display(),
            "loaded heart failure model artifact"
        );
        Ok(model)
    }

    /// Validates an already-parsed artifact.
    ///
    /// # Errors
    ///
    /// Returns `ModelError::Schema` describing the first violation found.
    pub fn from_artifact(artifact: ModelArtifact) -> ModelResult<Self> {
        if !artifact.intercept.is_finite() {
            return Err(ModelError::Schema("intercept must be finite".into()));
        }
        if !(0.0..=1.0).contains(&artifact.threshold) {
            return Err(ModelError::Schema(format!(
                "threshold {} is outside [0, 1]",
                artifact.threshold
            )));
        }

        for term in &artifact.numeric {
            if !NUMERIC_COLUMNS.contains(&term.column.as_str()) {
                return Err(ModelError::Schema(format!(
                    "'{}' is not a numeric column of the training schema",
                    term.column
                )));
            }
            if !term.std.is_finite() || term.std <= 0.0 {
                return Err(ModelError::Schema(format!(
                    "scaler std for '{}' must be finite and positive",
                    term.column
                )));
            }
            if !term.mean.is_finite() || !term.coefficient.is_finite() {
                return Err(ModelError::Schema(format!(
                    "mean and coefficient for '{}' must be finite",
                    term.column
                )));
            }
        }

        for term in &artifact.categorical {
            if !CATEGORICAL_COLUMNS.contains(&term.column.as_str()) {
                return Err(ModelError::Schema(format!(
                    "'{}' is not a categorical column of the training schema",
                    term.column
                )));
            }
            if let Some((category, weight)) =
                term.weights.iter().find(|(_, w)| !w.is_finite())
            {
                return Err(ModelError::Schema(format!(
                    "weight {} for '{}={}' must be finite",
                    weight, term.column, category
                )));
            }
        }

        debug_assert_eq!(NUMERIC_COLUMNS.len() + CATEGORICAL_COLUMNS.len(), FEATURE_COLUMNS.len());

        Ok(Self { artifact })
    }

    /// The artifact's version string.
    pub fn version(&self) -> &str {
        &self.artifact.version
    }

    /// The decision threshold applied by `predict`.
    pub fn threshold(&self) -> f64 {
        self.artifact.threshold
    }

    /// The linear score before the sigmoid.
    fn linear_score(&self, features: &FeatureVector) -> f64 {
        let mut z = self.artifact.intercept;

        for term in &self.artifact.numeric {
            // Columns were validated as numeric at load time.
            let x = features.numeric(&term.column).unwrap_or(0.0);
            z += term.coefficient * (x - term.mean) / term.std;
        }

        for term in &self.artifact.categorical {
            // Unknown categories contribute nothing.
            let weight = features
                .categorical(&term.column)
                .and_then(|value| term.weights.get(value))
                .copied()
                .unwrap_or(0.0);
            z += weight;
        }

        z
    }
}

fn sigmoid(z: f64) -> f64 {
    1.0 / (1.0 + (-z).exp())
}

impl RiskClassifier for HeartFailureModel {
    fn predict(&self, features: &FeatureVector) -> Result<u8, ClassifierError> {
        self.predict_probability(features)
            .map(|p| u8::from(p >= self.artifact.threshold))
    }

    fn predict_probability(&self, features: &FeatureVector) -> Result<f64, ClassifierError> {
        let probability = sigmoid(self.linear_score(features));
        if !probability.is_finite() {
            return Err(ClassifierError::new(
                "model produced a non-finite probability",
            ));
        }
        Ok(probability.clamp(0.0, 1.0))
    }
}
