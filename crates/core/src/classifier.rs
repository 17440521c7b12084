//! Classifier seam.
//!
//! The trained heart failure classifier is an external collaborator. The
//! pipeline consumes it through this trait so the concrete model (an
//! artifact-backed implementation in `hfd-model`, or a stub in tests) is
//! injected at process start and shared read-only across requests.

use crate::record::FeatureVector;

/// Failure raised by the classifier collaborator during prediction.
///
/// Surfaced verbatim to the top-level error handler; never retried.
#[derive(Clone, Debug, thiserror::Error)]
#[error("{0}")]
pub struct ClassifierError(String);

impl ClassifierError {
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}

/// Binary heart failure classifier over the fixed 11-column feature vector.
pub trait RiskClassifier: Send + Sync {
    /// Predicts the binary outcome: `1` for heart failure, `0` for normal.
    fn predict(&self, features: &FeatureVector) -> Result<u8, ClassifierError>;

    /// Predicts the probability of heart failure, in `[0, 1]`.
    fn predict_probability(&self, features: &FeatureVector) -> Result<f64, ClassifierError>;
}
