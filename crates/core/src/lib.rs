//! # HFD Core
//!
//! Core prediction pipeline for the Heart Failure Detection API:
//! - Input validation and feature vectorization (`normalize`)
//! - Probability-to-risk-band stratification (`risk`)
//! - Rule-based clinical recommendation engine (`recommendations`)
//! - Request orchestration over an injected classifier (`pipeline`)
//!
//! **No API concerns**: HTTP servers, JSON envelopes, and OpenAPI docs belong
//! in the `hfd-run` binary; the trained classifier itself lives behind the
//! `RiskClassifier` trait (`hfd-model` provides the artifact-backed
//! implementation).

pub mod classifier;
pub mod normalize;
pub mod pipeline;
pub mod recommendations;
pub mod record;
pub mod risk;

pub use classifier::{ClassifierError, RiskClassifier};
pub use pipeline::{PredictionResult, PredictionService};
pub use record::{FeatureVector, PatientRecord, FEATURE_COLUMNS, REQUIRED_FIELDS};
pub use risk::RiskLevel;

/// Failures a prediction request can surface.
///
/// Missing-field, conversion, and malformed-request failures are
/// client-class; a classifier failure is server-class. In batch mode every
/// variant is recoverable per record.
#[derive(Debug, thiserror::Error)]
pub enum PredictError {
    /// A required field was absent from the patient record.
    #[error("Missing required field: {0}")]
    MissingField(&'static str),
    /// A field was present but not coercible to its expected numeric type.
    #[error("Invalid value for field '{field}': {reason}")]
    Conversion { field: &'static str, reason: String },
    /// The classifier collaborator failed during prediction.
    #[error("Classifier failure: {0}")]
    Classifier(#[from] ClassifierError),
    /// The top-level input was not shaped as expected.
    #[error("{0}")]
    MalformedRequest(String),
}

impl PredictError {
    /// Whether this failure was caused by the caller's input (client-class)
    /// rather than by the service itself (server-class).
    pub fn is_client_error(&self) -> bool {
        !matches!(self, PredictError::Classifier(_))
    }
}

pub type PredictResult<T> = std::result::Result<T, PredictError>;
