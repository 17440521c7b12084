//! Request orchestration.
//!
//! Two entry points over the same per-record pipeline: single-record (any
//! failure aborts the request) and batch (failures are isolated per record
//! and collected positionally). Each record runs normalize → classify →
//! stratify → optionally recommend; all state is request-scoped.

use std::sync::Arc;

use api_shared::RecommendationSet;
use serde_json::Value;

use crate::classifier::RiskClassifier;
use crate::normalize::normalize;
use crate::recommendations::generate_recommendations;
use crate::record::PatientRecord;
use crate::risk::RiskLevel;
use crate::{PredictError, PredictResult};

/// The outcome of scoring one patient record. Immutable once produced.
#[derive(Clone, Debug, PartialEq)]
pub struct PredictionResult {
    /// `1` for heart failure, `0` for normal.
    pub prediction: u8,
    /// Predicted probability of heart failure, in `[0, 1]`.
    pub probability: f64,
    /// Risk band derived from the probability.
    pub risk_level: RiskLevel,
    /// Present when the caller asked for the recommendations variant.
    pub recommendations: Option<RecommendationSet>,
}

/// Orchestrates the prediction pipeline over an injected classifier.
///
/// The classifier is constructed once at process start and shared read-only
/// behind an `Arc`; the service itself holds no other state, so cloning it is
/// cheap and requests never observe each other.
pub struct PredictionService<C: RiskClassifier> {
    classifier: Arc<C>,
}

impl<C: RiskClassifier> Clone for PredictionService<C> {
    fn clone(&self) -> Self {
        Self {
            classifier: self.classifier.clone(),
        }
    }
}

impl<C: RiskClassifier> PredictionService<C> {
    pub fn new(classifier: Arc<C>) -> Self {
        Self { classifier }
    }

    /// Runs the pipeline for a single patient record.
    ///
    /// # Arguments
    ///
    /// * `record` - The raw patient record as received from the caller.
    /// * `with_recommendations` - Whether to derive the recommendation set.
    ///
    /// # Errors
    ///
    /// Any stage failure aborts the whole request: `MissingField` or
    /// `Conversion` from normalization, `Classifier` from the collaborator.
    pub fn predict_one(
        &self,
        record: &PatientRecord,
        with_recommendations: bool,
    ) -> PredictResult<PredictionResult> {
        let features = normalize(record)?;
        let prediction = self.classifier.predict(&features)?;
        let probability = self.classifier.predict_probability(&features)?;
        let risk_level = RiskLevel::from_probability(probability);

        let recommendations = with_recommendations
            .then(|| generate_recommendations(&features, prediction, probability));

        tracing::debug!(
            prediction = prediction as i64,
            probability,
            risk = %risk_level,
            "record scored"
        );

        Ok(PredictionResult {
            prediction,
            probability,
            risk_level,
            recommendations,
        })
    }

    /// Runs the pipeline independently for each record of a batch.
    ///
    /// The outer `Result` covers the request shape: a non-array body is a
    /// `MalformedRequest`, reported before any per-record processing. Inside
    /// the batch, one record's failure becomes an error entry at that
    /// record's position and does not abort the remaining records. Batch
    /// results always carry recommendations.
    ///
    /// # Errors
    ///
    /// Returns `PredictError::MalformedRequest` if `body` is not an array.
    pub fn predict_batch(
        &self,
        body: &Value,
    ) -> PredictResult<Vec<PredictResult<PredictionResult>>> {
        let records = body.as_array().ok_or_else(|| {
            PredictError::MalformedRequest("Expected a list of patient data".into())
        })?;

        let mut results = Vec::with_capacity(records.len());
        for (index, record) in records.iter().enumerate() {
            let outcome = match record.as_object() {
                Some(map) => self.predict_one(map, true),
                None => Err(PredictError::MalformedRequest(
                    "Expected a patient data object".into(),
                )),
            };
            if let Err(e) = &outcome {
                tracing::warn!(index, "batch record failed: {e}");
            }
            results.push(outcome);
        }
        Ok(results)
    }
}
