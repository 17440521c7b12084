//! Wire types for the Heart Failure Detection REST API.
//!
//! These are the shapes serialized to callers. The per-record result carries
//! either a human-readable `message` (plain prediction) or a
//! `recommendations` payload (recommendations variant); batch responses wrap
//! an ordered list of per-record outcomes where each entry is either a full
//! result or an `{error}` envelope.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Health check response.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct HealthRes {
    pub status: String,
    pub service: String,
    pub version: String,
}

/// Categorized clinical recommendations for a single patient record.
///
/// All five categories are always present, possibly empty. Entries within a
/// category keep rule evaluation order and duplicates are allowed.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct RecommendationSet {
    pub lifestyle: Vec<String>,
    pub medications: Vec<String>,
    pub monitoring: Vec<String>,
    pub referrals: Vec<String>,
    pub urgent_actions: Vec<String>,
}

/// Successful prediction response for one patient record.
///
/// `message` is set on the plain variant ("Heart Failure Detected" /
/// "Normal"); `recommendations` is set on the recommendations variant. The
/// two are never both present.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct PredictRes {
    pub prediction: i32,
    pub risk_level: String,
    pub probability: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recommendations: Option<RecommendationSet>,
}

/// Generic error envelope.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ErrorRes {
    pub error: String,
}

/// One positional outcome inside a batch response.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(untagged)]
pub enum BatchEntry {
    /// The record was processed successfully.
    Result(PredictRes),
    /// The record failed validation or prediction.
    Error(ErrorRes),
}

/// Batch prediction response, order-preserving over the input records.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct BatchPredictRes {
    pub results: Vec<BatchEntry>,
}
