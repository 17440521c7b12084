//! Heart Failure Detection REST API server.
//!
//! Loads the classifier artifact once at startup, injects it into the core
//! prediction pipeline, and exposes it over HTTP:
//! - `GET /health` — liveness probe
//! - `POST /predict` — single-record prediction
//! - `POST /predict/batch` — batch prediction with per-record error isolation
//!
//! OpenAPI docs are served via Swagger UI at `/swagger-ui`.

use axum::{
    extract::{rejection::JsonRejection, Query, State},
    http::StatusCode,
    response::Json,
    routing::{get, post},
    Router,
};
use std::path::Path;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use api_shared::{
    BatchEntry, BatchPredictRes, ErrorRes, HealthRes, HealthService, PredictRes, RecommendationSet,
};
use hfd_core::{PredictError, PredictionResult, PredictionService};
use hfd_model::HeartFailureModel;

const DEFAULT_MODEL_PATH: &str = "model/heart_failure_model.json";

/// Default log directives, naming each workspace crate's target so the
/// service logs at info level when `RUST_LOG` is unset.
const DEFAULT_LOG_DIRECTIVES: &str = "hfd_run=info,hfd_core=info,hfd_model=info";

/// Application state shared across REST API handlers.
///
/// Holds the prediction service with its injected classifier; the model is
/// loaded once at startup and read-only afterwards.
#[derive(Clone)]
struct AppState {
    prediction_service: PredictionService<HeartFailureModel>,
}

#[derive(OpenApi)]
#[openapi(
    paths(health, predict, predict_batch),
    components(schemas(
        HealthRes,
        PredictRes,
        BatchPredictRes,
        BatchEntry,
        ErrorRes,
        RecommendationSet
    ))
)]
struct ApiDoc;

/// Main entry point for the Heart Failure Detection API server.
///
/// Starts the REST server on the configured address (default: 0.0.0.0:3000).
///
/// # Environment Variables
/// - `HFD_REST_ADDR`: Server address (default: "0.0.0.0:3000")
/// - `HFD_MODEL_PATH`: Model artifact path (default: "model/heart_failure_model.json")
///
/// # Errors
/// Returns an error if:
/// - the logging/tracing configuration cannot be initialised,
/// - the model artifact is missing or fails validation,
/// - the server address cannot be bound, or
/// - the HTTP server fails while running.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let mut filter = tracing_subscriber::EnvFilter::from_default_env();
    for directive in DEFAULT_LOG_DIRECTIVES.split(',') {
        filter = filter.add_directive(directive.parse()?);
    }
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    let addr = std::env::var("HFD_REST_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".into());
    let model_path =
        std::env::var("HFD_MODEL_PATH").unwrap_or_else(|_| DEFAULT_MODEL_PATH.into());
    let model_path = Path::new(&model_path);
    if !model_path.is_file() {
        anyhow::bail!("Model artifact does not exist: {}", model_path.display());
    }

    let model = HeartFailureModel::load(model_path)?;
    tracing::info!("++ Loaded heart failure model v{}", model.version());
    tracing::info!("++ Starting HFD REST on {}", addr);

    let state = AppState {
        prediction_service: PredictionService::new(Arc::new(model)),
    };

    let app = Router::new()
        .route("/health", get(health))
        .route("/predict", post(predict))
        .route("/predict/batch", post(predict_batch))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(CorsLayer::permissive())
        .with_state(state);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Health check response", body = HealthRes)
    )
)]
/// Health check endpoint for the REST API
///
/// Returns the current health status of the Heart Failure Detection service.
/// This endpoint is used for monitoring and load balancer health checks.
#[axum::debug_handler]
async fn health(State(_state): State<AppState>) -> Json<HealthRes> {
    Json(HealthService::check_health())
}

/// Query parameters for the single-record prediction endpoint.
#[derive(Debug, Default, serde::Deserialize, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
struct PredictParams {
    /// When true, the response carries the recommendations variant instead
    /// of the plain message.
    #[serde(default)]
    include_recommendations: bool,
}

#[utoipa::path(
    post,
    path = "/predict",
    params(PredictParams),
    responses(
        (status = 200, description = "Prediction result", body = PredictRes),
        (status = 400, description = "Validation failure", body = ErrorRes),
        (status = 500, description = "Internal server error", body = ErrorRes)
    )
)]
/// Predict heart failure for a single patient record
///
/// Accepts a JSON object with the 11 required clinical fields, runs the
/// normalize → classify → stratify pipeline, and returns the prediction with
/// its risk band. Missing or uncoercible fields abort the whole request with
/// a 400 response.
#[axum::debug_handler]
async fn predict(
    State(state): State<AppState>,
    Query(params): Query<PredictParams>,
    body: Result<Json<serde_json::Value>, JsonRejection>,
) -> Result<Json<PredictRes>, (StatusCode, Json<ErrorRes>)> {
    let Json(body) = body.map_err(json_rejection_response)?;
    let record = body.as_object().ok_or_else(|| {
        error_response(&PredictError::MalformedRequest(
            "Expected a patient data object".into(),
        ))
    })?;

    match state
        .prediction_service
        .predict_one(record, params.include_recommendations)
    {
        Ok(result) => Ok(Json(to_wire(result))),
        Err(e) => Err(error_response(&e)),
    }
}

#[utoipa::path(
    post,
    path = "/predict/batch",
    responses(
        (status = 200, description = "Per-record prediction outcomes", body = BatchPredictRes),
        (status = 400, description = "Request body is not a list", body = ErrorRes),
        (status = 500, description = "Internal server error", body = ErrorRes)
    )
)]
/// Predict heart failure for a batch of patient records
///
/// Accepts a JSON array of patient records and processes each independently;
/// one record's failure becomes an `{error}` entry at that record's position
/// while the remaining records are still scored. Batch results always include
/// recommendations.
#[axum::debug_handler]
async fn predict_batch(
    State(state): State<AppState>,
    body: Result<Json<serde_json::Value>, JsonRejection>,
) -> Result<Json<BatchPredictRes>, (StatusCode, Json<ErrorRes>)> {
    let Json(body) = body.map_err(json_rejection_response)?;
    match state.prediction_service.predict_batch(&body) {
        Ok(outcomes) => {
            let results = outcomes
                .into_iter()
                .map(|outcome| match outcome {
                    Ok(result) => BatchEntry::Result(to_wire(result)),
                    Err(e) => BatchEntry::Error(ErrorRes {
                        error: e.to_string(),
                    }),
                })
                .collect();
            Ok(Json(BatchPredictRes { results }))
        }
        Err(e) => Err(error_response(&e)),
    }
}

/// Converts a pipeline result into its wire shape.
///
/// The plain variant carries the human-readable message; the recommendations
/// variant replaces it with the recommendation set.
fn to_wire(result: PredictionResult) -> PredictRes {
    let message = result.recommendations.is_none().then(|| {
        if result.prediction == 1 {
            "Heart Failure Detected".to_string()
        } else {
            "Normal".to_string()
        }
    });

    PredictRes {
        prediction: i32::from(result.prediction),
        risk_level: result.risk_level.to_string(),
        probability: result.probability,
        message,
        recommendations: result.recommendations,
    }
}

/// Maps a body that axum could not parse as JSON onto the same `{error}`
/// envelope the pipeline failures use.
fn json_rejection_response(rejection: JsonRejection) -> (StatusCode, Json<ErrorRes>) {
    (
        rejection.status(),
        Json(ErrorRes {
            error: rejection.body_text(),
        }),
    )
}

/// Maps a pipeline failure onto an HTTP error response.
fn error_response(e: &PredictError) -> (StatusCode, Json<ErrorRes>) {
    let status = if e.is_client_error() {
        StatusCode::BAD_REQUEST
    } else {
        tracing::error!("Prediction error: {e}");
        StatusCode::INTERNAL_SERVER_ERROR
    };
    (
        status,
        Json(ErrorRes {
            error: e.to_string(),
        }),
    )
}
