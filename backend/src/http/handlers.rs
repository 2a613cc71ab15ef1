//! HTTP handlers for the REST API.
//!
//! Each handler corresponds to an API endpoint and delegates to the
//! service layer for business logic.

use axum::{
    extract::{rejection::JsonRejection, State},
    response::Html,
    Json,
};
use serde_json::Value;
use tracing::{debug, info};

use super::dto::{HealthResponse, PredictionResponse};
use super::error::AppError;
use super::state::AppState;
use crate::models::{PredictionInput, SchemaErrors};

/// Result type for handlers.
pub type HandlerResult<T> = Result<Json<T>, AppError>;

const UI_PAGE: &str = include_str!("../../static/index.html");

// =============================================================================
// Health Check
// =============================================================================

/// GET /health/
///
/// Reports that the process is up and whether a model artifact is loaded.
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse::healthy(state.model_loaded()))
}

// =============================================================================
// Prediction
// =============================================================================

/// POST /predict/
///
/// Predict a performance index from study habits and academic history.
pub async fn predict_performance(
    State(state): State<AppState>,
    body: Result<Json<Value>, JsonRejection>,
) -> HandlerResult<PredictionResponse> {
    let Json(body) = body.map_err(|rejection| {
        debug!(reason = %rejection.body_text(), "Rejected unparseable body");
        AppError::InvalidInput(SchemaErrors::non_field(format!(
            "JSON parse error - {}",
            rejection.body_text()
        )))
    })?;

    let input = PredictionInput::from_json(&body).inspect_err(|errors| {
        debug!(%errors, "Schema validation failed");
    })?;

    // Faults are already logged by the service
    state.predictor.predict(&input).map(Json).map_err(|err| {
        if !err.is_fault() {
            info!(reason = %err, "Rejected unrealistic input");
        }
        AppError::from(err)
    })
}

// =============================================================================
// UI
// =============================================================================

/// GET /
///
/// Static page that calls `/predict/` from the browser.
pub async fn ui_home() -> Html<&'static str> {
    Html(UI_PAGE)
}
