//! HTTP error handling and response types.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use super::dto::{InvalidInputResponse, PredictionFailedResponse, UnrealisticResponse};
use crate::models::SchemaErrors;
use crate::services::realism::SUGGESTION;
use crate::services::{PredictionError, RealismRejection};

/// Application error type for HTTP handlers.
#[derive(Debug)]
pub enum AppError {
    /// Field-level schema violations
    InvalidInput(SchemaErrors),
    /// Input outside the realism envelope
    Unrealistic(RealismRejection),
    /// Fault while building features or running the model
    PredictionFailed(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::InvalidInput(details) => (
                StatusCode::BAD_REQUEST,
                Json(InvalidInputResponse {
                    error: "Invalid input data".to_string(),
                    details,
                }),
            )
                .into_response(),
            AppError::Unrealistic(rejection) => (
                StatusCode::BAD_REQUEST,
                Json(UnrealisticResponse {
                    error: "Unrealistic scenario".to_string(),
                    message: rejection.message,
                    suggestion: SUGGESTION.to_string(),
                }),
            )
                .into_response(),
            AppError::PredictionFailed(details) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(PredictionFailedResponse {
                    error: "Prediction failed".to_string(),
                    details,
                }),
            )
                .into_response(),
        }
    }
}

impl From<SchemaErrors> for AppError {
    fn from(err: SchemaErrors) -> Self {
        AppError::InvalidInput(err)
    }
}

impl From<PredictionError> for AppError {
    fn from(err: PredictionError) -> Self {
        match err {
            PredictionError::Unrealistic(rejection) => AppError::Unrealistic(rejection),
            fault => AppError::PredictionFailed(fault.to_string()),
        }
    }
}
