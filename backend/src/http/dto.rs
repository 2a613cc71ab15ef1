//! Data Transfer Objects for the HTTP API.
//!
//! The success payload of `POST /predict/` is [`PredictionResult`] itself;
//! the error payloads are built by [`super::error::AppError`].

use serde::{Deserialize, Serialize};

use crate::models::SchemaErrors;

pub use crate::models::PredictionResult as PredictionResponse;

/// Health check response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Status of the service
    pub status: String,
    /// Whether a model artifact is loaded
    pub model_loaded: bool,
    /// Static literal; no datastore is consulted
    pub database: String,
}

impl HealthResponse {
    pub fn healthy(model_loaded: bool) -> Self {
        Self {
            status: "healthy".to_string(),
            model_loaded,
            database: "connected".to_string(),
        }
    }
}

/// Body of a schema validation failure (400).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InvalidInputResponse {
    pub error: String,
    /// Messages per offending field
    pub details: SchemaErrors,
}

/// Body of a realism rejection (400).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UnrealisticResponse {
    pub error: String,
    /// Reason from the first violated rule
    pub message: String,
    pub suggestion: String,
}

/// Body of an internal prediction fault (500).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PredictionFailedResponse {
    pub error: String,
    pub details: String,
}
