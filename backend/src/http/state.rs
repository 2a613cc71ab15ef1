//! Application state for the HTTP server.

use std::sync::Arc;

use crate::artifact::Regressor;
use crate::services::PredictionService;

/// Shared application state passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Prediction service holding the read-only model
    pub predictor: PredictionService,
}

impl AppState {
    /// Create application state around a loaded model.
    pub fn new(model: Arc<dyn Regressor>) -> Self {
        Self {
            predictor: PredictionService::new(model),
        }
    }

    /// State for a server started without a model artifact.
    pub fn without_model() -> Self {
        Self {
            predictor: PredictionService::without_model(),
        }
    }

    pub fn model_loaded(&self) -> bool {
        self.predictor.model_loaded()
    }
}
