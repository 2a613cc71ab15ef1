//! Prediction orchestration: realism check, inference, feedback.
//!
//! This is the transport-agnostic core of `POST /predict/`. Schema parsing
//! happens before it; response shaping happens after it in the HTTP layer.

use std::sync::Arc;

use tracing::{debug, error};

use crate::artifact::{InferenceError, Regressor};
use crate::models::{FeatureError, FeatureVector, PredictionInput, PredictionResult};

use super::feedback;
use super::realism::{self, RealismRejection};

/// Why a prediction could not be produced.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PredictionError {
    /// The input is outside the realism envelope
    #[error(transparent)]
    Unrealistic(#[from] RealismRejection),

    /// The model asked for features the input cannot provide
    #[error("feature construction failed: {0}")]
    FeatureConstruction(#[from] FeatureError),

    /// The model failed while scoring
    #[error("inference failed: {0}")]
    Inference(#[from] InferenceError),
}

impl PredictionError {
    /// True for faults on our side rather than problems with the input.
    pub fn is_fault(&self) -> bool {
        !matches!(self, PredictionError::Unrealistic(_))
    }
}

/// Runs predictions against an injected, read-only model.
#[derive(Clone)]
pub struct PredictionService {
    model: Option<Arc<dyn Regressor>>,
}

impl PredictionService {
    pub fn new(model: Arc<dyn Regressor>) -> Self {
        Self { model: Some(model) }
    }

    /// A service with no model; every prediction fails with
    /// [`InferenceError::ModelNotLoaded`].
    pub fn without_model() -> Self {
        Self { model: None }
    }

    pub fn model_loaded(&self) -> bool {
        self.model.is_some()
    }

    /// Validate `input`, score it and attach feedback.
    ///
    /// # Errors
    /// Returns [`PredictionError::Unrealistic`] for inputs outside the realism
    /// envelope and one of the fault variants if the model cannot be evaluated.
    pub fn predict(&self, input: &PredictionInput) -> Result<PredictionResult, PredictionError> {
        realism::validate(input)?;

        let raw = self.score(input).inspect_err(|e| {
            error!(error = %e, ?input, "Prediction failed");
        })?;
        debug!(raw_score = raw, "Model scored input");

        Ok(PredictionResult::from_raw_score(raw, feedback::generate(input)))
    }

    fn score(&self, input: &PredictionInput) -> Result<f64, PredictionError> {
        let model = self.model.as_ref().ok_or(InferenceError::ModelNotLoaded)?;
        let features = FeatureVector::ordered(input, model.feature_names())?;
        Ok(model.predict(features.as_slice())?)
    }
}
