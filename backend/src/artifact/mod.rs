//! Trained model artifact and the inference seam used by the service layer.
//!
//! The HTTP layer never talks to a concrete model type. It holds an
//! `Arc<dyn Regressor>` built once at startup, which keeps the artifact
//! read-only for the lifetime of the process and lets tests inject stubs.

pub mod checksum;
pub mod forest;
pub mod store;

pub use checksum::calculate_checksum;
pub use forest::{Node, RandomForest, RegressionTree};
pub use store::{ArtifactError, ModelArtifact, TrainingMetrics, TrainingParams, FORMAT_VERSION};

/// An immutable model mapping a feature vector to a scalar score.
pub trait Regressor: Send + Sync {
    /// Feature names in the order `predict` expects them.
    fn feature_names(&self) -> &[String];

    /// Predict a score for a single feature row.
    fn predict(&self, features: &[f64]) -> Result<f64, InferenceError>;
}

/// Failure while evaluating a model.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum InferenceError {
    #[error("expected {expected} features, got {got}")]
    FeatureCount { expected: usize, got: usize },
    #[error("feature at index {index} is not a finite number")]
    NonFiniteFeature { index: usize },
    #[error("model produced a non-finite score")]
    NonFiniteOutput,
    #[error("model is not loaded")]
    ModelNotLoaded,
}
