//! Numeric feature encoding of a prediction input.

use super::input::PredictionInput;

/// Canonical feature order used by the trainer.
pub const FEATURE_NAMES: [&str; 5] = [
    "hours_studied",
    "previous_scores",
    "extracurricular",
    "sleep_hours",
    "sample_papers",
];

/// Error building a feature vector for a model.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FeatureError {
    #[error("model requests unknown feature '{0}'")]
    UnknownFeature(String),
    #[error("model declares no input features")]
    NoFeatures,
}

/// A fixed-order numeric encoding of the five input fields.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureVector(Vec<f64>);

impl FeatureVector {
    /// Encode in the canonical [`FEATURE_NAMES`] order.
    pub fn canonical(input: &PredictionInput) -> Self {
        Self(
            FEATURE_NAMES
                .iter()
                .filter_map(|name| feature_value(input, name))
                .collect(),
        )
    }

    /// Encode in the order a model declares for its inputs.
    pub fn ordered<S: AsRef<str>>(
        input: &PredictionInput,
        names: &[S],
    ) -> Result<Self, FeatureError> {
        if names.is_empty() {
            return Err(FeatureError::NoFeatures);
        }

        names
            .iter()
            .map(|name| {
                let name = name.as_ref();
                feature_value(input, name)
                    .ok_or_else(|| FeatureError::UnknownFeature(name.to_string()))
            })
            .collect::<Result<Vec<_>, _>>()
            .map(Self)
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Numeric value of a named feature; booleans encode as 0/1.
pub fn feature_value(input: &PredictionInput, name: &str) -> Option<f64> {
    match name {
        "hours_studied" => Some(input.hours_studied as f64),
        "previous_scores" => Some(input.previous_scores as f64),
        "extracurricular" => Some(if input.extracurricular { 1.0 } else { 0.0 }),
        "sleep_hours" => Some(input.sleep_hours as f64),
        "sample_papers" => Some(input.sample_papers as f64),
        _ => None,
    }
}
