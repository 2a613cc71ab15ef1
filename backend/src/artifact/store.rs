//! Model artifact file format, loading and saving.
//!
//! The artifact is a single JSON document written by the `train-model` binary
//! and read once by the server at startup.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use super::checksum::calculate_checksum;
use super::forest::RandomForest;
use super::{InferenceError, Regressor};

/// Artifact format version written and accepted by this crate.
pub const FORMAT_VERSION: u32 = 1;

/// Error loading or saving a model artifact.
#[derive(Debug, thiserror::Error)]
pub enum ArtifactError {
    #[error("failed to access model artifact {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse model artifact: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("unsupported artifact format version {found} (expected {expected})")]
    UnsupportedVersion { found: u32, expected: u32 },

    #[error("corrupt model artifact: {0}")]
    Corrupt(String),
}

/// Hyperparameters the forest was trained with.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainingParams {
    pub n_estimators: usize,
    pub max_depth: usize,
    pub min_samples_split: usize,
    pub seed: u64,
    pub n_samples: usize,
    pub test_fraction: f64,
}

/// Holdout quality of the trained forest.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainingMetrics {
    pub r2: f64,
    pub mae: f64,
    pub n_train: usize,
    pub n_test: usize,
}

/// A trained random forest together with its provenance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelArtifact {
    pub format_version: u32,
    pub model_id: Uuid,
    pub trained_at: DateTime<Utc>,
    /// Input features in the order the forest indexes them
    pub feature_names: Vec<String>,
    pub training: TrainingParams,
    pub metrics: TrainingMetrics,
    pub forest: RandomForest,
    /// SHA-256 of the file this artifact was loaded from
    #[serde(skip)]
    checksum: Option<String>,
}

impl ModelArtifact {
    /// Wrap a freshly trained forest.
    pub fn new(
        feature_names: Vec<String>,
        training: TrainingParams,
        metrics: TrainingMetrics,
        forest: RandomForest,
    ) -> Self {
        Self {
            format_version: FORMAT_VERSION,
            model_id: Uuid::new_v4(),
            trained_at: Utc::now(),
            feature_names,
            training,
            metrics,
            forest,
            checksum: None,
        }
    }

    /// Load and validate an artifact from disk.
    ///
    /// # Errors
    /// Fails if the file cannot be read, is not a valid artifact document, has
    /// an unsupported format version or is structurally unsound.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ArtifactError> {
        let path = path.as_ref();
        let bytes = fs::read(path).map_err(|source| ArtifactError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let mut artifact = Self::from_slice(&bytes)?;
        let checksum = calculate_checksum(&bytes);
        info!(
            path = %path.display(),
            model_id = %artifact.model_id,
            trees = artifact.forest.num_trees(),
            leaves = artifact.forest.n_leaves(),
            checksum = %checksum,
            "Loaded model artifact"
        );
        artifact.checksum = Some(checksum);
        Ok(artifact)
    }

    /// Parse and validate an artifact from raw JSON bytes.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, ArtifactError> {
        let artifact: ModelArtifact = serde_json::from_slice(bytes)?;
        artifact.validate()?;
        Ok(artifact)
    }

    /// Write the artifact as pretty-printed JSON.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), ArtifactError> {
        let path = path.as_ref();
        let content = serde_json::to_vec_pretty(self)?;
        fs::write(path, &content).map_err(|source| ArtifactError::Io {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Structural checks run on every load.
    pub fn validate(&self) -> Result<(), ArtifactError> {
        if self.format_version != FORMAT_VERSION {
            return Err(ArtifactError::UnsupportedVersion {
                found: self.format_version,
                expected: FORMAT_VERSION,
            });
        }
        if self.feature_names.is_empty() {
            return Err(ArtifactError::Corrupt(
                "artifact declares no features".to_string(),
            ));
        }
        self.forest
            .validate(self.feature_names.len())
            .map_err(ArtifactError::Corrupt)
    }

    /// Checksum of the source file, when loaded from disk.
    pub fn checksum(&self) -> Option<&str> {
        self.checksum.as_deref()
    }
}

impl Regressor for ModelArtifact {
    fn feature_names(&self) -> &[String] {
        &self.feature_names
    }

    fn predict(&self, features: &[f64]) -> Result<f64, InferenceError> {
        if features.len() != self.feature_names.len() {
            return Err(InferenceError::FeatureCount {
                expected: self.feature_names.len(),
                got: features.len(),
            });
        }
        if let Some(index) = features.iter().position(|x| !x.is_finite()) {
            return Err(InferenceError::NonFiniteFeature { index });
        }

        let score = self.forest.predict_row(features);
        if score.is_finite() {
            Ok(score)
        } else {
            Err(InferenceError::NonFiniteOutput)
        }
    }
}
