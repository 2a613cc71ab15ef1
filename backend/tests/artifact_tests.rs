//! Train, save and reload model artifacts on disk.

use std::sync::Arc;

use tempfile::tempdir;

use perf_predictor::artifact::{calculate_checksum, ArtifactError, ModelArtifact, Regressor};
use perf_predictor::models::{FeatureVector, FEATURE_NAMES};
use perf_predictor::services::PredictionService;
use perf_predictor::training::{reference_profiles, train_artifact, TrainingConfig};

fn small_config() -> TrainingConfig {
    TrainingConfig {
        n_samples: 250,
        n_estimators: 6,
        max_depth: 6,
        ..TrainingConfig::default()
    }
}

#[test]
fn test_saved_artifact_reloads_identically() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("model.json");

    let trained = train_artifact(&small_config()).unwrap();
    trained.save(&path).unwrap();
    let loaded = ModelArtifact::load(&path).unwrap();

    assert_eq!(loaded.model_id, trained.model_id);
    assert_eq!(loaded.feature_names, FEATURE_NAMES.to_vec());
    assert_eq!(loaded.forest, trained.forest);

    for (_, input) in reference_profiles() {
        let features = FeatureVector::canonical(&input);
        assert_eq!(
            loaded.predict(features.as_slice()).unwrap(),
            trained.predict(features.as_slice()).unwrap()
        );
    }
}

#[test]
fn test_checksum_matches_file_contents() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("model.json");

    let trained = train_artifact(&small_config()).unwrap();
    assert!(trained.checksum().is_none());
    trained.save(&path).unwrap();

    let loaded = ModelArtifact::load(&path).unwrap();
    let bytes = std::fs::read(&path).unwrap();
    assert_eq!(loaded.checksum(), Some(calculate_checksum(&bytes).as_str()));
}

#[test]
fn test_loaded_artifact_serves_predictions() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("model.json");
    train_artifact(&small_config()).unwrap().save(&path).unwrap();

    let service = PredictionService::new(Arc::new(ModelArtifact::load(&path).unwrap()));
    for (label, input) in reference_profiles() {
        let result = service
            .predict(&input)
            .unwrap_or_else(|e| panic!("{} rejected: {}", label, e));
        assert!((0.0..=100.0).contains(&result.predicted_performance_index));
    }
}

#[test]
fn test_missing_file_is_io_error() {
    let dir = tempdir().unwrap();
    let err = ModelArtifact::load(dir.path().join("absent.json")).unwrap_err();
    assert!(matches!(err, ArtifactError::Io { .. }));
}

#[test]
fn test_truncated_file_is_parse_error() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("model.json");
    train_artifact(&small_config()).unwrap().save(&path).unwrap();

    let bytes = std::fs::read(&path).unwrap();
    std::fs::write(&path, &bytes[..bytes.len() / 2]).unwrap();

    let err = ModelArtifact::load(&path).unwrap_err();
    assert!(matches!(err, ArtifactError::Parse(_)));
}

#[test]
fn test_future_format_version_rejected() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("model.json");
    train_artifact(&small_config()).unwrap().save(&path).unwrap();

    let mut doc: serde_json::Value =
        serde_json::from_slice(&std::fs::read(&path).unwrap()).unwrap();
    doc["format_version"] = serde_json::json!(99);
    std::fs::write(&path, serde_json::to_vec(&doc).unwrap()).unwrap();

    let err = ModelArtifact::load(&path).unwrap_err();
    assert!(matches!(
        err,
        ArtifactError::UnsupportedVersion { found: 99, .. }
    ));
}
