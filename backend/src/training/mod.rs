//! Offline training of the performance model.
//!
//! Everything here runs in the `train-model` binary, never in the server. The
//! pipeline is: synthesize data, split, fit a bootstrapped random forest,
//! measure it on the holdout split, and wrap the result in a [`ModelArtifact`].
//! Every random draw comes from one seeded `StdRng`, so a given
//! [`TrainingConfig`] always produces the same forest.

pub mod dataset;
pub mod tree;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info};

use crate::artifact::{ModelArtifact, RandomForest, TrainingMetrics, TrainingParams};
use crate::models::{PredictionInput, FEATURE_NAMES};

pub use dataset::Dataset;
pub use tree::{fit_tree, TreeParams};

/// Error in training configuration.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TrainingError {
    #[error("invalid training configuration: {0}")]
    InvalidConfig(String),
}

/// Parameters of a training run.
#[derive(Debug, Clone, PartialEq)]
pub struct TrainingConfig {
    pub n_samples: usize,
    pub n_estimators: usize,
    pub max_depth: usize,
    pub min_samples_split: usize,
    pub test_fraction: f64,
    pub seed: u64,
}

impl Default for TrainingConfig {
    fn default() -> Self {
        Self {
            n_samples: 2000,
            n_estimators: 100,
            max_depth: 15,
            min_samples_split: 2,
            test_fraction: 0.2,
            seed: 42,
        }
    }
}

impl TrainingConfig {
    pub fn validate(&self) -> Result<(), TrainingError> {
        if self.n_estimators == 0 {
            return Err(TrainingError::InvalidConfig(
                "at least one tree is required".to_string(),
            ));
        }
        if self.max_depth == 0 {
            return Err(TrainingError::InvalidConfig(
                "max_depth must be at least 1".to_string(),
            ));
        }
        if self.min_samples_split < 2 {
            return Err(TrainingError::InvalidConfig(
                "min_samples_split must be at least 2".to_string(),
            ));
        }
        if !(self.test_fraction > 0.0 && self.test_fraction < 1.0) {
            return Err(TrainingError::InvalidConfig(format!(
                "test_fraction must be in (0, 1), got {}",
                self.test_fraction
            )));
        }
        let n_test = (self.n_samples as f64 * self.test_fraction).round() as usize;
        if n_test == 0 || n_test >= self.n_samples {
            return Err(TrainingError::InvalidConfig(format!(
                "{} samples with test_fraction {} leaves an empty split",
                self.n_samples, self.test_fraction
            )));
        }
        Ok(())
    }

    fn params(&self) -> TrainingParams {
        TrainingParams {
            n_estimators: self.n_estimators,
            max_depth: self.max_depth,
            min_samples_split: self.min_samples_split,
            seed: self.seed,
            n_samples: self.n_samples,
            test_fraction: self.test_fraction,
        }
    }
}

/// Fit a random forest on bootstrap samples of `data`.
pub fn train_forest<R: Rng + ?Sized>(
    data: &Dataset,
    n_estimators: usize,
    params: &TreeParams,
    rng: &mut R,
) -> RandomForest {
    let n = data.len();
    if n == 0 {
        return RandomForest::new(Vec::new());
    }
    let trees = (0..n_estimators)
        .map(|i| {
            let sample: Vec<usize> = (0..n).map(|_| rng.gen_range(0..n)).collect();
            let tree = fit_tree(data, &sample, params);
            debug!(
                tree = i,
                leaves = tree.n_leaves(),
                depth = tree.depth(),
                "Fitted tree"
            );
            tree
        })
        .collect();
    RandomForest::new(trees)
}

/// Coefficient of determination and mean absolute error of `forest` on `data`.
pub fn evaluate(forest: &RandomForest, data: &Dataset) -> (f64, f64) {
    if data.is_empty() {
        return (0.0, 0.0);
    }

    let n = data.len() as f64;
    let mean = data.targets.iter().sum::<f64>() / n;
    let mut ss_res = 0.0;
    let mut ss_tot = 0.0;
    let mut abs_err = 0.0;
    for (row, &y) in data.features.iter().zip(&data.targets) {
        let pred = forest.predict_row(row);
        ss_res += (y - pred).powi(2);
        ss_tot += (y - mean).powi(2);
        abs_err += (y - pred).abs();
    }

    let r2 = if ss_tot > 0.0 { 1.0 - ss_res / ss_tot } else { 0.0 };
    (r2, abs_err / n)
}

/// Run the full pipeline and produce an artifact ready to save.
pub fn train_artifact(config: &TrainingConfig) -> Result<ModelArtifact, TrainingError> {
    config.validate()?;

    let mut rng = StdRng::seed_from_u64(config.seed);
    let data = Dataset::synthetic(config.n_samples, &mut rng);
    let (train, test) = data.split(config.test_fraction, &mut rng);
    info!(
        n_train = train.len(),
        n_test = test.len(),
        "Generated synthetic dataset"
    );

    let tree_params = TreeParams {
        max_depth: config.max_depth,
        min_samples_split: config.min_samples_split,
    };
    let forest = train_forest(&train, config.n_estimators, &tree_params, &mut rng);
    let (r2, mae) = evaluate(&forest, &test);
    info!(trees = forest.num_trees(), r2, mae, "Trained random forest");

    let metrics = TrainingMetrics {
        r2,
        mae,
        n_train: train.len(),
        n_test: test.len(),
    };
    let feature_names = FEATURE_NAMES.iter().map(|s| s.to_string()).collect();
    Ok(ModelArtifact::new(
        feature_names,
        config.params(),
        metrics,
        forest,
    ))
}

/// Hand-picked students used to sanity-check a freshly trained model.
pub fn reference_profiles() -> Vec<(&'static str, PredictionInput)> {
    vec![
        (
            "High achiever maintaining good habits",
            PredictionInput::new(8, 96, false, 6, 5),
        ),
        (
            "Good student with balanced routine",
            PredictionInput::new(8, 85, true, 7, 5),
        ),
        ("Average student", PredictionInput::new(5, 70, false, 6, 3)),
        ("Struggling student", PredictionInput::new(2, 50, false, 4, 1)),
        (
            "Excellent student working hard",
            PredictionInput::new(10, 90, true, 7, 8),
        ),
        (
            "High achiever slacking off",
            PredictionInput::new(3, 95, false, 5, 2),
        ),
    ]
}
