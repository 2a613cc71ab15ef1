//! Synthetic training data for the performance model.
//!
//! Previous scores are the baseline; current habits move the target up or
//! down by a few points, plus Gaussian noise. Targets are clipped to [0, 100],
//! which also bounds every leaf mean of a tree fitted on them.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::models::FEATURE_NAMES;

const NOISE_STD: f64 = 2.0;
const OPTIMAL_SLEEP: f64 = 7.0;

/// Feature rows in [`FEATURE_NAMES`] order plus their targets.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    pub features: Vec<Vec<f64>>,
    pub targets: Vec<f64>,
}

impl Dataset {
    pub fn new(features: Vec<Vec<f64>>, targets: Vec<f64>) -> Self {
        debug_assert_eq!(features.len(), targets.len());
        Self { features, targets }
    }

    pub fn len(&self) -> usize {
        self.targets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }

    pub fn n_features(&self) -> usize {
        self.features.first().map_or(0, Vec::len)
    }

    #[inline]
    pub fn value(&self, row: usize, feature: usize) -> f64 {
        self.features[row][feature]
    }

    /// Generate `n_samples` synthetic students.
    pub fn synthetic<R: Rng + ?Sized>(n_samples: usize, rng: &mut R) -> Self {
        let mut features = Vec::with_capacity(n_samples);
        let mut targets = Vec::with_capacity(n_samples);

        for _ in 0..n_samples {
            let hours_studied = rng.gen_range(1..10) as f64;
            let previous_scores = rng.gen_range(40..100) as f64;
            let extracurricular = rng.gen_range(0..2) as f64;
            let sleep_hours = rng.gen_range(4..10) as f64;
            let sample_papers = rng.gen_range(0..10) as f64;
            let noise = sample_normal(rng, 0.0, NOISE_STD);

            targets.push(performance_target(
                hours_studied,
                previous_scores,
                extracurricular,
                sleep_hours,
                sample_papers,
                noise,
            ));
            features.push(vec![
                hours_studied,
                previous_scores,
                extracurricular,
                sleep_hours,
                sample_papers,
            ]);
        }

        debug_assert!(features.iter().all(|r| r.len() == FEATURE_NAMES.len()));
        Self::new(features, targets)
    }

    /// Shuffle and split into `(train, test)`.
    ///
    /// The test split holds `round(len * test_fraction)` rows.
    pub fn split<R: Rng + ?Sized>(&self, test_fraction: f64, rng: &mut R) -> (Dataset, Dataset) {
        let mut indices: Vec<usize> = (0..self.len()).collect();
        indices.shuffle(rng);

        let n_test = ((self.len() as f64) * test_fraction).round() as usize;
        let n_test = n_test.min(self.len());
        let (test_idx, train_idx) = indices.split_at(n_test);
        (self.subset(train_idx), self.subset(test_idx))
    }

    fn subset(&self, indices: &[usize]) -> Dataset {
        Dataset::new(
            indices.iter().map(|&i| self.features[i].clone()).collect(),
            indices.iter().map(|&i| self.targets[i]).collect(),
        )
    }
}

/// Ground-truth performance index for one synthetic student.
pub fn performance_target(
    hours_studied: f64,
    previous_scores: f64,
    extracurricular: f64,
    sleep_hours: f64,
    sample_papers: f64,
    noise: f64,
) -> f64 {
    let study_effect = (hours_studied - 5.0) * 0.8;
    let sleep_effect = -(sleep_hours - OPTIMAL_SLEEP).abs() * 0.5;
    let papers_effect = sample_papers * 0.4;
    let extra_effect = extracurricular * 2.0;

    let score = previous_scores + study_effect + sleep_effect + papers_effect + extra_effect + noise;
    score.clamp(0.0, 100.0)
}

/// Box-Muller draw from N(mean, std).
fn sample_normal<R: Rng + ?Sized>(rng: &mut R, mean: f64, std: f64) -> f64 {
    // 1 - u keeps the log argument in (0, 1]
    let u1: f64 = 1.0 - rng.gen::<f64>();
    let u2: f64 = rng.gen::<f64>();
    let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
    mean + std * z
}
