//! Prediction result and score shaping.

use serde::{Deserialize, Serialize};

/// Upper bound applied to raw model scores.
pub const SCORE_CEILING: f64 = 100.0;

/// Successful prediction payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionResult {
    /// Predicted score, rounded to two decimals
    pub predicted_performance_index: f64,
    /// Advisory messages in rule evaluation order
    pub feedback: Vec<String>,
}

impl PredictionResult {
    /// Shape a raw model score: clamp from above, then round.
    pub fn from_raw_score(raw: f64, feedback: Vec<String>) -> Self {
        Self {
            predicted_performance_index: round_score(clamp_score(raw)),
            feedback,
        }
    }
}

/// Clamp a score to [`SCORE_CEILING`].
///
/// Only the upper bound is enforced. Scores below zero pass through.
pub fn clamp_score(raw: f64) -> f64 {
    raw.min(SCORE_CEILING)
}

/// Round to two decimal places, ties to even.
pub fn round_score(score: f64) -> f64 {
    (score * 100.0).round_ties_even() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamp_only_from_above() {
        assert_eq!(clamp_score(104.2), 100.0);
        assert_eq!(clamp_score(100.0), 100.0);
        assert_eq!(clamp_score(87.5), 87.5);
        assert_eq!(clamp_score(-3.0), -3.0);
    }

    #[test]
    fn test_round_two_decimals() {
        assert_eq!(round_score(85.6749), 85.67);
        assert_eq!(round_score(85.675_1), 85.68);
        assert_eq!(round_score(42.0), 42.0);
    }

    #[test]
    fn test_round_exact_ties_to_even() {
        assert_eq!(round_score(87.125), 87.12);
        assert_eq!(round_score(0.125), 0.12);
        assert_eq!(round_score(0.375), 0.38);
        assert_eq!(round_score(-0.125), -0.12);
    }

    #[test]
    fn test_from_raw_score() {
        let result = PredictionResult::from_raw_score(100.456, vec!["ok".to_string()]);
        assert_eq!(result.predicted_performance_index, 100.0);
        assert_eq!(result.feedback, vec!["ok".to_string()]);
    }
}
