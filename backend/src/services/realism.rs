//! Realism envelope checks for prediction inputs.
//!
//! Schema bounds only say each field is individually in range. The rules here
//! say whether the combination describes a plausible daily routine. Rules are
//! evaluated in [`RealismRule::ALL`] order and the first violation wins, so the
//! order decides which message a caller sees.

use serde::{Deserialize, Serialize};

use crate::models::PredictionInput;

/// Static hint returned alongside every realism rejection.
pub const SUGGESTION: &str =
    "Please enter realistic values that represent an actual student's daily routine.";

const HOURS_PER_DAY: i64 = 24;
const MAX_STUDY_HOURS: i64 = 16;
const MIN_SLEEP_HOURS: i64 = 4;
const MAX_SLEEP_HOURS: i64 = 12;
const HEAVY_STUDY_HOURS: i64 = 12;
const HEAVY_STUDY_MIN_SLEEP: i64 = 6;
const MAX_SAMPLE_PAPERS: i64 = 15;

/// Identifier of a realism rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RealismRule {
    /// Study plus sleep exceed the hours in a day
    DayOverflow,
    StudyOverload,
    SleepDeprivation,
    ExcessiveSleep,
    /// Heavy study on short sleep
    UnsustainableBalance,
    InvalidPreviousScore,
    ExcessivePractice,
    /// Little study, no practice and a weak record
    LowEffort,
}

impl RealismRule {
    /// All rules in evaluation order.
    pub const ALL: [RealismRule; 8] = [
        RealismRule::DayOverflow,
        RealismRule::StudyOverload,
        RealismRule::SleepDeprivation,
        RealismRule::ExcessiveSleep,
        RealismRule::UnsustainableBalance,
        RealismRule::InvalidPreviousScore,
        RealismRule::ExcessivePractice,
        RealismRule::LowEffort,
    ];

    /// Whether `input` breaks this rule.
    pub fn is_violated(&self, input: &PredictionInput) -> bool {
        let study = input.hours_studied;
        let sleep = input.sleep_hours;
        match self {
            RealismRule::DayOverflow => study.saturating_add(sleep) > HOURS_PER_DAY,
            RealismRule::StudyOverload => study > MAX_STUDY_HOURS,
            RealismRule::SleepDeprivation => sleep < MIN_SLEEP_HOURS,
            RealismRule::ExcessiveSleep => sleep > MAX_SLEEP_HOURS,
            RealismRule::UnsustainableBalance => {
                study > HEAVY_STUDY_HOURS && sleep < HEAVY_STUDY_MIN_SLEEP
            }
            RealismRule::InvalidPreviousScore => !(0..=100).contains(&input.previous_scores),
            RealismRule::ExcessivePractice => input.sample_papers > MAX_SAMPLE_PAPERS,
            RealismRule::LowEffort => {
                study < 2 && input.sample_papers == 0 && input.previous_scores < 50
            }
        }
    }

    /// Human-readable rejection reason for `input`.
    pub fn message(&self, input: &PredictionInput) -> String {
        let study = input.hours_studied;
        let sleep = input.sleep_hours;
        match self {
            RealismRule::DayOverflow => format!(
                "Impossible scenario: Study hours ({}) + Sleep hours ({}) = {} hours exceeds 24 hours in a day!",
                study,
                sleep,
                study.saturating_add(sleep)
            ),
            RealismRule::StudyOverload => format!(
                "Unrealistic: Studying {} hours per day is not sustainable. Maximum realistic study time is 16 hours.",
                study
            ),
            RealismRule::SleepDeprivation => format!(
                "Health concern: {} hours of sleep is dangerously low. Minimum recommended sleep is 4 hours (though 6-8 is ideal).",
                sleep
            ),
            RealismRule::ExcessiveSleep => format!(
                "Unrealistic: Sleeping {} hours per day is excessive. Maximum realistic sleep is 12 hours.",
                sleep
            ),
            RealismRule::UnsustainableBalance => format!(
                "Unsustainable: Studying {} hours with only {} hours of sleep will lead to burnout and poor performance.",
                study, sleep
            ),
            RealismRule::InvalidPreviousScore => format!(
                "Invalid: Previous scores must be between 0 and 100, got {}.",
                input.previous_scores
            ),
            RealismRule::ExcessivePractice => format!(
                "Unrealistic: Practicing {} sample papers regularly is excessive. Maximum realistic is 15.",
                input.sample_papers
            ),
            RealismRule::LowEffort => format!(
                "Warning: With only {} hours of study, no practice papers, and low previous scores ({}), improvement is unlikely without increased effort.",
                study, input.previous_scores
            ),
        }
    }
}

/// A realism rule violation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct RealismRejection {
    pub rule: RealismRule,
    pub message: String,
}

/// Check `input` against the realism envelope.
///
/// # Errors
/// Returns the first violated rule in evaluation order.
pub fn validate(input: &PredictionInput) -> Result<(), RealismRejection> {
    match RealismRule::ALL
        .iter()
        .find(|rule| rule.is_violated(input))
    {
        Some(rule) => Err(RealismRejection {
            rule: *rule,
            message: rule.message(input),
        }),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rejected_by(input: PredictionInput) -> Option<RealismRule> {
        validate(&input).err().map(|r| r.rule)
    }

    #[test]
    fn test_balanced_routine_accepted() {
        assert!(validate(&PredictionInput::new(8, 85, true, 7, 5)).is_ok());
    }

    #[test]
    fn test_day_overflow_wins_over_study_overload() {
        let input = PredictionInput::new(20, 90, false, 10, 3);
        let rejection = validate(&input).unwrap_err();
        assert_eq!(rejection.rule, RealismRule::DayOverflow);
        assert!(rejection.message.contains("= 30 hours exceeds 24 hours"));
    }

    #[test]
    fn test_day_overflow_message() {
        let rejection = validate(&PredictionInput::new(20, 90, false, 6, 3)).unwrap_err();
        assert_eq!(
            rejection.message,
            "Impossible scenario: Study hours (20) + Sleep hours (6) = 26 hours exceeds 24 hours in a day!"
        );
        assert_eq!(rejection.to_string(), rejection.message);
    }

    #[test]
    fn test_study_boundary() {
        assert_eq!(rejected_by(PredictionInput::new(16, 70, false, 8, 5)), None);
        assert_eq!(
            rejected_by(PredictionInput::new(17, 70, false, 7, 5)),
            Some(RealismRule::StudyOverload)
        );
    }

    #[test]
    fn test_sleep_bounds() {
        assert_eq!(
            rejected_by(PredictionInput::new(8, 70, false, 3, 5)),
            Some(RealismRule::SleepDeprivation)
        );
        assert_eq!(rejected_by(PredictionInput::new(8, 70, false, 4, 5)), None);
        assert_eq!(rejected_by(PredictionInput::new(8, 70, false, 12, 5)), None);
        assert_eq!(
            rejected_by(PredictionInput::new(8, 70, false, 13, 5)),
            Some(RealismRule::ExcessiveSleep)
        );
    }

    #[test]
    fn test_unsustainable_balance() {
        assert_eq!(
            rejected_by(PredictionInput::new(13, 70, false, 5, 5)),
            Some(RealismRule::UnsustainableBalance)
        );
        assert_eq!(rejected_by(PredictionInput::new(12, 70, false, 5, 5)), None);
        assert_eq!(rejected_by(PredictionInput::new(13, 70, false, 6, 5)), None);
    }

    #[test]
    fn test_previous_score_rechecked() {
        assert_eq!(
            rejected_by(PredictionInput::new(8, 101, false, 7, 5)),
            Some(RealismRule::InvalidPreviousScore)
        );
        assert_eq!(
            rejected_by(PredictionInput::new(8, -1, false, 7, 5)),
            Some(RealismRule::InvalidPreviousScore)
        );
    }

    #[test]
    fn test_excessive_practice() {
        assert_eq!(rejected_by(PredictionInput::new(8, 70, false, 7, 15)), None);
        assert_eq!(
            rejected_by(PredictionInput::new(8, 70, false, 7, 16)),
            Some(RealismRule::ExcessivePractice)
        );
    }

    #[test]
    fn test_low_effort_profile() {
        let rejection = validate(&PredictionInput::new(1, 30, false, 8, 0)).unwrap_err();
        assert_eq!(rejection.rule, RealismRule::LowEffort);
        assert!(rejection.message.contains("low previous scores (30)"));

        // Any one of the three conditions missing lets the input through
        assert_eq!(rejected_by(PredictionInput::new(2, 30, false, 8, 0)), None);
        assert_eq!(rejected_by(PredictionInput::new(1, 30, false, 8, 1)), None);
        assert_eq!(rejected_by(PredictionInput::new(1, 50, false, 8, 0)), None);
    }

    #[test]
    fn test_rule_order_is_stable() {
        assert_eq!(RealismRule::ALL[0], RealismRule::DayOverflow);
        assert_eq!(RealismRule::ALL[7], RealismRule::LowEffort);
    }
}
