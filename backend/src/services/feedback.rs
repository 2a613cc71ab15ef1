//! Advisory feedback for accepted inputs.

use crate::models::PredictionInput;

/// Message used when no other feedback rule fires.
pub const BALANCED_FEEDBACK: &str = "✅ Good balance of study, rest, and activities!";

/// Independent feedback conditions, in output order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedbackRule {
    LowSleep,
    LowStudy,
    FewSamplePapers,
    HighStudy,
    Extracurricular,
}

impl FeedbackRule {
    pub const ALL: [FeedbackRule; 5] = [
        FeedbackRule::LowSleep,
        FeedbackRule::LowStudy,
        FeedbackRule::FewSamplePapers,
        FeedbackRule::HighStudy,
        FeedbackRule::Extracurricular,
    ];

    pub fn fires(&self, input: &PredictionInput) -> bool {
        match self {
            FeedbackRule::LowSleep => input.sleep_hours < 6,
            FeedbackRule::LowStudy => input.hours_studied < 3,
            FeedbackRule::FewSamplePapers => input.sample_papers < 2,
            FeedbackRule::HighStudy => input.hours_studied > 10,
            FeedbackRule::Extracurricular => input.extracurricular,
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            FeedbackRule::LowSleep => {
                "⚠️ Low sleep may negatively impact performance. Aim for 7-8 hours."
            }
            FeedbackRule::LowStudy => "💡 Consider increasing study hours for better results.",
            FeedbackRule::FewSamplePapers => {
                "📝 Practicing more sample papers can significantly improve performance."
            }
            FeedbackRule::HighStudy => {
                "⚡ Great dedication! Make sure to take breaks to avoid burnout."
            }
            FeedbackRule::Extracurricular => {
                "🎯 Extracurricular activities contribute to well-rounded development!"
            }
        }
    }
}

/// Build the feedback list for an accepted input. Never empty.
pub fn generate(input: &PredictionInput) -> Vec<String> {
    let feedback: Vec<String> = FeedbackRule::ALL
        .iter()
        .filter(|rule| rule.fires(input))
        .map(|rule| rule.message().to_string())
        .collect();

    if feedback.is_empty() {
        vec![BALANCED_FEEDBACK.to_string()]
    } else {
        feedback
    }
}
