use serde::{Deserialize, Serialize};
use serde_json::Number;

/// One grading attempt: the quiz question, the official answer and what the
/// learner typed. Built per submission and dropped after the call.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GradingRequest {
    pub question: String,
    pub reference_answer: String,
    pub user_answer: String,
}

impl GradingRequest {
    pub fn new(
        question: impl Into<String>,
        reference_answer: impl Into<String>,
        user_answer: impl Into<String>,
    ) -> Self {
        Self {
            question: question.into(),
            reference_answer: reference_answer.into(),
            user_answer: user_answer.into(),
        }
    }
}

/// Verdict returned by the judge.
///
/// Deserialization is the strict decode step: all three fields must be
/// present with the right JSON types. `score` keeps the number exactly as the
/// model wrote it (95 stays 95, 87.5 stays 87.5).
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct GradingResult {
    pub correct: bool,
    pub score: Number,
    pub feedback: String,
}

impl GradingResult {
    pub fn new(correct: bool, score: impl Into<Number>, feedback: impl Into<String>) -> Self {
        Self {
            correct,
            score: score.into(),
            feedback: feedback.into(),
        }
    }

    /// Zero-score, incorrect verdict carrying a diagnostic message.
    pub fn fallback(feedback: impl Into<String>) -> Self {
        Self::new(false, 0u8, feedback)
    }
}
