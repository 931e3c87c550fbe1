use serde::Serialize;

use crate::models::domain::{GradingResult, QuizScoreboard};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompletionResponseDto {
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnswerOutcomeDto {
    pub result: GradingResult,
    pub score: i64,
    pub answered_ids: Vec<String>,
}

impl AnswerOutcomeDto {
    pub fn new(result: GradingResult, scoreboard: QuizScoreboard) -> Self {
        Self {
            result,
            score: scoreboard.score,
            answered_ids: scoreboard.answered_ids,
        }
    }
}
