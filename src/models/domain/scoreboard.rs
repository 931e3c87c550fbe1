use serde::{Deserialize, Serialize};

use crate::errors::{AppError, AppResult};

/// Running state of one quiz board: each question can be answered once and
/// only correct answers add the question's value.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizScoreboard {
    pub score: i64,
    pub answered_ids: Vec<String>,
}

impl QuizScoreboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_answered(&self, question_id: &str) -> bool {
        self.answered_ids.iter().any(|id| id == question_id)
    }

    /// Marks the question answered and credits `value` when `correct`.
    /// Incorrect answers are not penalised. Nothing changes on error.
    pub fn record(&mut self, question_id: &str, value: i64, correct: bool) -> AppResult<()> {
        if self.is_answered(question_id) {
            return Err(AppError::AlreadyExists(format!(
                "Question '{}' has already been answered",
                question_id
            )));
        }

        let score = if correct {
            self.score.checked_add(value).ok_or_else(|| {
                AppError::ValidationError(format!(
                    "Question value {} would overflow the score",
                    value
                ))
            })?
        } else {
            self.score
        };

        self.answered_ids.push(question_id.to_string());
        self.score = score;

        Ok(())
    }

    pub fn reset(&mut self) {
        self.score = 0;
        self.answered_ids.clear();
    }
}
