use std::sync::Arc;

use tokio::sync::RwLock;

use crate::{
    errors::{AppError, AppResult},
    models::{
        domain::QuizScoreboard,
        dto::{request::AnswerSubmissionDto, response::AnswerOutcomeDto},
    },
    services::judgment_service::JudgmentService,
};

/// Score keeping for the quiz board. Answers are graded by the judge and each
/// question is accepted once.
pub struct QuizBoardService {
    judgment_service: Arc<JudgmentService>,
    scoreboard: RwLock<QuizScoreboard>,
}

impl QuizBoardService {
    pub fn new(judgment_service: Arc<JudgmentService>) -> Self {
        Self {
            judgment_service,
            scoreboard: RwLock::new(QuizScoreboard::new()),
        }
    }

    pub async fn submit_answer(&self, submission: AnswerSubmissionDto) -> AppResult<AnswerOutcomeDto> {
        if self.scoreboard.read().await.is_answered(&submission.question_id) {
            return Err(AppError::AlreadyExists(format!(
                "Question '{}' has already been answered",
                submission.question_id
            )));
        }

        let result = self
            .judgment_service
            .judge_request(&submission.grading_request())
            .await;

        // Re-checked under the write lock: a concurrent submission for the
        // same question may have finished first.
        let mut scoreboard = self.scoreboard.write().await;
        scoreboard.record(&submission.question_id, submission.value, result.correct)?;

        log::info!(
            "Question {} answered (correct: {}), score now {}",
            submission.question_id,
            result.correct,
            scoreboard.score
        );

        Ok(AnswerOutcomeDto::new(result, scoreboard.clone()))
    }

    pub async fn scoreboard(&self) -> QuizScoreboard {
        self.scoreboard.read().await.clone()
    }

    pub async fn reset(&self) {
        self.scoreboard.write().await.reset();
    }
}
