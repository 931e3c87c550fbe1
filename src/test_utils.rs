use crate::models::dto::request::AnswerSubmissionDto;

#[cfg(test)]
pub mod fixtures {
    use super::*;

    /// A quiz submission for a question about zero-shot prompting
    pub fn answer_submission(question_id: &str, value: i64, user_answer: &str) -> AnswerSubmissionDto {
        AnswerSubmissionDto {
            question_id: question_id.to_string(),
            value,
            question: "What do we call prompting a model without any examples?".to_string(),
            reference_answer: "Zero-shot prompting".to_string(),
            user_answer: user_answer.to_string(),
        }
    }

    /// A judge reply in the shape the model is asked to produce
    pub fn verdict_json(correct: bool, score: u8, feedback: &str) -> String {
        serde_json::json!({
            "correct": correct,
            "score": score,
            "feedback": feedback,
        })
        .to_string()
    }
}

#[cfg(test)]
pub mod test_helpers {
    use actix_web::http::StatusCode;

    /// Asserts that a status code represents an error (4xx or 5xx)
    pub fn assert_error_status(status: StatusCode) {
        assert!(
            status.is_client_error() || status.is_server_error(),
            "Expected error status, got: {}",
            status
        );
    }

    /// Asserts that a status code represents success (2xx)
    pub fn assert_success_status(status: StatusCode) {
        assert!(
            status.is_success(),
            "Expected success status, got: {}",
            status
        );
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::*;
    use crate::models::domain::GradingResult;

    #[test]
    fn test_fixtures_answer_submission() {
        let submission = answer_submission("zs-100", 100, "no examples");
        assert_eq!(submission.question_id, "zs-100");
        assert_eq!(submission.value, 100);
        assert_eq!(submission.user_answer, "no examples");
    }

    #[test]
    fn test_fixtures_verdict_json_decodes() {
        let result: GradingResult = serde_json::from_str(&verdict_json(true, 80, "Close")).unwrap();
        assert_eq!(result, GradingResult::new(true, 80u8, "Close"));
    }
}
