use serde::Deserialize;
use validator::{Validate, ValidationError};

use crate::models::domain::GradingRequest;

/// Rejects input that is empty after trimming, mirroring the disabled submit
/// button in the front end.
fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank"));
    }
    Ok(())
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CompletionRequestDto {
    #[validate(custom(function = "validate_not_blank"))]
    pub prompt: String,

    #[serde(default)]
    pub system_instruction: Option<String>,

    #[serde(default)]
    pub extended_reasoning: bool,
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct JudgementRequestDto {
    #[validate(custom(function = "validate_not_blank"))]
    pub question: String,

    #[validate(custom(function = "validate_not_blank"))]
    pub reference_answer: String,

    #[validate(custom(function = "validate_not_blank"))]
    pub user_answer: String,
}

impl From<JudgementRequestDto> for GradingRequest {
    fn from(dto: JudgementRequestDto) -> Self {
        GradingRequest::new(dto.question, dto.reference_answer, dto.user_answer)
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct AnswerSubmissionDto {
    #[validate(length(min = 1, max = 100), custom(function = "validate_not_blank"))]
    pub question_id: String,

    #[validate(range(min = 0, max = 10_000))]
    pub value: i64,

    #[validate(custom(function = "validate_not_blank"))]
    pub question: String,

    #[validate(custom(function = "validate_not_blank"))]
    pub reference_answer: String,

    #[validate(custom(function = "validate_not_blank"))]
    pub user_answer: String,
}

impl AnswerSubmissionDto {
    pub fn grading_request(&self) -> GradingRequest {
        GradingRequest::new(
            self.question.clone(),
            self.reference_answer.clone(),
            self.user_answer.clone(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn completion_request_defaults_optional_fields() {
        let dto: CompletionRequestDto =
            serde_json::from_str(r#"{"prompt":"Write a haiku"}"#).unwrap();

        assert_eq!(dto.system_instruction, None);
        assert!(!dto.extended_reasoning);
        assert!(dto.validate().is_ok());
    }

    #[test]
    fn blank_prompt_fails_validation() {
        let dto: CompletionRequestDto = serde_json::from_str(r#"{"prompt":"   \n"}"#).unwrap();
        let errors = dto.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("prompt"));
    }

    #[test]
    fn blank_user_answer_fails_validation() {
        let dto = JudgementRequestDto {
            question: "What is 2+2?".into(),
            reference_answer: "4".into(),
            user_answer: " ".into(),
        };
        let errors = dto.validate().unwrap_err();
        assert_eq!(errors.field_errors().len(), 1);
    }

    #[test]
    fn answer_submission_rejects_negative_value() {
        let dto: AnswerSubmissionDto = serde_json::from_str(
            r#"{"questionId":"q1","value":-100,"question":"q","referenceAnswer":"a","userAnswer":"b"}"#,
        )
        .unwrap();
        let errors = dto.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("value"));
    }

    #[test]
    fn answer_submission_rejects_value_above_cap() {
        let dto: AnswerSubmissionDto = serde_json::from_value(serde_json::json!({
            "questionId": "q1",
            "value": i64::MAX,
            "question": "q",
            "referenceAnswer": "a",
            "userAnswer": "b"
        }))
        .unwrap();
        let errors = dto.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("value"));
    }

    #[test]
    fn answer_submission_accepts_value_at_cap() {
        let dto: AnswerSubmissionDto = serde_json::from_str(
            r#"{"questionId":"q1","value":10000,"question":"q","referenceAnswer":"a","userAnswer":"b"}"#,
        )
        .unwrap();
        assert!(dto.validate().is_ok());
    }

    #[test]
    fn answer_submission_rejects_blank_question_id() {
        let dto: AnswerSubmissionDto = serde_json::from_str(
            r#"{"questionId":"   ","value":100,"question":"q","referenceAnswer":"a","userAnswer":"b"}"#,
        )
        .unwrap();
        let errors = dto.validate().unwrap_err();
        assert_eq!(errors.field_errors().len(), 1);
    }

    #[test]
    fn answer_submission_builds_grading_request() {
        let dto: AnswerSubmissionDto = serde_json::from_str(
            r#"{"questionId":"zs-1","value":200,"question":"What is zero-shot?","referenceAnswer":"No examples","userAnswer":"prompting without examples"}"#,
        )
        .unwrap();

        assert_eq!(
            dto.grading_request(),
            GradingRequest::new("What is zero-shot?", "No examples", "prompting without examples")
        );
    }
}
