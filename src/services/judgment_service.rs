use std::sync::Arc;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::{
    constants::judge_prompt::{
        build_grading_prompt, JSON_MIME_TYPE, JUDGE_EMPTY_RESPONSE_FEEDBACK,
        JUDGE_FAILURE_FEEDBACK,
    },
    models::domain::{GradingRequest, GradingResult},
    services::generative_backend::{GenerateRequest, GenerativeBackend},
};

static JSON_FENCE_OPEN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^```json\s*").expect("JSON_FENCE_OPEN is a valid regex pattern"));
static FENCE_OPEN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^```\s*").expect("FENCE_OPEN is a valid regex pattern"));
static FENCE_CLOSE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s*```$").expect("FENCE_CLOSE is a valid regex pattern"));

/// Verdict used when the model answered with nothing at all. The learner is
/// not blocked: the attempt is recorded as unverified rather than failed.
pub fn empty_response_policy() -> GradingResult {
    GradingResult::fallback(JUDGE_EMPTY_RESPONSE_FEEDBACK)
}

/// Verdict used when the call failed or the reply could not be decoded.
pub fn judge_failure_fallback() -> GradingResult {
    GradingResult::fallback(JUDGE_FAILURE_FEEDBACK)
}

/// Trims the reply and removes a surrounding ```` ```json ```` or ```` ``` ```` fence.
pub fn strip_code_fence(text: &str) -> String {
    let text = text.trim();
    let opener: &Regex = if text.starts_with("```json") {
        &*JSON_FENCE_OPEN
    } else if text.starts_with("```") {
        &*FENCE_OPEN
    } else {
        return text.to_string();
    };

    let without_open = opener.replace(text, "");
    FENCE_CLOSE.replace(&without_open, "").into_owned()
}

/// Decodes the model reply into a verdict; the reply must be a JSON object
/// with a boolean `correct`, a numeric `score` and a string `feedback`.
pub fn parse_verdict(text: &str) -> Result<GradingResult, serde_json::Error> {
    serde_json::from_str(&strip_code_fence(text))
}

/// Grades free-text quiz answers with the generation backend.
pub struct JudgmentService {
    backend: Arc<dyn GenerativeBackend>,
    model: String,
    max_output_tokens: u32,
}

impl JudgmentService {
    pub fn new(backend: Arc<dyn GenerativeBackend>, model: impl Into<String>, max_output_tokens: u32) -> Self {
        Self {
            backend,
            model: model.into(),
            max_output_tokens,
        }
    }

    pub async fn judge(&self, question: &str, reference_answer: &str, user_answer: &str) -> GradingResult {
        self.judge_request(&GradingRequest::new(question, reference_answer, user_answer))
            .await
    }

    /// Always resolves to a verdict; see [`empty_response_policy`] and
    /// [`judge_failure_fallback`] for the non-happy paths.
    pub async fn judge_request(&self, request: &GradingRequest) -> GradingResult {
        let generate = GenerateRequest::new(self.model.clone(), build_grading_prompt(request))
            .with_response_mime_type(JSON_MIME_TYPE)
            .with_max_output_tokens(self.max_output_tokens);

        let text = match self.backend.generate(generate).await {
            Ok(Some(text)) if !text.is_empty() => text,
            Ok(_) => {
                log::warn!("Judge returned empty response");
                return empty_response_policy();
            }
            Err(e) => {
                log::error!("Judge request failed: {}", e);
                return judge_failure_fallback();
            }
        };

        match parse_verdict(&text) {
            Ok(result) => result,
            Err(e) => {
                log::error!("Judge reply could not be decoded: {}", e);
                judge_failure_fallback()
            }
        }
    }
}
