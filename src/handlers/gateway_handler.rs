use actix_web::{post, web, HttpResponse};
use validator::Validate;

use crate::{
    app_state::AppState,
    errors::AppError,
    models::{
        domain::GradingRequest,
        dto::{
            request::{CompletionRequestDto, JudgementRequestDto},
            response::CompletionResponseDto,
        },
    },
};

#[post("/api/completions")]
pub async fn create_completion(
    state: web::Data<AppState>,
    request: web::Json<CompletionRequestDto>,
) -> Result<HttpResponse, AppError> {
    let request = request.into_inner();
    request.validate()?;

    let text = state
        .completion_service
        .complete(
            &request.prompt,
            request.system_instruction.as_deref(),
            request.extended_reasoning,
        )
        .await;
    Ok(HttpResponse::Ok().json(CompletionResponseDto { text }))
}

#[post("/api/judgements")]
pub async fn create_judgement(
    state: web::Data<AppState>,
    request: web::Json<JudgementRequestDto>,
) -> Result<HttpResponse, AppError> {
    let request = request.into_inner();
    request.validate()?;

    let grading_request: GradingRequest = request.into();
    let result = state.judgment_service.judge_request(&grading_request).await;
    Ok(HttpResponse::Ok().json(result))
}
