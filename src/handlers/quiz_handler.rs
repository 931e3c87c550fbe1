use actix_web::{delete, get, post, web, HttpResponse};
use validator::Validate;

use crate::{app_state::AppState, errors::AppError, models::dto::request::AnswerSubmissionDto};

#[get("/api/quiz/scoreboard")]
pub async fn get_scoreboard(state: web::Data<AppState>) -> HttpResponse {
    HttpResponse::Ok().json(state.quiz_board_service.scoreboard().await)
}

#[post("/api/quiz/answers")]
pub async fn submit_answer(
    state: web::Data<AppState>,
    request: web::Json<AnswerSubmissionDto>,
) -> Result<HttpResponse, AppError> {
    let request = request.into_inner();
    request.validate()?;

    let outcome = state.quiz_board_service.submit_answer(request).await?;
    Ok(HttpResponse::Ok().json(outcome))
}

#[delete("/api/quiz/scoreboard")]
pub async fn reset_scoreboard(state: web::Data<AppState>) -> HttpResponse {
    state.quiz_board_service.reset().await;
    HttpResponse::NoContent().finish()
}
