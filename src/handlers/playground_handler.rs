use actix_web::{delete, get, post, web, HttpResponse};
use validator::Validate;

use crate::{app_state::AppState, errors::AppError, models::dto::request::CompletionRequestDto};

#[get("/api/playground/messages")]
pub async fn get_messages(state: web::Data<AppState>) -> HttpResponse {
    HttpResponse::Ok().json(state.playground_service.history().await)
}

#[post("/api/playground/messages")]
pub async fn send_message(
    state: web::Data<AppState>,
    request: web::Json<CompletionRequestDto>,
) -> Result<HttpResponse, AppError> {
    let request = request.into_inner();
    request.validate()?;

    let (user_turn, model_turn) = state
        .playground_service
        .send(
            &request.prompt,
            request.system_instruction.as_deref(),
            request.extended_reasoning,
        )
        .await;
    Ok(HttpResponse::Ok().json(vec![user_turn, model_turn]))
}

#[delete("/api/playground/messages")]
pub async fn clear_messages(state: web::Data<AppState>) -> HttpResponse {
    state.playground_service.clear().await;
    HttpResponse::NoContent().finish()
}
