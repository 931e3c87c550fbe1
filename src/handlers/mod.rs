pub mod gateway_handler;
pub mod health_handler;
pub mod playground_handler;
pub mod quiz_handler;

use actix_web::web;

pub use gateway_handler::{create_completion, create_judgement};
pub use health_handler::health_check;
pub use playground_handler::{clear_messages, get_messages, send_message};
pub use quiz_handler::{get_scoreboard, reset_scoreboard, submit_answer};

/// Registers every route on an app or scope.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(health_check)
        .service(create_completion)
        .service(create_judgement)
        .service(get_messages)
        .service(send_message)
        .service(clear_messages)
        .service(get_scoreboard)
        .service(submit_answer)
        .service(reset_scoreboard);
}
