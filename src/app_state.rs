use std::sync::Arc;

use crate::{
    config::Config,
    services::{
        completion_service::CompletionService,
        generative_backend::{GeminiClient, GenerativeBackend},
        judgment_service::JudgmentService,
        playground_service::PlaygroundService,
        quiz_board_service::QuizBoardService,
    },
};

#[derive(Clone)]
pub struct AppState {
    pub completion_service: Arc<CompletionService>,
    pub judgment_service: Arc<JudgmentService>,
    pub playground_service: Arc<PlaygroundService>,
    pub quiz_board_service: Arc<QuizBoardService>,
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let backend: Arc<dyn GenerativeBackend> = Arc::new(GeminiClient::new(&config));
        Self::with_backend(config, backend)
    }

    /// Wires every service onto `backend`; tests pass a stub here.
    pub fn with_backend(config: Config, backend: Arc<dyn GenerativeBackend>) -> Self {
        let completion_service = Arc::new(CompletionService::new(
            Arc::clone(&backend),
            config.gemini_model.clone(),
            config.thinking_budget,
        ));
        let judgment_service = Arc::new(JudgmentService::new(
            backend,
            config.gemini_model.clone(),
            config.judge_max_output_tokens,
        ));

        let playground_service = Arc::new(PlaygroundService::new(Arc::clone(&completion_service)));
        let quiz_board_service = Arc::new(QuizBoardService::new(Arc::clone(&judgment_service)));

        Self {
            completion_service,
            judgment_service,
            playground_service,
            quiz_board_service,
            config: Arc::new(config),
        }
    }
}
