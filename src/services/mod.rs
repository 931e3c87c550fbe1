pub mod completion_service;
pub mod generative_backend;
pub mod judgment_service;
pub mod playground_service;
pub mod quiz_board_service;
