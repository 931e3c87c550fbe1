pub mod chat;
pub mod grading;
pub mod scoreboard;
pub use chat::{ChatRole, ChatSession, ChatTurn};
pub use grading::{GradingRequest, GradingResult};
pub use scoreboard::QuizScoreboard;
