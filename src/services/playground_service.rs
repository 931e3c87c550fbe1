use std::sync::Arc;

use tokio::sync::RwLock;

use crate::{
    models::domain::{ChatSession, ChatTurn},
    services::completion_service::CompletionService,
};

/// The playground conversation held in memory for the life of the process.
pub struct PlaygroundService {
    completion_service: Arc<CompletionService>,
    session: RwLock<ChatSession>,
}

impl PlaygroundService {
    pub fn new(completion_service: Arc<CompletionService>) -> Self {
        Self {
            completion_service,
            session: RwLock::new(ChatSession::new()),
        }
    }

    /// Appends the user turn, asks the model, then appends its reply.
    ///
    /// The history lock is not held while the model call is in flight, so
    /// concurrent sends interleave in completion order. Returns the two turns
    /// this call appended.
    pub async fn send(
        &self,
        prompt: &str,
        system_instruction: Option<&str>,
        extended_reasoning: bool,
    ) -> (ChatTurn, ChatTurn) {
        let user_turn = ChatTurn::user(prompt);
        self.session.write().await.append(user_turn.clone());

        let model_turn = match self
            .completion_service
            .try_complete(prompt, system_instruction, extended_reasoning)
            .await
        {
            Ok(text) => ChatTurn::model(text),
            Err(e) => ChatTurn::model_error(format!("Error: {}", e)),
        };
        self.session.write().await.append(model_turn.clone());

        (user_turn, model_turn)
    }

    pub async fn history(&self) -> Vec<ChatTurn> {
        self.session.read().await.turns().to_vec()
    }

    pub async fn clear(&self) {
        self.session.write().await.clear();
    }
}
