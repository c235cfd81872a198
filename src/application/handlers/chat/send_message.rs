//! SendMessageHandler - one turn of the coaching conversation.

use std::sync::Arc;

use crate::domain::chat::ChatMessage;
use crate::domain::foundation::{DomainError, Timestamp, UserId};
use crate::ports::{AiProvider, ChatRepository, ChatTurn, UserRepository};

/// Messages of prior context handed to the model.
const HISTORY_CONTEXT_MESSAGES: u32 = 5;

/// Command to send a chat message.
#[derive(Debug, Clone)]
pub struct SendMessageCommand {
    pub user_id: UserId,
    pub message: String,
}

/// Handler for chat turns.
///
/// The user message is persisted before the model call, so a failed
/// generation still leaves the question in the history.
pub struct SendMessageHandler {
    users: Arc<dyn UserRepository>,
    chats: Arc<dyn ChatRepository>,
    ai: Arc<dyn AiProvider>,
}

impl SendMessageHandler {
    pub fn new(
        users: Arc<dyn UserRepository>,
        chats: Arc<dyn ChatRepository>,
        ai: Arc<dyn AiProvider>,
    ) -> Self {
        Self { users, chats, ai }
    }

    pub async fn handle(&self, cmd: SendMessageCommand) -> Result<ChatMessage, DomainError> {
        if cmd.message.trim().is_empty() {
            return Err(DomainError::validation("message", "Mensagem vazia"));
        }

        let user = self.users.find_by_id(&cmd.user_id).await?;

        let history: Vec<ChatTurn> = self
            .chats
            .recent(&cmd.user_id, HISTORY_CONTEXT_MESSAGES)
            .await?
            .into_iter()
            .map(|m| ChatTurn::new(m.role, m.message))
            .collect();

        let now = Timestamp::now();
        let user_message = ChatMessage::from_user(cmd.user_id, &cmd.message, now);
        self.chats.save(&user_message).await?;

        let persona = format!(
            r#"Você é o Coach FitAI, um especialista em fitness, musculação e nutrição de elite.
O usuário se chama {name}.
Objetivo do usuário: {goal}.
Nível de experiência: {level}.

Seja motivador, técnico mas acessível, e foque em segurança e resultados baseados em ciência.
Mantenha as respostas concisas e diretas ao ponto."#,
            name = user
                .as_ref()
                .and_then(|u| u.name.as_deref())
                .unwrap_or("Atleta"),
            goal = user
                .as_ref()
                .and_then(|u| u.fitness_goal)
                .map(|g| format!("{:?}", g))
                .unwrap_or_else(|| "Melhorar a forma física".to_string()),
            level = user
                .as_ref()
                .and_then(|u| u.experience_level)
                .map(|l| format!("{:?}", l))
                .unwrap_or_else(|| "Iniciante".to_string()),
        );

        let reply = self
            .ai
            .generate_chat(&persona, &history, &cmd.message)
            .await
            .map_err(DomainError::from)?;

        let assistant_message = ChatMessage::from_assistant(cmd.user_id, reply, Timestamp::now());
        self.chats.save(&assistant_message).await?;

        Ok(assistant_message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::Mutex;

    use crate::application::handlers::auth::test_support::MockUserRepository;
    use crate::domain::chat::ChatRole;
    use crate::ports::AiError;

    pub(crate) struct MockChats {
        pub messages: Mutex<Vec<ChatMessage>>,
    }

    impl MockChats {
        pub(crate) fn new() -> Self {
            Self {
                messages: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl ChatRepository for MockChats {
        async fn save(&self, message: &ChatMessage) -> Result<(), DomainError> {
            self.messages.lock().unwrap().push(message.clone());
            Ok(())
        }

        async fn history(&self, user_id: &UserId) -> Result<Vec<ChatMessage>, DomainError> {
            Ok(self
                .messages
                .lock()
                .unwrap()
                .iter()
                .filter(|m| &m.user_id == user_id)
                .cloned()
                .collect())
        }

        async fn recent(
            &self,
            user_id: &UserId,
            limit: u32,
        ) -> Result<Vec<ChatMessage>, DomainError> {
            let mut all = self.history(user_id).await?;
            let skip = all.len().saturating_sub(limit as usize);
            Ok(all.split_off(skip))
        }

        async fn delete_all_for_user(&self, user_id: &UserId) -> Result<(), DomainError> {
            self.messages
                .lock()
                .unwrap()
                .retain(|m| &m.user_id != user_id);
            Ok(())
        }
    }

    struct EchoAi {
        last_history_len: Mutex<usize>,
    }

    #[async_trait]
    impl AiProvider for EchoAi {
        async fn generate(&self, _prompt: &str) -> Result<String, AiError> {
            Ok("ok".to_string())
        }

        async fn generate_chat(
            &self,
            _system_instruction: &str,
            history: &[ChatTurn],
            message: &str,
        ) -> Result<String, AiError> {
            *self.last_history_len.lock().unwrap() = history.len();
            Ok(format!("re: {}", message))
        }

        async fn generate_with_image(
            &self,
            _prompt: &str,
            _image: &[u8],
            _mime_type: &str,
        ) -> Result<String, AiError> {
            Ok("ok".to_string())
        }
    }

    #[tokio::test]
    async fn turn_saves_both_messages() {
        let users = Arc::new(MockUserRepository::new());
        let chats = Arc::new(MockChats::new());
        let ai = Arc::new(EchoAi {
            last_history_len: Mutex::new(0),
        });
        let user_id = UserId::new();

        let reply = SendMessageHandler::new(users, chats.clone(), ai)
            .handle(SendMessageCommand {
                user_id,
                message: "Quantas séries de supino?".to_string(),
            })
            .await
            .unwrap();

        assert_eq!(reply.role, ChatRole::Assistant);
        assert_eq!(reply.message, "re: Quantas séries de supino?");

        let saved = chats.history(&user_id).await.unwrap();
        assert_eq!(saved.len(), 2);
        assert_eq!(saved[0].role, ChatRole::User);
        assert_eq!(saved[1].role, ChatRole::Assistant);
    }

    #[tokio::test]
    async fn context_is_capped_at_five_messages() {
        let users = Arc::new(MockUserRepository::new());
        let chats = Arc::new(MockChats::new());
        let ai = Arc::new(EchoAi {
            last_history_len: Mutex::new(0),
        });
        let user_id = UserId::new();

        // seed eight prior messages
        for i in 0..8 {
            chats
                .save(&ChatMessage::from_user(
                    user_id,
                    format!("m{}", i),
                    Timestamp::now(),
                ))
                .await
                .unwrap();
        }

        SendMessageHandler::new(users, chats, ai.clone())
            .handle(SendMessageCommand {
                user_id,
                message: "nova".to_string(),
            })
            .await
            .unwrap();

        assert_eq!(*ai.last_history_len.lock().unwrap(), 5);
    }

    #[tokio::test]
    async fn empty_message_rejected() {
        let err = SendMessageHandler::new(
            Arc::new(MockUserRepository::new()),
            Arc::new(MockChats::new()),
            Arc::new(EchoAi {
                last_history_len: Mutex::new(0),
            }),
        )
        .handle(SendMessageCommand {
            user_id: UserId::new(),
            message: "   ".to_string(),
        })
        .await
        .unwrap_err();

        assert_eq!(err.code, crate::domain::foundation::ErrorCode::ValidationFailed);
    }
}
