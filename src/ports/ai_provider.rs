//! AI provider port - interface to the generative text/vision model.
//!
//! All AI-generation flows are pure request/transform: build a prompt, call
//! the model, parse the textual reply. There is no retry or backoff; any
//! failure surfaces as a single generic generation error to the caller.

use async_trait::async_trait;

use crate::domain::chat::ChatRole;
use crate::domain::foundation::{DomainError, ErrorCode};

/// One prior turn of a conversation, passed to the model as context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatTurn {
    pub role: ChatRole,
    pub text: String,
}

impl ChatTurn {
    pub fn new(role: ChatRole, text: impl Into<String>) -> Self {
        Self {
            role,
            text: text.into(),
        }
    }
}

/// Port for generative model calls.
#[async_trait]
pub trait AiProvider: Send + Sync {
    /// Generates text from a single prompt.
    async fn generate(&self, prompt: &str) -> Result<String, AiError>;

    /// Generates a conversational reply with a system persona and prior
    /// turns as context.
    async fn generate_chat(
        &self,
        system_instruction: &str,
        history: &[ChatTurn],
        message: &str,
    ) -> Result<String, AiError>;

    /// Generates text from a prompt plus an inline image.
    async fn generate_with_image(
        &self,
        prompt: &str,
        image: &[u8],
        mime_type: &str,
    ) -> Result<String, AiError>;
}

/// AI provider errors.
#[derive(Debug, thiserror::Error)]
pub enum AiError {
    /// Transport-level failure reaching the provider.
    #[error("network error: {0}")]
    Network(String),

    /// The provider answered with a non-success status.
    #[error("provider error ({status}): {message}")]
    Provider { status: u16, message: String },

    /// The provider's response body could not be decoded.
    #[error("parse error: {0}")]
    Parse(String),

    /// The reply contained no usable text candidate.
    #[error("empty response from model")]
    EmptyResponse,
}

impl From<AiError> for DomainError {
    /// Every provider failure maps to the same user-facing generation error;
    /// the specifics go to the log, not the response.
    fn from(err: AiError) -> Self {
        tracing::error!(error = %err, "AI provider call failed");
        DomainError::new(ErrorCode::GenerationFailed, "Falha ao gerar conteúdo")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ai_error_displays() {
        let err = AiError::Provider {
            status: 429,
            message: "quota".to_string(),
        };
        assert_eq!(err.to_string(), "provider error (429): quota");
    }

    #[test]
    fn any_ai_error_maps_to_generation_failed() {
        for err in [
            AiError::Network("down".to_string()),
            AiError::Parse("bad json".to_string()),
            AiError::EmptyResponse,
        ] {
            let domain: DomainError = err.into();
            assert_eq!(domain.code, ErrorCode::GenerationFailed);
        }
    }

    #[test]
    fn chat_turn_constructor() {
        let turn = ChatTurn::new(ChatRole::User, "hello");
        assert_eq!(turn.role, ChatRole::User);
        assert_eq!(turn.text, "hello");
    }
}
