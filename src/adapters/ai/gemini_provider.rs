//! Gemini provider - implementation of AiProvider against Google's
//! Generative Language REST API.
//!
//! Calls `models/{model}:generateContent`. No retry or backoff: any failure
//! surfaces to the caller as a single generic generation error, per the
//! service's error model.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::config::AiConfig;
use crate::domain::chat::ChatRole;
use crate::ports::{AiError, AiProvider, ChatTurn};

/// Gemini REST adapter.
pub struct GeminiProvider {
    config: AiConfig,
    client: Client,
}

impl GeminiProvider {
    /// Creates a provider from the AI configuration.
    pub fn new(config: AiConfig) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .expect("Failed to create HTTP client");

        Self { config, client }
    }

    fn generate_url(&self, model: &str) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent?key={}",
            self.config.base_url,
            model,
            self.config.api_key(),
        )
    }

    fn generation_config(&self) -> GenerationConfig {
        GenerationConfig {
            temperature: self.config.temperature,
            max_output_tokens: self.config.max_output_tokens,
        }
    }

    async fn send(&self, model: &str, request: &GenerateRequest) -> Result<String, AiError> {
        let response = self
            .client
            .post(self.generate_url(model))
            .json(request)
            .send()
            .await
            .map_err(|e| AiError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AiError::Provider {
                status: status.as_u16(),
                message: body,
            });
        }

        let parsed: GenerateResponse = response
            .json()
            .await
            .map_err(|e| AiError::Parse(e.to_string()))?;

        parsed
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content.parts.into_iter().next())
            .and_then(|p| p.text)
            .filter(|t| !t.is_empty())
            .ok_or(AiError::EmptyResponse)
    }
}

#[async_trait]
impl AiProvider for GeminiProvider {
    async fn generate(&self, prompt: &str) -> Result<String, AiError> {
        let request = GenerateRequest {
            contents: vec![Content::user_text(prompt)],
            system_instruction: None,
            generation_config: self.generation_config(),
        };
        self.send(&self.config.text_model, &request).await
    }

    async fn generate_chat(
        &self,
        system_instruction: &str,
        history: &[ChatTurn],
        message: &str,
    ) -> Result<String, AiError> {
        let mut contents: Vec<Content> = history
            .iter()
            .map(|turn| Content {
                // Gemini names the assistant role "model"
                role: match turn.role {
                    ChatRole::User => "user".to_string(),
                    ChatRole::Assistant => "model".to_string(),
                },
                parts: vec![Part::text(&turn.text)],
            })
            .collect();
        contents.push(Content::user_text(message));

        let request = GenerateRequest {
            contents,
            system_instruction: Some(SystemInstruction {
                parts: vec![Part::text(system_instruction)],
            }),
            generation_config: self.generation_config(),
        };
        self.send(&self.config.text_model, &request).await
    }

    async fn generate_with_image(
        &self,
        prompt: &str,
        image: &[u8],
        mime_type: &str,
    ) -> Result<String, AiError> {
        use base64::Engine;

        let request = GenerateRequest {
            contents: vec![Content {
                role: "user".to_string(),
                parts: vec![
                    Part::text(prompt),
                    Part {
                        text: None,
                        inline_data: Some(InlineData {
                            mime_type: mime_type.to_string(),
                            data: base64::engine::general_purpose::STANDARD.encode(image),
                        }),
                    },
                ],
            }],
            system_instruction: None,
            generation_config: self.generation_config(),
        };
        self.send(&self.config.vision_model, &request).await
    }
}

// ----- Gemini API types -----

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest {
    contents: Vec<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    system_instruction: Option<SystemInstruction>,
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize, Deserialize)]
struct Content {
    #[serde(default)]
    role: String,
    parts: Vec<Part>,
}

impl Content {
    fn user_text(text: &str) -> Self {
        Self {
            role: "user".to_string(),
            parts: vec![Part::text(text)],
        }
    }
}

#[derive(Debug, Serialize)]
struct SystemInstruction {
    parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Part {
    #[serde(skip_serializing_if = "Option::is_none")]
    text: Option<String>,
    #[serde(rename = "inlineData", skip_serializing_if = "Option::is_none")]
    inline_data: Option<InlineData>,
}

impl Part {
    fn text(text: &str) -> Self {
        Self {
            text: Some(text.to_string()),
            inline_data: None,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct InlineData {
    #[serde(rename = "mimeType")]
    mime_type: String,
    data: String,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: CandidateContent,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    temperature: f32,
    max_output_tokens: u32,
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::Secret;

    fn config() -> AiConfig {
        AiConfig {
            gemini_api_key: Secret::new("AIzaTest".to_string()),
            text_model: "gemini-1.5-pro".to_string(),
            vision_model: "gemini-1.5-pro".to_string(),
            base_url: "https://generativelanguage.googleapis.com".to_string(),
            temperature: 0.7,
            max_output_tokens: 2048,
            timeout_secs: 60,
        }
    }

    #[test]
    fn generate_url_embeds_model_and_key() {
        let provider = GeminiProvider::new(config());
        let url = provider.generate_url("gemini-1.5-pro");
        assert!(url.contains("/v1beta/models/gemini-1.5-pro:generateContent"));
        assert!(url.contains("key=AIzaTest"));
    }

    #[test]
    fn response_text_is_extracted() {
        let body = r#"{
            "candidates": [
                { "content": { "parts": [ { "text": "hello" } ] } }
            ]
        }"#;
        let parsed: GenerateResponse = serde_json::from_str(body).unwrap();
        let text = parsed
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content.parts.into_iter().next())
            .and_then(|p| p.text);
        assert_eq!(text.as_deref(), Some("hello"));
    }

    #[test]
    fn request_serializes_camel_case() {
        let request = GenerateRequest {
            contents: vec![Content::user_text("hi")],
            system_instruction: Some(SystemInstruction {
                parts: vec![Part::text("be brief")],
            }),
            generation_config: GenerationConfig {
                temperature: 0.7,
                max_output_tokens: 2048,
            },
        };
        let json = serde_json::to_value(&request).unwrap();
        assert!(json.get("systemInstruction").is_some());
        assert_eq!(json["generationConfig"]["maxOutputTokens"], 2048);
        assert_eq!(json["contents"][0]["role"], "user");
    }
}
