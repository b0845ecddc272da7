//! OpenAI-compatible chat-completions client.
//!
//! Groq serves the same wire format as OpenAI, so a single client
//! covers both providers; only the base URL, model, and key differ.

use reqwest::{header, Client};
use serde::{Deserialize, Serialize};

use crate::error::SummaryError;

const OPENAI_BASE_URL: &str = "https://api.openai.com/v1";
const OPENAI_MODEL: &str = "gpt-3.5-turbo";
const GROQ_BASE_URL: &str = "https://api.groq.com/openai/v1";
const GROQ_MODEL: &str = "llama-3.1-8b-instant";

/// Client for one chat-completions endpoint.
pub struct CompletionBackend {
    client: Client,
    base_url: String,
    api_key: String,
    model: String,
}

#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    max_tokens: u32,
    temperature: f32,
}

#[derive(Debug, Serialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: MessageResponse,
}

#[derive(Debug, Deserialize)]
struct MessageResponse {
    content: Option<String>,
}

impl CompletionBackend {
    fn new(base_url: impl Into<String>, model: impl Into<String>, api_key: String) -> Self {
        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::CONTENT_TYPE,
            header::HeaderValue::from_static("application/json"),
        );
        // Header construction from static values cannot fail.
        let client = Client::builder()
            .default_headers(headers)
            .build()
            .unwrap_or_default();

        Self {
            client,
            base_url: base_url.into(),
            api_key,
            model: model.into(),
        }
    }

    /// Backend against the OpenAI API.
    pub fn openai(api_key: String) -> Self {
        Self::new(OPENAI_BASE_URL, OPENAI_MODEL, api_key)
    }

    /// Backend against Groq's OpenAI-compatible API.
    pub fn groq(api_key: String) -> Self {
        Self::new(GROQ_BASE_URL, GROQ_MODEL, api_key)
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Sends one system + user turn, bounded output, low temperature.
    pub async fn complete(
        &self,
        system: &str,
        user: &str,
        max_tokens: u32,
        temperature: f32,
    ) -> Result<String, SummaryError> {
        let request = ChatRequest {
            model: self.model.clone(),
            messages: vec![
                ChatMessage {
                    role: "system".to_string(),
                    content: system.to_string(),
                },
                ChatMessage {
                    role: "user".to_string(),
                    content: user.to_string(),
                },
            ],
            max_tokens,
            temperature,
        };

        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .header(header::AUTHORIZATION, format!("Bearer {}", self.api_key))
            .json(&request)
            .send()
            .await
            .map_err(|e| SummaryError::Network(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(SummaryError::RequestFailed(format!(
                "HTTP {}: {}",
                status, body
            )));
        }

        let chat_response: ChatResponse = response
            .json()
            .await
            .map_err(|e| SummaryError::Parse(e.to_string()))?;

        let content = chat_response
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| SummaryError::Parse("no choices in response".to_string()))?;

        Ok(content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn provider_constructors_pick_their_models() {
        assert_eq!(CompletionBackend::groq("k".into()).model(), GROQ_MODEL);
        assert_eq!(CompletionBackend::openai("k".into()).model(), OPENAI_MODEL);
    }

    #[test]
    fn chat_request_serializes_roles_in_order() {
        let request = ChatRequest {
            model: "m".into(),
            messages: vec![
                ChatMessage {
                    role: "system".into(),
                    content: "sys".into(),
                },
                ChatMessage {
                    role: "user".into(),
                    content: "a\nb".into(),
                },
            ],
            max_tokens: 200,
            temperature: 0.3,
        };

        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["messages"][0]["role"], "system");
        assert_eq!(json["messages"][1]["content"], "a\nb");
        assert_eq!(json["max_tokens"], 200);
    }
}
