use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};

use super::{GenerationRequest, GenerationResult, LlmClient, Usage};
use crate::error::GenerationError;

/// Minimal request/response structs for the Chat Completions API, as spoken
/// by OpenAI, Mistral and most compatible gateways.
#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    temperature: f32,
    messages: Vec<ChatMessage<'a>>,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
    usage: Option<ChatUsage>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatMessageResponse,
}

#[derive(Deserialize)]
struct ChatMessageResponse {
    content: Option<String>,
}

#[derive(Deserialize)]
struct ChatUsage {
    prompt_tokens: Option<u32>,
    completion_tokens: Option<u32>,
    total_tokens: Option<u32>,
}

/// Chat Completions backend.
pub struct OpenAiClient {
    client: Client,
    api_key: String,
    model: String,
    api_base_url: String,
}

impl OpenAiClient {
    pub fn new(api_key: String, model: String, api_base_url: String) -> Result<Self, GenerationError> {
        let api_base_url = api_base_url.trim_end_matches('/').to_string();
        let client = Client::builder()
            .build()
            .map_err(|e| GenerationError::Transport {
                url: api_base_url.clone(),
                message: format!("failed to build HTTP client: {e}"),
            })?;

        Ok(OpenAiClient {
            client,
            api_key,
            model,
            api_base_url,
        })
    }

    fn chat_url(&self) -> String {
        if self.api_base_url.ends_with("/v1") {
            format!("{}/chat/completions", self.api_base_url)
        } else {
            format!("{}/v1/chat/completions", self.api_base_url)
        }
    }
}

impl LlmClient for OpenAiClient {
    fn model(&self) -> &str {
        &self.model
    }

    fn send(&self, request: &GenerationRequest) -> Result<GenerationResult, GenerationError> {
        let url = self.chat_url();
        let body = ChatRequest {
            model: &request.model,
            temperature: request.temperature,
            messages: request
                .messages
                .iter()
                .map(|m| ChatMessage {
                    role: m.role.as_str(),
                    content: &m.content,
                })
                .collect(),
        };

        log::info!("Calling model {:?} at {}", &request.model, url);

        let resp = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .map_err(|e| GenerationError::Transport {
                url: url.clone(),
                message: e.to_string(),
            })?;

        if !resp.status().is_success() {
            let status = resp.status();
            let text = resp.text().unwrap_or_default();
            return Err(GenerationError::Http {
                status: status.as_u16(),
                body: text,
            });
        }

        let chat_resp: ChatResponse = resp
            .json()
            .map_err(|e| GenerationError::Decode(e.to_string()))?;

        let text = chat_resp
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content.unwrap_or_default())
            .ok_or(GenerationError::NoChoices)?;

        let usage = chat_resp.usage.map(|u| Usage {
            prompt_tokens: u.prompt_tokens,
            completion_tokens: u.completion_tokens,
            total_tokens: u.total_tokens,
        });

        Ok(GenerationResult { text, usage })
    }
}
