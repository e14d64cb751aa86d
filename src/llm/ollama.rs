use musli::json;
use musli::{Decode, Encode};
use reqwest::blocking::Client;

use super::{GenerationRequest, GenerationResult, LlmClient, Usage};
use crate::error::GenerationError;

#[derive(Debug, Encode, Decode)]
struct OllamaMessage {
    role: String,
    content: String,
}

#[derive(Debug, Encode)]
struct OllamaOptions {
    temperature: f32,
}

#[derive(Debug, Encode)]
struct OllamaChatRequest {
    model: String,
    stream: bool,
    options: OllamaOptions,
    messages: Vec<OllamaMessage>,
}

#[derive(Debug, Decode)]
struct OllamaChatResponse {
    message: OllamaMessage,
    #[musli(default)]
    prompt_eval_count: Option<u32>,
    #[musli(default)]
    eval_count: Option<u32>,
}

/// Synchronous Ollama client using /api/chat.
pub struct OllamaClient {
    http: Client,
    base_url: String,
    model: String,
}

impl OllamaClient {
    pub fn new(base_url: impl Into<String>, model: impl Into<String>) -> Result<Self, GenerationError> {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        let http = Client::builder()
            .build()
            .map_err(|e| GenerationError::Transport {
                url: base_url.clone(),
                message: format!("failed to build HTTP client: {e}"),
            })?;

        Ok(Self {
            http,
            base_url,
            model: model.into(),
        })
    }

    fn chat_url(&self) -> String {
        format!("{}/api/chat", self.base_url)
    }
}

fn encode_request(request: &GenerationRequest) -> Result<String, GenerationError> {
    let body = OllamaChatRequest {
        model: request.model.clone(),
        stream: false,
        options: OllamaOptions {
            temperature: request.temperature,
        },
        messages: request
            .messages
            .iter()
            .map(|m| OllamaMessage {
                role: m.role.as_str().to_string(),
                content: m.content.clone(),
            })
            .collect(),
    };

    json::to_string(&body)
        .map_err(|e| GenerationError::Decode(format!("failed to encode Ollama JSON request: {e}")))
}

fn decode_response(text: &str) -> Result<GenerationResult, GenerationError> {
    let parsed: OllamaChatResponse = json::from_str(text)
        .map_err(|e| GenerationError::Decode(format!("failed to decode Ollama JSON: {e}")))?;

    let usage = match (parsed.prompt_eval_count, parsed.eval_count) {
        (None, None) => None,
        (prompt, completion) => Some(Usage {
            prompt_tokens: prompt,
            completion_tokens: completion,
            total_tokens: Some(prompt.unwrap_or(0) + completion.unwrap_or(0)),
        }),
    };

    Ok(GenerationResult {
        text: parsed.message.content,
        usage,
    })
}

impl LlmClient for OllamaClient {
    fn model(&self) -> &str {
        &self.model
    }

    fn send(&self, request: &GenerationRequest) -> Result<GenerationResult, GenerationError> {
        let body = encode_request(request)?;
        log::trace!("Ollama request body: {body}");

        let url = self.chat_url();
        log::info!("Calling Ollama model {:?} at {}", &request.model, url);

        let resp = self
            .http
            .post(&url)
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .map_err(|e| GenerationError::Transport {
                url: url.clone(),
                message: e.to_string(),
            })?;

        if !resp.status().is_success() {
            let status = resp.status();
            return Err(GenerationError::Http {
                status: status.as_u16(),
                body: resp.text().unwrap_or_default(),
            });
        }

        let resp_text = resp
            .text()
            .map_err(|e| GenerationError::Decode(format!("failed to read Ollama response body: {e}")))?;

        log::trace!("Ollama raw JSON response: {resp_text}");

        decode_response(&resp_text)
    }
}
