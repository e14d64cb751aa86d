pub mod noop;
pub mod ollama;
pub mod openai;
pub(crate) mod prompt_builder;
mod prompts;
mod usage;

use crate::error::GenerationError;

/// Who a chat message speaks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    System,
    User,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::System => "system",
            Role::User => "user",
        }
    }
}

#[derive(Debug, Clone)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

/// One request to a generation backend. Built per call and then dropped.
#[derive(Debug, Clone)]
pub struct GenerationRequest {
    pub model: String,
    pub temperature: f32,
    pub messages: Vec<ChatMessage>,
}

impl GenerationRequest {
    /// The usual two-message exchange: instructions, then the task.
    pub fn new(model: &str, temperature: f32, system: &str, user: &str) -> Self {
        Self {
            model: model.to_string(),
            temperature,
            messages: vec![
                ChatMessage {
                    role: Role::System,
                    content: system.to_string(),
                },
                ChatMessage {
                    role: Role::User,
                    content: user.to_string(),
                },
            ],
        }
    }
}

/// Token accounting as reported by the backend, when it reports any.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Usage {
    pub prompt_tokens: Option<u32>,
    pub completion_tokens: Option<u32>,
    pub total_tokens: Option<u32>,
}

/// Raw backend answer. `text` may be empty; [`complete`] rejects that.
#[derive(Debug, Clone, Default)]
pub struct GenerationResult {
    pub text: String,
    pub usage: Option<Usage>,
}

/// Trait for talking to a text generation backend.
pub trait LlmClient: Send + Sync {
    /// Model identifier sent with every request.
    fn model(&self) -> &str;

    /// Send one request and return the first completion, unvalidated.
    fn send(&self, request: &GenerationRequest) -> Result<GenerationResult, GenerationError>;
}

/// Ask `client` for one completion and return its trimmed text.
///
/// Token usage is logged when the backend reports it. An empty or
/// whitespace-only answer is an error, never a valid result.
pub fn complete(
    client: &dyn LlmClient,
    system: &str,
    user: &str,
    temperature: f32,
) -> Result<String, GenerationError> {
    let request = GenerationRequest::new(client.model(), temperature, system, user);

    log::trace!("System prompt:\n{}", truncate(system, 2000));
    log::trace!("User prompt:\n{}", truncate(user, 3000));

    let result = client.send(&request)?;

    if let Some(usage) = &result.usage {
        usage::report(usage);
    }

    let text = result.text.trim();
    if text.is_empty() {
        return Err(GenerationError::EmptyCompletion);
    }

    log::trace!("Model response:\n{text}");
    Ok(text.to_string())
}

/// Truncate long strings for debug logging.
fn truncate(s: &str, max_chars: usize) -> String {
    match s.char_indices().nth(max_chars) {
        None => s.to_string(),
        Some((idx, _)) => format!("{}...\n[truncated {} bytes]", &s[..idx], s.len() - idx),
    }
}
