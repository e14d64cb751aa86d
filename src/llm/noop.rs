use super::{GenerationRequest, GenerationResult, LlmClient, Role};
use crate::error::GenerationError;

/// No-op / dummy model client for development with --no-model or provider=none.
///
/// Echoes the first line of the user prompt so the rest of the pipeline
/// (reflow, preview, changelog merge) can be exercised offline.
pub struct NoopClient;

impl LlmClient for NoopClient {
    fn model(&self) -> &str {
        "none"
    }

    fn send(&self, request: &GenerationRequest) -> Result<GenerationResult, GenerationError> {
        let first_line = request
            .messages
            .iter()
            .find(|m| m.role == Role::User)
            .and_then(|m| m.content.lines().next())
            .unwrap_or_default();

        Ok(GenerationResult {
            text: format!("chore: dummy response (LLM disabled)\n\nPrompt began with: {first_line}"),
            usage: None,
        })
    }
}
