use anyhow::{Context, Result};
use log::debug;

use crate::config::{Config, Provider};
use crate::llm::LlmClient;
use crate::llm::noop::NoopClient;
use crate::llm::ollama::OllamaClient;
use crate::llm::openai::OpenAiClient;

/// Build the LLM client based on CLI + config.
pub fn build_llm_client(cfg: &Config) -> Result<Box<dyn LlmClient>> {
    debug!(
        "Using {} backend with model: {}",
        cfg.provider.as_str(),
        cfg.model
    );

    let client: Box<dyn LlmClient> = match cfg.provider {
        Provider::None => Box::new(NoopClient),
        Provider::Ollama => Box::new(
            OllamaClient::new(cfg.base_url.clone(), cfg.model.clone())
                .context("failed to set up the Ollama client")?,
        ),
        Provider::Mistral | Provider::OpenAi => {
            let key = cfg
                .api_key
                .clone()
                .context("an API key is required for this provider")?;
            Box::new(
                OpenAiClient::new(key, cfg.model.clone(), cfg.base_url.clone())
                    .context("failed to set up the chat completions client")?,
            )
        }
    };

    Ok(client)
}
