use crate::cli_args::Cli;
use crate::error::ConfigError;
use serde::Deserialize;
use std::env;
use std::fs;
use std::path::PathBuf;
use std::str::FromStr;

/// Temperature used when nothing else is configured.
pub const DEFAULT_TEMPERATURE: f32 = 0.2;

/// Which generation backend to talk to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Provider {
    Mistral,
    OpenAi,
    Ollama,
    /// Dummy responses, no network.
    None,
}

impl Provider {
    pub fn as_str(&self) -> &'static str {
        match self {
            Provider::Mistral => "mistral",
            Provider::OpenAi => "openai",
            Provider::Ollama => "ollama",
            Provider::None => "none",
        }
    }

    fn default_model(&self) -> &'static str {
        match self {
            Provider::Mistral => "mistral-small-latest",
            Provider::OpenAi => "gpt-4o-mini",
            Provider::Ollama => "llama3.2",
            Provider::None => "none",
        }
    }

    fn default_base_url(&self) -> &'static str {
        match self {
            Provider::Mistral => "https://api.mistral.ai/v1",
            Provider::OpenAi => "https://api.openai.com/v1",
            Provider::Ollama => "http://localhost:11434",
            Provider::None => "",
        }
    }

    /// Environment variable holding the key, for providers that need one.
    fn api_key_env(&self) -> Option<&'static str> {
        match self {
            Provider::Mistral => Some("MISTRAL_API_KEY"),
            Provider::OpenAi => Some("OPENAI_API_KEY"),
            Provider::Ollama | Provider::None => None,
        }
    }
}

impl FromStr for Provider {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "mistral" => Ok(Provider::Mistral),
            "openai" => Ok(Provider::OpenAi),
            "ollama" => Ok(Provider::Ollama),
            "none" => Ok(Provider::None),
            other => Err(ConfigError::UnknownProvider(other.to_string())),
        }
    }
}

/// Final resolved configuration for gitscribe.
#[derive(Debug, Clone)]
pub struct Config {
    pub provider: Provider,
    pub model: String,
    pub api_key: Option<String>,
    pub base_url: String,
    pub temperature: f32,
}

impl Config {
    /// Build the final config from CLI flags, environment, TOML file, and defaults.
    ///
    /// Precedence:
    ///   1. CLI flags (`--provider`, `--model`, `--api-key`, ...)
    ///   2. Env vars `GITSCRIBE_PROVIDER`, `GITSCRIBE_MODEL`, `GITSCRIBE_BASE_URL`,
    ///      `GITSCRIBE_TEMPERATURE` and the provider's key variable
    ///   3. TOML `~/.config/gitscribe.toml`
    ///   4. Per-provider defaults (Mistral unless told otherwise)
    pub fn from_sources(cli: &Cli) -> Result<Self, ConfigError> {
        let file_cfg = load_file_config().unwrap_or_default();
        Self::resolve(cli, |key| env::var(key).ok(), file_cfg)
    }

    fn resolve(
        cli: &Cli,
        env_var: impl Fn(&str) -> Option<String>,
        file_cfg: FileConfig,
    ) -> Result<Self, ConfigError> {
        let model_choice = cli
            .model
            .clone()
            .or_else(|| env_var("GITSCRIBE_MODEL"))
            .or(file_cfg.model);

        let no_model = cli.no_model
            || model_choice
                .as_deref()
                .is_some_and(|m| m.eq_ignore_ascii_case("none"));

        let provider = if no_model {
            Provider::None
        } else {
            match cli
                .provider
                .clone()
                .or_else(|| env_var("GITSCRIBE_PROVIDER"))
                .or(file_cfg.provider)
            {
                Some(name) => name.parse()?,
                None => Provider::Mistral,
            }
        };

        let model = match provider {
            Provider::None => provider.default_model().to_string(),
            _ => model_choice.unwrap_or_else(|| provider.default_model().to_string()),
        };

        let base_url = cli
            .base_url
            .clone()
            .or_else(|| env_var("GITSCRIBE_BASE_URL"))
            .or(file_cfg.base_url)
            .unwrap_or_else(|| provider.default_base_url().to_string());

        let temperature = match (cli.temperature, env_var("GITSCRIBE_TEMPERATURE")) {
            (Some(t), _) => t,
            (None, Some(raw)) => raw
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidTemperature(raw.clone()))?,
            (None, None) => file_cfg.temperature.unwrap_or(DEFAULT_TEMPERATURE),
        };
        if !(0.0..=2.0).contains(&temperature) {
            return Err(ConfigError::InvalidTemperature(temperature.to_string()));
        }

        let api_key = match provider.api_key_env() {
            Some(var) => Some(
                cli.api_key
                    .clone()
                    .or_else(|| env_var(var))
                    .or(file_cfg.api_key)
                    .filter(|k| !k.trim().is_empty())
                    .ok_or(ConfigError::MissingApiKey(var))?,
            ),
            None => None,
        };

        log::debug!("Resolved provider={} model={}", provider.as_str(), model);

        Ok(Config {
            provider,
            model,
            api_key,
            base_url,
            temperature,
        })
    }
}

#[derive(Debug, Default, Deserialize)]
struct FileConfig {
    pub provider: Option<String>,
    /// Default model to use when not provided via CLI or env.
    pub model: Option<String>,
    pub api_key: Option<String>,
    pub base_url: Option<String>,
    pub temperature: Option<f32>,
}

/// Return `~/.config/gitscribe.toml`
fn config_path() -> Option<PathBuf> {
    let home = dirs::home_dir()?;
    Some(home.join(".config").join("gitscribe.toml"))
}

fn load_file_config() -> Option<FileConfig> {
    let path = config_path()?;
    if !path.exists() {
        return None;
    }

    let data = fs::read_to_string(&path).ok()?;
    match toml::from_str::<FileConfig>(&data) {
        Ok(cfg) => Some(cfg),
        Err(e) => {
            log::warn!("Ignoring malformed config file {}: {e}", path.display());
            None
        }
    }
}
