use std::path::PathBuf;

use clap::{ArgAction, ArgGroup, Parser, Subcommand};

/// CLI options
#[derive(Parser, Debug)]
#[command(
    name = "gitscribe",
    version,
    about = "LLM-assisted Git commit message and changelog generator"
)]
#[command(group(
    ArgGroup::new("model_group")
        .args(["model", "no_model"])
        .multiple(false)
))]
pub struct Cli {
    /// Verbosity: -v info (model calls, token usage), -vv debug, -vvv trace (prompts, responses)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Generation backend: mistral, openai, ollama or none
    #[arg(long, global = true)]
    pub provider: Option<String>,

    /// Model name to use (e.g. mistral-small-latest). If 'none', acts like --no-model.
    #[arg(long, global = true)]
    pub model: Option<String>,

    /// Disable model calls; return dummy responses instead
    #[arg(long, global = true)]
    pub no_model: bool,

    /// API key (otherwise MISTRAL_API_KEY or OPENAI_API_KEY, depending on provider)
    #[arg(long, global = true)]
    pub api_key: Option<String>,

    /// Base URL of the generation API
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    /// Sampling temperature (0.0 - 2.0)
    #[arg(long, global = true)]
    pub temperature: Option<f32>,

    /// Do not ask for confirmation before writing or committing
    #[arg(short = 'y', long, global = true)]
    pub yes: bool,

    /// Stage all new, modified and deleted files before generating
    #[arg(short = 'a', long)]
    pub all: bool,

    /// Write the generated message into .git/COMMIT_EDITMSG (no commit is created)
    #[arg(long)]
    pub apply: bool,

    /// Create the commit with the generated message after confirmation
    #[arg(long)]
    pub commit: bool,

    /// Subcommand (e.g. 'changelog')
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Subcommands, e.g. `gitscribe changelog 1.4.0`
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Generate a changelog section from the commits since the last version tag
    Changelog {
        /// The upcoming version (e.g. 1.0.0)
        version: String,

        /// Start tag; defaults to the latest vMAJOR.MINOR.PATCH tag
        #[arg(long)]
        from: Option<String>,

        /// Path to the changelog file
        #[arg(short = 'o', long, default_value = "CHANGELOG.md")]
        output: PathBuf,

        /// Do not commit the updated changelog
        #[arg(long)]
        no_commit: bool,
    },
}
