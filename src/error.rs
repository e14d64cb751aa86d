//! Error types for gitscribe modules using thiserror.

use thiserror::Error;

/// A git invocation failed: not a repository, no HEAD, bad revision range...
#[derive(Error, Debug)]
pub enum GitError {
    #[error("failed to run git {command}: {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("git {command} exited with {}: {stderr}",
        code.map_or("unknown status".to_string(), |c| format!("code {c}")))]
    CommandFailed {
        command: String,
        code: Option<i32>,
        stderr: String,
    },

    #[error("failed to write {path}: {source}")]
    Write {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// The generation service could not produce usable text.
#[derive(Error, Debug)]
pub enum GenerationError {
    #[error("failed to send request to {url}: {message}")]
    Transport { url: String, message: String },

    #[error("model API error: HTTP {status} - {body}")]
    Http { status: u16, body: String },

    #[error("failed to decode model response: {0}")]
    Decode(String),

    #[error("no choices returned by the model")]
    NoChoices,

    #[error("the model returned an empty response")]
    EmptyCompletion,
}

/// Errors from commit message generation.
#[derive(Error, Debug)]
pub enum CommitMessageError {
    #[error("No staged files. Use 'git add' to stage the changes you want to commit.")]
    NoStagedChanges,

    #[error("Staged files contain no diff content (mode-only or empty changes).")]
    EmptyDiff,

    #[error(transparent)]
    Git(#[from] GitError),

    #[error("Could not generate a commit message: {0}")]
    Generation(#[from] GenerationError),
}

/// Errors from changelog generation and merging.
#[derive(Error, Debug)]
pub enum ChangelogError {
    #[error("No commits found to build the changelog from.")]
    NoCommits,

    #[error(transparent)]
    Git(#[from] GitError),

    #[error("Could not generate the changelog: {0}")]
    Generation(#[from] GenerationError),

    #[error("Failed to read changelog: {0}")]
    ReadFailed(#[source] std::io::Error),

    #[error("Failed to write changelog: {0}")]
    WriteFailed(#[source] std::io::Error),
}

/// Errors from resolving configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Unknown provider '{0}' (expected mistral, openai, ollama or none)")]
    UnknownProvider(String),

    #[error("{0} must be set via --api-key, environment or config file")]
    MissingApiKey(&'static str),

    #[error("Invalid temperature '{0}': expected a number between 0 and 2")]
    InvalidTemperature(String),
}
