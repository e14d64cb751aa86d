//! gitscribe - writes Git commit messages and changelog sections with an LLM.
//!
//! Facts come from the local repository ([`git`]), text comes from a
//! generation backend ([`llm`]). Commit messages are reflowed to 72 columns
//! ([`reflow`]); changelog sections are merged into `CHANGELOG.md` at a
//! stable anchor ([`changelog`]).

pub mod changelog;
pub mod cli_args;
pub mod commit_message;
pub mod config;
pub mod error;
pub mod git;
pub mod llm;
pub mod logging;
pub mod reflow;
pub mod setup;

pub use commit_message::generate_commit_message;
pub use error::{ChangelogError, CommitMessageError, ConfigError, GenerationError, GitError};
pub use git::{GitRepo, GitRunner, SystemGit};
pub use llm::{LlmClient, complete};
pub use reflow::reflow;
