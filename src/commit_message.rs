//! Commit message generation from the staged changes.

use crate::error::CommitMessageError;
use crate::git::GitRepo;
use crate::llm::{self, LlmClient, prompt_builder};
use crate::reflow::{COMMIT_WIDTH, reflow};

/// Generate a commit message for what is currently staged.
///
/// Fails with [`CommitMessageError::NoStagedChanges`] before any model call
/// when the index is empty, and with [`CommitMessageError::EmptyDiff`] when
/// files are staged but produce no diff text. The model answer is reflowed
/// to [`COMMIT_WIDTH`] columns. Never retried.
pub fn generate_commit_message(
    repo: &GitRepo,
    llm: &dyn LlmClient,
    temperature: f32,
) -> Result<String, CommitMessageError> {
    let files = repo.staged_files()?;
    if files.is_empty() {
        return Err(CommitMessageError::NoStagedChanges);
    }

    let diff = repo.staged_diff()?;
    if diff.trim().is_empty() {
        return Err(CommitMessageError::EmptyDiff);
    }

    // Branch is context only; a detached or unborn HEAD must not block generation.
    let branch = match repo.current_branch() {
        Ok(branch) => Some(branch),
        Err(e) => {
            log::debug!("Could not resolve current branch: {e}");
            None
        }
    };

    log::debug!("Generating commit message for {} staged file(s)", files.len());

    let prompts = prompt_builder::commit_message_prompt(branch.as_deref(), &files, &diff);
    let message = llm::complete(llm, &prompts.system, &prompts.user, temperature)?;

    Ok(reflow(&message, COMMIT_WIDTH))
}
