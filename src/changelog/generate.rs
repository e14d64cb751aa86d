//! Build a changelog section for a release from its commits.

use chrono::Local;

use crate::error::ChangelogError;
use crate::git::GitRepo;
use crate::llm::{self, LlmClient, prompt_builder};

/// Today's date as `YYYY-MM-DD`, in local time.
pub fn today() -> String {
    Local::now().format("%Y-%m-%d").to_string()
}

/// Commits to describe: everything after `from` (or after the latest version
/// tag when `from` is `None`), or the most recent history when no tag exists.
///
/// Returns the tag actually used alongside the commits.
pub fn commits_since_last_version(
    repo: &GitRepo,
    from: Option<&str>,
) -> Result<(Option<String>, Vec<String>), ChangelogError> {
    let tag = match from {
        Some(tag) => Some(tag.to_string()),
        None => repo.last_version_tag()?,
    };

    let commits = repo.commits_since(tag.as_deref())?;
    Ok((tag, commits))
}

/// Ask the model for a Keep a Changelog section titled
/// `## [<version>] - <today>`.
///
/// The answer is returned trimmed but otherwise verbatim: unlike commit
/// messages, changelog prose is not reflowed.
pub fn generate_changelog(
    llm: &dyn LlmClient,
    version: &str,
    commits: &[String],
    today: &str,
    temperature: f32,
) -> Result<String, ChangelogError> {
    if commits.is_empty() {
        return Err(ChangelogError::NoCommits);
    }

    log::debug!("Generating changelog for {version} from {} commit(s)", commits.len());

    let prompts = prompt_builder::changelog_prompt(version, today, commits);
    let section = llm::complete(llm, &prompts.system, &prompts.user, temperature)?;

    Ok(section)
}
