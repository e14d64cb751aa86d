use crate::llm::prompts;

pub struct PromptPair {
    pub system: String,
    pub user: String,
}

pub fn commit_message_prompt(branch: Option<&str>, files: &[String], diff: &str) -> PromptPair {
    let system = prompts::COMMIT_SYSTEM.to_owned();

    let mut user = String::from(
        "Analyze the following git changes and write a concise, descriptive commit message.\n\n",
    );
    if let Some(branch) = branch {
        user.push_str(&format!("Branch: {branch}\n\n"));
    }
    user.push_str(&format!(
        "Changed files:\n{files}\n\nDiff:\n{diff}\n\n{rules}",
        files = files.join("\n"),
        diff = diff,
        rules = prompts::COMMIT_RULES
    ));

    PromptPair { system, user }
}

/// `today` is the `YYYY-MM-DD` date placed in the section title.
pub fn changelog_prompt(version: &str, today: &str, commits: &[String]) -> PromptPair {
    let system = prompts::CHANGELOG_SYSTEM.to_owned();

    let user = format!(
        "Here is a list of Git commits. Write a Markdown changelog for version {version}.\n\n\
         Commits:\n{commits}\n\n\
         {rules}\n\
         - Use \"## [{version}] - {today}\" as the title, with today's date",
        commits = commits.join("\n"),
        rules = prompts::CHANGELOG_RULES
    );

    PromptPair { system, user }
}
