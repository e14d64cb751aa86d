pub const COMMIT_SYSTEM: &str =
    "You are a development assistant and an expert in Git and versioning best practices.";

pub const COMMIT_RULES: &str = r#"Write a commit message that follows these conventions:
- A summary line of 50 characters maximum
- If needed, a blank line followed by a more detailed description
- Use the imperative mood with a conventional type prefix ("feat", "fix", "test", "docs", "chore")
- Be clear and precise about what changed and why

Reply with the commit message only: no extra explanation, no markdown formatting."#;

pub const CHANGELOG_SYSTEM: &str =
    "You are a development assistant and an expert at writing clear, professional changelogs.";

pub const CHANGELOG_RULES: &str = r#"Rules:
- Group the commits by category (Added, Changed, Fixed, Removed, etc.) following the Keep a Changelog conventions
- Each entry must be concise and understandable by an end user
- Do not wrap the result in markdown code blocks
- Reply with the changelog only, without any extra explanation"#;
