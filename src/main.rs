use std::io::{self, Write};
use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result, bail};
use clap::Parser;
use colored::Colorize;
use indicatif::ProgressBar;

use gitscribe::changelog::{
    commits_since_last_version, generate_changelog, today, update_changelog_file,
};
use gitscribe::cli_args::{Cli, Command};
use gitscribe::config::Config;
use gitscribe::git::FALLBACK_COMMIT_COUNT;
use gitscribe::llm::LlmClient;
use gitscribe::{CommitMessageError, GitRepo, generate_commit_message, logging, setup};

fn prompt_input(prompt: &str) -> Result<String> {
    print!("{prompt}");
    io::stdout().flush()?;

    let mut buf = String::new();
    io::stdin().read_line(&mut buf)?;
    Ok(buf.trim().to_string())
}

/// Ask a y/n question; `--yes` answers for the user.
fn confirm(cli: &Cli, question: &str) -> Result<bool> {
    if cli.yes {
        return Ok(true);
    }
    let answer = prompt_input(&format!("{question} (y/n) "))?.to_lowercase();
    Ok(answer == "y" || answer == "yes")
}

fn spinner(message: &'static str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_message(message);
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

fn preview(title: &str, body: &str) {
    let rule = "-".repeat(50);
    println!();
    println!("{}", title.green().bold());
    println!("{rule}");
    println!("{body}");
    println!("{rule}");
}

/// Everything a run needs, resolved once in `main`.
struct Session<'a> {
    cli: &'a Cli,
    cfg: Config,
    repo: GitRepo,
    llm: Box<dyn LlmClient>,
}

/// Commit mode: one message from the whole staged diff.
fn run_commit(session: &Session<'_>) -> Result<()> {
    let Session { cli, cfg, repo, llm } = session;
    if cli.all {
        repo.stage_all().context("Failed to stage changes")?;
    }

    let pb = spinner("Generating commit message...");
    let result = generate_commit_message(repo, llm.as_ref(), cfg.temperature);
    pb.finish_and_clear();

    let message = match result {
        Ok(message) => message,
        Err(e @ CommitMessageError::NoStagedChanges)
            if repo.has_uncommitted_changes().unwrap_or(false) =>
        {
            bail!("{e} Unstaged changes exist; pass --all to stage everything.")
        }
        Err(e) => return Err(e).context("Failed to generate commit message"),
    };

    preview("Commit Message Preview", &message);

    if cli.apply {
        let path = repo
            .write_commit_editmsg(&message)
            .context("Failed to write COMMIT_EDITMSG")?;
        println!("Wrote commit message to {}", path.display());
    }

    if cli.commit {
        if confirm(cli, "Commit with this message?")? {
            repo.commit(&message).context("Failed to create commit")?;
            println!("{}", "✓ Committed".green());
        } else {
            println!("Commit message not applied.");
        }
    } else if !cli.apply {
        let summary = message.lines().next().unwrap_or_default();
        println!("\nTo commit with this message, rerun with --commit, or:");
        println!("   git commit -m {summary:?}");
    }

    Ok(())
}

/// Changelog mode: describe commits since the last version tag and merge the
/// section into the changelog file.
fn run_changelog(
    session: &Session<'_>,
    version: &str,
    from: Option<&str>,
    output: &Path,
    no_commit: bool,
) -> Result<()> {
    let Session { cli, cfg, repo, llm } = session;
    let version = version.trim().trim_start_matches('v');

    if let Ok(url) = repo.remote_url("origin") {
        log::debug!("Remote origin: {url}");
    }

    let (tag, commits) =
        commits_since_last_version(repo, from).context("Failed to read commit history")?;

    match &tag {
        Some(tag) => println!("{}", format!("Last version tag: {tag}").blue()),
        None => {
            if let Ok(nearest) = repo.last_tag() {
                log::debug!("No vMAJOR.MINOR.PATCH tag; nearest tag is {nearest}");
            }
            println!(
                "{}",
                format!("No version tag found, using the last {FALLBACK_COMMIT_COUNT} commits.").yellow()
            );
        }
    }

    if !commits.is_empty() {
        println!("{}", format!("{} commit(s) found:", commits.len()).blue());
        for commit in &commits {
            println!("   {}", commit.cyan());
        }
    }

    let pb = spinner("Generating changelog...");
    let result = generate_changelog(llm.as_ref(), version, &commits, &today(), cfg.temperature);
    pb.finish_and_clear();
    let section = result.context("Failed to generate changelog")?;

    preview("Changelog Preview", &section);

    if !confirm(cli, &format!("Update {}?", output.display()))? {
        println!("Changelog not applied.");
        return Ok(());
    }

    let written = update_changelog_file(output, &section)
        .with_context(|| format!("Failed to update {}", output.display()))?;
    println!("{}", format!("✓ {} updated", written.display()).green());

    if !no_commit {
        let file_name = output
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "CHANGELOG.md".to_string());

        repo.add(&[output.to_string_lossy()])
            .context("Failed to stage changelog")?;
        repo.commit(&format!("docs: update {file_name} for v{version}"))
            .context("Failed to commit changelog")?;
        println!("{}", "✓ Changelog committed".green());
    }

    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init_logger(cli.verbose);

    let cfg = Config::from_sources(&cli)?;
    let llm = setup::build_llm_client(&cfg)?;

    let repo = GitRepo::discover();
    if !repo.is_repository() {
        bail!("Not a git repository. Run gitscribe from within a git repository.");
    }

    let session = Session {
        cli: &cli,
        cfg,
        repo,
        llm,
    };

    match &cli.command {
        Some(Command::Changelog {
            version,
            from,
            output,
            no_commit,
        }) => run_changelog(&session, version, from.as_deref(), output, *no_commit),
        None => run_commit(&session),
    }
}
