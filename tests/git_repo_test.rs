//! Repository inspector against real git repositories.

mod common;

use std::path::PathBuf;
use std::process::Command;

use common::TestRepo;
use gitscribe::git::FALLBACK_COMMIT_COUNT;
use gitscribe::{GitError, GitRepo, GitRunner, SystemGit};

#[test]
fn staged_files_and_diff() {
    let repo = TestRepo::new();
    repo.commit_file("README.md", "hello\n", "init");

    let git = repo.inspector();
    assert!(git.staged_files().unwrap().is_empty());
    assert_eq!(git.staged_diff().unwrap(), "");

    repo.write("b.txt", "bee\n");
    repo.write("a.txt", "ay\n");
    repo.git(&["add", "b.txt", "a.txt"]);

    assert_eq!(git.staged_files().unwrap(), vec!["a.txt", "b.txt"]);
    let diff = git.staged_diff().unwrap();
    assert!(diff.starts_with("diff --git"));
    assert!(diff.contains("+bee"));
}

#[test]
fn unstaged_changes_show_in_status_only() {
    let repo = TestRepo::new();
    repo.commit_file("README.md", "hello\n", "init");
    repo.write("README.md", "changed\n");

    let git = repo.inspector();
    assert!(git.staged_files().unwrap().is_empty());
    assert!(git.has_uncommitted_changes().unwrap());
    assert!(git.status().unwrap().contains("README.md"));
}

#[test]
fn last_version_tag_orders_numerically() {
    let repo = TestRepo::new();
    repo.commit_empty("one");
    repo.tag("v1.9.0");
    repo.commit_empty("two");
    repo.tag("v2.0.0");
    repo.commit_empty("three");
    repo.tag("v1.10.0");
    repo.tag("v2.1.0-rc1");
    repo.tag("release-3");

    assert_eq!(repo.inspector().last_version_tag().unwrap().as_deref(), Some("v2.0.0"));
}

#[test]
fn last_version_tag_is_none_without_tags() {
    let repo = TestRepo::new();
    repo.commit_empty("one");
    repo.tag("nightly");

    let git = repo.inspector();
    assert_eq!(git.last_version_tag().unwrap(), None);
    assert_eq!(git.last_tag().unwrap(), "nightly");
}

#[test]
fn commits_since_tag_excludes_the_tagged_commit() {
    let repo = TestRepo::new();
    repo.commit_empty("chore: initial");
    repo.tag("v1.0.0");
    let second = repo.commit_empty("feat: second");
    let third = repo.commit_empty("fix: third");

    let commits = repo.inspector().commits_since(Some("v1.0.0")).unwrap();
    assert_eq!(
        commits,
        vec![format!("{third} fix: third"), format!("{second} feat: second")]
    );
}

#[test]
fn commits_without_tag_are_capped() {
    let repo = TestRepo::new();
    for i in 0..FALLBACK_COMMIT_COUNT + 3 {
        repo.commit_empty(&format!("commit {i}"));
    }

    let commits = repo.inspector().commits_since(None).unwrap();
    assert_eq!(commits.len(), FALLBACK_COMMIT_COUNT);
    assert!(commits[0].ends_with(&format!("commit {}", FALLBACK_COMMIT_COUNT + 2)));
}

#[test]
fn option_like_start_tag_is_a_bad_revision() {
    let repo = TestRepo::new();
    repo.commit_empty("init");

    let err = repo.inspector().commits_since(Some("--output=leak.txt")).unwrap_err();
    assert!(matches!(err, GitError::CommandFailed { .. }));
    assert!(!repo.path().join("leak.txt..HEAD").exists());
    assert!(!repo.path().join("leak.txt").exists());
}

#[test]
fn log_of_empty_repository_is_an_error() {
    let repo = TestRepo::new();
    let err = repo.inspector().commits_since(None).unwrap_err();
    assert!(matches!(err, GitError::CommandFailed { .. }));
}

#[test]
fn commit_keeps_quotes_and_shell_characters() {
    let repo = TestRepo::new();
    repo.commit_file("README.md", "hello\n", "init");
    repo.write("README.md", "world\n");

    let git = repo.inspector();
    git.add(&["README.md"]).unwrap();

    let message = "fix: handle \"quoted\" input\n\nKeeps `ticks`, $HOME and 'single' quotes.";
    git.commit(message).unwrap();

    assert_eq!(repo.git(&["log", "-1", "--format=%B"]), message);
    assert!(!git.has_uncommitted_changes().unwrap());
}

#[test]
fn stage_all_picks_up_new_and_deleted_files() {
    let repo = TestRepo::new();
    repo.commit_file("old.txt", "old\n", "init");
    std::fs::remove_file(repo.path().join("old.txt")).unwrap();
    repo.write("new.txt", "new\n");

    let git = repo.inspector();
    git.stage_all().unwrap();

    assert_eq!(git.staged_files().unwrap(), vec!["new.txt", "old.txt"]);
}

#[test]
fn branch_remote_and_git_dir() {
    let repo = TestRepo::new();
    repo.commit_empty("init");
    repo.git(&["checkout", "-q", "-b", "feature/x"]);
    repo.git(&["remote", "add", "origin", "https://example.com/acme/tool.git"]);

    let git = repo.inspector();
    assert!(git.is_repository());
    assert_eq!(git.current_branch().unwrap(), "feature/x");
    assert_eq!(git.remote_url("origin").unwrap(), "https://example.com/acme/tool.git");
    assert!(git.remote_url("upstream").is_err());

    let git_dir = git.git_dir().unwrap();
    assert!(git_dir.is_absolute());
    assert_eq!(
        git_dir.canonicalize().unwrap(),
        repo.path().join(".git").canonicalize().unwrap()
    );

    let path = git.write_commit_editmsg("feat: drafted").unwrap();
    assert!(path.is_absolute());
    assert!(path.ends_with("COMMIT_EDITMSG"));
    assert_eq!(
        std::fs::read_to_string(repo.path().join(".git/COMMIT_EDITMSG")).unwrap(),
        "feat: drafted"
    );
}

#[test]
fn commit_editmsg_lands_in_the_runner_repository_from_a_subdirectory() {
    let repo = TestRepo::new();
    repo.commit_empty("init");
    std::fs::create_dir(repo.path().join("docs")).unwrap();

    let git = GitRepo::with_runner(SystemGit::in_dir(repo.path().join("docs")));
    git.write_commit_editmsg("docs: drafted").unwrap();

    assert_eq!(
        std::fs::read_to_string(repo.path().join(".git/COMMIT_EDITMSG")).unwrap(),
        "docs: drafted"
    );
    assert!(!repo.path().join("docs/.git").exists());
}

#[test]
fn outside_a_repository_everything_fails() {
    let dir = tempfile::tempdir().unwrap();

    let git = GitRepo::with_runner(CeilingGit(dir.path().to_path_buf()));
    assert!(!git.is_repository());
    assert!(matches!(
        git.staged_files(),
        Err(GitError::CommandFailed { .. })
    ));
}

/// Real git, but never allowed to discover a repository above its directory.
struct CeilingGit(PathBuf);

impl GitRunner for CeilingGit {
    fn run(&self, args: &[&str]) -> Result<String, GitError> {
        let output = Command::new("git")
            .args(args)
            .current_dir(&self.0)
            .env("GIT_CEILING_DIRECTORIES", self.0.parent().unwrap_or(&self.0))
            .output()
            .map_err(|source| GitError::Spawn {
                command: args.join(" "),
                source,
            })?;

        if !output.status.success() {
            return Err(GitError::CommandFailed {
                command: args.join(" "),
                code: output.status.code(),
                stderr: String::from_utf8_lossy(&output.stderr).to_string(),
            });
        }
        Ok(String::from_utf8_lossy(&output.stdout).to_string())
    }
}
