use std::fs;
use std::path::PathBuf;
use std::process::Command as GitCommand;

use semver::Version;

use crate::error::GitError;

/// Glob handed to `git tag --list`; the strict shape check happens in Rust.
const VERSION_TAG_GLOB: &str = "v[0-9]*.[0-9]*.[0-9]*";

/// How many commits to summarize when no version tag exists yet.
pub const FALLBACK_COMMIT_COUNT: usize = 50;

/// Anything able to run `git <args>` and hand back stdout.
///
/// Arguments are always passed as a vector, never joined into a shell string.
pub trait GitRunner {
    fn run(&self, args: &[&str]) -> Result<String, GitError>;
}

/// Runs the system `git` binary as a subprocess.
#[derive(Debug, Clone, Default)]
pub struct SystemGit {
    workdir: Option<PathBuf>,
}

impl SystemGit {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run every command inside `dir` instead of the process working directory.
    pub fn in_dir(dir: impl Into<PathBuf>) -> Self {
        Self {
            workdir: Some(dir.into()),
        }
    }
}

impl GitRunner for SystemGit {
    fn run(&self, args: &[&str]) -> Result<String, GitError> {
        let mut cmd = GitCommand::new("git");
        cmd.args(args);
        if let Some(dir) = &self.workdir {
            cmd.current_dir(dir);
        }

        log::trace!("git {:?}", args);

        let output = cmd.output().map_err(|source| GitError::Spawn {
            command: args.join(" "),
            source,
        })?;

        if !output.status.success() {
            return Err(GitError::CommandFailed {
                command: args.join(" "),
                code: output.status.code(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).to_string())
    }
}

/// Handle on one repository. Every accessor issues a single git query.
pub struct GitRepo {
    runner: Box<dyn GitRunner>,
}

impl GitRepo {
    /// Repository of the current working directory.
    pub fn discover() -> Self {
        Self::with_runner(SystemGit::new())
    }

    pub fn with_runner(runner: impl GitRunner + 'static) -> Self {
        Self {
            runner: Box::new(runner),
        }
    }

    /// Run a git command and return its trimmed stdout.
    fn output(&self, args: &[&str]) -> Result<String, GitError> {
        Ok(self.runner.run(args)?.trim().to_string())
    }

    fn lines(&self, args: &[&str]) -> Result<Vec<String>, GitError> {
        let output = self.output(args)?;
        Ok(output
            .lines()
            .map(|l| l.trim().to_string())
            .filter(|l| !l.is_empty())
            .collect())
    }

    /// Get a list of staged files, in index order.
    pub fn staged_files(&self) -> Result<Vec<String>, GitError> {
        self.lines(&["diff", "--cached", "--name-only"])
    }

    /// Get the full staged diff.
    pub fn staged_diff(&self) -> Result<String, GitError> {
        self.output(&["diff", "--cached"])
    }

    /// Porcelain status of the working tree.
    pub fn status(&self) -> Result<String, GitError> {
        self.output(&["status", "--porcelain"])
    }

    pub fn has_uncommitted_changes(&self) -> Result<bool, GitError> {
        Ok(!self.status()?.is_empty())
    }

    /// Get the current branch name.
    pub fn current_branch(&self) -> Result<String, GitError> {
        self.output(&["rev-parse", "--abbrev-ref", "HEAD"])
    }

    /// Absolute path of the Git directory, independent of the process cwd.
    pub fn git_dir(&self) -> Result<PathBuf, GitError> {
        self.output(&["rev-parse", "--absolute-git-dir"]).map(PathBuf::from)
    }

    pub fn is_repository(&self) -> bool {
        self.git_dir().is_ok()
    }

    /// URL of the given remote, e.g. `origin`.
    pub fn remote_url(&self, remote: &str) -> Result<String, GitError> {
        self.output(&["remote", "get-url", remote])
    }

    /// Nearest tag reachable from HEAD, whatever its shape.
    pub fn last_tag(&self) -> Result<String, GitError> {
        self.output(&["describe", "--tags", "--abbrev=0"])
    }

    /// Highest `vMAJOR.MINOR.PATCH` tag, ordered numerically per component.
    ///
    /// The `-v:refname` sort from git is only a hint; ranking happens here.
    pub fn last_version_tag(&self) -> Result<Option<String>, GitError> {
        let tags = self.lines(&["tag", "--list", VERSION_TAG_GLOB, "--sort=-v:refname"])?;
        Ok(highest_version_tag(&tags).map(str::to_string))
    }

    /// `"<shortHash> <subject>"` per commit, newest first.
    ///
    /// With a tag, every commit after it up to HEAD (the tagged commit itself
    /// is excluded); without one, the latest [`FALLBACK_COMMIT_COUNT`] commits.
    pub fn commits_since(&self, tag: Option<&str>) -> Result<Vec<String>, GitError> {
        match tag.filter(|t| !t.trim().is_empty()) {
            Some(tag) => {
                let range = format!("{}..HEAD", tag.trim());
                // The range comes from user input and must never parse as an option.
                self.lines(&["log", "--format=%h %s", "--end-of-options", &range])
            }
            None => {
                let count = format!("-{FALLBACK_COMMIT_COUNT}");
                self.lines(&["log", &count, "--format=%h %s"])
            }
        }
    }

    /// Stage the given paths.
    pub fn add<S: AsRef<str>>(&self, paths: &[S]) -> Result<(), GitError> {
        let mut args = vec!["add", "--"];
        args.extend(paths.iter().map(AsRef::as_ref));
        self.runner.run(&args)?;
        Ok(())
    }

    /// Stage all new, modified, and deleted files
    pub fn stage_all(&self) -> Result<(), GitError> {
        log::warn!("Staging all changes");
        self.runner.run(&["add", "-A"])?;
        Ok(())
    }

    /// Commit the index. The message travels as one argv entry, unescaped.
    pub fn commit(&self, message: &str) -> Result<(), GitError> {
        self.runner.run(&["commit", "-m", message])?;
        Ok(())
    }

    /// Write the commit message into .git/COMMIT_EDITMSG so the next `git commit`
    /// will use it as the default message in the editor.
    pub fn write_commit_editmsg(&self, message: &str) -> Result<PathBuf, GitError> {
        let path = self.git_dir()?.join("COMMIT_EDITMSG");
        fs::write(&path, message).map_err(|source| GitError::Write {
            path: path.display().to_string(),
            source,
        })?;
        Ok(path)
    }
}

/// Parse a strict `vMAJOR.MINOR.PATCH` tag. Pre-release or build suffixes and
/// missing components are rejected.
pub fn parse_version_tag(tag: &str) -> Option<Version> {
    let raw = tag.strip_prefix('v')?;
    let mut parts = raw.split('.');
    let mut next = || -> Option<u64> {
        let part = parts.next()?;
        if part.is_empty() || !part.chars().all(|c| c.is_ascii_digit()) {
            return None;
        }
        part.parse().ok()
    };

    let (major, minor, patch) = (next()?, next()?, next()?);
    if parts.next().is_some() {
        return None;
    }
    Some(Version::new(major, minor, patch))
}

/// Pick the numerically highest version tag out of an arbitrary list.
pub fn highest_version_tag<S: AsRef<str>>(tags: &[S]) -> Option<&str> {
    tags.iter()
        .map(AsRef::as_ref)
        .filter_map(|t| parse_version_tag(t).map(|v| (v, t)))
        .max_by(|a, b| a.0.cmp(&b.0))
        .map(|(_, t)| t)
}
