// Copyright 2026 The oggz-arduino Developers

//! Running git as a subprocess.

use crate::{GitCommandError, VcsEnvError};
use camino::Utf8Path;
use oggz_vendor::UpstreamTag;
use std::process::{Command, ExitStatus};
use tracing::debug;

/// Reads a VCS binary path from an environment variable, falling back
/// to `default` if the variable is unset or empty.
///
/// The value is trimmed of leading and trailing whitespace.
///
/// Returns an error if the variable is set but is not valid UTF-8.
fn read_vcs_env(
    var: &'static str,
    default: &str,
) -> Result<String, VcsEnvError> {
    match std::env::var(var) {
        Ok(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                Ok(default.to_string())
            } else {
                Ok(trimmed.to_string())
            }
        }
        Err(std::env::VarError::NotPresent) => Ok(default.to_string()),
        Err(std::env::VarError::NotUnicode(value)) => {
            Err(VcsEnvError::NonUtf8 { var, value })
        }
    }
}

/// The captured result of a finished git process.
#[derive(Clone, Debug)]
pub struct CommandOutput {
    /// How the process exited.
    pub status: ExitStatus,
    /// Standard output, lossily decoded as UTF-8.
    pub stdout: String,
    /// Standard error, lossily decoded as UTF-8.
    pub stderr: String,
}

impl CommandOutput {
    /// Returns true if the process exited with status zero.
    pub fn success(&self) -> bool {
        self.status.success()
    }

    /// Returns the exit code, or `None` if the process was killed by a
    /// signal.
    pub fn code(&self) -> Option<i32> {
        self.status.code()
    }

    /// Returns the non-empty, trimmed lines of standard output.
    pub fn stdout_lines(&self) -> impl Iterator<Item = &str> {
        self.stdout.lines().map(str::trim).filter(|l| !l.is_empty())
    }
}

/// The git binary used for every repository operation.
///
/// Use [`Vcs::git()`] to pick up `$GIT`, or [`Vcs::with_binary()`] to name
/// the binary explicitly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Vcs {
    binary: String,
}

impl Vcs {
    /// Creates a git VCS using the `$GIT` environment variable or
    /// `"git"`.
    ///
    /// Returns an error if the `$GIT` environment variable is set
    /// but is not valid UTF-8.
    pub fn git() -> Result<Self, VcsEnvError> {
        let binary = read_vcs_env("GIT", "git")?;
        Ok(Vcs { binary })
    }

    /// Creates a git VCS that runs `binary`.
    pub fn with_binary(binary: impl Into<String>) -> Self {
        Vcs { binary: binary.into() }
    }

    /// Returns the path to the git binary.
    pub fn binary(&self) -> &str {
        &self.binary
    }

    /// Runs git with `args` in `repo_root` and returns its output
    /// regardless of exit status.
    ///
    /// Only a failure to spawn the process is an error.
    pub fn output(
        &self,
        repo_root: &Utf8Path,
        args: &[&str],
    ) -> Result<CommandOutput, GitCommandError> {
        debug!("running git {} in {repo_root}", args.join(" "));
        let output = Command::new(&self.binary)
            .current_dir(repo_root)
            .args(args)
            .output()
            .map_err(|source| GitCommandError::SpawnFailed {
                binary_path: self.binary.clone(),
                repo_root: repo_root.to_owned(),
                source,
            })?;

        Ok(CommandOutput {
            status: output.status,
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }

    /// Runs git with `args` in `repo_root`, treating a non-zero exit as an
    /// error.
    pub fn run(
        &self,
        repo_root: &Utf8Path,
        args: &[&str],
    ) -> Result<CommandOutput, GitCommandError> {
        let output = self.output(repo_root, args)?;
        if output.success() {
            Ok(output)
        } else {
            Err(failed(repo_root, args, &output))
        }
    }

    /// Clones `url` into `dest`.
    ///
    /// The command runs in `dest`'s parent directory, which must exist.
    pub fn clone_repo(
        &self,
        url: &str,
        dest: &Utf8Path,
    ) -> Result<(), GitCommandError> {
        let parent = match dest.parent() {
            Some(parent) if !parent.as_str().is_empty() => parent,
            _ => Utf8Path::new("."),
        };
        let name = dest.file_name().unwrap_or(dest.as_str());
        self.run(parent, &["clone", "--", url, name])?;
        Ok(())
    }

    /// Lists tags in the order git prints them (sorted by refname).
    pub fn list_tags(
        &self,
        repo_root: &Utf8Path,
    ) -> Result<Vec<UpstreamTag>, GitCommandError> {
        let output = self.run(repo_root, &["tag"])?;
        Ok(output.stdout_lines().map(UpstreamTag::from).collect())
    }

    /// Returns true if `tag` exists in the repository.
    pub fn tag_exists(
        &self,
        repo_root: &Utf8Path,
        tag: &UpstreamTag,
    ) -> Result<bool, GitCommandError> {
        let output =
            self.run(repo_root, &["tag", "--list", "--", tag.as_str()])?;
        Ok(output.stdout_lines().any(|line| line == tag.as_str()))
    }

    /// Checks out `tag`, detaching HEAD.
    pub fn checkout(
        &self,
        repo_root: &Utf8Path,
        tag: &UpstreamTag,
    ) -> Result<(), GitCommandError> {
        self.run(repo_root, &["checkout", tag.as_str()])?;
        Ok(())
    }

    /// Creates a lightweight tag at HEAD.
    pub fn create_tag(
        &self,
        repo_root: &Utf8Path,
        tag: &UpstreamTag,
    ) -> Result<(), GitCommandError> {
        self.run(repo_root, &["tag", tag.as_str()])?;
        Ok(())
    }

    /// Deletes the local tag `tag`.
    pub fn delete_tag(
        &self,
        repo_root: &Utf8Path,
        tag: &UpstreamTag,
    ) -> Result<(), GitCommandError> {
        self.run(repo_root, &["tag", "-d", tag.as_str()])?;
        Ok(())
    }

    /// Pushes `tag` to `remote`.
    pub fn push_tag(
        &self,
        repo_root: &Utf8Path,
        remote: &str,
        tag: &UpstreamTag,
    ) -> Result<(), GitCommandError> {
        let refspec = format!("refs/tags/{tag}");
        self.run(repo_root, &["push", remote, &refspec])?;
        Ok(())
    }

    /// Stages all changes (including deletions) below `pathspec`.
    pub fn stage(
        &self,
        repo_root: &Utf8Path,
        pathspec: &str,
    ) -> Result<(), GitCommandError> {
        self.run(repo_root, &["add", "-A", "--", pathspec])?;
        Ok(())
    }

    /// Returns true if the index differs from HEAD.
    ///
    /// `git diff --cached --quiet` exits with 1 when there are differences,
    /// so that exit code is an answer rather than a failure.
    pub fn has_staged_changes(
        &self,
        repo_root: &Utf8Path,
    ) -> Result<bool, GitCommandError> {
        let args = ["diff", "--cached", "--quiet"];
        let output = self.output(repo_root, &args)?;
        match output.code() {
            Some(0) => Ok(false),
            Some(1) => Ok(true),
            _ => Err(failed(repo_root, &args, &output)),
        }
    }

    /// Commits the index with `message`.
    pub fn commit(
        &self,
        repo_root: &Utf8Path,
        message: &str,
    ) -> Result<(), GitCommandError> {
        self.run(repo_root, &["commit", "-m", message])?;
        Ok(())
    }
}

fn failed(
    repo_root: &Utf8Path,
    args: &[&str],
    output: &CommandOutput,
) -> GitCommandError {
    GitCommandError::Failed {
        args: args.join(" "),
        repo_root: repo_root.to_owned(),
        exit_code: output.code(),
        exit_status: output.status.to_string(),
        stderr: output.stderr.trim().to_string(),
    }
}
