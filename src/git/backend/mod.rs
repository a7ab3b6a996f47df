// mixvault: version lines and snapshots for music projects
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Git backend abstraction layer.
//!
//! ```text
//! GitQuery (read)     --> GixBackend (pure Rust gix, .git only)
//!                     --> ShellBackend (git CLI, sees the working tree)
//! GitMutation (write) --> ShellBackend (git CLI)
//! ```
//!
//! Every subprocess goes through [`ShellBackend::git_command`], which fixes
//! the environment and turns a non-zero exit into
//! [`GitError::CommandFailed`] carrying stderr verbatim.

use crate::error::{GitError, GixError, MixResult};
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use std::process::Command;
use std::sync::OnceLock;
use tracing::trace;

// --- Query Trait (Read-only operations) ---

/// Read-only git query operations.
pub trait GitQuery {
    /// Check if `path` is the root of a repository work tree.
    fn is_repo_root(path: &Path) -> bool;

    /// Get current branch name (None if HEAD is detached).
    ///
    /// # Errors
    ///
    /// Returns a `GitError` if the repository cannot be opened or HEAD cannot be read.
    fn current_branch(path: &Path) -> MixResult<Option<String>>;
}

// --- Mutation Trait (Write operations) ---

/// Git mutation operations that modify repository state.
pub trait GitMutation {
    /// Initialize a new repository whose first branch is `initial_branch`.
    ///
    /// # Errors
    ///
    /// Returns a `GitError` if repository initialization fails.
    fn init_repo(path: &Path, initial_branch: &str) -> MixResult<()>;

    /// Stage the given paths (`.` stages everything, honoring ignore rules).
    ///
    /// # Errors
    ///
    /// Returns a `GitError` if `git add` fails.
    fn add(repo_path: &Path, paths: &[&OsStr]) -> MixResult<()>;

    /// Commit the index.
    ///
    /// # Errors
    ///
    /// Returns a `GitError` if the commit fails.
    fn commit(repo_path: &Path, message: &str, allow_empty: bool) -> MixResult<()>;

    /// Checkout a branch or commit.
    ///
    /// # Errors
    ///
    /// Returns a `GitError` if the checkout operation fails.
    fn checkout(repo_path: &Path, what: &str) -> MixResult<()>;

    /// Detach HEAD at `rev`, keeping working tree changes.
    ///
    /// # Errors
    ///
    /// Returns a `GitError` if the checkout operation fails.
    fn detach(repo_path: &Path, rev: &str) -> MixResult<()>;

    /// Create a branch at HEAD and check it out.
    ///
    /// # Errors
    ///
    /// Returns a `GitError` if the branch cannot be created.
    fn create_branch(repo_path: &Path, name: &str) -> MixResult<()>;

    /// Delete a branch, merged or not.
    ///
    /// # Errors
    ///
    /// Returns a `GitError` if the branch cannot be deleted.
    fn delete_branch(repo_path: &Path, name: &str) -> MixResult<()>;

    /// Set aside all changes, untracked files included.
    ///
    /// # Errors
    ///
    /// Returns a `GitError` if the stash cannot be created.
    fn stash_push(repo_path: &Path, message: &str) -> MixResult<()>;

    /// Restore tracked paths to their HEAD content.
    ///
    /// # Errors
    ///
    /// Returns a `GitError` if a path is unknown to HEAD.
    fn restore_paths(repo_path: &Path, paths: &[&OsStr]) -> MixResult<()>;

    /// Remove paths from the index without touching HEAD.
    ///
    /// # Errors
    ///
    /// Returns a `GitError` if `git rm --cached` fails.
    fn unstage_paths(repo_path: &Path, paths: &[&OsStr]) -> MixResult<()>;

    /// Delete untracked paths.
    ///
    /// # Errors
    ///
    /// Returns a `GitError` if `git clean` fails.
    fn clean_paths(repo_path: &Path, paths: &[&OsStr]) -> MixResult<()>;

    /// Set a repository-local config value.
    ///
    /// # Errors
    ///
    /// Returns a `GitError` if the config value cannot be set.
    fn set_config(repo_path: &Path, key: &str, value: &str) -> MixResult<()>;
}

// --- GixBackend Implementation (Pure Rust) ---

/// Pure Rust git backend using gix.
///
/// Only reads `.git`; anything that depends on the working tree goes
/// through the shell backend.
pub struct GixBackend;

impl GitQuery for GixBackend {
    fn is_repo_root(path: &Path) -> bool {
        gix::open(path).is_ok_and(|repo| {
            repo.workdir()
                .is_some_and(|workdir| same_path(workdir, path))
        })
    }

    fn current_branch(path: &Path) -> MixResult<Option<String>> {
        let repo =
            gix::open(path).map_err(|e| GitError::Gix(GixError::Open(Box::new(e))))?;
        let head = repo
            .head_name()
            .map_err(|e| GitError::Gix(GixError::Head(e)))?;
        Ok(head.map(|name| name.shorten().to_string()))
    }
}

fn same_path(a: &Path, b: &Path) -> bool {
    match (a.canonicalize(), b.canonicalize()) {
        (Ok(a), Ok(b)) => a == b,
        _ => a == b,
    }
}

// --- ShellBackend Implementation (Git CLI) ---

/// Shell-based git backend using git CLI.
pub struct ShellBackend;

static GIT_EXECUTABLE: OnceLock<Option<PathBuf>> = OnceLock::new();

impl ShellBackend {
    /// Location of the `git` executable, looked up once per process.
    fn executable() -> MixResult<&'static Path> {
        GIT_EXECUTABLE
            .get_or_init(|| which::which("git").ok())
            .as_deref()
            .ok_or_else(|| GitError::GitNotFound.into())
    }

    fn run<S: AsRef<OsStr>>(args: &[S], cwd: &Path) -> MixResult<Vec<u8>> {
        let rendered = args
            .iter()
            .map(|a| a.as_ref().to_string_lossy())
            .collect::<Vec<_>>()
            .join(" ");
        trace!(cwd = %cwd.display(), command = %rendered, "git");

        let output = Command::new(Self::executable()?)
            .args(args)
            .current_dir(cwd)
            .env("GCM_INTERACTIVE", "never")
            .env("GIT_TERMINAL_PROMPT", "0")
            .env("GIT_LITERAL_PATHSPECS", "1")
            .output()
            .map_err(|e| std::io::Error::new(e.kind(), format!("failed to execute git: {e}")))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            // some porcelain commands report failures on stdout only
            let message = if stderr.is_empty() {
                String::from_utf8_lossy(&output.stdout).trim().to_string()
            } else {
                stderr
            };
            return Err(GitError::CommandFailed {
                command: format!("git {rendered}"),
                message,
            }
            .into());
        }
        Ok(output.stdout)
    }

    /// Execute a git command and return trimmed stdout.
    ///
    /// Sets `GCM_INTERACTIVE=never`, `GIT_TERMINAL_PROMPT=0` and
    /// `GIT_LITERAL_PATHSPECS=1`.
    pub(crate) fn git_command<S: AsRef<OsStr>>(args: &[S], cwd: &Path) -> MixResult<String> {
        let stdout = Self::run(args, cwd)?;
        Ok(String::from_utf8_lossy(&stdout).trim().to_string())
    }

    /// Execute a git command and return stdout untouched (for `-z` output).
    pub(crate) fn git_command_raw<S: AsRef<OsStr>>(args: &[S], cwd: &Path) -> MixResult<String> {
        let stdout = Self::run(args, cwd)?;
        Ok(String::from_utf8_lossy(&stdout).into_owned())
    }

    fn with_paths<'a>(base: &[&'a str], paths: &[&'a OsStr]) -> Vec<&'a OsStr> {
        let mut args: Vec<&OsStr> = base.iter().map(|s| OsStr::new(*s)).collect();
        args.push(OsStr::new("--"));
        args.extend_from_slice(paths);
        args
    }
}

impl GitMutation for ShellBackend {
    fn init_repo(path: &Path, initial_branch: &str) -> MixResult<()> {
        let branch_arg = format!("--initial-branch={initial_branch}");
        Self::git_command(&["init", "--quiet", branch_arg.as_str()], path)?;
        Ok(())
    }

    fn add(repo_path: &Path, paths: &[&OsStr]) -> MixResult<()> {
        if paths.is_empty() {
            return Ok(());
        }
        Self::git_command(&Self::with_paths(&["add", "-A"], paths), repo_path)?;
        Ok(())
    }

    fn commit(repo_path: &Path, message: &str, allow_empty: bool) -> MixResult<()> {
        let mut args = vec!["commit", "--quiet", "--no-verify", "-m", message];
        if allow_empty {
            args.push("--allow-empty");
        }
        Self::git_command(&args, repo_path)?;
        Ok(())
    }

    fn checkout(repo_path: &Path, what: &str) -> MixResult<()> {
        Self::git_command(
            &["-c", "advice.detachedHead=false", "checkout", "-q", what],
            repo_path,
        )?;
        Ok(())
    }

    fn detach(repo_path: &Path, rev: &str) -> MixResult<()> {
        Self::git_command(
            &["-c", "advice.detachedHead=false", "checkout", "-q", "--detach", rev],
            repo_path,
        )?;
        Ok(())
    }

    fn create_branch(repo_path: &Path, name: &str) -> MixResult<()> {
        Self::git_command(&["checkout", "-q", "-b", name], repo_path)?;
        Ok(())
    }

    fn delete_branch(repo_path: &Path, name: &str) -> MixResult<()> {
        Self::git_command(&["branch", "-q", "-D", name], repo_path)?;
        Ok(())
    }

    fn stash_push(repo_path: &Path, message: &str) -> MixResult<()> {
        Self::git_command(
            &["stash", "push", "--include-untracked", "--quiet", "-m", message],
            repo_path,
        )?;
        Ok(())
    }

    fn restore_paths(repo_path: &Path, paths: &[&OsStr]) -> MixResult<()> {
        if paths.is_empty() {
            return Ok(());
        }
        Self::git_command(&Self::with_paths(&["checkout", "-q", "HEAD"], paths), repo_path)?;
        Ok(())
    }

    fn unstage_paths(repo_path: &Path, paths: &[&OsStr]) -> MixResult<()> {
        if paths.is_empty() {
            return Ok(());
        }
        Self::git_command(
            &Self::with_paths(&["rm", "-q", "-r", "-f", "--cached"], paths),
            repo_path,
        )?;
        Ok(())
    }

    fn clean_paths(repo_path: &Path, paths: &[&OsStr]) -> MixResult<()> {
        if paths.is_empty() {
            return Ok(());
        }
        Self::git_command(&Self::with_paths(&["clean", "-q", "-f", "-d"], paths), repo_path)?;
        Ok(())
    }

    fn set_config(repo_path: &Path, key: &str, value: &str) -> MixResult<()> {
        Self::git_command(&["config", key, value], repo_path)?;
        Ok(())
    }
}

impl GitQuery for ShellBackend {
    fn is_repo_root(path: &Path) -> bool {
        Self::git_command(&["rev-parse", "--show-toplevel"], path)
            .is_ok_and(|top| same_path(Path::new(&top), path))
    }

    fn current_branch(path: &Path) -> MixResult<Option<String>> {
        Self::git_command(&["symbolic-ref", "--short", "-q", "HEAD"], path)
            .map_or_else(|_| Ok(None), |branch| Ok(Some(branch)))
    }
}

#[cfg(test)]
mod tests;
