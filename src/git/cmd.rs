// mixvault: version lines and snapshots for music projects
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Git command operations using shell backend.
//!
//! ```text
//! cmd.rs --> ShellBackend --> git (writes, working tree)
//! ```

use crate::error::MixResult;
use std::ffi::OsStr;
use std::path::Path;

use super::backend::{GitMutation, ShellBackend};

/// Initialize a new repository on `initial_branch`.
///
/// # Errors
///
/// Returns a `GitError` if repository initialization fails.
pub fn init_repo(path: &Path, initial_branch: &str) -> MixResult<()> {
    ShellBackend::init_repo(path, initial_branch)
}

/// Stage everything in the work tree, honoring ignore rules.
///
/// # Errors
///
/// Returns a `GitError` if `git add` fails.
pub fn add_all(repo_path: &Path) -> MixResult<()> {
    ShellBackend::add(repo_path, &[OsStr::new(".")])
}

/// Stage specific paths.
///
/// # Errors
///
/// Returns a `GitError` if `git add` fails.
pub fn add_paths(repo_path: &Path, paths: &[&OsStr]) -> MixResult<()> {
    ShellBackend::add(repo_path, paths)
}

/// Whether the index differs from HEAD (or holds anything, before the first commit).
///
/// # Errors
///
/// Returns a `GitError` if `git diff` fails.
pub fn has_staged_changes(repo_path: &Path) -> MixResult<bool> {
    let output = ShellBackend::git_command(&["diff", "--cached", "--name-only", "-z"], repo_path)?;
    Ok(!output.is_empty())
}

/// Commit the index.
///
/// # Errors
///
/// Returns a `GitError` if the commit fails.
pub fn commit(repo_path: &Path, message: &str, allow_empty: bool) -> MixResult<()> {
    ShellBackend::commit(repo_path, message, allow_empty)
}

/// Checkout a branch or commit.
///
/// # Errors
///
/// Returns a `GitError` if the checkout operation fails.
pub fn checkout(repo_path: &Path, what: &str) -> MixResult<()> {
    ShellBackend::checkout(repo_path, what)
}

/// Detach HEAD at `rev`, keeping working tree changes.
///
/// # Errors
///
/// Returns a `GitError` if the checkout operation fails.
pub fn detach(repo_path: &Path, rev: &str) -> MixResult<()> {
    ShellBackend::detach(repo_path, rev)
}

/// Create a branch at HEAD and check it out.
///
/// # Errors
///
/// Returns a `GitError` if the branch cannot be created.
pub fn create_branch(repo_path: &Path, name: &str) -> MixResult<()> {
    ShellBackend::create_branch(repo_path, name)
}

/// Delete a branch.
///
/// # Errors
///
/// Returns a `GitError` if the branch cannot be deleted.
pub fn delete_branch(repo_path: &Path, name: &str) -> MixResult<()> {
    ShellBackend::delete_branch(repo_path, name)
}

/// Set aside all changes, untracked files included.
///
/// # Errors
///
/// Returns a `GitError` if the stash cannot be created.
pub fn stash_push(repo_path: &Path, message: &str) -> MixResult<()> {
    ShellBackend::stash_push(repo_path, message)
}

/// Set git config value.
///
/// # Errors
///
/// Returns a `GitError` if the config value cannot be set.
pub fn set_config(repo_path: &Path, key: &str, value: &str) -> MixResult<()> {
    ShellBackend::set_config(repo_path, key, value)
}
