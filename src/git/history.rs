// mixvault: version lines and snapshots for music projects
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Commits, lines and reference resolution.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::BTreeSet;
use std::path::Path;

use crate::error::MixResult;

use super::backend::ShellBackend;

const FIELD: char = '\u{1f}';
const RECORD: char = '\u{1e}';
const LOG_FORMAT: &str = "--format=%H%x1f%P%x1f%an%x1f%at%x1f%s%x1e";

/// A commit as shown in history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Commit {
    pub id: String,
    pub message: String,
    pub timestamp: DateTime<Utc>,
    pub author: String,
    pub parents: Vec<String>,
    /// Tracked paths; empty until loaded with [`commit_files`].
    #[serde(skip_serializing_if = "BTreeSet::is_empty")]
    pub files: BTreeSet<String>,
}

impl Commit {
    /// Abbreviated identifier for display.
    #[must_use]
    pub fn short_id(&self) -> &str {
        short_id(&self.id)
    }
}

/// First seven characters of a commit id.
#[must_use]
pub fn short_id(id: &str) -> &str {
    id.get(..7).unwrap_or(id)
}

/// A named line of development.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Line {
    pub name: String,
    pub head: String,
}

fn parse_commit(record: &str) -> Option<Commit> {
    let mut fields = record.trim_start_matches('\n').split(FIELD);
    let id = fields.next()?.to_string();
    if id.is_empty() {
        return None;
    }
    let parents = fields
        .next()?
        .split_whitespace()
        .map(String::from)
        .collect();
    let author = fields.next()?.to_string();
    let timestamp = fields
        .next()?
        .parse::<i64>()
        .ok()
        .and_then(|secs| DateTime::from_timestamp(secs, 0))
        .unwrap_or_default();
    let message = fields.next().unwrap_or_default().to_string();

    Some(Commit {
        id,
        message,
        timestamp,
        author,
        parents,
        files: BTreeSet::new(),
    })
}

/// Parse `git log` output produced with the internal record format.
#[must_use]
pub fn parse_log(output: &str) -> Vec<Commit> {
    output.split(RECORD).filter_map(parse_commit).collect()
}

/// Commits reachable from `rev`, newest first.
///
/// # Errors
///
/// Returns a `GitError` if `rev` is unknown or `git log` fails.
pub fn log(repo_path: &Path, rev: &str, limit: Option<usize>) -> MixResult<Vec<Commit>> {
    let max = limit.map(|n| format!("--max-count={n}"));
    let mut args = vec!["log", LOG_FORMAT];
    if let Some(max) = &max {
        args.push(max);
    }
    args.push(rev);
    args.push("--");
    let output = ShellBackend::git_command_raw(&args, repo_path)?;
    Ok(parse_log(&output))
}

/// Tracked paths of a commit.
///
/// # Errors
///
/// Returns a `GitError` if the commit is unknown.
pub fn commit_files(repo_path: &Path, id: &str) -> MixResult<BTreeSet<String>> {
    let output = ShellBackend::git_command_raw(
        &["ls-tree", "-r", "-z", "--name-only", "--full-tree", id],
        repo_path,
    )?;
    Ok(output
        .split('\0')
        .filter(|p| !p.is_empty())
        .map(String::from)
        .collect())
}

/// Full commit id for a revision.
///
/// # Errors
///
/// Returns a `GitError` with git's message if `rev` does not name a commit.
pub fn resolve_commit(repo_path: &Path, rev: &str) -> MixResult<String> {
    let revspec = format!("{rev}^{{commit}}");
    ShellBackend::git_command(&["rev-parse", "--verify", "--end-of-options", &revspec], repo_path)
}

/// Current HEAD commit id; `None` in a repository without commits.
///
/// # Errors
///
/// Returns a `GitError` if git cannot be run.
pub fn head_commit(repo_path: &Path) -> MixResult<Option<String>> {
    let output = ShellBackend::git_command(&["rev-parse", "--verify", "-q", "HEAD"], repo_path);
    match output {
        Ok(id) => Ok(Some(id)),
        Err(err) if err.engine_message().is_some() => Ok(None),
        Err(err) => Err(err),
    }
}

/// All lines, sorted by name.
///
/// # Errors
///
/// Returns a `GitError` if `git for-each-ref` fails.
pub fn lines(repo_path: &Path) -> MixResult<Vec<Line>> {
    let output = ShellBackend::git_command(
        &[
            "for-each-ref",
            "--sort=refname",
            "--format=%(refname:short)%09%(objectname)",
            "refs/heads",
        ],
        repo_path,
    )?;
    Ok(output
        .lines()
        .filter_map(|line| {
            let (name, head) = line.split_once('\t')?;
            Some(Line {
                name: name.to_string(),
                head: head.to_string(),
            })
        })
        .collect())
}

/// Every commit reachable from any reference.
///
/// # Errors
///
/// Returns a `GitError` if `git rev-list` fails.
pub fn reachable_commits(repo_path: &Path) -> MixResult<BTreeSet<String>> {
    if head_commit(repo_path)?.is_none() {
        return Ok(BTreeSet::new());
    }
    let output = ShellBackend::git_command(&["rev-list", "--all"], repo_path)?;
    Ok(output.lines().map(String::from).collect())
}

/// Read a config value; `None` when unset.
#[must_use]
pub fn config_value(repo_path: &Path, key: &str) -> Option<String> {
    ShellBackend::git_command(&["config", "--get", key], repo_path)
        .ok()
        .filter(|value| !value.is_empty())
}
