// mixvault: version lines and snapshots for music projects
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Version lines.
//!
//! ```text
//! create_line("take2", from)
//!
//!   main:  A ── B ── C
//!                \
//!                 M          detach at `from` (or HEAD), then commit
//!                 │            .version_marker
//!                 take2        empty_project.placeholder (only without project files)
//! ```
//!
//! The marker commit pins the new line to the exact source commit. There is
//! no rollback: if the branch was created and a later step failed, a retry
//! reports `LineExists`.

use chrono::Local;
use regex::Regex;
use serde::Serialize;
use std::path::Path;
use tracing::info;

use crate::error::{FsError, LineError, MixResult, bail_out};
use crate::git::history::short_id;
use crate::layout::{MARKER_FILE, PLACEHOLDER_FILE};
use crate::repo::RepositoryBinding;

const NAME_PATTERN: &str = r"^[A-Za-z0-9_-]+$";

/// A line created by [`VersionLineManager::create_line`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CreatedLine {
    pub name: String,
    pub message: String,
    pub commit: String,
    /// Source commit the line starts from.
    pub from: String,
    /// Whether a placeholder had to be synthesized.
    pub placeholder: bool,
}

/// Creates and deletes lines on a bound repository.
#[derive(Debug, Clone, Copy)]
pub struct VersionLineManager<'a> {
    binding: &'a RepositoryBinding,
}

impl<'a> VersionLineManager<'a> {
    #[must_use]
    pub const fn new(binding: &'a RepositoryBinding) -> Self {
        Self { binding }
    }

    /// Check `name` against the allowed characters.
    ///
    /// # Errors
    ///
    /// Returns `LineError::InvalidName` for anything but letters, digits,
    /// `-` and `_`.
    pub fn validate_name(name: &str) -> MixResult<()> {
        let pattern =
            Regex::new(NAME_PATTERN).map_err(|e| bail_out(format!("line name pattern: {e}")))?;
        if pattern.is_match(name) {
            Ok(())
        } else {
            Err(LineError::InvalidName {
                name: name.to_string(),
            }
            .into())
        }
    }

    /// Start a new line at `from` (any revision) or at HEAD.
    ///
    /// # Errors
    ///
    /// Returns `InvalidName` or `LineExists` before touching the repository,
    /// and a `GitError` with the engine's message if a later step fails.
    pub fn create_line(&self, name: &str, from: Option<&str>) -> MixResult<CreatedLine> {
        Self::validate_name(name)?;
        if self.binding.line_exists(name)? {
            return Err(LineError::LineExists {
                name: name.to_string(),
            }
            .into());
        }

        let source = match from {
            Some(rev) => self.binding.resolve_commit(rev)?,
            None => self
                .binding
                .head_commit()?
                .ok_or_else(|| bail_out("the project has no commit to start a line from"))?,
        };

        self.binding.detach(&source)?;

        let root = self.binding.root();
        let placeholder = !self.commit_has_project_files(&source)?;
        let mut staged = vec![MARKER_FILE];
        if placeholder {
            write_file(
                &root.join(PLACEHOLDER_FILE),
                "This version line has no project file yet.\n",
            )?;
            staged.push(PLACEHOLDER_FILE);
        }
        write_file(
            &root.join(MARKER_FILE),
            &format!(
                "Start of version line '{name}'\nbranched from {} on {}\n",
                short_id(&source),
                Local::now().format("%Y-%m-%d %H:%M:%S"),
            ),
        )?;

        self.binding.stage(&staged)?;
        let message = format!("Start version line '{name}'");
        let commit = self.binding.commit_staged(&message, true)?;
        self.binding.create_branch(name)?;

        info!(line = %name, from = %short_id(&source), placeholder, "created version line");
        Ok(CreatedLine {
            name: name.to_string(),
            message,
            commit,
            from: source,
            placeholder,
        })
    }

    /// Delete a line that is neither checked out nor the initial line.
    ///
    /// # Errors
    ///
    /// Returns `LineNotFound` or `ProtectedLine`, or a `GitError`.
    pub fn delete_line(&self, name: &str) -> MixResult<()> {
        if !self.binding.line_exists(name)? {
            return Err(LineError::LineNotFound {
                name: name.to_string(),
            }
            .into());
        }
        let protected = |reason: &str| LineError::ProtectedLine {
            name: name.to_string(),
            reason: reason.to_string(),
        };
        if self.binding.current_line()?.as_deref() == Some(name) {
            return Err(protected("it is checked out").into());
        }
        if self.binding.project().initial_line == name {
            return Err(protected("it is the initial line").into());
        }

        self.binding.delete_branch(name)?;
        info!(line = %name, "deleted version line");
        Ok(())
    }

    /// Whether `commit` tracks a project file, directly or inside a bundle.
    /// Untracked files in the folder do not count.
    fn commit_has_project_files(&self, commit: &str) -> MixResult<bool> {
        let project = self.binding.project();
        Ok(self.binding.commit_files(commit)?.iter().any(|file| {
            Path::new(file)
                .ancestors()
                .any(|path| project.is_content_path(path))
        }))
    }
}

fn write_file(path: &Path, content: &str) -> MixResult<()> {
    if path.exists() {
        crate::utility::fs::perms::set_writable(path, true)
            .map_err(|e| bail_out(format!("{e:#}")))?;
    }
    std::fs::write(path, content).map_err(|e| FsError::io(path, e).into())
}
