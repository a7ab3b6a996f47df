// mixvault: version lines and snapshots for music projects
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Working tree status parsing.
//!
//! ```text
//! git status --porcelain=v1 -z --untracked-files=all
//!
//!   "XY path\0"            one record per entry
//!   "R  new\0old\0"        renames/copies carry the source as an extra record
//! ```

use serde::Serialize;
use std::path::Path;

use crate::error::MixResult;

use super::backend::ShellBackend;

/// Kind of change reported for a path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeKind {
    Added,
    Modified,
    Deleted,
    Untracked,
}

impl ChangeKind {
    fn from_xy(x: char, y: char) -> Self {
        match (x, y) {
            ('?', _) | (_, '?') => Self::Untracked,
            ('A', _) | (_, 'A') => Self::Added,
            ('D', _) | (_, 'D') => Self::Deleted,
            _ => Self::Modified,
        }
    }

    /// Whether HEAD knows the path.
    #[must_use]
    pub const fn is_tracked(self) -> bool {
        matches!(self, Self::Modified | Self::Deleted)
    }
}

impl std::fmt::Display for ChangeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Self::Added => "added",
            Self::Modified => "modified",
            Self::Deleted => "deleted",
            Self::Untracked => "untracked",
        };
        f.write_str(label)
    }
}

/// One changed path in the working tree, relative to the repository root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusEntry {
    pub path: String,
    pub kind: ChangeKind,
}

/// Parse NUL-separated porcelain v1 output.
#[must_use]
pub fn parse_porcelain_z(output: &str) -> Vec<StatusEntry> {
    let mut entries = Vec::new();
    let mut records = output.split('\0');

    while let Some(record) = records.next() {
        let mut chars = record.chars();
        let (Some(x), Some(y), Some(' ')) = (chars.next(), chars.next(), chars.next()) else {
            continue;
        };
        let path = chars.as_str();
        if path.is_empty() || x == '!' {
            continue;
        }
        if matches!(x, 'R' | 'C') || matches!(y, 'R' | 'C') {
            // source path of the rename; the destination is what changed
            records.next();
        }
        entries.push(StatusEntry {
            path: path.to_string(),
            kind: ChangeKind::from_xy(x, y),
        });
    }

    entries
}

/// Current working tree changes, untracked files listed individually.
///
/// # Errors
///
/// Returns a `GitError` if `git status` fails.
pub fn status(repo_path: &Path) -> MixResult<Vec<StatusEntry>> {
    let output = ShellBackend::git_command_raw(
        &["status", "--porcelain=v1", "-z", "--untracked-files=all"],
        repo_path,
    )?;
    Ok(parse_porcelain_z(&output))
}
