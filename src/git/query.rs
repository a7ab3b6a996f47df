// mixvault: version lines and snapshots for music projects
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Git query operations using gix backend.
//!
//! ```text
//! query.rs --> GixBackend --> .git/ (no subprocess)
//! ```

use crate::error::MixResult;
use std::path::Path;

use super::backend::{GitQuery, GixBackend};

/// Whether `path` is the root of a repository work tree (not merely inside one).
#[must_use]
pub fn is_repo_root(path: &Path) -> bool {
    GixBackend::is_repo_root(path)
}

/// Get current branch name (None if HEAD is detached).
///
/// # Errors
///
/// Returns a `GitError` if the repository cannot be opened or HEAD cannot be read.
pub fn current_branch(path: &Path) -> MixResult<Option<String>> {
    GixBackend::current_branch(path)
}
