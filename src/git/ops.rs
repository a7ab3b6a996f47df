// mixvault: version lines and snapshots for music projects
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Discarding working tree changes.
//!
//! ```text
//! modified/deleted --> checkout HEAD -- paths
//! added            --> rm --cached -- paths, then delete from disk
//! untracked        --> clean -f -d -- paths
//! ```
//!
//! Discarding is best effort: a batch that fails is retried path by path
//! and the paths that still fail are logged and left in place.

use std::ffi::OsStr;
use std::path::Path;
use tracing::{debug, warn};

use crate::error::MixResult;
use crate::utility::fs::copy::remove_entry;

use super::backend::{GitMutation, ShellBackend};
use super::status::{ChangeKind, StatusEntry};

type Batch = fn(&Path, &[&OsStr]) -> MixResult<()>;

fn run_batch(repo_path: &Path, paths: &[&str], action: Batch, what: &str) -> Vec<String> {
    if paths.is_empty() {
        return Vec::new();
    }
    let os_paths: Vec<&OsStr> = paths.iter().map(|p| OsStr::new(*p)).collect();
    if action(repo_path, &os_paths).is_ok() {
        return paths.iter().map(|p| (*p).to_string()).collect();
    }

    let mut done = Vec::new();
    for path in paths {
        match action(repo_path, &[OsStr::new(*path)]) {
            Ok(()) => done.push((*path).to_string()),
            Err(e) => warn!(path = %path.escape_debug(), error = %e, "could not {what}"),
        }
    }
    done
}

/// Discard the given changes. Returns the paths that were discarded.
pub fn discard(repo_path: &Path, entries: &[StatusEntry]) -> Vec<String> {
    let select = |wanted: fn(ChangeKind) -> bool| -> Vec<&str> {
        entries
            .iter()
            .filter(|e| wanted(e.kind))
            .map(|e| e.path.as_str())
            .collect()
    };

    let tracked = select(ChangeKind::is_tracked);
    let added = select(|k| k == ChangeKind::Added);
    let untracked = select(|k| k == ChangeKind::Untracked);

    let mut discarded = run_batch(repo_path, &tracked, ShellBackend::restore_paths, "restore");

    for path in run_batch(repo_path, &added, ShellBackend::unstage_paths, "unstage") {
        if let Err(e) = remove_entry(&repo_path.join(&path)) {
            warn!(path = %path.escape_debug(), error = %format!("{e:#}"), "could not delete unstaged file");
        }
        discarded.push(path);
    }

    discarded.extend(run_batch(repo_path, &untracked, ShellBackend::clean_paths, "clean"));

    debug!(count = discarded.len(), "discarded changes");
    discarded
}
