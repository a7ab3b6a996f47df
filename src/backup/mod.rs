// mixvault: version lines and snapshots for music projects
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Safety backups taken before risky transitions.
//!
//! ```text
//! <parent>/
//! ├── Song/                                  project root
//! │   └── .git/latest_snapshot/<commit-id>/   backup_if_needed, one per commit
//! ├── Backup_Song_20260314_201502/           backup_unsaved
//! └── Backup_Song_20260314_201502_2/         same second, numeric suffix
//! ```
//!
//! Both kinds copy the top-level entries of the project except the control
//! directory and the editable scratch copy. A single entry that fails to copy
//! is logged and skipped; only failing to create the backup directory fails
//! the operation. Per-commit backups are never overwritten.

use chrono::Local;
use regex::Regex;
use serde::Serialize;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use crate::error::{BackupError, FsError, MixResult, bail_out};
use crate::layout::{BACKUP_EXCLUDES, UNSAVED_BACKUP_PREFIX, snapshot_root};
use crate::utility::fs::copy::copy_top_level;

/// `<YYYYmmdd_HHMMSS>` with an optional `_<n>` from same-second backups.
const STAMP_PATTERN: &str = r"^([0-9]{8}_[0-9]{6})(?:_([0-9]+))?$";

/// Result of [`SafetyBackupService::backup_if_needed`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SnapshotBackup {
    pub path: PathBuf,
    /// False when a backup for the commit already existed.
    pub created: bool,
    pub copied: usize,
}

/// Copies project content out of harm's way.
#[derive(Debug, Clone)]
pub struct SafetyBackupService {
    root: PathBuf,
}

impl SafetyBackupService {
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Directory holding the per-commit backup of `commit_id`.
    #[must_use]
    pub fn snapshot_path(&self, commit_id: &str) -> PathBuf {
        snapshot_root(&self.root).join(commit_id)
    }

    /// Back up the working tree for `commit_id` unless a backup already exists.
    ///
    /// # Errors
    ///
    /// Returns a `BackupError::CreateDir` if the backup directory cannot be
    /// created.
    pub fn backup_if_needed(&self, commit_id: &str) -> MixResult<SnapshotBackup> {
        let path = self.snapshot_path(commit_id);
        if path.exists() {
            debug!(commit = %commit_id, "snapshot backup already present");
            return Ok(SnapshotBackup {
                path,
                created: false,
                copied: 0,
            });
        }

        fs::create_dir_all(&path).map_err(|source| BackupError::CreateDir {
            path: path.display().to_string(),
            source,
        })?;
        let copied = self.copy_content_to(&path);
        info!(commit = %commit_id, copied, "created snapshot backup");

        Ok(SnapshotBackup {
            path,
            created: true,
            copied,
        })
    }

    /// Copy the project next to itself as `Backup_<name>_<timestamp>`.
    ///
    /// # Errors
    ///
    /// Returns a `BackupError::CreateDir` if no backup directory can be
    /// created, or a fatal error if the project has no parent directory.
    pub fn backup_unsaved(&self) -> MixResult<PathBuf> {
        let (parent, name) = self.parent_and_name()?;
        let stamp = Local::now().format("%Y%m%d_%H%M%S");
        let base = format!("{UNSAVED_BACKUP_PREFIX}{name}_{stamp}");

        let mut suffix = 1_u32;
        let path = loop {
            let candidate = if suffix == 1 {
                parent.join(&base)
            } else {
                parent.join(format!("{base}_{suffix}"))
            };
            match fs::create_dir(&candidate) {
                Ok(()) => break candidate,
                Err(e) if e.kind() == ErrorKind::AlreadyExists => suffix += 1,
                Err(source) => {
                    return Err(BackupError::CreateDir {
                        path: candidate.display().to_string(),
                        source,
                    }
                    .into());
                }
            }
        };

        let copied = self.copy_content_to(&path);
        info!(backup = %path.display(), copied, "backed up unsaved changes");
        Ok(path)
    }

    /// Unsaved-change backups of this project, oldest first.
    ///
    /// # Errors
    ///
    /// Returns an `FsError` if the parent directory cannot be listed.
    pub fn unsaved_backups(&self) -> MixResult<Vec<PathBuf>> {
        let (parent, name) = self.parent_and_name()?;
        let prefix = format!("{UNSAVED_BACKUP_PREFIX}{name}_");
        let stamp = Regex::new(STAMP_PATTERN)
            .map_err(|e| bail_out(format!("backup stamp pattern: {e}")))?;

        let mut backups: Vec<((String, u32), PathBuf)> = fs::read_dir(parent)
            .map_err(|e| FsError::io(parent, e))?
            .filter_map(std::result::Result::ok)
            .filter(|entry| entry.path().is_dir())
            .filter_map(|entry| {
                let file_name = entry.file_name();
                let rest = file_name.to_str()?.strip_prefix(&prefix)?;
                // a sibling such as Song_v2 shares the prefix but not the stamp
                let caps = stamp.captures(rest)?;
                let suffix = caps.get(2).map_or(Some(1), |m| m.as_str().parse().ok())?;
                Some(((caps[1].to_string(), suffix), entry.path()))
            })
            .collect();
        backups.sort();
        Ok(backups.into_iter().map(|(_, path)| path).collect())
    }

    /// Copy the newest unsaved-change backup back over the project.
    ///
    /// # Errors
    ///
    /// Returns a `BackupError::NoBackup` if there is none.
    pub fn restore_latest_unsaved(&self) -> MixResult<PathBuf> {
        let latest = self.unsaved_backups()?.pop().ok_or_else(|| BackupError::NoBackup {
            project: self.project_name(),
        })?;
        self.copy_back(&latest)?;
        Ok(latest)
    }

    /// Copy the per-commit backup of `commit_id` back over the project.
    ///
    /// # Errors
    ///
    /// Returns a `BackupError::NoSnapshot` if no backup exists for the commit.
    pub fn restore_snapshot(&self, commit_id: &str) -> MixResult<PathBuf> {
        let path = self.snapshot_path(commit_id);
        if !path.is_dir() {
            return Err(BackupError::NoSnapshot {
                commit: commit_id.to_string(),
            }
            .into());
        }
        self.copy_back(&path)?;
        Ok(path)
    }

    /// Commit ids that have a per-commit backup, sorted.
    #[must_use]
    pub fn snapshots(&self) -> Vec<String> {
        let Ok(entries) = fs::read_dir(snapshot_root(&self.root)) else {
            return Vec::new();
        };
        let mut ids: Vec<String> = entries
            .filter_map(std::result::Result::ok)
            .filter(|entry| entry.path().is_dir())
            .filter_map(|entry| entry.file_name().into_string().ok())
            .collect();
        ids.sort();
        ids
    }

    fn copy_content_to(&self, dst: &Path) -> usize {
        copy_top_level(&self.root, dst, BACKUP_EXCLUDES).unwrap_or_else(|e| {
            warn!(project = %self.root.display(), error = %format!("{e:#}"), "backup copied nothing");
            0
        })
    }

    fn copy_back(&self, backup: &Path) -> MixResult<()> {
        let restored = copy_top_level(backup, &self.root, BACKUP_EXCLUDES)
            .map_err(|e| bail_out(format!("{e:#}")))?;
        info!(backup = %backup.display(), restored, "restored backup");
        Ok(())
    }

    fn parent_and_name(&self) -> MixResult<(&Path, String)> {
        let parent = self
            .root
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .ok_or_else(|| bail_out(format!("{} has no parent directory", self.root.display())))?;
        Ok((parent, self.project_name()))
    }

    fn project_name(&self) -> String {
        self.root
            .file_name()
            .map_or_else(|| "project".to_string(), |n| n.to_string_lossy().into_owned())
    }
}

#[cfg(test)]
mod tests;
