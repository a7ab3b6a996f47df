// mixvault: version lines and snapshots for music projects
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Backup command arguments.
//!
//! # Subcommands
//!
//! ```text
//! backup snapshot [REV]          → .git/latest_snapshot/<id>, once per commit
//! backup unsaved                 → ../Backup_<name>_<timestamp>
//! backup restore [--snapshot REV]
//!   → newest unsaved backup, or the snapshot of REV
//! backup list                    → commits with a snapshot backup
//! ```

use clap::{Args, Subcommand};

/// Arguments for the `backup` command.
#[derive(Debug, Clone, Args)]
pub struct BackupArgs {
    /// Backup subcommand.
    #[command(subcommand)]
    pub subcommand: BackupSubcommand,
}

/// Backup subcommands.
#[derive(Debug, Clone, Subcommand)]
pub enum BackupSubcommand {
    /// Backs up the working tree for a commit unless already done.
    Snapshot(SnapshotArgs),

    /// Copies the project next to itself with a timestamp.
    Unsaved,

    /// Copies a backup back over the project.
    Restore(RestoreArgs),

    /// Lists snapshot backups.
    List,
}

/// Arguments for `backup snapshot`.
#[derive(Debug, Clone, Args)]
pub struct SnapshotArgs {
    /// Commit to file the backup under (default: current commit).
    #[arg(value_name = "REV")]
    pub rev: Option<String>,
}

/// Arguments for `backup restore`.
#[derive(Debug, Clone, Args)]
pub struct RestoreArgs {
    /// Restore the snapshot backup of this commit instead of the newest
    /// unsaved backup.
    #[arg(long, value_name = "REV")]
    pub snapshot: Option<String>,
}
