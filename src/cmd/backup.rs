// mixvault: version lines and snapshots for music projects
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Safety backup commands.

use serde::Serialize;
use std::path::PathBuf;
use tracing::info;

use crate::backup::SafetyBackupService;
use crate::cli::backup::{BackupArgs, BackupSubcommand, RestoreArgs, SnapshotArgs};
use crate::cmd::{Output, Session};
use crate::error::{Result, bail_out};
use crate::git::history::short_id;
use crate::report::{OperationReport, ReportStatus};
use crate::transition::lock::TransitionLock;

/// Run a `backup` subcommand.
///
/// # Errors
///
/// Returns the subcommand's error.
pub fn run_backup_command(args: &BackupArgs, session: &Session) -> Result<Output> {
    match &args.subcommand {
        BackupSubcommand::Snapshot(snapshot) => run_snapshot(snapshot, session),
        BackupSubcommand::Unsaved => run_unsaved(session),
        BackupSubcommand::Restore(restore) => run_restore(restore, session),
        BackupSubcommand::List => run_list(session),
    }
}

fn run_snapshot(args: &SnapshotArgs, session: &Session) -> Result<Output> {
    let binding = session.open()?;
    let id = match &args.rev {
        Some(rev) => binding.resolve_commit(rev)?,
        None => binding
            .head_commit()?
            .ok_or_else(|| bail_out("the project has no commits yet"))?,
    };

    let _lock = TransitionLock::acquire(binding.root())?;
    let backup = SafetyBackupService::new(binding.root()).backup_if_needed(&id)?;
    let report = if backup.created {
        OperationReport::ok(format!(
            "backed up {} item(s) to {}",
            backup.copied,
            backup.path.display()
        ))
    } else {
        OperationReport::new(
            ReportStatus::Noop,
            format!("{} is already backed up in {}", short_id(&id), backup.path.display()),
        )
    };
    Ok(report.with_commit(Some(id)).into())
}

fn run_unsaved(session: &Session) -> Result<Output> {
    let binding = session.open()?;
    let _lock = TransitionLock::acquire(binding.root())?;
    let path = SafetyBackupService::new(binding.root()).backup_unsaved()?;
    Ok(OperationReport::ok(format!("backed up to {}", path.display())).into())
}

fn run_restore(args: &RestoreArgs, session: &Session) -> Result<Output> {
    let binding = session.open()?;
    let service = SafetyBackupService::new(binding.root());
    let snapshot = args.snapshot.as_deref().map(|rev| {
        binding.resolve_commit(rev).unwrap_or_else(|_| {
            let mut stored = service.snapshots().into_iter().filter(|id| id.starts_with(rev));
            match (stored.next(), stored.next()) {
                (Some(id), None) => id,
                _ => rev.to_string(),
            }
        })
    });

    let question = match &snapshot {
        Some(id) => format!(
            "Overwrite project files with the backup of {}?",
            short_id(id)
        ),
        None => "Overwrite project files with the newest unsaved-change backup?".to_string(),
    };
    if !session.confirm(&question) {
        return Ok(OperationReport::new(ReportStatus::Cancelled, "nothing restored").into());
    }

    let _lock = TransitionLock::acquire(binding.root())?;
    let restored = match &snapshot {
        Some(id) => service.restore_snapshot(id)?,
        None => service.restore_latest_unsaved()?,
    };

    let handle = binding.handle()?;
    if handle.detached && binding.project().read_only_snapshots {
        binding.set_content_read_only(true);
    }
    info!(from = %restored.display(), "restored backup");
    Ok(OperationReport::ok(format!("restored from {}", restored.display()))
        .with_line(handle.line().map(String::from))
        .with_commit(handle.head)
        .into())
}

#[derive(Debug, Serialize)]
struct BackupListing {
    snapshots: Vec<String>,
    unsaved: Vec<PathBuf>,
}

fn run_list(session: &Session) -> Result<Output> {
    let binding = session.open()?;
    let service = SafetyBackupService::new(binding.root());
    let listing = BackupListing {
        snapshots: service.snapshots(),
        unsaved: service.unsaved_backups()?,
    };

    let mut text = Vec::new();
    if listing.snapshots.is_empty() {
        text.push("No snapshot backups".to_string());
    } else {
        text.push("Snapshot backups:".to_string());
        text.extend(listing.snapshots.iter().map(|id| format!("  {}", short_id(id))));
    }
    if listing.unsaved.is_empty() {
        text.push("No unsaved-change backups".to_string());
    } else {
        text.push("Unsaved-change backups:".to_string());
        text.extend(listing.unsaved.iter().map(|p| format!("  {}", p.display())));
    }
    Output::listing(text, &listing)
}
