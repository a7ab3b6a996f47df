// mixvault: version lines and snapshots for music projects
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Snapshot and line transitions.
//!
//! ```text
//!                 checkout(id)
//!      ,--------,  ───────────────>  ,----------,
//!      | OnLine |                    | Detached |  project files read-only,
//!      '--------'  <───────────────  '----------'  editable_snapshot/ copy
//!        │    ^     return_to_latest      │  ^
//!        │    │                           │  │ checkout(other id)
//!        '────'                           '──'
//!     switch_line(name)
//!
//! every transition:
//!   lock ─> classify ─> relevant? ─ yes ─> DirtyStateBlocked(files)
//!                          │
//!                          no ─> backup ─> discard noise ─> move ─> rebuild handle
//! ```
//!
//! The controller owns the [`RepositoryHandle`] and rebuilds it from disk
//! after every operation, failed ones included. A lock file under the
//! control directory keeps two processes from transitioning the same
//! project at once.

pub mod lock;


use bon::Builder;
use serde::Serialize;
use std::path::PathBuf;
use tracing::{debug, info, warn};

use crate::backup::SafetyBackupService;
use crate::classify::{DirtyFileClassifier, Triage};
use crate::config::types::NoiseConfig;
use crate::error::{MixError, MixResult, TransitionError};
use crate::git::history::short_id;
use crate::layout::editable_dir;
use crate::lines::{CreatedLine, VersionLineManager};
use crate::repo::{RepositoryBinding, RepositoryHandle};
use crate::utility::fs::copy::{copy_entry, remove_entry};

use lock::TransitionLock;

/// Yes/no decisions the controller needs from the user.
pub trait Confirm {
    fn confirm(&self, question: &str) -> bool;
}

/// Answers every question with yes.
#[derive(Debug, Clone, Copy, Default)]
pub struct AssumeYes;

impl Confirm for AssumeYes {
    fn confirm(&self, question: &str) -> bool {
        debug!(%question, "assuming yes");
        true
    }
}

/// Answers every question with no.
#[derive(Debug, Clone, Copy, Default)]
pub struct AssumeNo;

impl Confirm for AssumeNo {
    fn confirm(&self, question: &str) -> bool {
        debug!(%question, "assuming no");
        false
    }
}

/// Where the working directory stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TransitionState {
    OnLine,
    Detached,
}

/// How an operation ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    /// Already there; nothing changed.
    Noop,
    /// The operation was carried out.
    Done,
    /// The user declined.
    Cancelled,
}

/// Result of a successful (or declined) operation.
#[derive(Debug, Clone, Serialize, Builder)]
pub struct Transition {
    pub outcome: Outcome,
    pub handle: RepositoryHandle,
    /// Noise paths thrown away.
    #[builder(default)]
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub discarded: Vec<String>,
    /// Backup taken on the way.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub backup: Option<PathBuf>,
    /// Line created on the way.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created: Option<CreatedLine>,
    /// Commit created by the operation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub commit: Option<String>,
}

/// State machine over one bound project.
pub struct SnapshotTransitionController {
    binding: RepositoryBinding,
    classifier: DirtyFileClassifier,
    backups: SafetyBackupService,
    confirm: Box<dyn Confirm>,
    handle: RepositoryHandle,
}

impl std::fmt::Debug for SnapshotTransitionController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SnapshotTransitionController")
            .field("root", &self.binding.root())
            .field("handle", &self.handle)
            .finish_non_exhaustive()
    }
}

impl SnapshotTransitionController {
    /// Take over a bound project.
    ///
    /// # Errors
    ///
    /// Returns a `GitError` if the initial handle cannot be built.
    pub fn new(
        binding: RepositoryBinding,
        noise: &NoiseConfig,
        confirm: Box<dyn Confirm>,
    ) -> MixResult<Self> {
        let handle = binding.handle()?;
        Ok(Self {
            classifier: DirtyFileClassifier::new(noise),
            backups: SafetyBackupService::new(binding.root()),
            binding,
            confirm,
            handle,
        })
    }

    #[must_use]
    pub const fn handle(&self) -> &RepositoryHandle {
        &self.handle
    }

    #[must_use]
    pub const fn binding(&self) -> &RepositoryBinding {
        &self.binding
    }

    #[must_use]
    pub const fn backups(&self) -> &SafetyBackupService {
        &self.backups
    }

    #[must_use]
    pub const fn state(&self) -> TransitionState {
        if self.handle.detached {
            TransitionState::Detached
        } else {
            TransitionState::OnLine
        }
    }

    /// Classify the current working tree changes.
    ///
    /// # Errors
    ///
    /// Returns a `GitError` if `git status` fails.
    pub fn triage(&self) -> MixResult<Triage> {
        Ok(self.classifier.classify(&self.binding.status()?))
    }

    /// Show the commit `rev` read-only.
    ///
    /// # Errors
    ///
    /// Returns `DirtyStateBlocked` with the relevant paths (nothing is
    /// touched), `InProgress`, or a `GitError` with the engine's message.
    pub fn checkout(&mut self, rev: &str) -> MixResult<Transition> {
        let _lock = TransitionLock::acquire(self.binding.root())?;
        let target = self.binding.resolve_commit(rev)?;
        let triage = self.ensure_no_relevant_changes()?;

        if self.handle.head.as_deref() == Some(target.as_str()) {
            debug!(commit = %short_id(&target), "already at commit");
            return Ok(self.noop());
        }

        let backup = self.handle.head.clone().and_then(|head| {
            self.backups
                .backup_if_needed(&head)
                .map(|b| b.path)
                .inspect_err(|e| {
                    warn!(commit = %short_id(&head), error = %e, "snapshot backup failed");
                })
                .ok()
        });
        let discarded = self.binding.discard(&triage.noise_entries());

        self.binding.set_content_read_only(false);
        let moved = self.binding.detach(&target);
        if moved.is_ok() && self.binding.project().editable_copy {
            self.materialize_editable_copy();
        }
        self.settle()?;
        moved?;

        info!(commit = %short_id(&target), "viewing snapshot");
        Ok(Transition::builder()
            .outcome(Outcome::Done)
            .handle(self.handle.clone())
            .discarded(discarded)
            .maybe_backup(backup)
            .build())
    }

    /// Leave a snapshot view for the default line.
    ///
    /// # Errors
    ///
    /// Returns `DirtyStateBlocked`, `NoDefaultLine`, `InProgress`, or a
    /// `GitError` with the engine's message.
    pub fn return_to_latest(&mut self) -> MixResult<Transition> {
        let _lock = TransitionLock::acquire(self.binding.root())?;
        if !self.handle.detached {
            return Ok(self.noop());
        }

        let triage = self.ensure_no_relevant_changes()?;
        let line = self
            .binding
            .get_default_line()?
            .ok_or(TransitionError::NoDefaultLine)?;
        let discarded = self.binding.discard(&triage.noise_entries());

        self.remove_editable_copy();
        self.binding.set_content_read_only(false);
        let moved = self.binding.checkout(&line);
        self.settle()?;
        moved?;

        info!(%line, "returned to latest");
        Ok(Transition::builder()
            .outcome(Outcome::Done)
            .handle(self.handle.clone())
            .discarded(discarded)
            .build())
    }

    /// Move to the line `name`, offering to create it when missing.
    ///
    /// Relevant changes are backed up and stashed first, also when the line
    /// is created; noise is discarded.
    ///
    /// # Errors
    ///
    /// Returns `InProgress`, a `LineError` from creating the line, or a
    /// `GitError` with the engine's message.
    pub fn switch_line(&mut self, name: &str) -> MixResult<Transition> {
        let _lock = TransitionLock::acquire(self.binding.root())?;
        if self.handle.line() == Some(name) {
            return Ok(self.noop());
        }

        let create = !self.binding.line_exists(name)?;
        if create {
            VersionLineManager::validate_name(name)?;
            let question = format!("Version line '{name}' does not exist. Create it now?");
            if !self.confirm.confirm(&question) {
                info!(line = %name, "line creation declined");
                return Ok(Transition::builder()
                    .outcome(Outcome::Cancelled)
                    .handle(self.handle.clone())
                    .build());
            }
        }

        let triage = self.triage()?;
        let discarded = self.binding.discard(&triage.noise_entries());
        let backup = if triage.relevant.is_empty() {
            None
        } else {
            self.set_aside(&triage)?
        };

        if create {
            let mut created = self.create_line_locked(name, None)?;
            created.discarded = discarded;
            created.backup = backup;
            return Ok(created);
        }

        self.remove_editable_copy();
        self.binding.set_content_read_only(false);
        let moved = self.binding.checkout(name);
        self.settle()?;
        moved?;

        info!(line = %name, "switched line");
        Ok(Transition::builder()
            .outcome(Outcome::Done)
            .handle(self.handle.clone())
            .discarded(discarded)
            .maybe_backup(backup)
            .build())
    }

    /// Back up and stash every change so a blocked transition can be retried.
    ///
    /// # Errors
    ///
    /// Returns `InProgress`, a `BackupError` if no backup can be written, or
    /// a `GitError` if stashing fails.
    pub fn set_aside_changes(&mut self) -> MixResult<Transition> {
        let _lock = TransitionLock::acquire(self.binding.root())?;
        let triage = self.triage()?;
        if triage.is_clean() {
            return Ok(self.noop());
        }

        let discarded = self.binding.discard(&triage.noise_entries());
        let backup = if triage.relevant.is_empty() {
            None
        } else {
            let path = self.backups.backup_unsaved()?;
            self.stash_relevant(&triage)?;
            Some(path)
        };
        self.settle()?;

        Ok(Transition::builder()
            .outcome(Outcome::Done)
            .handle(self.handle.clone())
            .discarded(discarded)
            .maybe_backup(backup)
            .build())
    }

    /// Commit every change on the current line.
    ///
    /// # Errors
    ///
    /// Returns the binding's commit errors, `InProgress`, or an error when a
    /// snapshot is being viewed.
    pub fn commit(&mut self, message: &str) -> MixResult<Transition> {
        let _lock = TransitionLock::acquire(self.binding.root())?;
        if self.handle.detached {
            return Err(MixError::Other(
                "viewing a snapshot: create a version line from it before committing".into(),
            ));
        }

        let result = self.binding.commit(message);
        self.settle()?;
        let commit = result?;

        Ok(Transition::builder()
            .outcome(Outcome::Done)
            .handle(self.handle.clone())
            .commit(commit)
            .build())
    }

    /// Start the line `name` at `from` or at the current commit.
    ///
    /// # Errors
    ///
    /// Returns `InProgress`, a `LineError`, or a `GitError`.
    pub fn create_line(&mut self, name: &str, from: Option<&str>) -> MixResult<Transition> {
        let _lock = TransitionLock::acquire(self.binding.root())?;
        self.create_line_locked(name, from)
    }

    /// Delete the line `name`.
    ///
    /// # Errors
    ///
    /// Returns `InProgress` or a `LineError`.
    pub fn delete_line(&mut self, name: &str) -> MixResult<Transition> {
        let _lock = TransitionLock::acquire(self.binding.root())?;
        VersionLineManager::new(&self.binding).delete_line(name)?;
        self.settle()?;
        Ok(Transition::builder()
            .outcome(Outcome::Done)
            .handle(self.handle.clone())
            .build())
    }

    /// Rebuild the handle from disk.
    ///
    /// # Errors
    ///
    /// Returns a `GitError` if HEAD cannot be read.
    pub fn refresh(&mut self) -> MixResult<&RepositoryHandle> {
        self.handle = self.binding.handle()?;
        Ok(&self.handle)
    }

    fn create_line_locked(&mut self, name: &str, from: Option<&str>) -> MixResult<Transition> {
        VersionLineManager::validate_name(name)?;
        self.remove_editable_copy();
        self.binding.set_content_read_only(false);

        let created = VersionLineManager::new(&self.binding).create_line(name, from);
        self.settle()?;
        let created = created?;

        Ok(Transition::builder()
            .outcome(Outcome::Done)
            .handle(self.handle.clone())
            .commit(created.commit.clone())
            .created(created)
            .build())
    }

    fn ensure_no_relevant_changes(&self) -> MixResult<Triage> {
        let triage = self.triage()?;
        if triage.relevant.is_empty() {
            return Ok(triage);
        }
        let files = triage.relevant_paths();
        info!(count = files.len(), "transition blocked by unsaved changes");
        Err(TransitionError::DirtyStateBlocked { files }.into())
    }

    /// Backup (failure logged) and stash before leaving a line.
    fn set_aside(&self, triage: &Triage) -> MixResult<Option<PathBuf>> {
        let backup = self
            .backups
            .backup_unsaved()
            .inspect_err(|e| warn!(error = %e, "backup of unsaved changes failed"))
            .ok();
        self.stash_relevant(triage)?;
        Ok(backup)
    }

    fn stash_relevant(&self, triage: &Triage) -> MixResult<()> {
        let from = self.handle.line().map_or_else(
            || short_id(self.handle.head.as_deref().unwrap_or_default()).to_string(),
            String::from,
        );
        let message = format!("mixvault: {} unsaved change(s) on {from}", triage.relevant.len());
        // stashing rewrites project files; a read-only view would refuse
        self.binding.set_content_read_only(false);
        self.binding.stash(&message)?;
        info!(%message, "stashed unsaved changes");
        Ok(())
    }

    fn noop(&self) -> Transition {
        Transition::builder()
            .outcome(Outcome::Noop)
            .handle(self.handle.clone())
            .build()
    }

    /// Rebuild the handle and match project file permissions to it.
    fn settle(&mut self) -> MixResult<()> {
        self.handle = self.binding.handle()?;
        let read_only = self.handle.detached && self.binding.project().read_only_snapshots;
        self.binding.set_content_read_only(read_only);
        Ok(())
    }

    fn materialize_editable_copy(&self) {
        let root = self.binding.root();
        let target = editable_dir(root);
        if let Err(e) = remove_entry(&target) {
            warn!(error = %format!("{e:#}"), "could not clear editable copy");
            return;
        }
        let files = match self.binding.content_files() {
            Ok(files) => files,
            Err(e) => {
                warn!(error = %format!("{e:#}"), "cannot list project files");
                return;
            }
        };
        let mut copied = 0;
        for rel in &files {
            match copy_entry(&root.join(rel), &target.join(rel)) {
                Ok(()) => copied += 1,
                Err(e) => warn!(path = %rel.display(), error = %format!("{e:#}"), "not copied to editable snapshot"),
            }
        }
        debug!(copied, "materialized editable copy");
    }

    fn remove_editable_copy(&self) {
        if let Err(e) = remove_entry(&editable_dir(self.binding.root())) {
            warn!(error = %format!("{e:#}"), "could not remove editable copy");
        }
    }
}
