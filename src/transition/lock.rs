// mixvault: version lines and snapshots for music projects
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Cross-process "transition in progress" flag.

use std::fs::OpenOptions;
use std::io::{ErrorKind, Write as _};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::error::{FsError, MixResult, TransitionError};
use crate::layout::lock_path;

/// Held for the duration of one operation; the lock file is removed on drop.
#[derive(Debug)]
pub struct TransitionLock {
    path: PathBuf,
}

impl TransitionLock {
    /// Create the lock file of the project at `root`.
    ///
    /// # Errors
    ///
    /// Returns `TransitionError::InProgress` if the lock file exists.
    pub fn acquire(root: &Path) -> MixResult<Self> {
        let path = lock_path(root);
        let mut file = match OpenOptions::new().write(true).create_new(true).open(&path) {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::AlreadyExists => {
                return Err(TransitionError::InProgress {
                    lock: path.display().to_string(),
                }
                .into());
            }
            Err(e) => return Err(FsError::io(&path, e).into()),
        };
        // the pid helps to clear a stale lock by hand
        if let Err(e) = writeln!(file, "{}", std::process::id()) {
            debug!(error = %e, "could not write pid to lock file");
        }
        debug!(lock = %path.display(), "acquired transition lock");
        Ok(Self { path })
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for TransitionLock {
    fn drop(&mut self) {
        match std::fs::remove_file(&self.path) {
            Ok(()) => debug!(lock = %self.path.display(), "released transition lock"),
            Err(e) => warn!(lock = %self.path.display(), error = %e, "could not remove lock file"),
        }
    }
}
