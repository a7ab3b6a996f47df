// mixvault: version lines and snapshots for music projects
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use crate::error::Result;
use anyhow::Context;
use std::fs;
use std::path::Path;

/// Grants or clears write permission on a single file or directory.
///
/// On Unix only the owner write bit is granted back; clearing removes all
/// write bits.
///
/// # Errors
///
/// Returns an error if the metadata cannot be read or the permissions cannot be set.
pub fn set_writable(path: &Path, writable: bool) -> Result<()> {
    let meta =
        fs::metadata(path).with_context(|| format!("failed to stat {}", path.display()))?;
    let mut perms = meta.permissions();

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let mode = perms.mode();
        let new_mode = if writable { mode | 0o200 } else { mode & !0o222 };
        if new_mode == mode {
            return Ok(());
        }
        perms.set_mode(new_mode);
    }

    #[cfg(not(unix))]
    {
        if perms.readonly() != writable {
            return Ok(());
        }
        #[allow(clippy::permissions_set_readonly_false)]
        perms.set_readonly(!writable);
    }

    fs::set_permissions(path, perms)
        .with_context(|| format!("failed to change permissions of {}", path.display()))
}

/// Whether the file can currently be written by its owner.
#[must_use]
pub fn is_writable(path: &Path) -> bool {
    fs::metadata(path).is_ok_and(|meta| owner_can_write(&meta.permissions()))
}

#[cfg(unix)]
fn owner_can_write(perms: &fs::Permissions) -> bool {
    use std::os::unix::fs::PermissionsExt;
    perms.mode() & 0o200 != 0
}

#[cfg(not(unix))]
fn owner_can_write(perms: &fs::Permissions) -> bool {
    !perms.readonly()
}

/// Applies [`set_writable`] to a path and, for directories, everything below it.
///
/// Directories are only ever made writable, so checkouts can still replace
/// their children.
///
/// # Errors
///
/// Returns an error on the first entry whose permissions cannot be changed.
pub fn set_tree_permissions(path: &Path, writable: bool) -> Result<()> {
    if path.is_dir() {
        set_writable(path, true)?;
        for entry in fs::read_dir(path)
            .with_context(|| format!("failed to read directory {}", path.display()))?
        {
            let entry =
                entry.with_context(|| format!("failed to read entry from {}", path.display()))?;
            set_tree_permissions(&entry.path(), writable)?;
        }
        Ok(())
    } else {
        set_writable(path, writable)
    }
}
