// mixvault: version lines and snapshots for music projects
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use crate::error::Result;
use anyhow::Context;
use std::fs;
use std::path::Path;
use tracing::warn;

/// Copies a file, or a directory recursively, from `src` to `dst`.
///
/// Existing destination files are overwritten. Symlinks are copied as the
/// file they point to.
///
/// # Errors
///
/// Returns an error if any IO operation fails (creating directory, reading, copying).
pub fn copy_entry(src: &Path, dst: &Path) -> Result<()> {
    if src.is_dir() {
        copy_dir_contents(src, dst)
    } else {
        if let Some(parent) = dst.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("failed to create directory {}", parent.display()))?;
        }
        // A read-only destination (snapshot view) cannot be overwritten in place.
        if dst.exists() {
            super::perms::set_writable(dst, true)?;
        }
        fs::copy(src, dst).with_context(|| {
            format!("failed to copy {} to {}", src.display(), dst.display())
        })?;
        Ok(())
    }
}

/// Recursively copies all contents from src directory to dst directory.
///
/// Creates dst if it doesn't exist.
///
/// # Errors
///
/// Returns an error if any IO operation fails (creating directory, reading, copying).
pub fn copy_dir_contents(src: &Path, dst: &Path) -> Result<()> {
    fs::create_dir_all(dst)
        .with_context(|| format!("failed to create directory {}", dst.display()))?;

    for entry in
        fs::read_dir(src).with_context(|| format!("failed to read directory {}", src.display()))?
    {
        let entry = entry.with_context(|| format!("failed to read entry from {}", src.display()))?;
        copy_entry(&entry.path(), &dst.join(entry.file_name()))?;
    }

    Ok(())
}

/// Copies every top-level entry of `src` into `dst`, skipping names in `exclude`.
///
/// Failures for individual entries are logged and skipped. Returns the
/// number of entries copied.
///
/// # Errors
///
/// Returns an error only if `src` cannot be listed.
pub fn copy_top_level(src: &Path, dst: &Path, exclude: &[&str]) -> Result<usize> {
    let mut copied = 0;

    for entry in
        fs::read_dir(src).with_context(|| format!("failed to read directory {}", src.display()))?
    {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                warn!(dir = %src.display(), error = %e, "skipping unreadable entry");
                continue;
            }
        };
        let name = entry.file_name();
        if name.to_str().is_some_and(|n| exclude.contains(&n)) {
            continue;
        }

        let target = dst.join(&name);
        match copy_entry(&entry.path(), &target) {
            Ok(()) => copied += 1,
            Err(e) => warn!(entry = %entry.path().display(), error = %format!("{e:#}"), "copy failed, skipping"),
        }
    }

    Ok(copied)
}

/// Removes a file or directory tree; missing paths are not an error.
///
/// # Errors
///
/// Returns an error if the path exists and cannot be removed.
pub fn remove_entry(path: &Path) -> Result<()> {
    let Ok(meta) = fs::symlink_metadata(path) else {
        return Ok(());
    };
    if meta.is_dir() {
        // Read-only files inside block removal on Windows.
        super::perms::set_tree_permissions(path, true)?;
        fs::remove_dir_all(path)
            .with_context(|| format!("failed to remove directory {}", path.display()))
    } else {
        fs::remove_file(path).with_context(|| format!("failed to remove file {}", path.display()))
    }
}
