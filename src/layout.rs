// mixvault: version lines and snapshots for music projects
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Fixed names inside a project folder.
//!
//! ```text
//! <project>/
//! ├── .git/                        control directory
//! │   ├── latest_snapshot/<id>/    per-commit safety backups
//! │   ├── commit_roles.json        role tags
//! │   └── mixvault.lock            transition lock
//! ├── .gitignore
//! ├── .version_marker              committed at the start of every line
//! ├── empty_project.placeholder    committed when a line has no project file
//! └── editable_snapshot/           writable copy while viewing a snapshot
//! ```

use std::path::{Path, PathBuf};

/// Control directory of the engine.
pub const CONTROL_DIR: &str = ".git";

/// Per-commit backups, under the control directory.
pub const SNAPSHOT_DIR: &str = "latest_snapshot";

/// Role sidecar, under the control directory.
pub const ROLES_FILE: &str = "commit_roles.json";

/// Transition lock, under the control directory.
pub const LOCK_FILE: &str = "mixvault.lock";

/// Ignore rules written into new repositories.
pub const IGNORE_FILE: &str = ".gitignore";

/// Marker committed at the start of a line.
pub const MARKER_FILE: &str = ".version_marker";

/// Content stand-in for lines without project files.
pub const PLACEHOLDER_FILE: &str = "empty_project.placeholder";

/// Scratch copy of project files while detached.
pub const EDITABLE_DIR: &str = "editable_snapshot";

/// Prefix of unsaved-change backups next to the project.
pub const UNSAVED_BACKUP_PREFIX: &str = "Backup_";

/// Default ignore rules.
pub const DEFAULT_IGNORE: &str = "\
# OS metadata
.DS_Store
._*
Thumbs.db
desktop.ini
Icon?
__MACOSX/

# Temporary and backup files
*.tmp
*.bak
*~

# mixvault scratch copy
/editable_snapshot/
";

/// Top-level entries never copied into backups.
pub const BACKUP_EXCLUDES: &[&str] = &[CONTROL_DIR, EDITABLE_DIR];

#[must_use]
pub fn control_dir(root: &Path) -> PathBuf {
    root.join(CONTROL_DIR)
}

#[must_use]
pub fn snapshot_root(root: &Path) -> PathBuf {
    control_dir(root).join(SNAPSHOT_DIR)
}

#[must_use]
pub fn roles_path(root: &Path) -> PathBuf {
    control_dir(root).join(ROLES_FILE)
}

#[must_use]
pub fn lock_path(root: &Path) -> PathBuf {
    control_dir(root).join(LOCK_FILE)
}

#[must_use]
pub fn editable_dir(root: &Path) -> PathBuf {
    root.join(EDITABLE_DIR)
}
