// mixvault: version lines and snapshots for music projects
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Configuration types for mixvault.
//!
//! ```text
//! Config: GlobalConfig, ProjectConfig, NoiseConfig
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::logging::LogLevel;

/// Global options.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GlobalConfig {
    /// Log level for console output (0-5).
    pub output_log_level: LogLevel,
    /// Log level for file output (0-5).
    pub file_log_level: LogLevel,
    /// Path to log file; no file log when unset.
    pub log_file: Option<PathBuf>,
    /// Write the log file as JSON lines.
    pub json_log: bool,
}

impl Default for GlobalConfig {
    fn default() -> Self {
        Self {
            output_log_level: LogLevel::Warn,
            file_log_level: LogLevel::Debug,
            log_file: None,
            json_log: false,
        }
    }
}

/// How project folders are recognized and treated.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProjectConfig {
    /// File (or bundle directory) extensions that count as project content.
    pub content_extensions: Vec<String>,
    /// Line names tried, in order, when returning from a detached snapshot.
    pub preferred_lines: Vec<String>,
    /// Name of the first line of a fresh repository.
    pub initial_line: String,
    /// Accept folders without any project file (scratch projects and tests).
    pub allow_empty_project: bool,
    /// Clear write permission on project files while viewing a snapshot.
    pub read_only_snapshots: bool,
    /// Materialize an editable copy of project files while viewing a snapshot.
    pub editable_copy: bool,
    /// Author name configured in new repositories without one.
    pub author_name: String,
    /// Author email configured in new repositories without one.
    pub author_email: String,
}

impl Default for ProjectConfig {
    fn default() -> Self {
        Self {
            content_extensions: [
                "als", "alp", "flp", "logicx", "rpp", "ptx", "ptf", "cpr", "song", "bwproject",
                "aup3", "reason", "mmpz", "ardour",
            ]
            .into_iter()
            .map(String::from)
            .collect(),
            preferred_lines: vec!["main".to_string(), "master".to_string()],
            initial_line: "main".to_string(),
            allow_empty_project: false,
            read_only_snapshots: true,
            editable_copy: true,
            author_name: "mixvault".to_string(),
            author_email: "mixvault@localhost".to_string(),
        }
    }
}

impl ProjectConfig {
    /// Whether `path` has a recognized project-content extension.
    #[must_use]
    pub fn is_content_path(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| {
                self.content_extensions
                    .iter()
                    .any(|known| known.eq_ignore_ascii_case(ext))
            })
    }
}

/// Rules for changes that are safe to discard automatically.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct NoiseConfig {
    /// Exact file names (any directory).
    pub filenames: Vec<String>,
    /// Relative path prefixes.
    pub prefixes: Vec<String>,
    /// Glob patterns over the relative path.
    pub globs: Vec<String>,
}

impl Default for NoiseConfig {
    fn default() -> Self {
        let strings = |items: &[&str]| items.iter().map(|s| (*s).to_string()).collect();
        Self {
            filenames: strings(&[
                ".DS_Store",
                "Thumbs.db",
                "desktop.ini",
                "Icon\r",
                ".localized",
            ]),
            prefixes: strings(&["Backup/", "Ableton Project Info/", "__MACOSX/"]),
            globs: strings(&[
                "**/._*",
                "**/*.tmp",
                "**/*.bak",
                "**/*.asd",
                "**/*~",
                "**/*.orig",
                "**/*.lock",
            ]),
        }
    }
}
