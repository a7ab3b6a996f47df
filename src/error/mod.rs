// mixvault: version lines and snapshots for music projects
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Error handling module.
//!
//! ```text
//!                MixError (~24 bytes)
//!                       |
//!   +------+------+-----+-----+------+------+-----+
//!   |      |      |     |     |      |      |     |
//!   v      v      v     v     v      v      v     v
//! Bail   Git   Repo  Trans  Line  Backup  Cfg  Fs/Io/Other
//!        Box   Box   Box    Box   Box     Box  Box<str>
//!
//! Sub-errors:
//!   Git         Gix, CommandFailed (raw engine message), GitNotFound
//!   Repo        InvalidRepository, NoContentFiles, EmptyMessage, NothingToCommit
//!   Transition  DirtyStateBlocked(files), NoDefaultLine, InProgress
//!   Line        InvalidName, LineExists, LineNotFound, ProtectedLine
//!   Backup      CreateDir, NoBackup, NoSnapshot
//!   Config      ParseError, InvalidValue
//!   Fs          NotFound, IoError
//! ```

use thiserror::Error;

/// Convenience alias for `anyhow::Result`.
pub type Result<T> = anyhow::Result<T>;

/// Result type using [`MixError`].
pub type MixResult<T> = std::result::Result<T, MixError>;

/// Top-level application error type.
///
/// All sub-errors are boxed to keep this enum at ~24 bytes on the stack.
#[derive(Debug, Error)]
pub enum MixError {
    /// Fatal error that should terminate the application.
    #[error("fatal error: {0}")]
    Bailed(Box<str>),

    /// Version-control engine failure.
    #[error("git error: {0}")]
    Git(#[from] Box<GitError>),

    /// Repository binding or commit precondition failed.
    #[error("{0}")]
    Repo(#[from] Box<RepoError>),

    /// Snapshot transition was refused.
    #[error("{0}")]
    Transition(#[from] Box<TransitionError>),

    /// Version line operation was refused.
    #[error("{0}")]
    Line(#[from] Box<LineError>),

    /// Backup could not be created or restored.
    #[error("backup error: {0}")]
    Backup(#[from] Box<BackupError>),

    /// Configuration error.
    #[error("config error: {0}")]
    Config(#[from] Box<ConfigError>),

    /// Filesystem error.
    #[error("filesystem error: {0}")]
    Fs(#[from] Box<FsError>),

    /// I/O error.
    #[error("io error: {0}")]
    Io(Box<std::io::Error>),

    /// Generic error with message.
    #[error("{0}")]
    Other(Box<str>),
}

/// Create a fatal [`MixError::Bailed`] that terminates the application.
pub fn bail_out(message: impl Into<String>) -> MixError {
    MixError::Bailed(message.into().into_boxed_str())
}

impl MixError {
    /// Files blocking a transition, if this is a [`TransitionError::DirtyStateBlocked`].
    #[must_use]
    pub fn blocking_files(&self) -> Option<&[String]> {
        match self {
            Self::Transition(err) => match err.as_ref() {
                TransitionError::DirtyStateBlocked { files } => Some(files),
                _ => None,
            },
            _ => None,
        }
    }

    /// The raw message reported by the engine, unmodified.
    #[must_use]
    pub fn engine_message(&self) -> Option<&str> {
        match self {
            Self::Git(err) => match err.as_ref() {
                GitError::CommandFailed { message, .. } => Some(message),
                _ => None,
            },
            _ => None,
        }
    }
}

// --- From implementations for boxing ---

/// Macro to generate `From` implementations that box the source error.
macro_rules! impl_from_boxed {
    ($($error:ty => $variant:ident),+ $(,)?) => {
        $(
            impl From<$error> for MixError {
                fn from(err: $error) -> Self {
                    MixError::$variant(Box::new(err))
                }
            }
        )+
    };
}

impl_from_boxed! {
    GitError => Git,
    RepoError => Repo,
    TransitionError => Transition,
    LineError => Line,
    BackupError => Backup,
    ConfigError => Config,
    FsError => Fs,
    std::io::Error => Io,
}

// --- Gix Errors ---

/// Wrapper for gix-specific errors.
///
/// Large error types are boxed to keep enum size manageable.
#[derive(Debug, Error)]
pub enum GixError {
    /// Failed to open repository.
    #[error("failed to open repository: {0}")]
    Open(#[from] Box<gix::open::Error>),

    /// Failed to get HEAD reference.
    #[error("failed to get head reference: {0}")]
    Head(#[from] gix::reference::find::existing::Error),
}

// --- Git Errors ---

/// Version-control engine errors.
#[derive(Debug, Error)]
pub enum GitError {
    /// The `git` executable is not installed or not on PATH.
    #[error("git executable not found in PATH")]
    GitNotFound,

    /// Git command execution failed. `message` is the engine's stderr verbatim.
    #[error("git command failed: {command} - {message}")]
    CommandFailed { command: String, message: String },

    /// Error from gix library.
    #[error("gix error: {0}")]
    Gix(#[from] GixError),
}

// --- Repository Errors ---

/// Repository binding and commit precondition errors.
#[derive(Debug, Error)]
pub enum RepoError {
    /// Path cannot be used as a project repository.
    #[error("invalid project folder '{path}': {reason}")]
    InvalidRepository { path: String, reason: String },

    /// No recognized project file is present.
    #[error("no project files found in {path}")]
    NoContentFiles { path: String },

    /// Commit message is blank.
    #[error("commit message must not be empty")]
    EmptyMessage,

    /// Staging produced no changes.
    #[error("nothing to commit, the project is unchanged")]
    NothingToCommit,
}

// --- Transition Errors ---

/// Errors refusing a snapshot transition.
#[derive(Debug, Error)]
pub enum TransitionError {
    /// Relevant unsaved changes would be lost.
    #[error("unsaved changes block this operation: {}", files.join(", "))]
    DirtyStateBlocked { files: Vec<String> },

    /// No line exists to return to.
    #[error("no version line to return to")]
    NoDefaultLine,

    /// Another transition holds the project lock.
    #[error("another operation is in progress (lock file {lock})")]
    InProgress { lock: String },
}

// --- Line Errors ---

/// Version line errors.
#[derive(Debug, Error)]
pub enum LineError {
    /// Name contains characters outside letters, digits, dash and underscore.
    #[error("invalid line name '{name}': use only letters, digits, '-' and '_'")]
    InvalidName { name: String },

    /// A line with that name exists.
    #[error("version line '{name}' already exists")]
    LineExists { name: String },

    /// No line with that name.
    #[error("version line '{name}' not found")]
    LineNotFound { name: String },

    /// The line may not be deleted.
    #[error("version line '{name}' cannot be deleted: {reason}")]
    ProtectedLine { name: String, reason: String },
}

// --- Backup Errors ---

/// Backup errors.
#[derive(Debug, Error)]
pub enum BackupError {
    /// Backup directory could not be created.
    #[error("failed to create backup directory '{path}': {source}")]
    CreateDir {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// No unsaved-changes backup exists for the project.
    #[error("no backup found for project '{project}'")]
    NoBackup { project: String },

    /// No per-commit snapshot exists.
    #[error("no snapshot stored for commit {commit}")]
    NoSnapshot { commit: String },
}

// --- Config Errors ---

/// Configuration-related errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to parse configuration file.
    #[error("failed to parse config file '{path}': {message}")]
    ParseError { path: String, message: String },

    /// Invalid configuration value.
    #[error("invalid value for '{key}' in section '[{section}]': {message}")]
    InvalidValue {
        section: String,
        key: String,
        message: String,
    },
}

// --- Filesystem Errors ---

/// Filesystem operation errors.
#[derive(Debug, Error)]
pub enum FsError {
    /// Path not found.
    #[error("path not found: {0}")]
    NotFound(String),

    /// General I/O error.
    #[error("I/O error on '{path}': {source}")]
    IoError {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

impl FsError {
    /// Wrap an I/O error with the path it occurred on.
    pub fn io(path: &std::path::Path, source: std::io::Error) -> Self {
        Self::IoError {
            path: path.display().to_string(),
            source,
        }
    }
}

#[cfg(test)]
mod tests;
