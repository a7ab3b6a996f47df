// mixvault: version lines and snapshots for music projects
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Command implementations.
//!
//! ```text
//! CLI args --> Session --> cmd::run_command --> Output
//!                 │            init, status, commit, log, checkout,
//!                 │            latest, switch, line, role, backup, options
//!                 └─ config, project folder, confirmation policy
//!
//! Output::Report   one OperationReport
//! Output::Listing  text lines + JSON value
//! ```
//!
//! Handlers never print; `main` renders the [`Output`].

pub mod backup;
pub mod config;
pub mod line;
pub mod project;
pub mod role;

#[cfg(test)]
mod tests;

use serde::Serialize;
use std::path::{Path, PathBuf};

use crate::cli::Command;
use crate::cli::prompt::confirmer;
use crate::config::Config;
use crate::error::{MixResult, Result};
use crate::report::OperationReport;
use crate::repo::{BindStatus, RepositoryBinding};
use crate::transition::{Confirm, SnapshotTransitionController};

/// What a command produced.
#[derive(Debug, Clone)]
pub enum Output {
    /// Result of an operation.
    Report(OperationReport),
    /// Data for display.
    Listing {
        lines: Vec<String>,
        json: serde_json::Value,
    },
}

impl Output {
    /// Listing from display lines and any serializable data.
    ///
    /// # Errors
    ///
    /// Returns an error if `data` cannot be converted to JSON.
    pub fn listing<T: Serialize>(lines: Vec<String>, data: &T) -> Result<Self> {
        Ok(Self::Listing {
            lines,
            json: serde_json::to_value(data)?,
        })
    }

    /// Text or pretty JSON.
    #[must_use]
    pub fn render(&self, json: bool) -> String {
        match (self, json) {
            (Self::Report(report), true) => report.to_json(),
            (Self::Report(report), false) => report.to_string(),
            (Self::Listing { json: value, .. }, true) => {
                serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
            }
            (Self::Listing { lines, .. }, false) => lines.join("\n"),
        }
    }

    #[must_use]
    pub const fn is_failure(&self) -> bool {
        match self {
            Self::Report(report) => report.is_failure(),
            Self::Listing { .. } => false,
        }
    }
}

impl From<OperationReport> for Output {
    fn from(report: OperationReport) -> Self {
        Self::Report(report)
    }
}

/// Everything a handler needs besides its own arguments.
#[derive(Debug, Clone)]
pub struct Session {
    root: PathBuf,
    config: Config,
    config_file: Option<PathBuf>,
    assume_yes: bool,
}

impl Session {
    #[must_use]
    pub fn new(root: impl Into<PathBuf>, config: Config, assume_yes: bool) -> Self {
        Self {
            root: root.into(),
            config,
            config_file: None,
            assume_yes,
        }
    }

    /// Remember the extra configuration file for `options`.
    #[must_use]
    pub fn with_config_file(mut self, path: Option<PathBuf>) -> Self {
        self.config_file = path;
        self
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    #[must_use]
    pub const fn config(&self) -> &Config {
        &self.config
    }

    /// Confirmation capability honoring `--yes`.
    #[must_use]
    pub fn confirmer(&self) -> Box<dyn Confirm> {
        confirmer(self.assume_yes)
    }

    /// Ask the user.
    #[must_use]
    pub fn confirm(&self, question: &str) -> bool {
        self.confirmer().confirm(question)
    }

    /// Bind the project folder, creating a repository if needed.
    ///
    /// # Errors
    ///
    /// See [`RepositoryBinding::bind`].
    pub fn bind(&self) -> MixResult<(RepositoryBinding, BindStatus)> {
        RepositoryBinding::bind(&self.root, self.config.project.clone())
    }

    /// Open the existing repository of the project folder.
    ///
    /// # Errors
    ///
    /// See [`RepositoryBinding::open`].
    pub fn open(&self) -> MixResult<RepositoryBinding> {
        RepositoryBinding::open(&self.root, self.config.project.clone())
    }

    /// Transition controller over the opened repository.
    ///
    /// # Errors
    ///
    /// Returns an error if the repository cannot be opened.
    pub fn controller(&self) -> MixResult<SnapshotTransitionController> {
        SnapshotTransitionController::new(self.open()?, &self.config.noise, self.confirmer())
    }
}

/// Run one command.
///
/// # Errors
///
/// Returns the command's error; `main` turns it into an error report.
pub fn run_command(command: &Command, session: &Session) -> Result<Output> {
    match command {
        Command::Version => Ok(config::run_version_command()),
        Command::Options => config::run_options_command(session),
        Command::Init => project::run_init_command(session),
        Command::Status => project::run_status_command(session),
        Command::Commit(args) => project::run_commit_command(args, session),
        Command::Log(args) => project::run_log_command(args, session),
        Command::Checkout(args) => project::run_checkout_command(args, session),
        Command::Latest(args) => project::run_latest_command(args, session),
        Command::Switch(args) => project::run_switch_command(args, session),
        Command::Line(args) => line::run_line_command(args, session),
        Command::Role(args) => role::run_role_command(args, session),
        Command::Backup(args) => backup::run_backup_command(args, session),
    }
}

/// Run one command and turn failures into error reports.
#[must_use]
pub fn execute(command: &Command, session: &Session) -> Output {
    run_command(command, session).unwrap_or_else(|e| {
        tracing::debug!(error = %format!("{e:#}"), "command failed");
        Output::Report(OperationReport::from_error(&e))
    })
}
