// mixvault: version lines and snapshots for music projects
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! CLI module for mixvault using clap derive.
//!
//! # Command Structure
//!
//! ```text
//! mixvault [global options] <command>
//! init
//! status
//! commit MESSAGE...
//! log [-n N]
//! checkout REV [--set-aside]
//! latest [--set-aside]
//! switch NAME
//! line {create|list|delete}
//! role {set|clear|list}
//! backup {snapshot|unsaved|restore|list}
//! options
//! version
//! ```

pub mod backup;
pub mod global;
pub mod line;
pub mod project;
pub mod prompt;
pub mod role;

#[cfg(test)]
mod tests;

use crate::cli::backup::BackupArgs;
use crate::cli::global::GlobalOptions;
use crate::cli::line::LineArgs;
use crate::cli::project::{CheckoutArgs, CommitArgs, LatestArgs, LogArgs, SwitchArgs};
use crate::cli::role::RoleArgs;
use clap::{Parser, Subcommand};

/// Version lines and snapshots for music projects.
#[derive(Debug, Parser)]
#[command(
    name = "mixvault",
    author,
    version,
    about = "Version lines and snapshots for music projects",
    long_about = "mixvault Copyright (C) 2026 Romeo Ahmed\n\
                  This program comes with ABSOLUTELY NO WARRANTY\n\
                  This is free software, and you are welcome to redistribute it\n\
                  under certain conditions; see LICENSE for details.\n\n\
                  Keeps every saved state of a DAW project folder, lets you look\n\
                  at any of them read-only, and start new version lines from\n\
                  any point. Run `mixvault init` inside a project folder first.",
    after_help = "CONFIGURATION:\n\n\
                  mixvault reads `mixvault.toml` from the project folder if present,\n\
                  then the file given with --config, then MIXVAULT_* environment\n\
                  variables (for example MIXVAULT_PROJECT__ALLOW_EMPTY_PROJECT=true).\n\
                  `mixvault options` shows the resulting values."
)]
pub struct Cli {
    /// Global options shared by all commands
    #[command(flatten)]
    pub global: GlobalOptions,

    /// Command to execute
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Shows the version.
    #[command(visible_alias = "-v")]
    Version,

    /// Lists all options and their values.
    Options,

    /// Puts the project folder under version control, or reopens it.
    Init,

    /// Shows the current line or snapshot and unsaved changes.
    Status,

    /// Saves every change as a new commit on the current line.
    Commit(CommitArgs),

    /// Lists commits of the current line or snapshot.
    Log(LogArgs),

    /// Opens a commit read-only.
    Checkout(CheckoutArgs),

    /// Leaves a snapshot and returns to the latest state of a line.
    Latest(LatestArgs),

    /// Switches to another line.
    Switch(SwitchArgs),

    /// Manages version lines.
    Line(LineArgs),

    /// Manages commit roles.
    Role(RoleArgs),

    /// Manages safety backups.
    Backup(BackupArgs),
}

/// Parses command-line arguments.
#[must_use]
pub fn parse() -> Cli {
    Cli::parse()
}

/// Parses command-line arguments from an iterator.
pub fn parse_from<I, T>(iter: I) -> Cli
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    Cli::parse_from(iter)
}

/// Tries to parse command-line arguments, returning an error on failure.
///
/// # Errors
///
/// Returns a `clap::Error` if the arguments are invalid or if help/version information
/// was requested.
pub fn try_parse() -> Result<Cli, clap::Error> {
    Cli::try_parse()
}
