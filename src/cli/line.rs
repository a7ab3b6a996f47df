// mixvault: version lines and snapshots for music projects
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Line command arguments.
//!
//! # Subcommands
//!
//! ```text
//! line create NAME [--from REV]
//!   → start a line at REV (default: current commit)
//! line list
//!   → all lines with their head commits
//! line delete NAME
//!   → never the current or the initial line
//! ```

use clap::{Args, Subcommand};

/// Arguments for the `line` command.
#[derive(Debug, Clone, Args)]
pub struct LineArgs {
    /// Line subcommand.
    #[command(subcommand)]
    pub subcommand: LineSubcommand,
}

/// Line subcommands.
#[derive(Debug, Clone, Subcommand)]
pub enum LineSubcommand {
    /// Starts a new version line.
    Create(CreateLineArgs),

    /// Lists version lines.
    List,

    /// Deletes a version line.
    Delete(DeleteLineArgs),
}

/// Arguments for `line create`.
#[derive(Debug, Clone, Args)]
pub struct CreateLineArgs {
    /// Name of the new line (letters, digits, '-' and '_').
    #[arg(value_name = "NAME")]
    pub name: String,

    /// Commit or line to start from.
    #[arg(long, value_name = "REV")]
    pub from: Option<String>,
}

/// Arguments for `line delete`.
#[derive(Debug, Clone, Args)]
pub struct DeleteLineArgs {
    /// Line to delete.
    #[arg(value_name = "NAME")]
    pub name: String,
}
