// mixvault: version lines and snapshots for music projects
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Arguments of the everyday project commands.
//!
//! ```text
//! commit MESSAGE...
//! log [-n N]
//! checkout REV [--set-aside]
//! latest [--set-aside]
//! switch NAME
//! ```

use clap::Args;

/// Arguments for the `commit` command.
#[derive(Debug, Clone, Args)]
pub struct CommitArgs {
    /// Commit message; several words are joined with spaces.
    #[arg(value_name = "MESSAGE", required = true, num_args = 1..)]
    pub message: Vec<String>,
}

impl CommitArgs {
    #[must_use]
    pub fn message(&self) -> String {
        self.message.join(" ")
    }
}

/// Arguments for the `log` command.
#[derive(Debug, Clone, Args)]
pub struct LogArgs {
    /// Show at most N commits.
    #[arg(short = 'n', long = "max-count", value_name = "N")]
    pub limit: Option<usize>,
}

/// Arguments for the `checkout` command.
#[derive(Debug, Clone, Args)]
pub struct CheckoutArgs {
    /// Commit id, id prefix or line name.
    #[arg(value_name = "REV")]
    pub rev: String,

    /// When unsaved changes block, offer to back them up and set them aside.
    #[arg(long = "set-aside")]
    pub set_aside: bool,
}

/// Arguments for the `latest` command.
#[derive(Debug, Clone, Args)]
pub struct LatestArgs {
    /// When unsaved changes block, offer to back them up and set them aside.
    #[arg(long = "set-aside")]
    pub set_aside: bool,
}

/// Arguments for the `switch` command.
#[derive(Debug, Clone, Args)]
pub struct SwitchArgs {
    /// Line to switch to; offered for creation when missing.
    #[arg(value_name = "NAME")]
    pub name: String,
}
