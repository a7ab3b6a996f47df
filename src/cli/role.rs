// mixvault: version lines and snapshots for music projects
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Role command arguments.
//!
//! # Subcommands
//!
//! ```text
//! role set REV ROLE   → main | creative | alt | any label
//! role clear REV
//! role list           → orphaned tags are flagged
//! ```

use clap::{Args, Subcommand};

/// Arguments for the `role` command.
#[derive(Debug, Clone, Args)]
pub struct RoleArgs {
    /// Role subcommand.
    #[command(subcommand)]
    pub subcommand: RoleSubcommand,
}

/// Role subcommands.
#[derive(Debug, Clone, Subcommand)]
pub enum RoleSubcommand {
    /// Tags a commit with a role.
    Set(SetRoleArgs),

    /// Removes the role of a commit.
    Clear(ClearRoleArgs),

    /// Lists role tags.
    List,
}

/// Arguments for `role set`.
#[derive(Debug, Clone, Args)]
pub struct SetRoleArgs {
    /// Commit id, id prefix or line name.
    #[arg(value_name = "REV")]
    pub rev: String,

    /// Role: main, creative, alt or a custom label.
    #[arg(value_name = "ROLE")]
    pub role: String,
}

/// Arguments for `role clear`.
#[derive(Debug, Clone, Args)]
pub struct ClearRoleArgs {
    /// Commit id, id prefix or line name; full ids of orphaned tags work too.
    #[arg(value_name = "REV")]
    pub rev: String,
}
