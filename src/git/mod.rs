// mixvault: version lines and snapshots for music projects
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Git operations module: the version-control engine capability.
//!
//! ```text
//!            Public API
//!   query.rs  cmd.rs  status.rs  history.rs  ops.rs
//!        \      |        |          |        /
//!         v     v        v          v       v
//!        ,-------------------------------------,
//!        |          backend (traits)           |
//!        '-------+---------------------+-------'
//!                |                     |
//!                v                     v
//!           GitQuery              GitMutation
//!          (gix, read)            (CLI, write)
//!                |                     |
//!                v                     v
//!           GixBackend           ShellBackend
//!           .is_repo_root        .commit/.checkout
//!           .current_branch      .stash/.branch
//!                                .status/.log
//! ```
//!
//! **`GixBackend`**: pure Rust, no subprocess, reads `.git` only.
//! **`ShellBackend`**: git CLI for everything touching the working tree.

pub mod backend;
pub mod cmd;
pub mod history;
pub mod ops;
pub mod query;
pub mod status;
