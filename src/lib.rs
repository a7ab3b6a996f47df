// mixvault: version lines and snapshots for music projects
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Library root.
//!
//! # Crate Architecture
//!
//! ```text
//!                        main.rs
//!                           |
//!                +----------+----------+
//!                v                     v
//!             cli (clap)          cmd (handlers) ──> report
//!                +----------+----------+
//!                           v
//!              ,---------------------------,
//!              |        transition         |
//!              |  checkout / latest /      |
//!              |  switch / commit / lines  |
//!              '--+------+------+------+---'
//!                 |      |      |      |
//!                 v      v      v      v
//!            classify  backup  lines  roles
//!                 |      |      |
//!                 +------+------+
//!                        v
//!                      repo  (binding, handle)
//!                        |
//!                        v
//!                       git  (gix / CLI)
//!
//!   +-----------------------------------------+
//!   |  config   TOML, environment, defaults   |
//!   +-----------------------------------------+
//!   |  foundation   error, logging, layout,   |
//!   |               utility                   |
//!   +-----------------------------------------+
//! ```

pub mod backup;
pub mod classify;
pub mod cli;
pub mod cmd;
pub mod config;
pub mod error;
pub mod git;
pub mod layout;
pub mod lines;
pub mod logging;
pub mod report;
pub mod repo;
pub mod roles;
pub mod transition;
pub mod utility;
