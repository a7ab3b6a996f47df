// mixvault: version lines and snapshots for music projects
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Global CLI options available for all commands.
//!
//! # Option Precedence
//!
//! ```text
//! -C DIR            ← project folder (default: current directory)
//! --config FILE     ← extra config file, over <project>/mixvault.toml
//! -l N              ← console verbosity (0-5), over global.output_log_level
//! --log-file FILE   ← over global.log_file
//! --yes             ← answer every question with yes
//! --json            ← print reports as JSON on stdout
//!
//! Precedence: CLI flags > MIXVAULT_* env > --config > mixvault.toml > defaults
//! ```

use clap::Args;
use std::path::{Path, PathBuf};

use crate::config::Config;
use crate::logging::{LogConfig, LogLevel};

/// Global options available for all commands.
#[derive(Debug, Clone, Default, Args)]
pub struct GlobalOptions {
    /// Project folder to work on.
    #[arg(short = 'C', long = "project", value_name = "DIR", global = true)]
    pub project: Option<PathBuf>,

    /// Additional TOML configuration file.
    #[arg(long = "config", value_name = "FILE", global = true)]
    pub config: Option<PathBuf>,

    /// Console log level (0=silent, 1=errors, 2=warnings, 3=info, 4=debug, 5=trace).
    #[arg(short = 'l', long = "log-level", value_name = "LEVEL", global = true,
          value_parser = clap::value_parser!(u8).range(0..=5))]
    pub log_level: Option<u8>,

    /// Path to log file.
    #[arg(long = "log-file", value_name = "FILE", global = true)]
    pub log_file: Option<PathBuf>,

    /// Answer yes to every confirmation.
    #[arg(short = 'y', long, global = true)]
    pub yes: bool,

    /// Print results as JSON.
    #[arg(long, global = true)]
    pub json: bool,
}

impl GlobalOptions {
    /// Project folder, defaulting to the current directory.
    #[must_use]
    pub fn project_dir(&self) -> PathBuf {
        self.project
            .clone()
            .unwrap_or_else(|| PathBuf::from("."))
    }

    /// Extra configuration file, if given.
    #[must_use]
    pub fn config_file(&self) -> Option<&Path> {
        self.config.as_deref()
    }

    /// Logging setup: CLI flags over configuration.
    #[must_use]
    pub fn log_config(&self, config: &Config) -> LogConfig {
        let global = &config.global;
        let console_level = self
            .log_level
            .and_then(|level| LogLevel::try_from(level).ok())
            .unwrap_or(global.output_log_level);
        let log_file = self
            .log_file
            .as_ref()
            .or(global.log_file.as_ref())
            .cloned();

        LogConfig::builder()
            .with_console_level(console_level)
            .with_file_level(global.file_log_level)
            .maybe_with_log_file(log_file)
            .with_json_file(global.json_log)
            .build()
    }
}
