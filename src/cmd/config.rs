// mixvault: version lines and snapshots for music projects
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Informational commands: version and options.

use serde::Serialize;

use crate::cmd::{Output, Session};
use crate::config::Config;
use crate::error::Result;
use crate::report::OperationReport;

/// Show the program version.
#[must_use]
pub fn run_version_command() -> Output {
    OperationReport::ok(format!(
        "{} {}",
        env!("CARGO_PKG_NAME"),
        env!("CARGO_PKG_VERSION")
    ))
    .into()
}

#[derive(Debug, Serialize)]
struct OptionsView<'a> {
    files: Vec<String>,
    config: &'a Config,
}

/// Display current configuration options and the files they came from.
///
/// # Errors
///
/// Returns an error if the configuration cannot be serialized.
pub fn run_options_command(session: &Session) -> Result<Output> {
    let files: Vec<String> = Config::loader_for(session.root(), session.config_file.as_deref())
        .sources()
        .iter()
        .map(ToString::to_string)
        .collect();

    let mut text = Vec::new();
    if files.is_empty() {
        text.push("No configuration files loaded".to_string());
    } else {
        text.push("Configuration files:".to_string());
        text.extend(files.iter().map(|f| format!("  {f}")));
    }
    text.extend(session.config().format_options());

    Output::listing(
        text,
        &OptionsView {
            files,
            config: session.config(),
        },
    )
}
