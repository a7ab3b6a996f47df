// mixvault: version lines and snapshots for music projects
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Entry point.
//!
//! ```text
//! cli::parse() --> Config --> Logging --> Command Dispatch --> Output
//!   Init | Status | Commit | Log | Checkout | Latest | Switch
//!   Line | Role | Backup | Options | Version
//! ```

use std::process::ExitCode;

use mixvault::cli::{self, Cli, Command};
use mixvault::cmd::config::run_version_command;
use mixvault::cmd::{Output, Session, execute};
use mixvault::config::Config;
use mixvault::logging::init_logging;
use mixvault::report::{OperationReport, ReportStatus};

use mimalloc::MiMalloc;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

fn main() -> ExitCode {
    let cli = cli::parse();

    let Some(command) = &cli.command else {
        print_output(
            &OperationReport::new(ReportStatus::Error, "no command given, see `mixvault --help`")
                .into(),
            cli.global.json,
        );
        return ExitCode::FAILURE;
    };
    if matches!(command, Command::Version) {
        print_output(&run_version_command(), cli.global.json);
        return ExitCode::SUCCESS;
    }

    let root = cli.global.project_dir();
    let config = match Config::loader_for(&root, cli.global.config_file()).build() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load configuration: {e:#}");
            return ExitCode::FAILURE;
        }
    };

    let _log_guard = match init_logging(&cli.global.log_config(&config)) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialize logging: {e}");
            return ExitCode::FAILURE;
        }
    };

    dispatch_command(&cli, command, config)
}

fn dispatch_command(cli: &Cli, command: &Command, config: Config) -> ExitCode {
    let session = Session::new(cli.global.project_dir(), config, cli.global.yes)
        .with_config_file(cli.global.config.clone());
    let output = execute(command, &session);
    print_output(&output, cli.global.json);

    if output.is_failure() {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

fn print_output(output: &Output, json: bool) {
    let text = output.render(json);
    if output.is_failure() && !json {
        eprintln!("{text}");
    } else {
        println!("{text}");
    }
}
