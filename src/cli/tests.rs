// mixvault: version lines and snapshots for music projects
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use crate::cli::backup::BackupSubcommand;
use crate::cli::line::LineSubcommand;
use crate::cli::prompt::is_yes;
use crate::cli::role::RoleSubcommand;
use crate::cli::{Cli, Command};
use crate::config::Config;
use crate::logging::LogLevel;
use clap::Parser;
use std::path::PathBuf;

#[test]
fn test_parse_version() {
    let cli = Cli::try_parse_from(["mixvault", "version"]).unwrap();
    assert!(matches!(cli.command, Some(Command::Version)));
}

#[test]
fn test_parse_global_options_after_command() {
    let cli = Cli::try_parse_from([
        "mixvault", "status", "-C", "/music/Song", "--json", "-y", "-l", "4",
    ])
    .unwrap();
    assert!(matches!(cli.command, Some(Command::Status)));
    assert_eq!(cli.global.project_dir(), PathBuf::from("/music/Song"));
    assert!(cli.global.json);
    assert!(cli.global.yes);
    assert_eq!(cli.global.log_level, Some(4));
}

#[test]
fn test_log_level_out_of_range() {
    assert!(Cli::try_parse_from(["mixvault", "-l", "6", "status"]).is_err());
}

#[test]
fn test_parse_commit_joins_words() {
    let cli = Cli::try_parse_from(["mixvault", "commit", "louder", "kick"]).unwrap();
    let Some(Command::Commit(args)) = cli.command else {
        panic!("expected commit");
    };
    assert_eq!(args.message(), "louder kick");
    assert!(Cli::try_parse_from(["mixvault", "commit"]).is_err());
}

#[test]
fn test_parse_checkout_set_aside() {
    let cli = Cli::try_parse_from(["mixvault", "checkout", "a1b2c3d", "--set-aside"]).unwrap();
    let Some(Command::Checkout(args)) = cli.command else {
        panic!("expected checkout");
    };
    assert_eq!(args.rev, "a1b2c3d");
    assert!(args.set_aside);
}

#[test]
fn test_parse_line_create() {
    let cli =
        Cli::try_parse_from(["mixvault", "line", "create", "take2", "--from", "main~2"]).unwrap();
    let Some(Command::Line(args)) = cli.command else {
        panic!("expected line");
    };
    let LineSubcommand::Create(create) = args.subcommand else {
        panic!("expected create");
    };
    assert_eq!(create.name, "take2");
    assert_eq!(create.from.as_deref(), Some("main~2"));
}

#[test]
fn test_parse_role_set() {
    let cli = Cli::try_parse_from(["mixvault", "role", "set", "HEAD", "radio edit"]).unwrap();
    let Some(Command::Role(args)) = cli.command else {
        panic!("expected role");
    };
    let RoleSubcommand::Set(set) = args.subcommand else {
        panic!("expected set");
    };
    assert_eq!(set.rev, "HEAD");
    assert_eq!(set.role, "radio edit");
}

#[test]
fn test_parse_backup_restore() {
    let cli = Cli::try_parse_from(["mixvault", "backup", "restore", "--snapshot", "abc"]).unwrap();
    let Some(Command::Backup(args)) = cli.command else {
        panic!("expected backup");
    };
    let BackupSubcommand::Restore(restore) = args.subcommand else {
        panic!("expected restore");
    };
    assert_eq!(restore.snapshot.as_deref(), Some("abc"));
}

#[test]
fn test_log_config_flags_override_config() {
    let config = Config::default();
    let cli = Cli::try_parse_from(["mixvault", "-l", "5", "--log-file", "mv.log", "status"])
        .unwrap();
    let log = cli.global.log_config(&config);
    assert_eq!(log.console_level(), LogLevel::Trace);
    assert_eq!(log.file_level(), LogLevel::Debug);
    assert_eq!(log.log_file(), Some(std::path::Path::new("mv.log")));

    let cli = Cli::try_parse_from(["mixvault", "status"]).unwrap();
    let log = cli.global.log_config(&config);
    assert_eq!(log.console_level(), LogLevel::Warn);
    assert_eq!(log.log_file(), None);
}

#[test]
fn test_is_yes() {
    assert!(is_yes("y\n"));
    assert!(is_yes(" YES "));
    assert!(!is_yes("\n"));
    assert!(!is_yes("nope"));
}
