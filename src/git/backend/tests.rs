// mixvault: version lines and snapshots for music projects
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use super::{GitMutation, GitQuery, GixBackend, ShellBackend};
use crate::error::MixError;
use std::ffi::OsStr;
use tempfile::TempDir;

fn temp_dir() -> TempDir {
    tempfile::tempdir().expect("failed to create temp dir")
}

fn init_with_identity(path: &std::path::Path) {
    ShellBackend::init_repo(path, "main").expect("failed to init repo");
    ShellBackend::set_config(path, "user.name", "Test").unwrap();
    ShellBackend::set_config(path, "user.email", "test@example.com").unwrap();
}

#[test]
fn test_backends_agree_on_repo_root() {
    let temp = temp_dir();
    assert!(!GixBackend::is_repo_root(temp.path()));
    assert!(!ShellBackend::is_repo_root(temp.path()));

    ShellBackend::init_repo(temp.path(), "main").expect("failed to init repo");
    assert!(GixBackend::is_repo_root(temp.path()));
    assert!(ShellBackend::is_repo_root(temp.path()));

    // a subdirectory is inside the work tree but is not its root
    let sub = temp.path().join("Samples");
    std::fs::create_dir(&sub).unwrap();
    assert!(!GixBackend::is_repo_root(&sub));
    assert!(!ShellBackend::is_repo_root(&sub));
}

#[test]
fn test_unborn_branch_name() {
    let temp = temp_dir();
    ShellBackend::init_repo(temp.path(), "take1").unwrap();
    assert_eq!(
        GixBackend::current_branch(temp.path()).unwrap().as_deref(),
        Some("take1")
    );
}

#[test]
fn test_detached_has_no_branch() {
    let temp = temp_dir();
    init_with_identity(temp.path());
    std::fs::write(temp.path().join("song.als"), "v1").unwrap();
    ShellBackend::add(temp.path(), &[OsStr::new(".")]).unwrap();
    ShellBackend::commit(temp.path(), "first", false).unwrap();
    ShellBackend::detach(temp.path(), "HEAD").unwrap();

    assert_eq!(GixBackend::current_branch(temp.path()).unwrap(), None);
    assert_eq!(ShellBackend::current_branch(temp.path()).unwrap(), None);
}

#[test]
fn test_failed_command_keeps_engine_message() {
    let temp = temp_dir();
    init_with_identity(temp.path());
    let err = ShellBackend::checkout(temp.path(), "no-such-line").unwrap_err();

    let MixError::Git(_) = &err else {
        panic!("expected git error, got {err:?}");
    };
    let message = err.engine_message().expect("engine message");
    assert!(
        message.contains("no-such-line"),
        "message should be git's own stderr, got: {message}"
    );
}

#[test]
fn test_nothing_to_commit_fails_without_allow_empty() {
    let temp = temp_dir();
    init_with_identity(temp.path());
    std::fs::write(temp.path().join("song.als"), "v1").unwrap();
    ShellBackend::add(temp.path(), &[OsStr::new(".")]).unwrap();
    ShellBackend::commit(temp.path(), "first", false).unwrap();

    assert!(ShellBackend::commit(temp.path(), "again", false).is_err());
    ShellBackend::commit(temp.path(), "marker only", true).unwrap();
}
