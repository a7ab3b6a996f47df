// mixvault: version lines and snapshots for music projects
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use super::*;
use crate::cli::Cli;
use crate::report::ReportStatus;
use clap::Parser;
use std::fs;
use tempfile::TempDir;

fn project() -> (TempDir, PathBuf) {
    let temp = TempDir::new().unwrap();
    let root = temp.path().join("Song");
    fs::create_dir(&root).unwrap();
    fs::write(root.join("song.als"), "v1").unwrap();
    (temp, root)
}

fn run(session: &Session, args: &[&str]) -> Output {
    let cli = Cli::try_parse_from(std::iter::once("mixvault").chain(args.iter().copied())).unwrap();
    execute(&cli.command.unwrap(), session)
}

fn report(output: Output) -> OperationReport {
    match output {
        Output::Report(report) => report,
        Output::Listing { lines, .. } => panic!("expected a report, got {lines:?}"),
    }
}

fn listing(output: Output) -> (Vec<String>, serde_json::Value) {
    match output {
        Output::Listing { lines, json } => (lines, json),
        Output::Report(report) => panic!("expected a listing, got {report}"),
    }
}

#[test]
fn test_render_listing() {
    let output = Output::listing(vec!["a".into(), "b".into()], &vec![1, 2]).unwrap();
    assert_eq!(output.render(false), "a\nb");
    insta::assert_snapshot!(output.render(true), @r"
    [
      1,
      2
    ]
    ");
    assert!(!output.is_failure());
}

#[test]
fn test_version_report() {
    let output = config::run_version_command();
    let text = output.render(false);
    assert!(text.starts_with("ok: mixvault "));
    assert!(text.ends_with(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_unbound_folder_is_error_report() {
    let (_temp, root) = project();
    let session = Session::new(&root, Config::default(), true);

    let report = report(run(&session, &["status"]));

    assert_eq!(report.status, ReportStatus::Error);
    assert!(report.message.contains("run `mixvault init` first"));
}

#[test]
fn test_init_commit_and_log() {
    let (_temp, root) = project();
    let session = Session::new(&root, Config::default(), true);

    let init = report(run(&session, &["init"]));
    assert_eq!(init.status, ReportStatus::Ok);
    assert_eq!(init.line.as_deref(), Some("main"));

    let again = report(run(&session, &["init"]));
    assert_eq!(again.message, "project already under version control");

    let nothing = report(run(&session, &["commit", "no", "changes"]));
    assert_eq!(nothing.status, ReportStatus::Error);
    assert_eq!(nothing.message, "nothing to commit, the project is unchanged");

    fs::write(root.join("song.als"), "v2").unwrap();
    let commit = report(run(&session, &["commit", "Louder", "drums"]));
    assert_eq!(commit.status, ReportStatus::Ok);

    let (lines, json) = listing(run(&session, &["log"]));
    assert_eq!(lines.len(), 2);
    assert!(lines[0].ends_with("Louder drums"));
    assert_eq!(json[1]["message"], "Initial commit");
}

#[test]
fn test_checkout_status_and_latest() {
    let (_temp, root) = project();
    let session = Session::new(&root, Config::default(), true);
    report(run(&session, &["init"]));
    fs::write(root.join("song.als"), "v2").unwrap();
    report(run(&session, &["commit", "second"]));

    let checkout = report(run(&session, &["checkout", "main~1"]));
    assert_eq!(checkout.status, ReportStatus::Ok);
    assert!(checkout.message.starts_with("viewing snapshot"));
    assert_eq!(checkout.line, None);

    let (lines, json) = listing(run(&session, &["status"]));
    assert!(lines[1].starts_with("Viewing snapshot"));
    assert_eq!(json["state"], "detached");

    let latest = report(run(&session, &["latest"]));
    assert_eq!(latest.status, ReportStatus::Ok);
    assert_eq!(latest.message, "back on line 'main'");
    assert_eq!(fs::read_to_string(root.join("song.als")).unwrap(), "v2");
}

#[test]
fn test_blocked_checkout_and_set_aside() {
    let (_temp, root) = project();
    let session = Session::new(&root, Config::default(), true);
    report(run(&session, &["init"]));
    fs::write(root.join("song.als"), "v2").unwrap();
    report(run(&session, &["commit", "second"]));
    fs::write(root.join("song.als"), "unsaved").unwrap();

    let blocked = run(&session, &["checkout", "main~1"]);
    assert!(blocked.is_failure());
    let blocked = report(blocked);
    assert_eq!(blocked.status, ReportStatus::Blocked);
    assert_eq!(blocked.files, vec!["song.als".to_string()]);

    let moved = report(run(&session, &["checkout", "main~1", "--set-aside"]));
    assert_eq!(moved.status, ReportStatus::Ok);
    assert_eq!(fs::read_to_string(root.join("song.als")).unwrap(), "v1");
}

#[test]
fn test_roles_main_moves_and_clear() {
    let (_temp, root) = project();
    let session = Session::new(&root, Config::default(), true);
    report(run(&session, &["init"]));
    fs::write(root.join("song.als"), "v2").unwrap();
    report(run(&session, &["commit", "second"]));

    report(run(&session, &["role", "set", "main~1", "main"]));
    let moved = report(run(&session, &["role", "set", "HEAD", "MAIN"]));
    assert_eq!(moved.status, ReportStatus::Ok);

    let (lines, json) = listing(run(&session, &["role", "list"]));
    assert_eq!(lines.len(), 1);
    assert_eq!(json[0]["role"], "main");
    assert_eq!(json[0]["orphaned"], false);
    assert_eq!(json[0]["commit"].as_str(), moved.commit.as_deref());

    let cleared = report(run(&session, &["role", "clear", "HEAD"]));
    assert_eq!(cleared.status, ReportStatus::Ok);
    let again = report(run(&session, &["role", "clear", "HEAD"]));
    assert_eq!(again.status, ReportStatus::Noop);
}

#[test]
fn test_line_create_list_delete() {
    let (_temp, root) = project();
    let session = Session::new(&root, Config::default(), true);
    report(run(&session, &["init"]));

    let created = report(run(&session, &["line", "create", "take2"]));
    assert_eq!(created.status, ReportStatus::Ok);
    assert_eq!(created.line.as_deref(), Some("take2"));

    let (lines, json) = listing(run(&session, &["line", "list"]));
    assert_eq!(lines.len(), 2);
    assert!(lines.iter().any(|l| l.starts_with("* take2")));
    assert_eq!(json.as_array().unwrap().len(), 2);

    let protected = report(run(&session, &["line", "delete", "take2"]));
    assert_eq!(protected.status, ReportStatus::Error);

    report(run(&session, &["switch", "main"]));
    let deleted = report(run(&session, &["line", "delete", "take2"]));
    assert_eq!(deleted.status, ReportStatus::Ok);
}

#[test]
fn test_backup_snapshot_once_and_restore() {
    let (_temp, root) = project();
    let session = Session::new(&root, Config::default(), true);
    report(run(&session, &["init"]));

    let first = report(run(&session, &["backup", "snapshot"]));
    assert_eq!(first.status, ReportStatus::Ok);
    let second = report(run(&session, &["backup", "snapshot"]));
    assert_eq!(second.status, ReportStatus::Noop);

    let head = first.commit.unwrap();
    fs::write(root.join("song.als"), "scribbled").unwrap();
    let restored = report(run(&session, &["backup", "restore", "--snapshot", &head[..10]]));
    assert_eq!(restored.status, ReportStatus::Ok);
    assert_eq!(fs::read_to_string(root.join("song.als")).unwrap(), "v1");

    let (_, json) = listing(run(&session, &["backup", "list"]));
    assert_eq!(json["snapshots"][0], head.as_str());
}

#[test]
fn test_options_lists_values() {
    let (_temp, root) = project();
    fs::write(root.join("mixvault.toml"), "[project]\neditable_copy = false\n").unwrap();
    let config = Config::loader_for(&root, None).build().unwrap();
    let session = Session::new(&root, config, true);

    let (lines, json) = listing(run(&session, &["options"]));
    assert_eq!(lines[0], "Configuration files:");
    assert!(lines.iter().any(|l| l.starts_with("project.editable_copy") && l.ends_with("= false")));
    assert_eq!(json["config"]["project"]["editable_copy"], false);
}
