// mixvault: version lines and snapshots for music projects
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use super::*;
use crate::error::{GitError, TransitionError};
use crate::repo::{Reference, RepositoryHandle};
use std::path::PathBuf;

fn handle(line: Option<&str>, head: &str) -> RepositoryHandle {
    RepositoryHandle {
        path: PathBuf::from("/music/Song"),
        reference: line.map_or_else(
            || Reference::Commit(head.to_string()),
            |l| Reference::Line(l.to_string()),
        ),
        head: Some(head.to_string()),
        detached: line.is_none(),
    }
}

#[test]
fn test_blocked_report_lists_files() {
    let err: anyhow::Error = MixError::from(TransitionError::DirtyStateBlocked {
        files: vec!["mix.proj".to_string()],
    })
    .into();
    let report = OperationReport::from_error(&err);
    assert_eq!(report.status, ReportStatus::Blocked);
    assert_eq!(report.files, ["mix.proj"]);
    assert!(report.is_failure());
    insta::assert_snapshot!(report.to_string(), @r"
    blocked: unsaved changes block this operation
      mix.proj
    ");
}

#[test]
fn test_engine_message_is_verbatim() {
    let err: anyhow::Error = MixError::from(GitError::CommandFailed {
        command: "git checkout -q nope".to_string(),
        message: "error: pathspec 'nope' did not match any file(s) known to git".to_string(),
    })
    .into();
    let report = OperationReport::from_error(&err);
    assert_eq!(report.status, ReportStatus::Error);
    assert_eq!(
        report.message,
        "error: pathspec 'nope' did not match any file(s) known to git"
    );
}

#[test]
fn test_transition_reports() {
    let done = Transition::builder()
        .outcome(Outcome::Done)
        .handle(handle(Some("take2"), "0123456789abcdef"))
        .build();
    let report = OperationReport::from_transition(&done, "switched to line 'take2'");
    insta::assert_snapshot!(report.to_string(), @"ok: switched to line 'take2' [take2 @ 0123456]");

    let noop = Transition::builder()
        .outcome(Outcome::Noop)
        .handle(handle(None, "0123456789abcdef"))
        .build();
    let report = OperationReport::from_transition(&noop, "unused");
    assert_eq!(report.status, ReportStatus::Noop);
    insta::assert_snapshot!(report.to_json(), @r#"
    {
      "status": "noop",
      "message": "already there, nothing to do",
      "commit": "0123456789abcdef"
    }
    "#);
}
