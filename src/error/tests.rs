// mixvault: version lines and snapshots for music projects
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use super::{GitError, LineError, MixError, MixResult, RepoError, TransitionError};

#[test]
fn test_blocked_error_lists_files() {
    let err: MixError = TransitionError::DirtyStateBlocked {
        files: vec!["mix.als".to_string(), "stems/kick.wav".to_string()],
    }
    .into();
    insta::assert_snapshot!(err.to_string(), @"unsaved changes block this operation: mix.als, stems/kick.wav");
    assert_eq!(
        err.blocking_files(),
        Some(["mix.als".to_string(), "stems/kick.wav".to_string()].as_slice())
    );
}

#[test]
fn test_engine_message_is_verbatim() {
    let raw = "error: pathspec 'nope' did not match any file(s) known to git";
    let err: MixError = GitError::CommandFailed {
        command: "git checkout nope".to_string(),
        message: raw.to_string(),
    }
    .into();
    assert_eq!(err.engine_message(), Some(raw));
    assert!(err.blocking_files().is_none());
}

#[test]
fn test_line_and_repo_error_display() {
    let invalid: MixError = LineError::InvalidName {
        name: "take 2".to_string(),
    }
    .into();
    insta::assert_snapshot!(invalid.to_string(), @"invalid line name 'take 2': use only letters, digits, '-' and '_'");

    let empty: MixError = RepoError::EmptyMessage.into();
    insta::assert_snapshot!(empty.to_string(), @"commit message must not be empty");
}

#[test]
fn test_mix_error_size() {
    // Box<str> variants (Bailed, Other) are 16 bytes (fat pointer: ptr + len)
    // With discriminant + alignment = 24 bytes
    let size = std::mem::size_of::<MixError>();
    assert!(size <= 24, "MixError is {size} bytes, expected <= 24");
}

#[test]
fn test_mix_result_size() {
    let size = std::mem::size_of::<MixResult<()>>();
    assert!(size <= 24, "MixResult<()> is {size} bytes, expected <= 24");
}
