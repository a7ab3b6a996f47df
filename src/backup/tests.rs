// mixvault: version lines and snapshots for music projects
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use super::*;
use std::collections::BTreeMap;
use tempfile::TempDir;

/// `<temp>/Song` with a project file, a sample folder, a control directory
/// and a scratch copy.
fn project(temp: &TempDir) -> PathBuf {
    let root = temp.path().join("Song");
    fs::create_dir_all(root.join(".git")).unwrap();
    fs::create_dir_all(root.join("Samples")).unwrap();
    fs::create_dir_all(root.join("editable_snapshot")).unwrap();
    fs::write(root.join("song.als"), "v1").unwrap();
    fs::write(root.join("Samples/kick.wav"), "kick").unwrap();
    fs::write(root.join(".git/HEAD"), "ref: refs/heads/main").unwrap();
    fs::write(root.join("editable_snapshot/song.als"), "scratch").unwrap();
    root
}

fn read_tree(dir: &Path) -> BTreeMap<String, Vec<u8>> {
    let mut out = BTreeMap::new();
    let mut stack = vec![dir.to_path_buf()];
    while let Some(current) = stack.pop() {
        for entry in fs::read_dir(&current).unwrap() {
            let path = entry.unwrap().path();
            if path.is_dir() {
                stack.push(path);
            } else {
                let rel = path.strip_prefix(dir).unwrap().to_string_lossy().replace('\\', "/");
                out.insert(rel, fs::read(&path).unwrap());
            }
        }
    }
    out
}

#[test]
fn test_backup_if_needed_copies_content_only() {
    let temp = TempDir::new().unwrap();
    let root = project(&temp);
    let service = SafetyBackupService::new(&root);

    let backup = service.backup_if_needed("abc123").unwrap();
    assert!(backup.created);
    assert_eq!(backup.copied, 2);
    assert_eq!(backup.path, root.join(".git/latest_snapshot/abc123"));

    let files: Vec<String> = read_tree(&backup.path).into_keys().collect();
    assert_eq!(files, ["Samples/kick.wav", "song.als"]);
    assert_eq!(service.snapshots(), ["abc123"]);
}

#[test]
fn test_backup_if_needed_is_idempotent() {
    let temp = TempDir::new().unwrap();
    let root = project(&temp);
    let service = SafetyBackupService::new(&root);

    let first = service.backup_if_needed("abc123").unwrap();
    let before = read_tree(&first.path);

    fs::write(root.join("song.als"), "v2").unwrap();
    let second = service.backup_if_needed("abc123").unwrap();

    assert!(!second.created);
    assert_eq!(read_tree(&second.path), before);
}

#[test]
fn test_restore_snapshot() {
    let temp = TempDir::new().unwrap();
    let root = project(&temp);
    let service = SafetyBackupService::new(&root);
    service.backup_if_needed("abc123").unwrap();

    fs::write(root.join("song.als"), "ruined").unwrap();
    service.restore_snapshot("abc123").unwrap();
    assert_eq!(fs::read_to_string(root.join("song.als")).unwrap(), "v1");

    let err = service.restore_snapshot("fffffff").unwrap_err();
    insta::assert_snapshot!(err.to_string(), @"backup error: no snapshot stored for commit fffffff");
}

#[test]
fn test_backup_unsaved_naming_and_suffix() {
    let temp = TempDir::new().unwrap();
    let root = project(&temp);
    let service = SafetyBackupService::new(&root);

    let first = service.backup_unsaved().unwrap();
    let second = service.backup_unsaved().unwrap();
    assert_ne!(first, second);

    let name = first.file_name().unwrap().to_str().unwrap();
    assert!(name.starts_with("Backup_Song_"));
    // Backup_Song_YYYYmmdd_HHMMSS
    assert_eq!(name.len(), "Backup_Song_".len() + 15);

    let files: Vec<String> = read_tree(&first).into_keys().collect();
    assert_eq!(files, ["Samples/kick.wav", "song.als"]);
    assert_eq!(service.unsaved_backups().unwrap().len(), 2);
}

#[test]
fn test_restore_latest_unsaved() {
    let temp = TempDir::new().unwrap();
    let root = project(&temp);
    let service = SafetyBackupService::new(&root);

    let older = temp.path().join("Backup_Song_20240101_000000");
    fs::create_dir(&older).unwrap();
    fs::write(older.join("song.als"), "old").unwrap();
    let newer = temp.path().join("Backup_Song_20250101_000000");
    fs::create_dir(&newer).unwrap();
    fs::write(newer.join("song.als"), "new").unwrap();
    // Another project's backup is never picked.
    let other = temp.path().join("Backup_Songbook_20990101_000000");
    fs::create_dir(&other).unwrap();

    let restored = service.restore_latest_unsaved().unwrap();
    assert_eq!(restored, newer);
    assert_eq!(fs::read_to_string(root.join("song.als")).unwrap(), "new");
    assert_eq!(fs::read_to_string(root.join("Samples/kick.wav")).unwrap(), "kick");
}

#[test]
fn test_unsaved_backups_ignore_sibling_projects() {
    let temp = TempDir::new().unwrap();
    let root = project(&temp);
    let service = SafetyBackupService::new(&root);

    let mine = temp.path().join("Backup_Song_20250101_000000");
    fs::create_dir(&mine).unwrap();
    fs::write(mine.join("song.als"), "mine").unwrap();
    // Song_v2 shares the `Backup_Song_` prefix and sorts after it.
    let sibling = temp.path().join("Backup_Song_v2_20200101_000000");
    fs::create_dir(&sibling).unwrap();
    fs::write(sibling.join("song.als"), "other project").unwrap();

    assert_eq!(service.unsaved_backups().unwrap(), [mine.clone()]);
    assert_eq!(service.restore_latest_unsaved().unwrap(), mine);
    assert_eq!(fs::read_to_string(root.join("song.als")).unwrap(), "mine");
}

#[test]
fn test_unsaved_backups_order_numeric_suffix() {
    let temp = TempDir::new().unwrap();
    let root = project(&temp);
    for name in [
        "Backup_Song_20250101_000000_10",
        "Backup_Song_20250101_000000",
        "Backup_Song_20250101_000000_2",
    ] {
        fs::create_dir(temp.path().join(name)).unwrap();
    }

    let names: Vec<String> = SafetyBackupService::new(&root)
        .unsaved_backups()
        .unwrap()
        .iter()
        .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
        .collect();
    assert_eq!(
        names,
        [
            "Backup_Song_20250101_000000",
            "Backup_Song_20250101_000000_2",
            "Backup_Song_20250101_000000_10",
        ]
    );
}

#[test]
fn test_restore_latest_unsaved_without_backup() {
    let temp = TempDir::new().unwrap();
    let root = project(&temp);
    let err = SafetyBackupService::new(&root)
        .restore_latest_unsaved()
        .unwrap_err();
    insta::assert_snapshot!(err.to_string(), @"backup error: no backup found for project 'Song'");
}

#[test]
fn test_backup_dir_creation_failure() {
    let temp = TempDir::new().unwrap();
    let root = project(&temp);
    // A file where the snapshot directory should go.
    fs::write(root.join(".git/latest_snapshot"), "").unwrap();

    let err = SafetyBackupService::new(&root)
        .backup_if_needed("abc123")
        .unwrap_err();
    assert!(matches!(err, crate::error::MixError::Backup(_)));
}
