// mixvault: version lines and snapshots for music projects
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use super::*;
use tempfile::TempDir;

fn store_in(temp: &TempDir) -> RoleTagStore {
    RoleTagStore::load(temp.path().join(".git").join("commit_roles.json"))
}

#[test]
fn test_role_parse() {
    assert_eq!(Role::parse("main"), Role::Main);
    assert_eq!(Role::parse(" Creative "), Role::Creative);
    assert_eq!(Role::parse("ALT"), Role::Alt);
    assert_eq!(Role::parse("radio edit"), Role::Custom("radio edit".to_string()));
    assert_eq!(Role::parse(" dub "), Role::Custom(" dub ".to_string()));
    assert_eq!(Role::Custom("club mix".to_string()).to_string(), "club mix");
}

#[test]
fn test_missing_file_is_empty() {
    let temp = TempDir::new().unwrap();
    let store = store_in(&temp);
    assert!(store.get_all().is_empty());
    assert_eq!(store.main_commit(), None);
}

#[test]
fn test_corrupt_file_is_empty() {
    let temp = TempDir::new().unwrap();
    std::fs::create_dir(temp.path().join(".git")).unwrap();
    std::fs::write(temp.path().join(".git/commit_roles.json"), "{ not json").unwrap();

    let mut store = store_in(&temp);
    assert!(store.get_all().is_empty());

    store.assign("abc", Role::Alt).unwrap();
    assert_eq!(store_in(&temp).get("abc"), Some(&Role::Alt));
}

#[test]
fn test_assign_main_moves_it() {
    let temp = TempDir::new().unwrap();
    let mut store = store_in(&temp);

    store.assign("d", Role::Main).unwrap();
    store.assign("e", Role::Creative).unwrap();
    store.assign("c", Role::Main).unwrap();

    assert_eq!(store.main_commit(), Some("c"));
    assert_eq!(store.get("d"), None);
    assert_eq!(store.get("e"), Some(&Role::Creative));
    let mains = store.get_all().values().filter(|r| **r == Role::Main).count();
    assert_eq!(mains, 1);
}

#[test]
fn test_reassigning_main_to_same_commit() {
    let temp = TempDir::new().unwrap();
    let mut store = store_in(&temp);
    store.assign("c", Role::Main).unwrap();
    store.assign("c", Role::Main).unwrap();
    assert_eq!(store.main_commit(), Some("c"));
    assert_eq!(store.get_all().len(), 1);
}

#[test]
fn test_persisted_format() {
    let temp = TempDir::new().unwrap();
    let mut store = store_in(&temp);
    store.assign("bbb", Role::Custom("radio edit".to_string())).unwrap();
    store.assign("aaa", Role::Main).unwrap();

    let content = std::fs::read_to_string(store.path()).unwrap();
    insta::assert_snapshot!(content, @r#"
    {
      "aaa": "main",
      "bbb": "radio edit"
    }
    "#);
}

#[test]
fn test_hand_edited_labels_survive_unrelated_save() {
    let temp = TempDir::new().unwrap();
    std::fs::create_dir(temp.path().join(".git")).unwrap();
    std::fs::write(
        temp.path().join(".git/commit_roles.json"),
        r#"{"aaa": "MAIN", "bbb": " radio edit "}"#,
    )
    .unwrap();

    let mut store = store_in(&temp);
    assert_eq!(store.get("aaa"), Some(&Role::Custom("MAIN".to_string())));
    store.assign("ccc", Role::Alt).unwrap();

    let content = std::fs::read_to_string(store.path()).unwrap();
    insta::assert_snapshot!(content, @r#"
    {
      "aaa": "MAIN",
      "bbb": " radio edit ",
      "ccc": "alt"
    }
    "#);
}

#[test]
fn test_reload_round_trip() {
    let temp = TempDir::new().unwrap();
    let mut store = store_in(&temp);
    store.assign("aaa", Role::Main).unwrap();
    store.assign("bbb", Role::Alt).unwrap();

    let reloaded = store_in(&temp);
    assert_eq!(reloaded.get_all(), store.get_all());
}

#[test]
fn test_clear() {
    let temp = TempDir::new().unwrap();
    let mut store = store_in(&temp);
    store.assign("aaa", Role::Main).unwrap();

    assert_eq!(store.clear("aaa").unwrap(), Some(Role::Main));
    assert_eq!(store.clear("aaa").unwrap(), None);
    assert!(store_in(&temp).get_all().is_empty());
}

#[test]
fn test_orphans_are_kept_and_reported() {
    let temp = TempDir::new().unwrap();
    let mut store = store_in(&temp);
    store.assign("live", Role::Main).unwrap();
    store.assign("gone", Role::Alt).unwrap();

    let reachable = BTreeSet::from(["live".to_string()]);
    assert_eq!(store.orphaned(&reachable), ["gone"]);
    assert_eq!(store.get_all().len(), 2);
}
