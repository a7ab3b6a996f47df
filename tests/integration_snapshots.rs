// mixvault: version lines and snapshots for music projects
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Integration tests for snapshot and line transitions.
//!
//! Runs the transition controller, backups and role tags against real
//! temporary repositories.

use mixvault::backup::SafetyBackupService;
use mixvault::config::types::{NoiseConfig, ProjectConfig};
use mixvault::error::MixError;
use mixvault::repo::{Reference, RepositoryBinding};
use mixvault::roles::{Role, RoleTagStore};
use mixvault::transition::{AssumeNo, AssumeYes, Confirm, Outcome, SnapshotTransitionController};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Project type used by these tests: `.x` tracks and `.proj` mixes.
fn project_config() -> ProjectConfig {
    ProjectConfig {
        content_extensions: vec!["x".to_string(), "proj".to_string()],
        ..ProjectConfig::default()
    }
}

struct Project {
    _temp: TempDir,
    root: PathBuf,
}

/// A bound project whose first commit holds `track.x`.
fn project() -> (Project, RepositoryBinding) {
    let temp = tempfile::tempdir().expect("failed to create temp dir");
    let root = temp.path().join("Beat");
    fs::create_dir(&root).unwrap();
    fs::write(root.join("track.x"), "take one").unwrap();
    let (binding, _) = RepositoryBinding::bind(&root, project_config()).unwrap();
    let root = binding.root().to_path_buf();
    (Project { _temp: temp, root }, binding)
}

fn controller(binding: RepositoryBinding, confirm: Box<dyn Confirm>) -> SnapshotTransitionController {
    SnapshotTransitionController::new(binding, &NoiseConfig::default(), confirm).unwrap()
}

fn read_tree(dir: &Path) -> BTreeMap<String, Vec<u8>> {
    let mut tree = BTreeMap::new();
    let mut pending = vec![dir.to_path_buf()];
    while let Some(current) = pending.pop() {
        for entry in fs::read_dir(&current).unwrap() {
            let path = entry.unwrap().path();
            if path.is_dir() {
                pending.push(path);
            } else {
                let rel = path.strip_prefix(dir).unwrap().display().to_string();
                tree.insert(rel, fs::read(&path).unwrap());
            }
        }
    }
    tree
}

// =============================================================================
// Checkout
// =============================================================================

#[test]
fn checkout_current_commit_is_noop() {
    let (_project, binding) = project();
    let head = binding.head_commit().unwrap().unwrap();
    let mut controller = controller(binding, Box::new(AssumeNo));
    let before = controller.handle().clone();

    let result = controller.checkout(&head).unwrap();

    assert_eq!(result.outcome, Outcome::Noop);
    assert_eq!(controller.handle(), &before);
}

#[test]
fn relevant_change_blocks_checkout() {
    let (project, binding) = project();
    let older = binding.head_commit().unwrap().unwrap();
    fs::write(project.root.join("track.x"), "take two").unwrap();
    binding.commit("Second take").unwrap();
    let mut controller = controller(binding, Box::new(AssumeYes));
    let before = controller.handle().clone();

    fs::write(project.root.join("mix.proj"), "faders").unwrap();
    let err = controller.checkout(&older).unwrap_err();

    assert_eq!(err.blocking_files(), Some(&["mix.proj".to_string()][..]));
    assert_eq!(controller.handle(), &before);
    assert_eq!(controller.binding().handle().unwrap(), before);
    assert!(project.root.join("mix.proj").exists());
}

#[test]
fn noise_only_changes_never_block() {
    let (project, binding) = project();
    let older = binding.head_commit().unwrap().unwrap();
    fs::write(project.root.join("track.x"), "take two").unwrap();
    binding.commit("Second take").unwrap();
    let mut controller = controller(binding, Box::new(AssumeNo));

    fs::write(project.root.join("track.x.asd"), "analysis").unwrap();
    let result = controller.checkout(&older).unwrap();
    assert_eq!(result.outcome, Outcome::Done);
    assert_eq!(result.discarded, ["track.x.asd"]);

    fs::create_dir(project.root.join("Ableton Project Info")).unwrap();
    fs::write(project.root.join("Ableton Project Info/cache.cfg"), "c").unwrap();
    let back = controller.return_to_latest().unwrap();
    assert_eq!(back.outcome, Outcome::Done);
    assert_eq!(back.handle.line(), Some("main"));
    assert_eq!(fs::read_to_string(project.root.join("track.x")).unwrap(), "take two");
}

// =============================================================================
// Lines
// =============================================================================

#[test]
fn switch_line_moves_to_its_head() {
    let (_project, binding) = project();
    let mut controller = controller(binding, Box::new(AssumeNo));
    let take2 = controller.create_line("take2", None).unwrap();
    let b = take2.commit.unwrap();
    controller.switch_line("main").unwrap();

    let result = controller.switch_line("take2").unwrap();

    assert_eq!(result.outcome, Outcome::Done);
    let handle = controller.handle();
    assert_eq!(handle.reference, Reference::Line("take2".to_string()));
    assert!(!handle.detached);
    assert_eq!(handle.head.as_deref(), Some(b.as_str()));
}

#[test]
fn create_line_from_empty_ancestor_adds_placeholder() {
    let temp = tempfile::tempdir().unwrap();
    let root = temp.path().join("Sketch");
    fs::create_dir(&root).unwrap();
    let project = ProjectConfig {
        allow_empty_project: true,
        ..project_config()
    };
    let (binding, _) = RepositoryBinding::bind(&root, project).unwrap();
    let empty = binding.head_commit().unwrap().unwrap();
    fs::write(binding.root().join("track.x"), "idea").unwrap();
    binding.commit("First idea").unwrap();

    let mut controller = controller(binding, Box::new(AssumeNo));
    controller.checkout(&empty).unwrap();
    let result = controller.create_line("take2", None).unwrap();

    assert_eq!(controller.handle().line(), Some("take2"));
    let created = result.created.unwrap();
    let files = controller.binding().commit_files(&created.commit).unwrap();
    let source = controller.binding().commit_files(&empty).unwrap();
    assert!(files.is_superset(&source));
    assert!(files.contains(".version_marker"));
    assert!(files.contains("empty_project.placeholder"));
}

#[test]
fn create_line_retry_reports_existing() {
    let (_project, binding) = project();
    let mut controller = controller(binding, Box::new(AssumeNo));
    controller.create_line("take2", None).unwrap();

    let err = controller.create_line("take2", None).unwrap_err();

    assert!(matches!(err, MixError::Line(_)));
    assert_eq!(err.to_string(), "version line 'take2' already exists");
}

// =============================================================================
// Roles and Backups
// =============================================================================

#[test]
fn main_role_held_by_one_commit() {
    let (project, binding) = project();
    let d = binding.head_commit().unwrap().unwrap();
    fs::write(project.root.join("track.x"), "take two").unwrap();
    let c = binding.commit("Second take").unwrap();

    let path = project.root.join(".git/commit_roles.json");
    let mut store = RoleTagStore::load(&path);
    store.assign(&d, Role::Main).unwrap();
    store.assign(&c, Role::Main).unwrap();

    let reloaded = RoleTagStore::load(&path);
    let mains: Vec<&String> = reloaded
        .get_all()
        .iter()
        .filter(|(_, role)| **role == Role::Main)
        .map(|(id, _)| id)
        .collect();
    assert_eq!(mains, [&c]);
    assert_eq!(reloaded.get(&d), None);
}

#[test]
fn snapshot_backup_is_written_once() {
    let (project, binding) = project();
    let head = binding.head_commit().unwrap().unwrap();
    let service = SafetyBackupService::new(&project.root);

    let first = service.backup_if_needed(&head).unwrap();
    let after_first = read_tree(&first.path);
    fs::write(project.root.join("track.x"), "changed since").unwrap();
    let second = service.backup_if_needed(&head).unwrap();

    assert!(first.created);
    assert!(!second.created);
    assert_eq!(read_tree(&second.path), after_first);
    assert_eq!(after_first["track.x"], b"take one");
}
