// mixvault: version lines and snapshots for music projects
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use super::loader::ConfigSource;
use super::{Config, ConfigLoader, PROJECT_CONFIG_FILE};
use crate::logging::LogLevel;
use std::path::Path;

#[test]
fn test_default_config() {
    let config = Config::default();
    assert_eq!(config.global.output_log_level, LogLevel::Warn);
    assert_eq!(config.project.initial_line, "main");
    assert_eq!(config.project.preferred_lines, ["main", "master"]);
    assert!(!config.project.allow_empty_project);
    assert!(config.project.read_only_snapshots);
    assert!(config.noise.filenames.iter().any(|n| n == ".DS_Store"));
    config.validate().expect("defaults must validate");
}

#[test]
fn test_parse_overrides_sections() {
    let config = Config::parse(
        r#"
        [global]
        output_log_level = 4

        [project]
        content_extensions = ["als", "flp"]
        preferred_lines = ["trunk"]
        allow_empty_project = true

        [noise]
        globs = ["**/*.peak"]
        "#,
    )
    .unwrap();

    assert_eq!(config.global.output_log_level, LogLevel::Debug);
    assert_eq!(config.project.content_extensions, ["als", "flp"]);
    assert_eq!(config.project.preferred_lines, ["trunk"]);
    assert!(config.project.allow_empty_project);
    assert_eq!(config.noise.globs, ["**/*.peak"]);
    // untouched sections keep defaults
    assert_eq!(config.project.initial_line, "main");
}

#[test]
fn test_unknown_key_rejected() {
    let result = Config::parse("[project]\nno_such_key = 1\n");
    assert!(result.is_err());
}

#[test]
fn test_invalid_glob_rejected() {
    let err = Config::parse("[noise]\nglobs = [\"[unclosed\"]\n").unwrap_err();
    assert!(
        err.to_string().contains("noise"),
        "error should name the section, got: {err}"
    );
}

#[test]
fn test_empty_extensions_rejected() {
    let err = Config::parse("[project]\ncontent_extensions = []\n").unwrap_err();
    insta::assert_snapshot!(err.to_string(), @"config error: invalid value for 'content_extensions' in section '[project]': must not be empty");
}

#[test]
fn test_content_path_matching() {
    let project = Config::default().project;
    assert!(project.is_content_path(Path::new("Song.als")));
    assert!(project.is_content_path(Path::new("sub/Beat.FLP")));
    assert!(project.is_content_path(Path::new("Album.logicx")));
    assert!(!project.is_content_path(Path::new("kick.wav")));
    assert!(!project.is_content_path(Path::new("als")));
}

#[test]
fn test_loader_reads_project_file() {
    let temp = tempfile::tempdir().unwrap();
    std::fs::write(
        temp.path().join(PROJECT_CONFIG_FILE),
        "[project]\nread_only_snapshots = false\n",
    )
    .unwrap();

    let loader = Config::loader_for(temp.path(), None);
    assert_eq!(
        loader.sources(),
        [ConfigSource::Project(temp.path().join(PROJECT_CONFIG_FILE))]
    );
    let config = loader.build().unwrap();
    assert!(!config.project.read_only_snapshots);
}

#[test]
fn test_loader_missing_required_file_fails() {
    let temp = tempfile::tempdir().unwrap();
    let result = ConfigLoader::new()
        .extra_file(&temp.path().join("missing.toml"))
        .build();
    assert!(result.is_err());
}

#[test]
fn test_loader_absent_project_file_not_listed() {
    let temp = tempfile::tempdir().unwrap();
    let loader = Config::loader_for(temp.path(), None);
    assert!(loader.sources().is_empty());
    assert_eq!(loader.build().unwrap().project.initial_line, "main");
}

#[test]
fn test_config_source_display() {
    let extra = ConfigSource::Extra(std::path::PathBuf::from("studio.toml"));
    insta::assert_snapshot!(extra.to_string(), @"[extra] studio.toml");
    insta::assert_snapshot!(ConfigSource::Inline.to_string(), @"[inline]");
}

#[test]
fn test_format_options_sorted() {
    let options = Config::default().format_options();
    let keys: Vec<&str> = options
        .iter()
        .filter_map(|line| line.split_whitespace().next())
        .collect();
    let mut sorted = keys.clone();
    sorted.sort_unstable();
    assert_eq!(keys, sorted);
    assert!(options.iter().any(|l| l.starts_with("project.initial_line")));
}
