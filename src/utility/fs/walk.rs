// mixvault: version lines and snapshots for music projects
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use crate::error::Result;
use bon::Builder;
use flume::bounded;
use ignore::{WalkBuilder, WalkState};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use tracing::warn;

/// What a project scan skips.
#[derive(Debug, Clone, Default, Builder)]
pub struct WalkOptions {
    /// Directory names never descended into, at any depth.
    #[builder(setters(name = with_skip_dirs), default)]
    skip_dirs: Vec<String>,
}

impl WalkOptions {
    #[must_use]
    pub fn skip_dirs(&self) -> &[String] {
        &self.skip_dirs
    }

    /// Options for scanning a project folder for content.
    ///
    /// Never descends into the given bookkeeping directories. Ignore files
    /// are not consulted: a project file is content even if ignored.
    #[must_use]
    pub fn for_project(skip: &[&str]) -> Self {
        Self::builder()
            .with_skip_dirs(skip.iter().map(|s| (*s).to_string()).collect())
            .build()
    }
}

/// Everything a walk found below its root.
#[derive(Debug, Default)]
pub struct WalkResult {
    files: Vec<PathBuf>,
    directories: Vec<PathBuf>,
    error_count: usize,
}

impl WalkResult {
    #[must_use]
    pub fn files(&self) -> &[PathBuf] {
        &self.files
    }

    /// Directories below the root; the root itself is not listed.
    #[must_use]
    pub fn directories(&self) -> &[PathBuf] {
        &self.directories
    }

    /// Entries that could not be read.
    #[must_use]
    pub const fn error_count(&self) -> usize {
        self.error_count
    }

    /// Files and directories, sorted.
    #[must_use]
    pub fn into_sorted_entries(self) -> Vec<PathBuf> {
        let mut entries = self.files;
        entries.extend(self.directories);
        entries.sort();
        entries
    }
}

/// Walker over `root` without ignore-file filtering. Dot-files are skipped.
pub(super) fn build_walker(root: &Path, options: &WalkOptions) -> WalkBuilder {
    let mut builder = WalkBuilder::new(root);
    builder
        .standard_filters(false)
        .hidden(true)
        .follow_links(false);

    if !options.skip_dirs().is_empty() {
        let skip_dirs: Arc<[String]> = options.skip_dirs().into();
        // evaluated before descending
        builder.filter_entry(move |entry| {
            let is_dir = entry.file_type().is_some_and(|ft| ft.is_dir());
            !(is_dir
                && entry
                    .file_name()
                    .to_str()
                    .is_some_and(|name| skip_dirs.iter().any(|skip| skip == name)))
        });
    }

    builder
}

enum Found {
    File(PathBuf),
    Dir(PathBuf),
}

/// Walks `root` on all cores and collects files and directories.
///
/// Entries stream through one bounded flume channel that a scoped thread
/// drains while the walkers run. Unreadable entries are logged and counted.
///
/// # Errors
///
/// Returns an error if `root` does not exist.
///
/// # Example
/// ```no_run
/// use mixvault::utility::fs::walk::{parallel_walk, WalkOptions};
///
/// let scan = parallel_walk("Song", &WalkOptions::for_project(&[".git"]))?;
/// println!("{} project files", scan.files().len());
/// # Ok::<(), anyhow::Error>(())
/// ```
pub fn parallel_walk<P: AsRef<Path>>(root: P, options: &WalkOptions) -> Result<WalkResult> {
    let root = root.as_ref();
    if !root.exists() {
        anyhow::bail!("cannot scan {}: no such directory", root.display());
    }

    // bounded so a huge sample library never buffers fully
    let (tx, rx) = bounded::<Found>(1024);
    let errors = AtomicUsize::new(0);
    let walker = build_walker(root, options).build_parallel();

    let mut result = std::thread::scope(|scope| {
        let collector = scope.spawn(move || {
            let mut result = WalkResult::default();
            for found in rx {
                match found {
                    Found::File(path) => result.files.push(path),
                    Found::Dir(path) => result.directories.push(path),
                }
            }
            result
        });

        walker.run(|| {
            let tx = tx.clone();
            let errors = &errors;
            Box::new(move |entry| {
                let entry = match entry {
                    Ok(entry) => entry,
                    Err(err) => {
                        warn!(error = %err, "skipping unreadable entry");
                        errors.fetch_add(1, Ordering::Relaxed);
                        return WalkState::Continue;
                    }
                };
                let found = match entry.file_type() {
                    Some(ft) if ft.is_dir() && entry.depth() > 0 => Found::Dir(entry.into_path()),
                    Some(ft) if ft.is_file() => Found::File(entry.into_path()),
                    _ => return WalkState::Continue,
                };
                if tx.send(found).is_err() {
                    return WalkState::Quit;
                }
                WalkState::Continue
            })
        });
        // closes the channel so the collector finishes
        drop(tx);

        collector.join().unwrap_or_default()
    });

    result.error_count += errors.into_inner();
    Ok(result)
}

/// Finds files and directories whose relative path satisfies `matches`.
///
/// # Errors
///
/// Returns an error if the root directory does not exist.
pub fn find_matching<P, F>(root: P, options: &WalkOptions, matches: F) -> Result<Vec<PathBuf>>
where
    P: AsRef<Path>,
    F: Fn(&Path) -> bool,
{
    let root = root.as_ref();
    let entries = parallel_walk(root, options)?.into_sorted_entries();
    Ok(entries
        .into_iter()
        .filter(|path| path.strip_prefix(root).is_ok_and(&matches))
        .collect())
}
