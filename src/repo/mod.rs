// mixvault: version lines and snapshots for music projects
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Binding a project folder to its repository.
//!
//! ```text
//! bind(path)
//!   │
//!   ├─ missing / not a dir / install dir / no project file ──> InvalidRepository
//!   │
//!   ├─ repository present ──> attached?  ── yes ──> Existing
//!   │                              └─ no ──> reattach default line
//!   │                                          ├─ ok   ──> Reattached
//!   │                                          └─ fail ──> Detached(message)
//!   │
//!   └─ no repository ──> git init (initial line)
//!                         ──> author identity if unset
//!                         ──> .gitignore
//!                         ──> first commit: project files + .gitignore
//! ```
//!
//! [`RepositoryBinding`] is the only place that talks to the engine for the
//! domain modules: every call shares the environment and error translation
//! of the git backend.

use serde::Serialize;
use std::collections::BTreeSet;
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use crate::config::types::ProjectConfig;
use crate::error::{FsError, MixResult, RepoError, bail_out};
use crate::git::history::{self, Commit, Line};
use crate::git::status::StatusEntry;
use crate::git::{cmd, ops, query, status};
use crate::layout::{CONTROL_DIR, DEFAULT_IGNORE, EDITABLE_DIR, IGNORE_FILE, PLACEHOLDER_FILE};
use crate::utility::fs::perms::set_tree_permissions;
use crate::utility::fs::walk::{WalkOptions, find_matching};

/// Message of the first commit of a new repository.
pub const INITIAL_COMMIT_MESSAGE: &str = "Initial commit";

/// What the working directory currently shows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "name", rename_all = "lowercase")]
pub enum Reference {
    /// Tip of a named line.
    Line(String),
    /// A commit outside any line tip.
    Commit(String),
}

/// Snapshot of repository state, rebuilt from disk after every operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RepositoryHandle {
    pub path: PathBuf,
    pub reference: Reference,
    /// `None` before the first commit.
    pub head: Option<String>,
    pub detached: bool,
}

impl RepositoryHandle {
    /// Current line name when attached.
    #[must_use]
    pub fn line(&self) -> Option<&str> {
        match &self.reference {
            Reference::Line(name) => Some(name),
            Reference::Commit(_) => None,
        }
    }
}

/// How [`RepositoryBinding::bind`] found the folder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum BindStatus {
    /// Existing repository, attached to a line.
    Existing,
    /// New repository with its first commit.
    Initialized { commit: String },
    /// Existing repository found detached and moved back to a line.
    Reattached { line: String },
    /// Existing repository left detached; `message` says why.
    Detached { message: String },
}

/// Connection to the repository of one project folder.
#[derive(Debug, Clone)]
pub struct RepositoryBinding {
    root: PathBuf,
    project: ProjectConfig,
}

impl RepositoryBinding {
    /// Bind `path`, creating a repository when there is none.
    ///
    /// # Errors
    ///
    /// Returns `RepoError::InvalidRepository` if the folder cannot be used
    /// and a `GitError` if initialization fails.
    pub fn bind(path: &Path, project: ProjectConfig) -> MixResult<(Self, BindStatus)> {
        Self::bind_excluding(path, project, default_install_dir().as_deref())
    }

    /// [`bind`](Self::bind) with an explicit installation directory to refuse.
    ///
    /// # Errors
    ///
    /// See [`bind`](Self::bind).
    pub fn bind_excluding(
        path: &Path,
        project: ProjectConfig,
        install_dir: Option<&Path>,
    ) -> MixResult<(Self, BindStatus)> {
        let root = validate_folder(path, install_dir)?;
        let binding = Self { root, project };

        if !binding.project.allow_empty_project && !binding.has_content() {
            return Err(invalid(&binding.root, "no project files found").into());
        }

        let status = if query::is_repo_root(&binding.root) {
            binding.reattach_if_detached()?
        } else {
            let commit = binding.initialize()?;
            BindStatus::Initialized { commit }
        };

        info!(path = %binding.root.display(), ?status, "bound project");
        Ok((binding, status))
    }

    /// Open an existing repository as it is, without reattaching.
    ///
    /// # Errors
    ///
    /// Returns `RepoError::InvalidRepository` if `path` is not a repository root.
    pub fn open(path: &Path, project: ProjectConfig) -> MixResult<Self> {
        let root = validate_folder(path, None)?;
        if !query::is_repo_root(&root) {
            return Err(invalid(&root, "not a mixvault project, run `mixvault init` first").into());
        }
        Ok(Self { root, project })
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    #[must_use]
    pub const fn project(&self) -> &ProjectConfig {
        &self.project
    }

    /// Rebuild the handle from disk.
    ///
    /// # Errors
    ///
    /// Returns a `GitError` if HEAD cannot be read.
    pub fn handle(&self) -> MixResult<RepositoryHandle> {
        let head = history::head_commit(&self.root)?;
        let line = query::current_branch(&self.root)?;
        let (reference, detached) = match (line, &head) {
            (Some(name), _) => (Reference::Line(name), false),
            (None, Some(id)) => (Reference::Commit(id.clone()), true),
            (None, None) => (Reference::Commit(String::new()), true),
        };
        Ok(RepositoryHandle {
            path: self.root.clone(),
            reference,
            head,
            detached,
        })
    }

    /// Line checked out, `None` when detached.
    ///
    /// # Errors
    ///
    /// Returns a `GitError` if HEAD cannot be read.
    pub fn current_line(&self) -> MixResult<Option<String>> {
        query::current_branch(&self.root)
    }

    /// Current HEAD commit, `None` before the first commit.
    ///
    /// # Errors
    ///
    /// Returns a `GitError` if git cannot be run.
    pub fn head_commit(&self) -> MixResult<Option<String>> {
        history::head_commit(&self.root)
    }

    /// Line to return to: the current one if attached, else the first
    /// preferred name that exists, else the first line.
    ///
    /// # Errors
    ///
    /// Returns a `GitError` if lines cannot be listed.
    pub fn get_default_line(&self) -> MixResult<Option<String>> {
        if let Some(current) = self.current_line()? {
            return Ok(Some(current));
        }
        let names: Vec<String> = self.lines()?.into_iter().map(|l| l.name).collect();
        let preferred = self
            .project
            .preferred_lines
            .iter()
            .find(|wanted| names.contains(wanted))
            .cloned();
        Ok(preferred.or_else(|| names.into_iter().next()))
    }

    /// Stage everything and commit.
    ///
    /// # Errors
    ///
    /// Returns `EmptyMessage`, `NoContentFiles` or `NothingToCommit`, or a
    /// `GitError` with the engine's message.
    pub fn commit(&self, message: &str) -> MixResult<String> {
        let message = message.trim();
        if message.is_empty() {
            return Err(RepoError::EmptyMessage.into());
        }
        if !self.has_content() {
            return Err(RepoError::NoContentFiles {
                path: self.root.display().to_string(),
            }
            .into());
        }

        cmd::add_all(&self.root)?;
        if !cmd::has_staged_changes(&self.root)? {
            return Err(RepoError::NothingToCommit.into());
        }
        self.commit_staged(message, false)
    }

    /// Commit whatever is staged.
    pub(crate) fn commit_staged(&self, message: &str, allow_empty: bool) -> MixResult<String> {
        cmd::commit(&self.root, message, allow_empty)?;
        let id = self
            .head_commit()?
            .ok_or_else(|| bail_out("commit did not produce a HEAD"))?;
        info!(commit = %history::short_id(&id), %message, "committed");
        Ok(id)
    }

    /// Stage specific relative paths.
    ///
    /// # Errors
    ///
    /// Returns a `GitError` if `git add` fails.
    pub fn stage(&self, paths: &[&str]) -> MixResult<()> {
        let os: Vec<&OsStr> = paths.iter().map(|p| OsStr::new(*p)).collect();
        cmd::add_paths(&self.root, &os)
    }

    /// All lines, sorted by name.
    ///
    /// # Errors
    ///
    /// Returns a `GitError` if lines cannot be listed.
    pub fn lines(&self) -> MixResult<Vec<Line>> {
        history::lines(&self.root)
    }

    /// Whether a line named `name` exists.
    ///
    /// # Errors
    ///
    /// Returns a `GitError` if lines cannot be listed.
    pub fn line_exists(&self, name: &str) -> MixResult<bool> {
        Ok(self.lines()?.iter().any(|line| line.name == name))
    }

    /// Full id of a commit named by `rev` (id, prefix or line).
    ///
    /// # Errors
    ///
    /// Returns a `GitError` with the engine's message if `rev` is unknown.
    pub fn resolve_commit(&self, rev: &str) -> MixResult<String> {
        history::resolve_commit(&self.root, rev)
    }

    /// Commits of the current reference, newest first.
    ///
    /// # Errors
    ///
    /// Returns a `GitError` if the log cannot be read.
    pub fn history(&self, limit: Option<usize>) -> MixResult<Vec<Commit>> {
        if self.head_commit()?.is_none() {
            return Ok(Vec::new());
        }
        history::log(&self.root, "HEAD", limit)
    }

    /// Tracked paths of a commit.
    ///
    /// # Errors
    ///
    /// Returns a `GitError` if the commit is unknown.
    pub fn commit_files(&self, id: &str) -> MixResult<BTreeSet<String>> {
        history::commit_files(&self.root, id)
    }

    /// Every commit reachable from a line.
    ///
    /// # Errors
    ///
    /// Returns a `GitError` if git cannot be run.
    pub fn reachable_commits(&self) -> MixResult<BTreeSet<String>> {
        history::reachable_commits(&self.root)
    }

    /// Raw working tree changes.
    ///
    /// # Errors
    ///
    /// Returns a `GitError` if `git status` fails.
    pub fn status(&self) -> MixResult<Vec<StatusEntry>> {
        status::status(&self.root)
    }

    /// Throw away the given changes. Returns the discarded paths.
    #[must_use]
    pub fn discard(&self, entries: &[StatusEntry]) -> Vec<String> {
        ops::discard(&self.root, entries)
    }

    /// Set aside all changes.
    ///
    /// # Errors
    ///
    /// Returns a `GitError` if nothing can be stashed or git fails.
    pub fn stash(&self, message: &str) -> MixResult<()> {
        cmd::stash_push(&self.root, message)
    }

    /// Check out a line or commit.
    ///
    /// # Errors
    ///
    /// Returns a `GitError` with the engine's message.
    pub fn checkout(&self, what: &str) -> MixResult<()> {
        cmd::checkout(&self.root, what)
    }

    /// Detach at `rev`, keeping working tree changes.
    ///
    /// # Errors
    ///
    /// Returns a `GitError` with the engine's message.
    pub fn detach(&self, rev: &str) -> MixResult<()> {
        cmd::detach(&self.root, rev)
    }

    /// Create a line at HEAD and check it out.
    ///
    /// # Errors
    ///
    /// Returns a `GitError` with the engine's message.
    pub fn create_branch(&self, name: &str) -> MixResult<()> {
        cmd::create_branch(&self.root, name)
    }

    /// Delete a line.
    ///
    /// # Errors
    ///
    /// Returns a `GitError` with the engine's message.
    pub fn delete_branch(&self, name: &str) -> MixResult<()> {
        cmd::delete_branch(&self.root, name)
    }

    /// Project files and bundles, relative to the root, sorted.
    ///
    /// # Errors
    ///
    /// Returns an error if the folder cannot be walked.
    pub fn content_files(&self) -> crate::error::Result<Vec<PathBuf>> {
        let options = WalkOptions::for_project(&[CONTROL_DIR, EDITABLE_DIR]);
        let found = find_matching(&self.root, &options, |rel| self.project.is_content_path(rel))?;
        Ok(found
            .into_iter()
            .filter_map(|path| path.strip_prefix(&self.root).ok().map(Path::to_path_buf))
            .collect())
    }

    /// Whether a project file or the placeholder is present.
    #[must_use]
    pub fn has_content(&self) -> bool {
        if self.root.join(PLACEHOLDER_FILE).is_file() {
            return true;
        }
        self.content_files().is_ok_and(|files| !files.is_empty())
    }

    /// Flip write permission on every project file. Returns how many were changed.
    ///
    /// Failures are logged and skipped.
    pub fn set_content_read_only(&self, read_only: bool) -> usize {
        let files = match self.content_files() {
            Ok(files) => files,
            Err(e) => {
                warn!(error = %format!("{e:#}"), "cannot list project files");
                return 0;
            }
        };

        let mut changed = 0;
        for rel in &files {
            match set_tree_permissions(&self.root.join(rel), !read_only) {
                Ok(()) => changed += 1,
                Err(e) => warn!(path = %rel.display(), error = %format!("{e:#}"), "cannot change permissions"),
            }
        }
        debug!(changed, read_only, "updated project file permissions");
        changed
    }

    fn reattach_if_detached(&self) -> MixResult<BindStatus> {
        if self.current_line()?.is_some() {
            return Ok(BindStatus::Existing);
        }

        let Some(line) = self.get_default_line()? else {
            return Ok(BindStatus::Detached {
                message: "no version line to return to".to_string(),
            });
        };

        self.set_content_read_only(false);
        match self.checkout(&line) {
            Ok(()) => {
                info!(%line, "reattached to line");
                Ok(BindStatus::Reattached { line })
            }
            Err(e) => {
                let message = e.engine_message().map_or_else(|| e.to_string(), String::from);
                warn!(%line, %message, "could not reattach, staying detached");
                if self.project.read_only_snapshots {
                    self.set_content_read_only(true);
                }
                Ok(BindStatus::Detached { message })
            }
        }
    }

    fn initialize(&self) -> MixResult<String> {
        cmd::init_repo(&self.root, &self.project.initial_line)?;
        self.ensure_identity()?;

        let ignore = self.root.join(IGNORE_FILE);
        if !ignore.exists() {
            std::fs::write(&ignore, DEFAULT_IGNORE)
                .map_err(|e| FsError::io(&ignore, e))?;
        }

        let content = self
            .content_files()
            .map_err(|e| bail_out(format!("{e:#}")))?;
        let mut paths: Vec<&OsStr> = content.iter().map(|p| p.as_os_str()).collect();
        paths.push(OsStr::new(IGNORE_FILE));
        if self.root.join(PLACEHOLDER_FILE).is_file() {
            paths.push(OsStr::new(PLACEHOLDER_FILE));
        }
        cmd::add_paths(&self.root, &paths)?;

        let commit = self.commit_staged(INITIAL_COMMIT_MESSAGE, true)?;
        info!(path = %self.root.display(), files = content.len(), "initialized repository");
        Ok(commit)
    }

    fn ensure_identity(&self) -> MixResult<()> {
        if history::config_value(&self.root, "user.name").is_none() {
            cmd::set_config(&self.root, "user.name", &self.project.author_name)?;
        }
        if history::config_value(&self.root, "user.email").is_none() {
            cmd::set_config(&self.root, "user.email", &self.project.author_email)?;
        }
        Ok(())
    }
}

/// Directory of the running executable.
fn default_install_dir() -> Option<PathBuf> {
    std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(Path::to_path_buf))
}

fn validate_folder(path: &Path, install_dir: Option<&Path>) -> MixResult<PathBuf> {
    if !path.exists() {
        return Err(invalid(path, "does not exist").into());
    }
    if !path.is_dir() {
        return Err(invalid(path, "not a directory").into());
    }
    let root = path
        .canonicalize()
        .map_err(|e| FsError::io(path, e))?;
    if install_dir
        .and_then(|dir| dir.canonicalize().ok())
        .is_some_and(|dir| dir == root)
    {
        return Err(invalid(path, "this is the mixvault installation folder").into());
    }
    // control directory itself
    if root.file_name() == Some(OsStr::new(CONTROL_DIR)) {
        return Err(invalid(path, "inside the version control folder").into());
    }
    Ok(root)
}

fn invalid(path: &Path, reason: &str) -> RepoError {
    RepoError::InvalidRepository {
        path: path.display().to_string(),
        reason: reason.to_string(),
    }
}
