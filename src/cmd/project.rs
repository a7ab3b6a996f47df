// mixvault: version lines and snapshots for music projects
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Project-level commands: init, status, commit, log, checkout, latest, switch.

use serde::Serialize;
use tracing::info;

use crate::classify::DirtyEntry;
use crate::cli::project::{CheckoutArgs, CommitArgs, LatestArgs, LogArgs, SwitchArgs};
use crate::cmd::{Output, Session};
use crate::error::{MixResult, Result};
use crate::git::history::{Commit, short_id};
use crate::layout::{EDITABLE_DIR, roles_path};
use crate::report::{OperationReport, ReportStatus};
use crate::repo::{BindStatus, RepositoryHandle};
use crate::roles::{Role, RoleTagStore};
use crate::transition::{SnapshotTransitionController, Transition, TransitionState};

/// Put the project under version control or reopen it.
///
/// # Errors
///
/// Returns a `RepoError::InvalidRepository` for an unusable folder or a
/// `GitError` from creating the repository.
pub fn run_init_command(session: &Session) -> Result<Output> {
    let (binding, status) = session.bind()?;
    let handle = binding.handle()?;
    let message = match &status {
        BindStatus::Existing => "project already under version control".to_string(),
        BindStatus::Initialized { commit } => {
            format!("version control started with commit {}", short_id(commit))
        }
        BindStatus::Reattached { line } => format!("returned from a snapshot to line '{line}'"),
        BindStatus::Detached { message } => format!("still viewing a snapshot: {message}"),
    };
    info!(root = %binding.root().display(), ?status, "project bound");
    Ok(OperationReport::ok(message)
        .with_line(handle.line().map(String::from))
        .with_commit(handle.head)
        .into())
}

#[derive(Debug, Serialize)]
struct StatusView<'a> {
    handle: &'a RepositoryHandle,
    state: TransitionState,
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<&'a Role>,
    relevant: &'a [DirtyEntry],
    noise: &'a [DirtyEntry],
}

/// Show where the project stands and what is unsaved.
///
/// # Errors
///
/// Returns an error if the project is not bound or `git status` fails.
pub fn run_status_command(session: &Session) -> Result<Output> {
    let controller = session.controller()?;
    let handle = controller.handle();
    let triage = controller.triage()?;
    let roles = RoleTagStore::load(roles_path(session.root()));
    let role = handle.head.as_deref().and_then(|id| roles.get(id));

    let mut lines = vec![format!("Project: {}", handle.path.display())];
    let at = handle.head.as_deref().map_or("no commits yet", short_id);
    let tag = role.map(|r| format!(" ({r})")).unwrap_or_default();
    match (controller.state(), handle.line()) {
        (TransitionState::OnLine, Some(line)) => {
            lines.push(format!("On line '{line}' at {at}{tag}"));
        }
        _ => {
            lines.push(format!("Viewing snapshot {at}{tag}"));
            if session.config().project.read_only_snapshots {
                lines.push("  project files are read-only".to_string());
            }
            if session.config().project.editable_copy {
                lines.push(format!("  an editable copy is in {EDITABLE_DIR}/"));
            }
            lines.push("  `mixvault latest` returns to the line".to_string());
        }
    }

    if triage.is_clean() {
        lines.push("No unsaved changes".to_string());
    }
    if !triage.relevant.is_empty() {
        lines.push("Unsaved changes:".to_string());
        lines.extend(triage.relevant.iter().map(entry_line));
    }
    if !triage.noise.is_empty() {
        lines.push("Noise (discarded on the next transition):".to_string());
        lines.extend(triage.noise.iter().map(entry_line));
    }

    Output::listing(
        lines,
        &StatusView {
            handle,
            state: controller.state(),
            role,
            relevant: &triage.relevant,
            noise: &triage.noise,
        },
    )
}

fn entry_line(entry: &DirtyEntry) -> String {
    format!("  {:<10} {}", entry.kind.to_string(), entry.path.escape_debug())
}

/// Commit every change on the current line.
///
/// # Errors
///
/// Returns an error if the project is not bound, a snapshot is being viewed,
/// or there is nothing to commit.
pub fn run_commit_command(args: &CommitArgs, session: &Session) -> Result<Output> {
    let mut controller = session.controller()?;
    let transition = controller.commit(&args.message())?;
    let short = transition.commit.as_deref().map(short_id).unwrap_or_default();
    Ok(OperationReport::from_transition(&transition, format!("committed {short}")).into())
}

#[derive(Debug, Serialize)]
struct LogEntry<'a> {
    #[serde(flatten)]
    commit: &'a Commit,
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<&'a Role>,
}

/// List commits reachable from the current position, newest first.
///
/// # Errors
///
/// Returns an error if the project is not bound or the history cannot be read.
pub fn run_log_command(args: &LogArgs, session: &Session) -> Result<Output> {
    let binding = session.open()?;
    let history = binding.history(args.limit)?;
    let roles = RoleTagStore::load(roles_path(binding.root()));

    let entries: Vec<LogEntry<'_>> = history
        .iter()
        .map(|commit| LogEntry {
            commit,
            role: roles.get(&commit.id),
        })
        .collect();

    let lines = if entries.is_empty() {
        vec!["No commits yet".to_string()]
    } else {
        entries
            .iter()
            .map(|entry| {
                let commit = entry.commit;
                let tag = entry.role.map(|r| format!(" [{r}]")).unwrap_or_default();
                format!(
                    "{} {} {}{tag}",
                    commit.short_id(),
                    commit.timestamp.with_timezone(&chrono::Local).format("%Y-%m-%d %H:%M"),
                    commit.message
                )
            })
            .collect()
    };
    Output::listing(lines, &entries)
}

/// Open a commit read-only.
///
/// # Errors
///
/// Returns `DirtyStateBlocked` when unsaved changes are in the way and
/// `--set-aside` was not given or declined, or the controller's errors.
pub fn run_checkout_command(args: &CheckoutArgs, session: &Session) -> Result<Output> {
    let mut controller = session.controller()?;
    let transition = match with_set_aside(&mut controller, session, args.set_aside, |c| {
        c.checkout(&args.rev)
    })? {
        Ok(transition) => transition,
        Err(report) => return Ok(report.into()),
    };
    let message = snapshot_message(&transition, session);
    Ok(OperationReport::from_transition(&transition, message).into())
}

/// Return from a snapshot to the latest state of the default line.
///
/// # Errors
///
/// See [`run_checkout_command`].
pub fn run_latest_command(args: &LatestArgs, session: &Session) -> Result<Output> {
    let mut controller = session.controller()?;
    let transition = match with_set_aside(&mut controller, session, args.set_aside, |c| {
        c.return_to_latest()
    })? {
        Ok(transition) => transition,
        Err(report) => return Ok(report.into()),
    };
    let line = transition.handle.line().unwrap_or_default().to_string();
    Ok(OperationReport::from_transition(&transition, format!("back on line '{line}'")).into())
}

/// Switch to another line, offering to create it.
///
/// # Errors
///
/// Returns the controller's errors.
pub fn run_switch_command(args: &SwitchArgs, session: &Session) -> Result<Output> {
    let mut controller = session.controller()?;
    let transition = controller.switch_line(&args.name)?;
    let mut message = match &transition.created {
        Some(created) => format!(
            "created line '{}' from {} and switched to it",
            created.name,
            short_id(&created.from)
        ),
        None => format!("switched to line '{}'", args.name),
    };
    if let Some(backup) = &transition.backup {
        message.push_str(&format!(
            "; unsaved changes stashed, backup in {}",
            backup.display()
        ));
    }
    Ok(OperationReport::from_transition(&transition, message).into())
}

fn snapshot_message(transition: &Transition, session: &Session) -> String {
    let head = transition.handle.head.as_deref().map(short_id).unwrap_or_default();
    let mut message = format!("viewing snapshot {head}");
    if session.config().project.read_only_snapshots {
        message.push_str(" read-only");
    }
    if session.config().project.editable_copy {
        message.push_str(&format!("; editable copy in {EDITABLE_DIR}/"));
    }
    message
}

/// Run `op`; when it is blocked by unsaved changes and `set_aside` is set,
/// confirm, set the changes aside, and run it again.
///
/// The inner `Err` is a report for a declined set-aside.
fn with_set_aside<F>(
    controller: &mut SnapshotTransitionController,
    session: &Session,
    set_aside: bool,
    mut op: F,
) -> MixResult<std::result::Result<Transition, OperationReport>>
where
    F: FnMut(&mut SnapshotTransitionController) -> MixResult<Transition>,
{
    let err = match op(controller) {
        Ok(transition) => return Ok(Ok(transition)),
        Err(err) => err,
    };
    let Some(files) = err.blocking_files().filter(|_| set_aside).map(<[String]>::to_vec) else {
        return Err(err);
    };

    let question = format!(
        "Back up and set aside {} unsaved change(s) before continuing?",
        files.len()
    );
    if !session.confirm(&question) {
        return Ok(Err(OperationReport::new(
            ReportStatus::Cancelled,
            "unsaved changes kept, nothing changed",
        )
        .with_files(files)));
    }

    let aside = controller.set_aside_changes()?;
    if let Some(backup) = &aside.backup {
        info!(backup = %backup.display(), "unsaved changes set aside");
    }
    op(controller).map(Ok)
}
