// mixvault: version lines and snapshots for music projects
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Commit role commands.
//!
//! Tags live in the control directory; see [`crate::roles`].

use serde::Serialize;
use tracing::info;

use crate::cli::role::{ClearRoleArgs, RoleArgs, RoleSubcommand, SetRoleArgs};
use crate::cmd::{Output, Session};
use crate::error::Result;
use crate::git::history::short_id;
use crate::layout::roles_path;
use crate::report::{OperationReport, ReportStatus};
use crate::roles::{Role, RoleTagStore};

/// Run a `role` subcommand.
///
/// # Errors
///
/// Returns the subcommand's error.
pub fn run_role_command(args: &RoleArgs, session: &Session) -> Result<Output> {
    match &args.subcommand {
        RoleSubcommand::Set(set) => run_set(set, session),
        RoleSubcommand::Clear(clear) => run_clear(clear, session),
        RoleSubcommand::List => run_list(session),
    }
}

fn run_set(args: &SetRoleArgs, session: &Session) -> Result<Output> {
    let binding = session.open()?;
    let id = binding.resolve_commit(&args.rev)?;
    let role = Role::parse(&args.role);
    let mut store = RoleTagStore::load(roles_path(binding.root()));

    let previous_main = store.main_commit().map(String::from);
    if role == Role::Main
        && let Some(previous) = previous_main.as_deref()
        && previous != id
    {
        let question = format!(
            "Commit {} is tagged main. Make {} main instead?",
            short_id(previous),
            short_id(&id)
        );
        if !session.confirm(&question) {
            return Ok(OperationReport::new(ReportStatus::Cancelled, "main role unchanged")
                .with_commit(Some(previous.to_string()))
                .into());
        }
    }

    store.assign(&id, role.clone())?;
    info!(commit = %short_id(&id), %role, "role assigned");
    Ok(OperationReport::ok(format!("tagged {} as {role}", short_id(&id)))
        .with_commit(Some(id))
        .into())
}

fn run_clear(args: &ClearRoleArgs, session: &Session) -> Result<Output> {
    let binding = session.open()?;
    let mut store = RoleTagStore::load(roles_path(binding.root()));
    // orphaned commits no longer resolve; match stored ids by prefix
    let id = binding.resolve_commit(&args.rev).unwrap_or_else(|_| {
        let mut stored = store.get_all().keys().filter(|id| id.starts_with(&args.rev));
        match (stored.next(), stored.next()) {
            (Some(id), None) => id.clone(),
            _ => args.rev.clone(),
        }
    });

    let report = match store.clear(&id)? {
        Some(role) => OperationReport::ok(format!("removed role {role} from {}", short_id(&id))),
        None => OperationReport::new(
            ReportStatus::Noop,
            format!("{} has no role", short_id(&id)),
        ),
    };
    Ok(report.with_commit(Some(id)).into())
}

#[derive(Debug, Serialize)]
struct RoleView<'a> {
    commit: &'a str,
    role: &'a Role,
    orphaned: bool,
}

fn run_list(session: &Session) -> Result<Output> {
    let binding = session.open()?;
    let store = RoleTagStore::load(roles_path(binding.root()));
    let reachable = binding.reachable_commits()?;
    let orphans = store.orphaned(&reachable);

    let views: Vec<RoleView<'_>> = store
        .get_all()
        .iter()
        .map(|(commit, role)| RoleView {
            commit,
            role,
            orphaned: orphans.contains(&commit.as_str()),
        })
        .collect();

    let text = if views.is_empty() {
        vec!["No roles assigned".to_string()]
    } else {
        views
            .iter()
            .map(|view| {
                let note = if view.orphaned { "  (orphaned)" } else { "" };
                format!("{} {}{note}", short_id(view.commit), view.role)
            })
            .collect()
    };
    Output::listing(text, &views)
}
