// mixvault: version lines and snapshots for music projects
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Version line commands.

use serde::Serialize;

use crate::cli::line::{CreateLineArgs, DeleteLineArgs, LineArgs, LineSubcommand};
use crate::cmd::{Output, Session};
use crate::error::Result;
use crate::git::history::short_id;
use crate::report::OperationReport;

/// Run a `line` subcommand.
///
/// # Errors
///
/// Returns the subcommand's error.
pub fn run_line_command(args: &LineArgs, session: &Session) -> Result<Output> {
    match &args.subcommand {
        LineSubcommand::Create(create) => run_create(create, session),
        LineSubcommand::List => run_list(session),
        LineSubcommand::Delete(delete) => run_delete(delete, session),
    }
}

fn run_create(args: &CreateLineArgs, session: &Session) -> Result<Output> {
    let mut controller = session.controller()?;
    let transition = controller.create_line(&args.name, args.from.as_deref())?;
    let message = transition.created.as_ref().map_or_else(
        || format!("created line '{}'", args.name),
        |created| {
            let mut message = format!(
                "created line '{}' from {}",
                created.name,
                short_id(&created.from)
            );
            if created.placeholder {
                message.push_str(" (no project files there, placeholder added)");
            }
            message
        },
    );
    Ok(OperationReport::from_transition(&transition, message).into())
}

#[derive(Debug, Serialize)]
struct LineView<'a> {
    name: &'a str,
    head: &'a str,
    current: bool,
}

fn run_list(session: &Session) -> Result<Output> {
    let binding = session.open()?;
    let lines = binding.lines()?;
    let current = binding.current_line()?;

    let views: Vec<LineView<'_>> = lines
        .iter()
        .map(|line| LineView {
            name: &line.name,
            head: &line.head,
            current: current.as_deref() == Some(line.name.as_str()),
        })
        .collect();
    let text = views
        .iter()
        .map(|view| {
            let mark = if view.current { '*' } else { ' ' };
            format!("{mark} {:<20} {}", view.name, short_id(view.head))
        })
        .collect();
    Output::listing(text, &views)
}

fn run_delete(args: &DeleteLineArgs, session: &Session) -> Result<Output> {
    let mut controller = session.controller()?;
    let transition = controller.delete_line(&args.name)?;
    Ok(OperationReport::from_transition(&transition, format!("deleted line '{}'", args.name))
        .into())
}
