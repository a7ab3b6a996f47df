// mixvault: version lines and snapshots for music projects
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Structured operation results for presentation.
//!
//! ```text
//! Transition ─┐
//! MixError  ──┼──> OperationReport ──> text (stdout/stderr)
//! message   ──┘                   └──> JSON (--json)
//! ```

use serde::Serialize;
use std::fmt;

use crate::error::MixError;
use crate::git::history::short_id;
use crate::transition::{Outcome, Transition};

/// Overall result of an operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportStatus {
    Ok,
    Noop,
    Blocked,
    Cancelled,
    Error,
}

impl fmt::Display for ReportStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Ok => "ok",
            Self::Noop => "noop",
            Self::Blocked => "blocked",
            Self::Cancelled => "cancelled",
            Self::Error => "error",
        })
    }
}

/// What an operation did, in a form any front end can render.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OperationReport {
    pub status: ReportStatus,
    pub message: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub files: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub commit: Option<String>,
}

impl OperationReport {
    #[must_use]
    pub fn new(status: ReportStatus, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
            files: Vec::new(),
            line: None,
            commit: None,
        }
    }

    #[must_use]
    pub fn ok(message: impl Into<String>) -> Self {
        Self::new(ReportStatus::Ok, message)
    }

    #[must_use]
    pub fn with_files(mut self, files: Vec<String>) -> Self {
        self.files = files;
        self
    }

    #[must_use]
    pub fn with_line(mut self, line: Option<String>) -> Self {
        self.line = line;
        self
    }

    #[must_use]
    pub fn with_commit(mut self, commit: Option<String>) -> Self {
        self.commit = commit;
        self
    }

    /// Report a transition; `message` describes a completed one.
    #[must_use]
    pub fn from_transition(transition: &Transition, message: impl Into<String>) -> Self {
        let status = match transition.outcome {
            Outcome::Done => ReportStatus::Ok,
            Outcome::Noop => ReportStatus::Noop,
            Outcome::Cancelled => ReportStatus::Cancelled,
        };
        let message = match transition.outcome {
            Outcome::Done => message.into(),
            Outcome::Noop => "already there, nothing to do".to_string(),
            Outcome::Cancelled => "cancelled".to_string(),
        };
        let handle = &transition.handle;
        Self::new(status, message)
            .with_files(transition.discarded.clone())
            .with_line(handle.line().map(String::from))
            .with_commit(transition.commit.clone().or_else(|| handle.head.clone()))
    }

    /// Report a failure. Blocked transitions list their files; engine
    /// failures carry the engine's message unmodified.
    #[must_use]
    pub fn from_error(err: &anyhow::Error) -> Self {
        let Some(mix) = err.downcast_ref::<MixError>() else {
            return Self::new(ReportStatus::Error, format!("{err:#}"));
        };
        if let Some(files) = mix.blocking_files() {
            return Self::new(ReportStatus::Blocked, "unsaved changes block this operation")
                .with_files(files.to_vec());
        }
        let message = mix
            .engine_message()
            .map_or_else(|| mix.to_string(), String::from);
        Self::new(ReportStatus::Error, message)
    }

    #[must_use]
    pub const fn is_failure(&self) -> bool {
        matches!(self.status, ReportStatus::Blocked | ReportStatus::Error)
    }

    /// Render as a JSON object.
    #[must_use]
    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_else(|e| {
            format!(r#"{{"status":"error","message":"cannot render report: {e}"}}"#)
        })
    }
}

impl fmt::Display for OperationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.status, self.message)?;
        match (&self.line, &self.commit) {
            (Some(line), Some(commit)) => write!(f, " [{line} @ {}]", short_id(commit))?,
            (None, Some(commit)) => write!(f, " [{}]", short_id(commit))?,
            (Some(line), None) => write!(f, " [{line}]")?,
            (None, None) => {}
        }
        for file in &self.files {
            write!(f, "\n  {}", file.escape_debug())?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests;
