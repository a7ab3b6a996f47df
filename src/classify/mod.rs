// mixvault: version lines and snapshots for music projects
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Dirty file classification.
//!
//! ```text
//! status entries ──> DirtyFileClassifier::classify ──> Triage
//!                        │                               ├─ noise     (discard freely)
//!                        │                               └─ relevant  (must be preserved)
//!                        └─ rules, first match wins:
//!                             name contains '\r'       -> noise
//!                             exact file name          -> noise
//!                             path prefix              -> noise
//!                             glob over relative path  -> noise
//!                             otherwise                -> relevant
//! ```
//!
//! The classifier is pure and holds no state between calls: callers pass a
//! fresh status listing every time.

use serde::Serialize;
use wax::{Glob, Program as _};

use crate::config::types::NoiseConfig;
use crate::git::status::{ChangeKind, StatusEntry};
use crate::layout::{CONTROL_DIR, EDITABLE_DIR, PLACEHOLDER_FILE};

/// Triage outcome for one changed path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Classification {
    Noise,
    Relevant,
}

/// A classified working tree change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DirtyEntry {
    pub path: String,
    pub kind: ChangeKind,
    pub classification: Classification,
}

impl DirtyEntry {
    /// The underlying status entry.
    #[must_use]
    pub fn to_status(&self) -> StatusEntry {
        StatusEntry {
            path: self.path.clone(),
            kind: self.kind,
        }
    }
}

/// Disjoint partition of a status listing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Triage {
    pub noise: Vec<DirtyEntry>,
    pub relevant: Vec<DirtyEntry>,
}

impl Triage {
    /// No changes at all.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.noise.is_empty() && self.relevant.is_empty()
    }

    /// Relevant paths, in listing order.
    #[must_use]
    pub fn relevant_paths(&self) -> Vec<String> {
        self.relevant.iter().map(|e| e.path.clone()).collect()
    }

    /// Noise entries as status entries, ready for discarding.
    #[must_use]
    pub fn noise_entries(&self) -> Vec<StatusEntry> {
        self.noise.iter().map(DirtyEntry::to_status).collect()
    }
}

/// Partitions working tree changes into noise and relevant.
#[derive(Debug, Clone)]
pub struct DirtyFileClassifier {
    filenames: Vec<String>,
    prefixes: Vec<String>,
    globs: Vec<String>,
}

impl DirtyFileClassifier {
    /// Build a classifier from configured rules plus the built-in ones for
    /// mixvault's own files.
    #[must_use]
    pub fn new(rules: &NoiseConfig) -> Self {
        let mut filenames = rules.filenames.clone();
        filenames.push(PLACEHOLDER_FILE.to_string());

        let mut prefixes = rules.prefixes.clone();
        prefixes.push(format!("{CONTROL_DIR}/"));
        prefixes.push(format!("{EDITABLE_DIR}/"));

        Self {
            filenames,
            prefixes,
            globs: rules.globs.clone(),
        }
    }

    /// Classify a single relative path.
    #[must_use]
    pub fn classify_path(&self, path: &str) -> Classification {
        self.classify_with(path, &self.compiled_globs())
    }

    /// Classify a full status listing.
    #[must_use]
    pub fn classify(&self, entries: &[StatusEntry]) -> Triage {
        let globs = self.compiled_globs();
        let mut triage = Triage::default();

        for entry in entries {
            let classification = self.classify_with(&entry.path, &globs);
            let dirty = DirtyEntry {
                path: entry.path.clone(),
                kind: entry.kind,
                classification,
            };
            match classification {
                Classification::Noise => triage.noise.push(dirty),
                Classification::Relevant => triage.relevant.push(dirty),
            }
        }

        triage
    }

    fn compiled_globs(&self) -> Vec<Glob<'_>> {
        // Patterns are validated at config load; anything invalid here is skipped.
        self.globs
            .iter()
            .filter_map(|pattern| Glob::new(pattern).ok())
            .collect()
    }

    fn classify_with(&self, path: &str, globs: &[Glob<'_>]) -> Classification {
        let normalized = path.replace('\\', "/");
        let trimmed = normalized.trim_end_matches('/');
        let file_name = trimmed.rsplit('/').next().unwrap_or(trimmed);

        let is_noise = path.contains('\r')
            || self.filenames.iter().any(|name| name == file_name)
            || self.prefixes.iter().any(|prefix| {
                trimmed.starts_with(prefix.as_str()) || trimmed == prefix.trim_end_matches('/')
            })
            || globs.iter().any(|glob| glob.is_match(trimmed));

        if is_noise {
            Classification::Noise
        } else {
            Classification::Relevant
        }
    }
}
