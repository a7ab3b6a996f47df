// mixvault: version lines and snapshots for music projects
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Role tags for commits.
//!
//! ```text
//! .git/commit_roles.json
//! {
//!   "3f2a9c1...": "main",
//!   "77b01de...": "creative",
//!   "c0ffee0...": "radio edit"
//! }
//! ```
//!
//! The whole map is rewritten on every mutation through a temporary file in
//! the same directory that is then renamed over the sidecar. At most one
//! commit holds [`Role::Main`]. Entries for commits that are no longer
//! reachable are kept.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::io::Write as _;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::error::{FsError, MixResult};

/// Role of a commit.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Role {
    Main,
    Creative,
    Alt,
    /// Free-form label.
    Custom(String),
}

impl Role {
    /// Parse a role typed by the user. Known labels match in any case;
    /// anything else becomes [`Role::Custom`] exactly as given.
    #[must_use]
    pub fn parse(label: &str) -> Self {
        match label.trim().to_ascii_lowercase().as_str() {
            "main" => Self::Main,
            "creative" => Self::Creative,
            "alt" => Self::Alt,
            _ => Self::Custom(label.to_string()),
        }
    }

    /// Read a label from the sidecar. Only the exact lowercase names are
    /// known roles, so a save writes every label back unchanged.
    #[must_use]
    pub fn from_stored(label: String) -> Self {
        match label.as_str() {
            "main" => Self::Main,
            "creative" => Self::Creative,
            "alt" => Self::Alt,
            _ => Self::Custom(label),
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Main => "main",
            Self::Creative => "creative",
            Self::Alt => "alt",
            Self::Custom(label) => label,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Role {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Role {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        String::deserialize(deserializer).map(Self::from_stored)
    }
}

/// Persistent commit id → role map.
#[derive(Debug)]
pub struct RoleTagStore {
    path: PathBuf,
    roles: BTreeMap<String, Role>,
}

impl RoleTagStore {
    /// Load the sidecar at `path`.
    ///
    /// A missing file is an empty map; an unreadable or corrupt one is an
    /// empty map plus a warning.
    #[must_use]
    pub fn load(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let roles = match std::fs::read_to_string(&path) {
            Ok(content) => serde_json::from_str(&content).unwrap_or_else(|e| {
                warn!(path = %path.display(), error = %e, "ignoring corrupt role file");
                BTreeMap::new()
            }),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => {
                warn!(path = %path.display(), error = %e, "cannot read role file");
                BTreeMap::new()
            }
        };
        debug!(path = %path.display(), count = roles.len(), "loaded role tags");
        Self { path, roles }
    }

    /// Sidecar path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Tag `commit_id` with `role`.
    ///
    /// Assigning [`Role::Main`] first removes it from whichever commit held
    /// it; callers confirm that with the user beforehand.
    ///
    /// # Errors
    ///
    /// Returns an `FsError` if the sidecar cannot be written.
    pub fn assign(&mut self, commit_id: &str, role: Role) -> MixResult<()> {
        if role == Role::Main {
            self.roles
                .retain(|id, existing| *existing != Role::Main || id == commit_id);
        }
        self.roles.insert(commit_id.to_string(), role);
        self.save()
    }

    /// Remove the tag of `commit_id`. Returns the removed role.
    ///
    /// # Errors
    ///
    /// Returns an `FsError` if the sidecar cannot be written.
    pub fn clear(&mut self, commit_id: &str) -> MixResult<Option<Role>> {
        let removed = self.roles.remove(commit_id);
        if removed.is_some() {
            self.save()?;
        }
        Ok(removed)
    }

    /// Role of one commit.
    #[must_use]
    pub fn get(&self, commit_id: &str) -> Option<&Role> {
        self.roles.get(commit_id)
    }

    /// Every tag, orphans included.
    #[must_use]
    pub const fn get_all(&self) -> &BTreeMap<String, Role> {
        &self.roles
    }

    /// Commit holding [`Role::Main`], if any.
    #[must_use]
    pub fn main_commit(&self) -> Option<&str> {
        self.roles
            .iter()
            .find(|(_, role)| **role == Role::Main)
            .map(|(id, _)| id.as_str())
    }

    /// Tagged commits not in `reachable`.
    #[must_use]
    pub fn orphaned(&self, reachable: &BTreeSet<String>) -> Vec<&str> {
        self.roles
            .keys()
            .filter(|id| !reachable.contains(*id))
            .map(String::as_str)
            .collect()
    }

    fn save(&self) -> MixResult<()> {
        let dir = self
            .path
            .parent()
            .ok_or_else(|| FsError::NotFound(self.path.display().to_string()))?;
        std::fs::create_dir_all(dir).map_err(|e| FsError::io(dir, e))?;

        let json = serde_json::to_string_pretty(&self.roles)
            .map_err(|e| FsError::io(&self.path, e.into()))?;

        let mut temp = tempfile::NamedTempFile::new_in(dir).map_err(|e| FsError::io(dir, e))?;
        temp.write_all(json.as_bytes())
            .and_then(|()| temp.as_file().sync_all())
            .map_err(|e| FsError::io(temp.path(), e))?;
        temp.persist(&self.path)
            .map_err(|e| FsError::io(&self.path, e.error))?;

        debug!(path = %self.path.display(), count = self.roles.len(), "saved role tags");
        Ok(())
    }
}

#[cfg(test)]
mod tests;
