// mixvault: version lines and snapshots for music projects
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Layered configuration sources.
//!
//! ```text
//! <project>/mixvault.toml   optional, skipped when absent
//! --config FILE             required once given
//! inline TOML               tests and Config::parse
//! MIXVAULT_<SECTION>__<KEY> environment, highest priority
//!        |
//!        v
//!    build() --> Config (validated)
//! ```

use config::{Environment, File, FileFormat};
use std::fmt;
use std::path::{Path, PathBuf};

use super::Config;
use crate::error::Result;

/// Keys whose environment values are comma-separated lists.
const LIST_KEYS: [&str; 2] = ["project.content_extensions", "project.preferred_lines"];

/// Where one configuration layer came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// The project's own file, present on disk.
    Project(PathBuf),
    /// A file named on the command line.
    Extra(PathBuf),
    Inline,
}

impl fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Project(path) => write!(f, "[project] {}", path.display()),
            Self::Extra(path) => write!(f, "[extra] {}", path.display()),
            Self::Inline => f.write_str("[inline]"),
        }
    }
}

/// Collects configuration layers; later layers override earlier ones.
pub struct ConfigLoader {
    builder: config::ConfigBuilder<config::builder::DefaultState>,
    env_prefix: Option<String>,
    sources: Vec<ConfigSource>,
}

impl ConfigLoader {
    #[must_use]
    pub fn new() -> Self {
        Self {
            builder: config::Config::builder(),
            env_prefix: None,
            sources: Vec::new(),
        }
    }

    /// Layer the project file if it exists.
    #[must_use]
    pub fn project_file(mut self, path: &Path) -> Self {
        self.builder = self
            .builder
            .add_source(File::from(path).format(FileFormat::Toml).required(false));
        if path.is_file() {
            self.sources.push(ConfigSource::Project(path.to_path_buf()));
        }
        self
    }

    /// Layer a file that must exist; `build` fails otherwise.
    #[must_use]
    pub fn extra_file(mut self, path: &Path) -> Self {
        self.builder = self
            .builder
            .add_source(File::from(path).format(FileFormat::Toml).required(true));
        self.sources.push(ConfigSource::Extra(path.to_path_buf()));
        self
    }

    #[must_use]
    pub fn add_toml_str(mut self, content: &str) -> Self {
        self.builder = self
            .builder
            .add_source(File::from_str(content, FileFormat::Toml));
        self.sources.push(ConfigSource::Inline);
        self
    }

    /// Reads `<PREFIX>_<SECTION>__<KEY>` environment variables.
    #[must_use]
    pub fn with_env_prefix(mut self, prefix: &str) -> Self {
        self.env_prefix = Some(prefix.to_string());
        self
    }

    /// Layers added so far, lowest priority first. The environment is not listed.
    #[must_use]
    pub fn sources(&self) -> &[ConfigSource] {
        &self.sources
    }

    /// Merge every layer, deserialize and validate.
    ///
    /// # Errors
    ///
    /// Returns an error if an extra file is missing, a file is not valid TOML,
    /// a value has the wrong type, or validation fails (bad glob, empty
    /// extension list).
    pub fn build(self) -> Result<Config> {
        let mut builder = self.builder;
        if let Some(prefix) = &self.env_prefix {
            let env = LIST_KEYS.into_iter().fold(
                Environment::with_prefix(prefix)
                    .prefix_separator("_")
                    .separator("__")
                    .list_separator(",")
                    .try_parsing(true),
                |env, key| env.with_list_parse_key(key),
            );
            builder = builder.add_source(env);
        }
        let config: Config = builder.build()?.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}
