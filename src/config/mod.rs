// mixvault: version lines and snapshots for music projects
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Configuration management for mixvault.
//!
//! # Configuration Hierarchy
//!
//! ```text
//! Priority (low → high)
//! 1. defaults
//! 2. <project>/mixvault.toml
//! 3. --config FILE
//! 4. MIXVAULT_* env vars
//! 5. CLI overrides
//! ```
//!
//! # Environment Variable Mapping
//!
//! ```text
//! MIXVAULT_GLOBAL__OUTPUT_LOG_LEVEL=4       → global.output_log_level = 4
//! MIXVAULT_PROJECT__ALLOW_EMPTY_PROJECT=true → project.allow_empty_project = true
//! MIXVAULT_PROJECT__PREFERRED_LINES=main,take1
//! ```

pub mod loader;
pub mod types;

#[cfg(test)]
mod tests;

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

use crate::error::{ConfigError, MixResult, Result};

use loader::ConfigLoader;
use types::{GlobalConfig, NoiseConfig, ProjectConfig};

/// Name of the per-project configuration file.
pub const PROJECT_CONFIG_FILE: &str = "mixvault.toml";

/// Prefix of configuration environment variables.
pub const ENV_PREFIX: &str = "MIXVAULT";

/// Complete application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Global options.
    pub global: GlobalConfig,
    /// Project recognition and snapshot behavior.
    pub project: ProjectConfig,
    /// Noise classification rules.
    pub noise: NoiseConfig,
}

impl Config {
    /// Create a new configuration builder.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use mixvault::config::Config;
    /// use std::path::Path;
    ///
    /// let config = Config::builder()
    ///     .project_file(Path::new("mixvault.toml"))
    ///     .with_env_prefix("MIXVAULT")
    ///     .build()?;
    /// # Ok::<(), anyhow::Error>(())
    /// ```
    #[must_use]
    pub fn builder() -> ConfigLoader {
        ConfigLoader::new()
    }

    /// Load configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the content is not valid TOML, does not match the
    /// `Config` structure, or fails validation.
    pub fn parse(content: &str) -> Result<Self> {
        Self::builder().add_toml_str(content).build()
    }

    /// Standard loader for a project folder: project file, extra file, environment.
    #[must_use]
    pub fn loader_for(project: &Path, extra: Option<&Path>) -> ConfigLoader {
        let mut loader = Self::builder().project_file(&project.join(PROJECT_CONFIG_FILE));
        if let Some(extra) = extra {
            loader = loader.extra_file(extra);
        }
        loader.with_env_prefix(ENV_PREFIX)
    }

    /// Validate values serde cannot check.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError::InvalidValue` for an empty extension list, an
    /// empty initial line name, or a noise glob that does not compile.
    pub fn validate(&self) -> MixResult<()> {
        if self.project.content_extensions.is_empty() {
            return Err(invalid("project", "content_extensions", "must not be empty").into());
        }
        if self.project.initial_line.trim().is_empty() {
            return Err(invalid("project", "initial_line", "must not be empty").into());
        }
        for pattern in &self.noise.globs {
            if let Err(e) = wax::Glob::new(pattern) {
                return Err(invalid("noise", "globs", &format!("invalid glob '{pattern}': {e}")).into());
            }
        }
        Ok(())
    }

    /// Format configuration options for display.
    ///
    /// Output is deterministically ordered using `BTreeMap`.
    #[must_use]
    pub fn format_options(&self) -> Vec<String> {
        let mut options = BTreeMap::new();
        let list = |items: &[String]| items.join(",");

        options.insert(
            "global.output_log_level".to_string(),
            self.global.output_log_level.to_string(),
        );
        options.insert(
            "global.file_log_level".to_string(),
            self.global.file_log_level.to_string(),
        );
        options.insert(
            "global.log_file".to_string(),
            self.global
                .log_file
                .as_ref()
                .map_or_else(String::new, |p| p.display().to_string()),
        );
        options.insert("global.json_log".to_string(), self.global.json_log.to_string());

        let project = &self.project;
        options.insert(
            "project.content_extensions".to_string(),
            list(&project.content_extensions),
        );
        options.insert(
            "project.preferred_lines".to_string(),
            list(&project.preferred_lines),
        );
        options.insert("project.initial_line".to_string(), project.initial_line.clone());
        options.insert(
            "project.allow_empty_project".to_string(),
            project.allow_empty_project.to_string(),
        );
        options.insert(
            "project.read_only_snapshots".to_string(),
            project.read_only_snapshots.to_string(),
        );
        options.insert(
            "project.editable_copy".to_string(),
            project.editable_copy.to_string(),
        );
        options.insert("project.author_name".to_string(), project.author_name.clone());
        options.insert("project.author_email".to_string(), project.author_email.clone());

        options.insert(
            "noise.filenames".to_string(),
            list(&self.noise.filenames).escape_debug().to_string(),
        );
        options.insert("noise.prefixes".to_string(), list(&self.noise.prefixes));
        options.insert("noise.globs".to_string(), list(&self.noise.globs));

        let max_key_len = options.keys().map(String::len).max().unwrap_or(0);

        options
            .into_iter()
            .map(|(key, value)| format!("{key:<max_key_len$} = {value}"))
            .collect()
    }
}

fn invalid(section: &str, key: &str, message: &str) -> ConfigError {
    ConfigError::InvalidValue {
        section: section.to_string(),
        key: key.to_string(),
        message: message.to_string(),
    }
}
