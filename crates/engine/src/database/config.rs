//! Database configuration via `qatrack.toml`
//!
//! On first open, a default `qatrack.toml` is created in the data directory.
//! To change settings, edit the file and reopen.

use qatrack_core::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Config file name placed in the database data directory.
pub const CONFIG_FILE_NAME: &str = "qatrack.toml";

/// When the snapshot file is rewritten
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DurabilityMode {
    /// On flush, shutdown and drop
    Standard,
    /// After every mutating operation, plus everything `Standard` does
    Always,
}

/// Database configuration loaded from `qatrack.toml`.
///
/// # Example
///
/// ```toml
/// database_name = "appdb"
/// durability = "standard"
/// free_project_limit = 1
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackerConfig {
    /// Logical database name; also the snapshot file stem.
    #[serde(default = "default_database_name")]
    pub database_name: String,
    /// Durability mode: `"standard"` or `"always"`.
    #[serde(default = "default_durability_str")]
    pub durability: String,
    /// Projects admitted while on the free plan.
    #[serde(default = "default_free_project_limit")]
    pub free_project_limit: u64,
}

fn default_database_name() -> String {
    "appdb".to_string()
}

fn default_durability_str() -> String {
    "standard".to_string()
}

fn default_free_project_limit() -> u64 {
    1
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            database_name: default_database_name(),
            durability: default_durability_str(),
            free_project_limit: default_free_project_limit(),
        }
    }
}

impl TrackerConfig {
    /// Parse the durability string into a `DurabilityMode`.
    ///
    /// # Errors
    ///
    /// Returns an error if the string is not `"standard"` or `"always"`.
    pub fn durability_mode(&self) -> Result<DurabilityMode> {
        match self.durability.as_str() {
            "standard" => Ok(DurabilityMode::Standard),
            "always" => Ok(DurabilityMode::Always),
            other => Err(Error::invalid_input(format!(
                "Invalid durability mode '{}' in qatrack.toml. Expected \"standard\" or \"always\".",
                other
            ))),
        }
    }

    /// Check every field.
    ///
    /// The database name becomes a file name, so it is restricted to
    /// ASCII alphanumerics, `-` and `_`.
    pub fn validate(&self) -> Result<()> {
        let name_ok = !self.database_name.is_empty()
            && self
                .database_name
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if !name_ok {
            return Err(Error::invalid_input(format!(
                "Invalid database_name '{}' in qatrack.toml. Use letters, digits, '-' or '_'.",
                self.database_name
            )));
        }
        self.durability_mode()?;
        Ok(())
    }

    /// Returns the default config file content with comments.
    pub fn default_toml() -> &'static str {
        r#"# qatrack database configuration
#
# Logical database name. The snapshot is stored as <database_name>.json
# next to this file.
database_name = "appdb"

# Durability mode: "standard" (default) or "always"
#   "standard" = snapshot written on flush and on close
#   "always"   = snapshot written after every change
durability = "standard"

# Number of projects the free plan admits. Upgrading to pro lifts the limit.
free_project_limit = 1
"#
    }

    /// Read and parse config from a file path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, parsed or validated.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::internal(format!(
                "Failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;
        let config: TrackerConfig = toml::from_str(&content).map_err(|e| {
            Error::invalid_input(format!(
                "Failed to parse config file '{}': {}",
                path.display(),
                e
            ))
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Write the default config file if it does not already exist.
    pub fn write_default_if_missing(path: &Path) -> Result<()> {
        if !path.exists() {
            std::fs::write(path, Self::default_toml()).map_err(|e| {
                Error::internal(format!(
                    "Failed to write default config file '{}': {}",
                    path.display(),
                    e
                ))
            })?;
        }
        Ok(())
    }

    /// Serialize this config to TOML and write it to the given path.
    pub fn write_to_file(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| Error::internal(format!("Failed to serialize config: {}", e)))?;
        std::fs::write(path, content).map_err(|e| {
            Error::internal(format!(
                "Failed to write config file '{}': {}",
                path.display(),
                e
            ))
        })
    }
}
