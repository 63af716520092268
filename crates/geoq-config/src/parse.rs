//! Configuration file parsing.
//!
//! Parses individual `.geoq.toml` files into intermediate `RawConfig`
//! structures that preserve the optional nature of all fields before
//! merging.

use std::{fs, path::Path};

use serde::Deserialize;
#[cfg(test)]
use toml::de::Error as TomlError;

use crate::{ConfigError, PanelPosition};

/// Raw configuration as parsed directly from a TOML file.
///
/// All fields are optional to support partial configs that will be merged.
/// This mirrors the TOML schema exactly.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawConfig {
    /// When true, stop discovery here - ignore parent and global configs.
    pub root: Option<bool>,
    /// Panel title shown to users.
    pub title: Option<String>,
    /// Base URL of the search backend.
    pub url: Option<String>,
    /// Authentication section.
    pub auth: Option<RawAuth>,
    /// HTTP behavior section.
    pub http: Option<RawHttp>,
    /// Panel defaults section.
    pub panel: Option<RawPanel>,
}

/// Raw authentication settings.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawAuth {
    /// HTTP Basic username.
    pub username: Option<String>,
    /// HTTP Basic password. Prefer the `GEOQ_PASSWORD` environment variable
    /// over storing this in a file.
    pub password: Option<String>,
}

/// Raw HTTP behavior settings.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawHttp {
    /// Per-request timeout in seconds.
    pub timeout_secs: Option<u64>,
    /// Retry attempts for transient failures.
    pub retries: Option<u32>,
}

/// Raw panel defaults.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawPanel {
    /// Corner of the map the panel docks to.
    pub position: Option<PanelPosition>,
    /// Index selected when the panel opens.
    pub default_index: Option<String>,
}

/// Parses a configuration file from disk.
///
/// Returns a `RawConfig` with all fields as optionals, ready for merging.
pub fn parse_config_file(path: &Path) -> Result<RawConfig, ConfigError> {
    let contents = fs::read_to_string(path).map_err(|source| ConfigError::ReadFile {
        path: path.to_path_buf(),
        source,
    })?;

    parse_config_str(&contents, path)
}

/// Parses configuration from a TOML string.
///
/// The `path` parameter is used for error reporting.
pub fn parse_config_str(contents: &str, path: &Path) -> Result<RawConfig, ConfigError> {
    toml::from_str(contents).map_err(|source| ConfigError::ParseToml {
        path: path.to_path_buf(),
        source,
    })
}

/// Parses configuration from a TOML string without path context.
///
/// Useful for validating template content (tests only).
#[cfg(test)]
pub fn parse_config(contents: &str) -> Result<RawConfig, TomlError> {
    toml::from_str(contents)
}

/// Checks if a config file has `root = true` set.
///
/// This is used during discovery to stop traversal at root configs.
/// Returns false if the file cannot be read or parsed.
pub fn is_root_config(path: &Path) -> bool {
    let Ok(contents) = fs::read_to_string(path) else {
        return false;
    };
    let Ok(config) = toml::from_str::<RawConfig>(&contents) else {
        return false;
    };
    config.root == Some(true)
}
