//! Configuration system for the geoq search panel.
//!
//! geoq uses TOML configuration files named `.geoq.toml`. Configuration is
//! resolved by walking up the directory tree from the current working
//! directory, collecting any `.geoq.toml` files found, then loading
//! `~/.geoq.toml` as the global config with lowest precedence. Credentials
//! are never baked in: the `GEOQ_URL`, `GEOQ_USERNAME` and `GEOQ_PASSWORD`
//! environment variables override anything read from files.

#![warn(missing_docs)]

mod discovery;
mod error;
mod parse;
mod templates;
mod validate;

use std::{
    env, fmt,
    path::{Path, PathBuf},
};

pub use discovery::{CONFIG_FILENAME, discover_config_files, global_config_path, is_global_config};
pub use error::ConfigError;
pub use parse::{RawAuth, RawConfig, RawHttp, RawPanel, parse_config_file, parse_config_str};
use serde::{Deserialize, Serialize};
pub use templates::{global_template, local_template};
pub use validate::ConfigWarning;
use validate::validate_config;

/// Default per-request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Default retry attempts for transient failures.
pub const DEFAULT_RETRIES: u32 = 2;

/// Corner of the map the panel docks to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PanelPosition {
    /// Top-left corner.
    TopLeft,
    /// Top-right corner.
    #[default]
    TopRight,
    /// Bottom-left corner.
    BottomLeft,
    /// Bottom-right corner.
    BottomRight,
}

impl fmt::Display for PanelPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::TopLeft => "top-left",
            Self::TopRight => "top-right",
            Self::BottomLeft => "bottom-left",
            Self::BottomRight => "bottom-right",
        };
        write!(f, "{name}")
    }
}

/// HTTP Basic credentials for the search backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Auth {
    /// Username.
    pub username: String,
    /// Password; may come from `GEOQ_PASSWORD` rather than a file.
    pub password: Option<String>,
}

/// Panel defaults.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PanelSettings {
    /// Corner of the map the panel docks to.
    pub position: PanelPosition,
    /// Index selected when the panel opens.
    pub default_index: Option<String>,
}

/// Top-level merged configuration for geoq.
///
/// This represents the fully resolved configuration after merging all
/// discovered `.geoq.toml` files according to precedence rules and applying
/// environment overrides.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Panel title shown to users.
    pub title: Option<String>,
    /// Base URL of the search backend.
    pub url: Option<String>,
    /// Optional HTTP Basic credentials.
    pub auth: Option<Auth>,
    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
    /// Retry attempts for transient failures.
    pub retries: u32,
    /// Panel defaults.
    pub panel: PanelSettings,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            title: None,
            url: None,
            auth: None,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            retries: DEFAULT_RETRIES,
            panel: PanelSettings::default(),
        }
    }
}

impl Config {
    /// Loads configuration by discovering and merging all relevant
    /// `.geoq.toml` files, then applying environment overrides.
    ///
    /// Returns `Ok(Config::default())` (plus any environment overrides) if
    /// no configuration files are found.
    pub fn load(cwd: &Path) -> Result<Self, ConfigError> {
        let config_files = discover_config_files(cwd);
        let mut config = Self::load_from_files(&config_files)?;
        config.apply_overrides(|key| env::var(key).ok());
        Ok(config)
    }

    /// Loads configuration from a specific list of config file paths.
    ///
    /// Files should be provided in precedence order: highest precedence
    /// first. Environment overrides are NOT applied; this is primarily
    /// useful for testing.
    pub fn load_from_files(files: &[PathBuf]) -> Result<Self, ConfigError> {
        let mut raws = Vec::with_capacity(files.len());
        for path in files {
            raws.push(parse_config_file(path)?);
        }
        Ok(merge_configs(&raws))
    }

    /// Applies `GEOQ_URL`, `GEOQ_USERNAME` and `GEOQ_PASSWORD` overrides
    /// through the provided lookup.
    ///
    /// A username override without an existing auth section creates one.
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(url) = lookup("GEOQ_URL") {
            self.url = Some(url);
        }
        if let Some(username) = lookup("GEOQ_USERNAME") {
            match &mut self.auth {
                Some(auth) => auth.username = username,
                None => {
                    self.auth = Some(Auth {
                        username,
                        password: None,
                    });
                }
            }
        }
        if let Some(password) = lookup("GEOQ_PASSWORD")
            && let Some(auth) = &mut self.auth
        {
            auth.password = Some(password);
        }
    }

    /// Validates the configuration and returns any warnings.
    pub fn validate(&self) -> Vec<ConfigWarning> {
        validate_config(self)
    }
}

/// Merges parsed configs in precedence order (highest precedence first).
///
/// Scalar fields take the first `Some` encountered; section fields merge
/// per-key the same way.
fn merge_configs(raws: &[RawConfig]) -> Config {
    let auth = first(raws, |raw| raw.auth.as_ref()?.username.clone()).map(|username| Auth {
        username,
        password: first(raws, |raw| raw.auth.as_ref()?.password.clone()),
    });

    Config {
        title: first(raws, |raw| raw.title.clone()),
        url: first(raws, |raw| raw.url.clone()),
        auth,
        timeout_secs: first(raws, |raw| raw.http.as_ref()?.timeout_secs)
            .unwrap_or(DEFAULT_TIMEOUT_SECS),
        retries: first(raws, |raw| raw.http.as_ref()?.retries).unwrap_or(DEFAULT_RETRIES),
        panel: PanelSettings {
            position: first(raws, |raw| raw.panel.as_ref()?.position).unwrap_or_default(),
            default_index: first(raws, |raw| raw.panel.as_ref()?.default_index.clone()),
        },
    }
}

/// Returns the first `Some` produced by `pick` across configs in precedence order.
fn first<T>(raws: &[RawConfig], pick: impl Fn(&RawConfig) -> Option<T>) -> Option<T> {
    raws.iter().find_map(pick)
}
