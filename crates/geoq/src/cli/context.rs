//! Shared context for running CLI commands.

use std::{env, path::PathBuf, process::ExitCode, time::Duration};

use geoq_client::{BasicAuth, Client, ClientOptions};
use geoq_config::Config;

/// Command execution context built once per CLI invocation.
pub struct CommandContext {
    /// Current working directory.
    pub cwd: PathBuf,
    /// Loaded configuration (may be default if no config files found).
    pub config: Config,
    /// Cached backend client for this invocation.
    client: Option<Client>,
}

impl CommandContext {
    /// Loads the current directory and configuration.
    pub fn load() -> Result<Self, ExitCode> {
        let cwd = current_dir_or_failure()?;
        let config = Config::load(&cwd).map_err(|e| {
            eprintln!("error: failed to load configuration: {e}");
            ExitCode::FAILURE
        })?;
        Ok(Self {
            cwd,
            config,
            client: None,
        })
    }

    /// Loads only the current directory, skipping configuration parsing.
    ///
    /// Used for `init`, which should work even when an existing config file
    /// is invalid.
    pub fn load_cwd_only() -> Result<Self, ExitCode> {
        let cwd = current_dir_or_failure()?;
        Ok(Self {
            cwd,
            config: Config::default(),
            client: None,
        })
    }

    /// Returns the backend client, building it on first use.
    ///
    /// Fails with a hint when no backend URL is configured.
    pub fn client(&mut self) -> Result<&Client, ExitCode> {
        if self.client.is_some() {
            return Ok(self.client.as_ref().expect("client checked"));
        }

        let Some(url) = self.config.url.clone() else {
            eprintln!("error: no backend url configured");
            eprintln!("Run 'geoq init' to create a configuration file, or set GEOQ_URL.");
            return Err(ExitCode::FAILURE);
        };

        let options = ClientOptions {
            base_url: url,
            auth: self.config.auth.as_ref().map(|auth| BasicAuth {
                username: auth.username.clone(),
                password: auth.password.clone(),
            }),
            timeout: Duration::from_secs(self.config.timeout_secs),
            retries: self.config.retries,
        };

        match Client::new(options) {
            Ok(client) => {
                self.client = Some(client);
                Ok(self.client.as_ref().expect("client just set"))
            }
            Err(e) => {
                eprintln!("error: failed to build backend client: {e}");
                Err(ExitCode::FAILURE)
            }
        }
    }
}

/// Returns the current working directory or exits with a consistent error.
fn current_dir_or_failure() -> Result<PathBuf, ExitCode> {
    env::current_dir().map_err(|e| {
        eprintln!("error: could not determine current directory: {e}");
        ExitCode::FAILURE
    })
}
