//! Configuration validation.
//!
//! Validates a loaded configuration and reports warnings for potential
//! issues. Warnings are non-fatal: commands that do not reach the backend
//! still work with an incomplete configuration.

use std::fmt;

use crate::Config;

/// A non-fatal warning about the configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigWarning {
    /// No backend URL is configured.
    NoUrlConfigured,
    /// The backend URL does not look like an HTTP endpoint.
    UrlNotHttp {
        /// The configured URL.
        url: String,
    },
    /// A username is configured without any password source.
    UsernameWithoutPassword {
        /// The configured username.
        username: String,
    },
    /// The request timeout is zero.
    ZeroTimeout,
}

impl fmt::Display for ConfigWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoUrlConfigured => {
                write!(f, "no backend url configured")
            }
            Self::UrlNotHttp { url } => {
                write!(f, "backend url '{url}' is not an http(s) endpoint")
            }
            Self::UsernameWithoutPassword { username } => {
                write!(
                    f,
                    "auth username '{username}' has no password; set GEOQ_PASSWORD"
                )
            }
            Self::ZeroTimeout => {
                write!(f, "http timeout_secs is 0; every request will fail")
            }
        }
    }
}

/// Validates the configuration and returns any warnings.
///
/// This checks for:
/// - A missing or non-HTTP backend URL
/// - Credentials missing their password half
/// - A zero request timeout
pub fn validate_config(config: &Config) -> Vec<ConfigWarning> {
    let mut warnings = Vec::new();

    match &config.url {
        None => warnings.push(ConfigWarning::NoUrlConfigured),
        Some(url) => {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                warnings.push(ConfigWarning::UrlNotHttp { url: url.clone() });
            }
        }
    }

    if let Some(auth) = &config.auth
        && auth.password.is_none()
    {
        warnings.push(ConfigWarning::UsernameWithoutPassword {
            username: auth.username.clone(),
        });
    }

    if config.timeout_secs == 0 {
        warnings.push(ConfigWarning::ZeroTimeout);
    }

    warnings
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Auth;

    #[test]
    fn default_config_warns_about_missing_url() {
        let warnings = validate_config(&Config::default());
        assert_eq!(warnings, [ConfigWarning::NoUrlConfigured]);
    }

    #[test]
    fn complete_config_has_no_warnings() {
        let config = Config {
            url: Some("http://localhost:9200".to_string()),
            ..Config::default()
        };
        assert!(validate_config(&config).is_empty());
    }

    #[test]
    fn non_http_url_warns() {
        let config = Config {
            url: Some("localhost:9200".to_string()),
            ..Config::default()
        };
        assert_eq!(
            validate_config(&config),
            [ConfigWarning::UrlNotHttp {
                url: "localhost:9200".to_string()
            }]
        );
    }

    #[test]
    fn username_without_password_warns() {
        let config = Config {
            url: Some("http://localhost:9200".to_string()),
            auth: Some(Auth {
                username: "elastic".to_string(),
                password: None,
            }),
            ..Config::default()
        };
        assert_eq!(
            validate_config(&config),
            [ConfigWarning::UsernameWithoutPassword {
                username: "elastic".to_string()
            }]
        );
    }

    #[test]
    fn zero_timeout_warns() {
        let config = Config {
            url: Some("http://localhost:9200".to_string()),
            timeout_secs: 0,
            ..Config::default()
        };
        assert_eq!(validate_config(&config), [ConfigWarning::ZeroTimeout]);
    }
}
