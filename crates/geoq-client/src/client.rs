//! The shared HTTP layer.

use std::time::Duration;

use reqwest::Method;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, warn};

use crate::error::ClientError;

/// Base delay for the exponential retry backoff.
const BACKOFF_BASE: Duration = Duration::from_millis(250);

/// HTTP Basic credentials.
#[derive(Debug, Clone)]
pub struct BasicAuth {
    /// Username.
    pub username: String,
    /// Password, when one is configured.
    pub password: Option<String>,
}

/// Connection options for [`Client::new`].
#[derive(Debug, Clone)]
pub struct ClientOptions {
    /// Base URL of the backend, e.g. `http://localhost:9200`.
    pub base_url: String,
    /// Optional HTTP Basic credentials.
    pub auth: Option<BasicAuth>,
    /// Per-request timeout.
    pub timeout: Duration,
    /// Retry attempts for transient failures.
    pub retries: u32,
}

impl ClientOptions {
    /// Options with default timeout (30s) and retries (2).
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            auth: None,
            timeout: Duration::from_secs(30),
            retries: 2,
        }
    }
}

/// Client for the search backend.
///
/// Cloning is cheap: the underlying HTTP client is reference-counted.
#[derive(Debug, Clone)]
pub struct Client {
    /// Underlying HTTP client (carries the timeout).
    http: reqwest::Client,
    /// Base URL without a trailing slash.
    base_url: String,
    /// Optional credentials, injected from configuration.
    auth: Option<BasicAuth>,
    /// Retry attempts for transient failures.
    retries: u32,
}

impl Client {
    /// Builds a client from connection options.
    pub fn new(options: ClientOptions) -> Result<Self, ClientError> {
        let http = reqwest::Client::builder()
            .timeout(options.timeout)
            .build()
            .map_err(|source| ClientError::Build { source })?;

        Ok(Self {
            http,
            base_url: options.base_url.trim_end_matches('/').to_string(),
            auth: options.auth,
            retries: options.retries,
        })
    }

    /// The backend base URL, without a trailing slash.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// GETs `path` and decodes the JSON response.
    pub(crate) async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ClientError> {
        self.request_json(Method::GET, path, None).await
    }

    /// POSTs `body` to `path` and decodes the JSON response.
    pub(crate) async fn post_json<T: DeserializeOwned>(
        &self,
        path: &str,
        body: &Value,
    ) -> Result<T, ClientError> {
        self.request_json(Method::POST, path, Some(body)).await
    }

    /// Sends a request, retrying transient failures with exponential backoff.
    async fn request_json<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: Option<&Value>,
    ) -> Result<T, ClientError> {
        let url = format!("{}{}", self.base_url, path);
        let mut attempt: u32 = 0;

        loop {
            debug!(%method, %url, attempt, "backend request");
            match self.send(&method, &url, body).await {
                Ok(text) => {
                    return serde_json::from_str(&text).map_err(|source| ClientError::Decode {
                        url: url.clone(),
                        source,
                    });
                }
                Err(err) if attempt < self.retries && err.is_transient() => {
                    let delay = BACKOFF_BASE * 2u32.saturating_pow(attempt);
                    warn!(%url, %err, ?delay, "transient failure, retrying");
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
                Err(err) => return Err(err),
            }
        }
    }

    /// Sends one request and returns the body text of a success response.
    async fn send(
        &self,
        method: &Method,
        url: &str,
        body: Option<&Value>,
    ) -> Result<String, ClientError> {
        let mut request = self.http.request(method.clone(), url);
        if let Some(auth) = &self.auth {
            request = request.basic_auth(&auth.username, auth.password.as_deref());
        }
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await.map_err(|source| ClientError::Transport {
            url: url.to_string(),
            source,
        })?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|source| ClientError::Transport {
                url: url.to_string(),
                source,
            })?;

        if !status.is_success() {
            return Err(ClientError::Status {
                url: url.to_string(),
                status,
                body: text,
            });
        }

        Ok(text)
    }
}
