//! GitHub REST client
//!
//! Uses the secrecy crate to protect the token in memory.

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use serde::de::DeserializeOwned;
use std::time::Duration;
use today_pr_core::{config::DEFAULT_API_URL, Config, Error, Result};
use tracing::{debug, trace};

const API_VERSION: &str = "2022-11-28";
const USER_AGENT: &str = "gh-today-pr";

/// Authenticated GET access to the GitHub REST API.
///
/// Paths are relative to the API root, e.g. `repos/org/repo`, and may carry a
/// query string.
#[async_trait]
pub trait RestClient: Send + Sync {
    async fn get(&self, path: &str) -> Result<serde_json::Value>;
}

/// GET `path` and decode the body into `T`
pub async fn get_json<T, C>(client: &C, path: &str) -> Result<T>
where
    T: DeserializeOwned,
    C: RestClient + ?Sized,
{
    let value = client.get(path).await?;
    Ok(serde_json::from_value(value)?)
}

/// Configuration for the HTTP client
#[derive(Debug, Clone)]
pub struct HttpClientConfig {
    /// Base URL for the API
    pub api_url: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            timeout_secs: 30,
        }
    }
}

impl From<&Config> for HttpClientConfig {
    fn from(config: &Config) -> Self {
        Self {
            api_url: config.api_url.clone(),
            timeout_secs: config.timeout_secs,
        }
    }
}

/// REST client talking to the API directly with a token
pub struct HttpClient {
    api_url: String,
    token: SecretString,
    http_client: reqwest::Client,
}

impl HttpClient {
    /// Create a new HTTP client
    pub fn new(token: impl Into<String>, config: HttpClientConfig) -> Result<Self> {
        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| Error::Transport(e.to_string()))?;

        Ok(Self {
            api_url: config.api_url.trim_end_matches('/').to_string(),
            token: SecretString::new(token.into()),
            http_client,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.api_url, path.trim_start_matches('/'))
    }
}

#[async_trait]
impl RestClient for HttpClient {
    async fn get(&self, path: &str) -> Result<serde_json::Value> {
        let url = self.url(path);
        debug!(%url, "GET");

        let response = self
            .http_client
            .get(&url)
            .bearer_auth(self.token.expose_secret())
            .header(reqwest::header::ACCEPT, "application/vnd.github+json")
            .header("X-GitHub-Api-Version", API_VERSION)
            .send()
            .await
            .map_err(|e| Error::Transport(e.to_string()))?;

        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|e| Error::Transport(e.to_string()))?;
        trace!(%url, %status, bytes = body.len(), "Response received");

        if !status.is_success() {
            return Err(Error::Api {
                status: status.to_string(),
                path: path.to_string(),
                message: error_message(&body),
            });
        }

        Ok(serde_json::from_slice(&body)?)
    }
}

/// Pull the `message` field out of a GitHub error body, falling back to the raw text
fn error_message(body: &[u8]) -> String {
    serde_json::from_slice::<serde_json::Value>(body)
        .ok()
        .and_then(|v| v.get("message").and_then(|m| m.as_str()).map(str::to_string))
        .unwrap_or_else(|| String::from_utf8_lossy(body).trim().to_string())
}
