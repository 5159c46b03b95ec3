//! GitHub API client (via gh CLI)
//!
//! Used when no token is configured: `gh api` reuses the credentials the
//! user already logged in with. A GitHub Enterprise `api_url` is passed on as
//! `--hostname`.

use async_trait::async_trait;
use today_pr_core::{config::DEFAULT_API_URL, Error, Result};
use tokio::process::Command;
use tracing::debug;

use crate::RestClient;

/// REST client shelling out to `gh api`
pub struct GhCliClient {
    program: String,
    hostname: Option<String>,
}

impl Default for GhCliClient {
    fn default() -> Self {
        Self::new()
    }
}

impl GhCliClient {
    pub fn new() -> Self {
        Self::with_program("gh")
    }

    /// Use a different executable in place of `gh`
    pub fn with_program(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            hostname: None,
        }
    }

    /// Client targeting the host behind `api_url`
    pub fn for_api_url(api_url: &str) -> Result<Self> {
        Ok(Self {
            hostname: hostname_for_api_url(api_url)?,
            ..Self::new()
        })
    }

    fn args(&self, path: &str) -> Vec<String> {
        let mut args = vec!["api".to_string()];
        if let Some(hostname) = &self.hostname {
            args.push("--hostname".to_string());
            args.push(hostname.clone());
        }
        args.push(path.to_string());
        args
    }
}

/// Host to pass to `gh --hostname`; `None` for github.com
pub fn hostname_for_api_url(api_url: &str) -> Result<Option<String>> {
    let url = reqwest::Url::parse(api_url)
        .map_err(|e| Error::Config(format!("Invalid api_url {}: {}", api_url, e)))?;
    let host = url
        .host_str()
        .ok_or_else(|| Error::Config(format!("api_url has no host: {}", api_url)))?;

    let default_host = reqwest::Url::parse(DEFAULT_API_URL)
        .ok()
        .and_then(|u| u.host_str().map(str::to_string));
    if host == "github.com" || Some(host) == default_host.as_deref() {
        return Ok(None);
    }

    Ok(Some(match url.port() {
        Some(port) => format!("{}:{}", host, port),
        None => host.to_string(),
    }))
}

#[async_trait]
impl RestClient for GhCliClient {
    async fn get(&self, path: &str) -> Result<serde_json::Value> {
        debug!(program = %self.program, hostname = ?self.hostname, %path, "gh api");

        let output = Command::new(&self.program)
            .args(self.args(path))
            .output()
            .await
            .map_err(|e| Error::Transport(format!("Failed to run {}: {}", self.program, e)))?;

        if !output.status.success() {
            let status = match output.status.code() {
                Some(code) => format!("exit {}", code),
                None => "terminated".to_string(),
            };
            return Err(Error::Api {
                status,
                path: path.to_string(),
                message: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        Ok(serde_json::from_slice(&output.stdout)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hostname_for_github_com() {
        assert_eq!(hostname_for_api_url("https://api.github.com").unwrap(), None);
        assert_eq!(hostname_for_api_url("https://api.github.com/").unwrap(), None);
    }

    #[test]
    fn test_hostname_for_enterprise() {
        assert_eq!(
            hostname_for_api_url("https://ghe.example.com/api/v3").unwrap(),
            Some("ghe.example.com".to_string())
        );
        assert_eq!(
            hostname_for_api_url("http://localhost:8080").unwrap(),
            Some("localhost:8080".to_string())
        );
    }

    #[test]
    fn test_hostname_for_invalid_url() {
        assert!(matches!(
            hostname_for_api_url("not a url"),
            Err(Error::Config(_))
        ));
    }

    #[test]
    fn test_args_without_hostname() {
        let client = GhCliClient::for_api_url("https://api.github.com").unwrap();
        assert_eq!(client.args("user"), vec!["api", "user"]);
    }

    #[test]
    fn test_args_with_hostname() {
        let client = GhCliClient::for_api_url("https://ghe.example.com/api/v3").unwrap();
        assert_eq!(
            client.args("repos/org/repo"),
            vec!["api", "--hostname", "ghe.example.com", "repos/org/repo"]
        );
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_missing_program_is_transport_error() {
        let client = GhCliClient::with_program("gh-today-pr-no-such-program");
        let result = client.get("user").await;
        assert!(matches!(result, Err(Error::Transport(_))));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_failing_program_is_api_error() {
        let client = GhCliClient::with_program("false");
        match client.get("user").await {
            Err(Error::Api { status, path, .. }) => {
                assert_eq!(status, "exit 1");
                assert_eq!(path, "user");
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_non_json_output_is_json_error() {
        // `echo api user` prints "api user"
        let client = GhCliClient::with_program("echo");
        let result = client.get("user").await;
        assert!(matches!(result, Err(Error::Json(_))));
    }
}
