//! Pull requests found for the day's branches

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A pull request as returned by `repos/{owner}/{repo}/pulls`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PullRequest {
    #[serde(default)]
    pub number: u64,
    pub title: String,
    pub html_url: String,
    /// `open` or `closed`
    #[serde(default)]
    pub state: String,
    /// RFC 3339 creation timestamp, kept verbatim
    #[serde(default)]
    pub created_at: String,
}

impl PullRequest {
    /// Create a pull request with the fields the report displays
    pub fn new(
        title: impl Into<String>,
        html_url: impl Into<String>,
        created_at: impl Into<String>,
    ) -> Self {
        Self {
            number: 0,
            title: title.into(),
            html_url: html_url.into(),
            state: "open".to_string(),
            created_at: created_at.into(),
        }
    }

    /// Parsed creation time; the Unix epoch when the timestamp is unusable
    pub fn created_instant(&self) -> DateTime<Utc> {
        DateTime::parse_from_rfc3339(&self.created_at)
            .map(|t| t.with_timezone(&Utc))
            .unwrap_or_default()
    }
}

/// Sort by creation time, oldest first. Equal timestamps keep their order.
pub fn sort_pull_requests(pulls: &mut [PullRequest]) {
    pulls.sort_by_key(PullRequest::created_instant);
}
